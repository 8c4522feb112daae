use bevy::prelude::*;

/// 面向终端的一行输出（CLI 回显、状态报告）
#[derive(Event)]
pub struct LogEvent(pub String);
