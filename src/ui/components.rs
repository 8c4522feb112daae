use bevy::prelude::*;
use std::collections::HashMap;

use crate::inventory::components::ItemDelta;

/// 物品 id → 界面实体。代替按名字在场景里查找
#[derive(Resource, Default, Debug)]
pub struct ItemDisplays {
    pub displays: HashMap<String, Entity>,
    pub labels:   HashMap<String, Entity>,
}

impl ItemDisplays {
    pub fn register_display(&mut self, id: impl Into<String>, entity: Entity) {
        self.displays.insert(id.into(), entity);
    }
}

/// 物品图标（计数标签的父节点）
#[derive(Component, Debug)]
pub struct ItemDisplay;

/// 物品数量标签，名字约定为 `<id>_count`
#[derive(Component, Debug)]
pub struct CounterLabel {
    pub id: String,
}

/// `+` / `-` 按钮
#[derive(Component, Debug, Clone)]
pub struct CounterButton {
    pub id:    String,
    pub delta: ItemDelta,
}

pub fn label_name(id: &str) -> String {
    format!("{id}_count")
}
