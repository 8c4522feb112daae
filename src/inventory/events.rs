use bevy::prelude::*;

use super::components::ItemDelta;

/// 调整物品数量（按钮 / CLI 发出）
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct AdjustItemEvent {
    pub id:    String,
    pub delta: ItemDelta,
}

impl AdjustItemEvent {
    pub fn new(id: impl Into<String>, delta: ItemDelta) -> Self {
        Self { id: id.into(), delta }
    }

    pub fn increment(id: impl Into<String>) -> Self {
        Self::new(id, ItemDelta::Increment)
    }

    pub fn decrease(id: impl Into<String>) -> Self {
        Self::new(id, ItemDelta::Decrease)
    }

    pub fn increase_by(id: impl Into<String>, amount: i32) -> Self {
        Self::new(id, ItemDelta::IncreaseBy(amount))
    }
}

/// 某个物品的数量已变化，界面据此刷新计数标签
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct InventoryChanged {
    pub id: String,
}

#[derive(Event)]
pub struct ListInventoryEvent;   // 让 CLI 请求打印背包

#[derive(Event)]
pub struct SaveInventoryEvent;   // 手动落盘
