use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde_derive::Deserialize;

/// 默认物品目录中的一项
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ItemEntry {
    pub id:   String,
    pub name: String,
}

/// 随游戏打包的默认物品目录，首次运行时用来初始化背包
#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemCatalog {
    pub items: Vec<ItemEntry>,
}

impl ItemCatalog {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|e| e.id.as_str())
    }
}
