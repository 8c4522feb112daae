use anyhow::Context;
use bevy::prelude::*;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

/// 配置文件名，放在工作目录下；不存在时全部取默认值
pub const CONFIG_FILE: &str = "inventory.toml";

/// 背包存储与界面相关的配置（来自 inventory.toml）
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// 可写目录，背包文件放在这里
    pub data_dir: PathBuf,
    pub file_name: String,
    /// 默认物品目录（assets/ 下的相对路径）
    pub catalog: String,
    pub font_size: f32,
    /// 计数标签相对物品图标的水平偏移（像素）
    pub label_offset: f32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("save"),
            file_name: "Inventory.txt".into(),
            catalog: "data/items.ron".into(),
            font_size: 80.0,
            label_offset: 150.0,
        }
    }
}

impl StoreConfig {
    /// 读取配置；文件不存在时返回默认配置
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// 背包文件的完整路径
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
