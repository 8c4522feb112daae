use bevy::asset::{io::Reader, ron, AssetLoader, LoadContext};
use std::future::Future;
use thiserror::Error;

use super::schema::ItemCatalog;

#[derive(Default)]
pub struct RonCatalogLoader;

#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Invalid item id {0:?}: must be non-empty and free of ',' and ':'")]
    InvalidId(String),
}

/// 解析目录文本；loader 和测试共用
pub fn parse_catalog(bytes: &[u8]) -> Result<ItemCatalog, CatalogLoaderError> {
    let s = std::str::from_utf8(bytes)?;
    let catalog: ItemCatalog = ron::de::from_str(s)?;
    // id 会原样写进背包文件
    if let Some(bad) = catalog
        .items
        .iter()
        .find(|e| e.id.is_empty() || e.id.contains([',', ':']))
    {
        return Err(CatalogLoaderError::InvalidId(bad.id.clone()));
    }
    Ok(catalog)
}

impl AssetLoader for RonCatalogLoader {
    type Asset = ItemCatalog;
    type Settings = ();
    type Error = CatalogLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            parse_catalog(&bytes)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
