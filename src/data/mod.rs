pub mod schema;
pub mod loader;

use bevy::asset::LoadState;
use bevy::prelude::*;
use schema::ItemCatalog;
use crate::core::resources::StoreConfig;
use crate::core::states::AppState;

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    pub handle: Option<Handle<ItemCatalog>>,
}

impl ItemAssets {
    /// 目录已载入时返回它
    pub fn get<'a>(&self, catalogs: &'a Assets<ItemCatalog>) -> Option<&'a ItemCatalog> {
        self.handle.as_ref().and_then(|h| catalogs.get(h))
    }
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<ItemCatalog>()
            .register_asset_loader(loader::RonCatalogLoader)
            .init_resource::<ItemAssets>()
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                watch_failed_load.run_if(in_state(AppState::Loading)),
            );
    }
}

/// 运行条件：目录已可用
pub fn catalog_loaded(item_assets: Res<ItemAssets>, catalogs: Res<Assets<ItemCatalog>>) -> bool {
    item_assets.get(&catalogs).is_some()
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut item_assets: ResMut<ItemAssets>,
    asset_server: Res<AssetServer>,
    config: Res<StoreConfig>,
) {
    let handle: Handle<ItemCatalog> = asset_server.load(config.catalog.clone());
    item_assets.handle = Some(handle);
}

/// 目录读取失败时换成空目录，游戏照常进入
fn watch_failed_load(
    mut item_assets: ResMut<ItemAssets>,
    mut catalogs: ResMut<Assets<ItemCatalog>>,
    asset_server: Res<AssetServer>,
) {
    let Some(handle) = &item_assets.handle else {
        return;
    };
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        error!("默认物品目录加载失败，使用空目录: {err}");
        item_assets.handle = Some(catalogs.add(ItemCatalog { items: Vec::new() }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::app::TaskPoolPlugin;

    #[test]
    fn failed_catalog_load_falls_back_to_empty() {
        let mut app = App::new();
        app.add_plugins((TaskPoolPlugin::default(), AssetPlugin::default()))
            .init_asset::<ItemCatalog>()
            .register_asset_loader(loader::RonCatalogLoader)
            .init_resource::<ItemAssets>()
            .add_systems(Update, watch_failed_load);

        let handle: Handle<ItemCatalog> = app
            .world()
            .resource::<AssetServer>()
            .load("data/does_not_exist.ron");
        app.world_mut().resource_mut::<ItemAssets>().handle = Some(handle);

        // 读取在后台线程完成，多跑几帧等它失败
        for _ in 0..500 {
            app.update();
            let assets = app.world().resource::<ItemAssets>();
            if assets.get(app.world().resource::<Assets<ItemCatalog>>()).is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let assets = app.world().resource::<ItemAssets>();
        let catalog = assets
            .get(app.world().resource::<Assets<ItemCatalog>>())
            .expect("empty catalog swapped in");
        assert!(catalog.items.is_empty());
    }
}
