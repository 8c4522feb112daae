use super::{components::*, events::*, storage::*};
use crate::core::{events::LogEvent, resources::StoreConfig, states::AppState};
use crate::data::{ItemAssets, schema::ItemCatalog};
use bevy::prelude::*;

/// 根据配置确定背包文件位置
pub fn setup_storage(mut commands: Commands, config: Res<StoreConfig>) {
    let path = config.record_path();
    info!("背包文件: {}", path.display());
    commands.insert_resource(InventoryFile::new(path));
}

/// 目录就绪后读取背包文件（或首次初始化），然后进入游戏
pub fn load_inventory(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    mut file: ResMut<InventoryFile>,
    item_assets: Res<ItemAssets>,
    catalogs: Res<Assets<ItemCatalog>>,
) {
    let ids: Vec<&str> = item_assets
        .get(&catalogs)
        .map(|catalog| catalog.ids().collect())
        .unwrap_or_default();

    let inventory = match file.load_or_seed(ids.iter().copied()) {
        Ok((inventory, LoadOutcome::Loaded)) => {
            info!("读取背包 {} 项", inventory.len());
            inventory
        }
        Ok((inventory, LoadOutcome::Seeded)) => {
            info!("首次运行，用默认目录初始化 {} 项", inventory.len());
            inventory
        }
        Ok((inventory, LoadOutcome::Recovered { backup })) => {
            error!("背包文件损坏，已备份到 {} 并重新初始化", backup.display());
            inventory
        }
        Err(err) => {
            if err.record_at_risk() {
                // 坏文件没挪走，写盘会把它覆盖
                error!("背包文件损坏且无法备份，本次运行不写盘: {err}");
                file.lock();
            } else {
                error!("背包加载或初始化失败，下一次修改时重试写入: {err}");
            }
            let mut inventory = Inventory::default();
            inventory.seed(ids.iter().copied());
            inventory
        }
    };

    commands.insert_resource(inventory);
    next.set(AppState::InGame);
}

/// 进入游戏时刷新所有计数标签
pub fn announce_loaded(inventory: Res<Inventory>, mut changed: EventWriter<InventoryChanged>) {
    changed.write_batch(
        inventory
            .counts()
            .keys()
            .map(|id| InventoryChanged { id: id.clone() }),
    );
}

/// 处理数量调整：改表 → 通知界面 → 整份落盘
pub fn apply_adjustments(
    mut ev_adjust: EventReader<AdjustItemEvent>,
    mut inventory: ResMut<Inventory>,
    mut changed: EventWriter<InventoryChanged>,
    file: Res<InventoryFile>,
) {
    for ev in ev_adjust.read() {
        let count = inventory.apply(&ev.id, ev.delta);
        debug!("{} {:?} → {}", ev.id, ev.delta, count);
        changed.write(InventoryChanged { id: ev.id.clone() });

        if let Err(err) = file.write(&inventory) {
            error!("保存背包失败: {err}");
        }
    }
}

pub fn save_on_request(
    mut ev_save: EventReader<SaveInventoryEvent>,
    inventory: Res<Inventory>,
    file: Res<InventoryFile>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_save.is_empty() {
        return;
    }
    ev_save.clear();

    match file.write(&inventory) {
        Ok(()) => log.write(LogEvent(format!("已保存到 {}", file.path().display()))),
        Err(err) => log.write(LogEvent(format!("保存失败: {err}"))),
    };
}

/// 打印背包内容
pub fn print_inventory(
    mut ev_list: EventReader<ListInventoryEvent>,
    inventory: Res<Inventory>,
    mut log: EventWriter<LogEvent>,
) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    if inventory.is_empty() {
        log.write(LogEvent("  (empty)".into()));
        return;
    }
    for (id, count) in inventory.counts() {
        log.write(LogEvent(format!("{id} ×{count}")));
    }
}
