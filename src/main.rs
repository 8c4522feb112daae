use anyhow::Context;
use bevy::prelude::*;
use std::path::Path;

mod core;
mod data;
mod interface;
mod inventory;
mod ui;

use crate::core::CorePlugin;
use crate::core::resources::{CONFIG_FILE, StoreConfig};
use crate::core::states;
use crate::interface::debug_cli::DebugCliPlugin;

fn main() -> anyhow::Result<()> {
    let config = StoreConfig::load(Path::new(CONFIG_FILE)).context("loading configuration")?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Inventory".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin { config })
        .add_plugins(DebugCliPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(inventory::InventoryPlugin)
        .add_plugins(ui::UiPlugin)
        .add_systems(Update, forward_log_event)
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();

    Ok(())
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
