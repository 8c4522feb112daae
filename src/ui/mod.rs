pub mod components;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use components::ItemDisplays;
use systems::*;

/// 物品面板与计数标签
pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<ItemDisplays>()
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(AppState::InGame), spawn_item_panel)
            .add_systems(
                Update,
                (press_counter_buttons, refresh_counter_labels)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
