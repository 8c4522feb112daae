pub mod codec;
pub mod components;
pub mod events;
pub mod storage;
mod systems;

use bevy::prelude::*;
use crate::core::states::AppState;
use crate::data::catalog_loaded;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<AdjustItemEvent>()
            .add_event::<InventoryChanged>()
            .add_event::<ListInventoryEvent>()
            .add_event::<SaveInventoryEvent>()
            .add_systems(Startup, setup_storage)
            .add_systems(
                Update,
                load_inventory
                    .run_if(in_state(AppState::Loading))
                    .run_if(catalog_loaded),
            )
            .add_systems(OnEnter(AppState::InGame), announce_loaded)
            .add_systems(
                Update,
                (
                    apply_adjustments,
                    save_on_request,
                    print_inventory,
                ).run_if(in_state(AppState::InGame)),
            );
    }
}
