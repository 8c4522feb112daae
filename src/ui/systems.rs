use super::components::*;
use crate::core::resources::StoreConfig;
use crate::data::{ItemAssets, schema::ItemCatalog};
use crate::inventory::{components::{Inventory, ItemDelta}, events::*};
use bevy::prelude::*;

const ROW_HEIGHT: f32 = 96.0;
const BUTTON_SIZE: f32 = 48.0;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// 每个目录物品一行：[图标/名字] [-] [+]
pub fn spawn_item_panel(
    mut commands: Commands,
    mut displays: ResMut<ItemDisplays>,
    item_assets: Res<ItemAssets>,
    catalogs: Res<Assets<ItemCatalog>>,
) {
    let Some(catalog) = item_assets.get(&catalogs) else {
        warn!("物品目录未载入，跳过物品面板");
        return;
    };

    let root = commands
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(16.0)),
            row_gap: Val::Px(8.0),
            ..default()
        })
        .id();

    for entry in &catalog.items {
        let row = commands
            .spawn((
                Node {
                    height: Val::Px(ROW_HEIGHT),
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(12.0),
                    ..default()
                },
                ChildOf(root),
            ))
            .id();

        let display = commands
            .spawn((
                Name::new(entry.id.clone()),
                ItemDisplay,
                Node {
                    width: Val::Px(320.0),
                    height: Val::Percent(100.0),
                    align_items: AlignItems::Center,
                    ..default()
                },
                ChildOf(row),
            ))
            .with_child(Text::new(entry.name.clone()))
            .id();
        displays.register_display(entry.id.clone(), display);

        for (symbol, delta) in [("-", ItemDelta::Decrease), ("+", ItemDelta::Increment)] {
            commands
                .spawn((
                    Button,
                    CounterButton { id: entry.id.clone(), delta },
                    Node {
                        width: Val::Px(BUTTON_SIZE),
                        height: Val::Px(BUTTON_SIZE),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    ChildOf(row),
                ))
                .with_child(Text::new(symbol));
        }
    }
}

/// 按钮按下 → 调整数量
pub fn press_counter_buttons(
    buttons: Query<(&Interaction, &CounterButton), Changed<Interaction>>,
    mut ev_adjust: EventWriter<AdjustItemEvent>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            ev_adjust.write(AdjustItemEvent::new(button.id.clone(), button.delta));
        }
    }
}

/// 刷新计数标签：首次刷新时创建并挂到物品图标下，之后只改文字
pub fn refresh_counter_labels(
    mut commands: Commands,
    mut ev_changed: EventReader<InventoryChanged>,
    mut displays: ResMut<ItemDisplays>,
    mut labels: Query<&mut Text, With<CounterLabel>>,
    inventory: Res<Inventory>,
    config: Res<StoreConfig>,
) {
    for ev in ev_changed.read() {
        let Some(count) = inventory.get(&ev.id) else {
            warn!("背包中没有 {}", ev.id);
            continue;
        };

        if let Some(mut text) = displays
            .labels
            .get(&ev.id)
            .and_then(|label| labels.get_mut(*label).ok())
        {
            text.0 = count.to_string();
            continue;
        }

        // 场景里没有对应图标的物品不显示
        let Some(&display) = displays.displays.get(&ev.id) else {
            continue;
        };

        let label = commands
            .spawn((
                Name::new(label_name(&ev.id)),
                CounterLabel { id: ev.id.clone() },
                Text::new(count.to_string()),
                TextFont {
                    font_size: config.font_size,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Left),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(config.label_offset),
                    ..default()
                },
                ChildOf(display),
            ))
            .id();
        displays.labels.insert(ev.id.clone(), label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<InventoryChanged>()
            .add_event::<AdjustItemEvent>()
            .init_resource::<ItemDisplays>()
            .init_resource::<Inventory>()
            .insert_resource(StoreConfig::default())
            .add_systems(Update, (press_counter_buttons, refresh_counter_labels));
        app
    }

    fn labels(app: &mut App) -> Vec<(String, String, Entity)> {
        let mut query = app
            .world_mut()
            .query::<(&CounterLabel, &Text, &ChildOf)>();
        query
            .iter(app.world())
            .map(|(label, text, parent)| (label.id.clone(), text.0.clone(), parent.parent()))
            .collect()
    }

    #[test]
    fn label_is_created_once_then_updated() {
        let mut app = test_app();
        let display = app.world_mut().spawn(ItemDisplay).id();
        app.world_mut()
            .resource_mut::<ItemDisplays>()
            .register_display("apple", display);
        app.world_mut().resource_mut::<Inventory>().increase_by("apple", 3);

        app.world_mut().send_event(InventoryChanged { id: "apple".into() });
        app.update();
        assert_eq!(labels(&mut app), vec![("apple".into(), "3".into(), display)]);

        app.world_mut().resource_mut::<Inventory>().decrease("apple");
        app.world_mut().send_event(InventoryChanged { id: "apple".into() });
        app.update();
        assert_eq!(labels(&mut app), vec![("apple".into(), "2".into(), display)]);

        let label = app.world().resource::<ItemDisplays>().labels["apple"];
        let name = app.world().get::<Name>(label).unwrap();
        assert_eq!(name.as_str(), "apple_count");
    }

    #[test]
    fn items_without_display_get_no_label() {
        let mut app = test_app();
        app.world_mut().resource_mut::<Inventory>().increment("bread");

        app.world_mut().send_event(InventoryChanged { id: "bread".into() });
        app.update();
        assert!(labels(&mut app).is_empty());
        assert!(app.world().resource::<ItemDisplays>().labels.is_empty());
    }

    #[test]
    fn pressed_button_emits_adjustment() {
        let mut app = test_app();
        app.world_mut().spawn((
            CounterButton { id: "apple".into(), delta: ItemDelta::Decrease },
            Interaction::Pressed,
        ));
        app.world_mut().spawn((
            CounterButton { id: "bread".into(), delta: ItemDelta::Increment },
            Interaction::Hovered,
        ));
        app.update();

        let events = app.world().resource::<Events<AdjustItemEvent>>();
        let sent: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(sent, vec![AdjustItemEvent::decrease("apple")]);
    }
}
