use bevy::prelude::*;

use crate::capitals::Capital;
use crate::capitals::Capitals;
use crate::schedule::GlobeSet;
use crate::selection::Focus;

const LABEL_MARGIN: f32 = 16.0;
const LABEL_FONT_SIZE: f32 = 22.0;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_focus_label).add_systems(
            Update,
            update_focus_label
                .run_if(resource_changed::<Focus>)
                .in_set(GlobeSet::Animation),
        );
    }
}

/// Names the capital under the pointer, or the focused one.
#[derive(Component, Debug)]
struct FocusLabel;

fn spawn_focus_label(mut commands: Commands) {
    commands.spawn((
        Name::new("Focus Label"),
        FocusLabel,
        Text::new(""),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(LABEL_MARGIN),
            bottom: Val::Px(LABEL_MARGIN),
            ..default()
        },
    ));
}

fn update_focus_label(
    focus: Res<Focus>,
    capitals: Res<Capitals>,
    mut label: Single<&mut Text, With<FocusLabel>>,
) {
    label.0 = label_text(*focus, &capitals);
}

fn describe(capital: &Capital) -> String { format!("{}, {}", capital.city, capital.country) }

/// Hover wins so the label follows the pointer; empty in a plain overview.
fn label_text(focus: Focus, capitals: &Capitals) -> String {
    focus
        .hovered
        .or(focus.focused)
        .and_then(|index| capitals.get(index))
        .map(describe)
        .unwrap_or_default()
}
