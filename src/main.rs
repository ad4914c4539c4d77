//! Capital Globe - an interactive 3D globe of world capitals built with Bevy
//!
//! Click a capital marker or a row of the capitals list, or step through the
//! list with the arrow keys, and the camera eases into orbit above it. Click it again or press `Escape` to
//! pull back out. Drag the globe to look around while the camera is at rest.
//! F1, F2 and F3 open the camera, globe and star inspectors, and Bevy Remote Protocol
//! (BRP) is available for debugging.

mod camera;
mod capitals;
mod capitals_list;
mod globe;
mod hud;
mod schedule;
mod selection;

use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::camera::CameraPlugin;
use crate::capitals::CapitalsPlugin;
use crate::capitals_list::CapitalsListPlugin;
use crate::globe::GlobePlugin;
use crate::hud::HudPlugin;
use crate::schedule::SchedulePlugin;
use crate::selection::SelectionPlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "capital globe".to_string()
    } else {
        format!("capital globe - {effective_port}")
    };

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        MeshPickingPlugin,
        EguiPlugin::default(),
        brp_plugin,
        CameraPlugin,
        CapitalsPlugin,
        CapitalsListPlugin,
        GlobePlugin,
        HudPlugin,
        SchedulePlugin,
        SelectionPlugin,
    ))
    .run();
}
