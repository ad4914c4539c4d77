use bevy::prelude::*;

/// Per-frame ordering: input becomes requests, requests retarget the camera,
/// then the camera and markers animate. A retarget is therefore always fully
/// applied before the tick that reads it.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum GlobeSet {
    Input,
    Selection,
    Animation,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (GlobeSet::Input, GlobeSet::Selection, GlobeSet::Animation).chain(),
        );
    }
}
