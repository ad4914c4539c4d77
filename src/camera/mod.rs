mod angle;
mod animator;
mod cameras;
mod config;
mod constants;
mod controller;
mod projection;
mod stars;

pub use animator::Progress;
use bevy::prelude::*;
pub use cameras::orbit_on_drag;
use cameras::CamerasPlugin;
use config::CameraConfigPlugin;
pub use projection::GeoAngle;
pub use projection::to_cartesian;
use stars::StarsPlugin;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(CamerasPlugin)
            .add_plugins(StarsPlugin);
    }
}
