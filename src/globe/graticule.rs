//! Latitude and longitude lines drawn over the globe surface.

use std::f32::consts::TAU;

use bevy::prelude::*;

use super::Globe;
use super::config::GlobeConfig;
use crate::camera::GeoAngle;
use crate::camera::to_cartesian;
use crate::schedule::GlobeSet;

/// Points per full circle.
const SEGMENTS: u16 = 96;
/// Lifts lines just off the surface so they don't z-fight with it.
const SURFACE_LIFT: f32 = 1.002;

pub struct GraticulePlugin;

impl Plugin for GraticulePlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<GraticuleGizmo>()
            .init_resource::<GraticuleLines>()
            .add_systems(
                Update,
                rebuild_graticule
                    .run_if(resource_changed::<GlobeConfig>)
                    .in_set(GlobeSet::Input),
            )
            .add_systems(Update, draw_graticule.in_set(GlobeSet::Animation));
    }
}

#[derive(Default, Reflect, GizmoConfigGroup)]
struct GraticuleGizmo {}

/// Line strips in the globe's local frame.
#[derive(Resource, Debug, Default)]
struct GraticuleLines(Vec<Vec<Vec3>>);

fn rebuild_graticule(
    config: Res<GlobeConfig>,
    mut lines: ResMut<GraticuleLines>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    lines.0 = graticule_lines(
        config.graticule_step_degrees,
        config.sphere_radius * SURFACE_LIFT,
    );

    let (gizmo_config, _) = config_store.config_mut::<GraticuleGizmo>();
    gizmo_config.line.width = config.graticule_line_width;
}

fn draw_graticule(
    config: Res<GlobeConfig>,
    lines: Res<GraticuleLines>,
    globe: Single<&GlobalTransform, With<Globe>>,
    mut gizmos: Gizmos<GraticuleGizmo>,
) {
    for line in &lines.0 {
        gizmos.linestrip(
            line.iter().map(|point| globe.transform_point(*point)),
            config.graticule_color,
        );
    }
}

/// Parallels every `step_degrees` short of the poles, and meridians every
/// `step_degrees` from pole to pole. A zero step draws nothing.
fn graticule_lines(step_degrees: u16, radius: f32) -> Vec<Vec<Vec3>> {
    if step_degrees == 0 {
        return Vec::new();
    }
    let step = usize::from(step_degrees);
    let fraction = |index: u16, count: u16| f32::from(index) / f32::from(count);

    let parallels = (-90_i16..90).step_by(step).skip(1).map(|latitude| {
        (0..=SEGMENTS)
            .map(|index| {
                let angle = GeoAngle::new(
                    f32::from(latitude).to_radians(),
                    fraction(index, SEGMENTS) * TAU,
                );
                to_cartesian(angle, radius)
            })
            .collect()
    });

    let meridians = (-180_i16..180).step_by(step).map(|longitude| {
        let half = SEGMENTS / 2;
        (0..=half)
            .map(|index| {
                let latitude = (fraction(index, half) - 0.5) * TAU / 2.0;
                let angle = GeoAngle::new(latitude, f32::from(longitude).to_radians());
                to_cartesian(angle, radius)
            })
            .collect()
    });

    parallels.chain(meridians).collect()
}
