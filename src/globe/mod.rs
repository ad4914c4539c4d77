//! The rotating body the camera orbits, with its capital markers.

mod config;
mod graticule;
mod markers;

use bevy::prelude::*;
pub use config::GlobeConfig;
use config::GlobeConfigPlugin;
use graticule::GraticulePlugin;
use markers::MarkersPlugin;

use crate::camera::orbit_on_drag;
use crate::schedule::GlobeSet;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GlobeConfigPlugin)
            .add_plugins(GraticulePlugin)
            .add_plugins(MarkersPlugin)
            .add_systems(Startup, spawn_globe)
            .add_systems(
                Update,
                resize_surface
                    .run_if(resource_changed::<GlobeConfig>)
                    .in_set(GlobeSet::Input),
            )
            .add_systems(Update, spin_globe.in_set(GlobeSet::Input));
    }
}

/// The reference frame of the globe. Markers and the surface are its children,
/// and camera orbit angles are measured in its local space.
#[derive(Component, Debug, Default)]
pub struct Globe;

#[derive(Component, Debug)]
struct GlobeSurface;

fn spawn_globe(
    mut commands: Commands,
    config: Res<GlobeConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let surface_material = materials.add(StandardMaterial {
        base_color: config.surface_color,
        perceptual_roughness: 0.9,
        ..default()
    });

    // pointer drags anywhere on the globe bubble up here
    commands
        .spawn((
            Name::new("Globe"),
            Globe,
            Transform::default(),
            Visibility::default(),
            children![(
                Name::new("Globe Surface"),
                GlobeSurface,
                Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(64, 64))),
                MeshMaterial3d(surface_material),
                Transform::from_scale(Vec3::splat(config.sphere_radius)),
            )],
        ))
        .observe(orbit_on_drag);
}

fn resize_surface(
    config: Res<GlobeConfig>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    surface: Single<(&mut Transform, &MeshMaterial3d<StandardMaterial>), With<GlobeSurface>>,
) {
    let (mut transform, material) = surface.into_inner();
    transform.scale = Vec3::splat(config.sphere_radius);
    if let Some(material) = materials.get_mut(&material.0).as_deref_mut() {
        material.base_color = config.surface_color;
    }
}

fn spin_globe(
    time: Res<Time>,
    config: Res<GlobeConfig>,
    mut globe: Single<&mut Transform, With<Globe>>,
) {
    if config.spin_radians_per_second != 0.0 {
        globe.rotate_y(config.spin_radians_per_second * time.delta_secs());
    }
}
