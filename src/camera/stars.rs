use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;
use rand::RngExt;

use super::config::StarConfig;

pub struct StarsPlugin;

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (despawn_stars, spawn_stars)
                .chain()
                .run_if(resource_changed::<StarConfig>),
        );
    }
}

#[derive(Component, Debug)]
struct Star;

fn despawn_stars(mut commands: Commands, stars: Query<Entity, With<Star>>) {
    for entity in &stars {
        commands.entity(entity).despawn();
    }
}

/// Spawn stars with all components at once to avoid archetype changes after spawn
fn spawn_stars(
    mut commands: Commands,
    config: Res<StarConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let inner_radius = config.star_field_inner_radius;
    let outer_radius = inner_radius + config.star_field_depth.max(f32::EPSILON);
    let radius_max = config.star_radius_max.max(config.star_radius_min + f32::EPSILON);

    let mesh = meshes.add(Sphere::new(1.));
    let mut rng = rand::rng();

    for _ in 0..config.star_count {
        let position = star_position(inner_radius, outer_radius, &mut rng);
        let radius = rng.random_range(config.star_radius_min..radius_max);
        let emissive = star_color(&config, &mut rng);

        let material = materials.add(StandardMaterial {
            base_color: Color::BLACK,
            emissive: LinearRgba::new(emissive.x, emissive.y, emissive.z, emissive.w),
            ..default()
        });

        commands.spawn((
            Star,
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform {
                translation: position,
                rotation: Quat::IDENTITY,
                scale: Vec3::splat(radius),
            },
        ));
    }
    debug!("spawned {} stars", config.star_count);
}

/// Uniform point in the spherical shell between the two radii.
fn star_position(inner_radius: f32, outer_radius: f32, rng: &mut impl Rng) -> Vec3 {
    let azimuth = rng.random_range(0.0..1.0_f32) * TAU;
    // uniform in cos(polar) keeps the poles from bunching up
    let polar = 2.0_f32.mul_add(rng.random_range(0.0..1.0_f32), -1.0).acos();
    let radius = rng.random_range(inner_radius..outer_radius);

    Vec3::new(
        radius * azimuth.cos() * polar.sin(),
        radius * azimuth.sin() * polar.sin(),
        radius * polar.cos(),
    )
}

fn star_color(config: &StarConfig, rng: &mut impl Rng) -> Vec4 {
    let end = config.star_color_end.max(f32::EPSILON);
    let color_start = config.star_color_start.clamp(0.0, end * 0.999);
    let white_start = end * config.star_color_white_start_ratio.clamp(0.0, 0.999);

    let start = if rng.random::<f32>() < config.star_color_white_probability {
        white_start
    } else {
        color_start
    };

    let mut color = Vec3::new(
        rng.random_range(start..end),
        rng.random_range(start..end),
        rng.random_range(start..end),
    );

    // dim draws get lifted to 20% above the start of the range
    let min_brightness = (end - start).mul_add(0.2, start);
    let brightness = color.max_element();
    if brightness < min_brightness && brightness > 0.0 {
        color *= min_brightness / brightness;
    }

    color.extend(rng.random_range(start..end))
}
