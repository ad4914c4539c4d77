//! One marker per capital on the globe surface.

use bevy::prelude::*;

use super::Globe;
use super::config::GlobeConfig;
use super::config::MARKER_SCALE_EASING;
use crate::camera::GeoAngle;
use crate::camera::Progress;
use crate::camera::to_cartesian;
use crate::capitals::Capitals;
use crate::schedule::GlobeSet;
use crate::selection::CapitalIndex;
use crate::selection::Focus;
use crate::selection::Highlight;
use crate::selection::hover_on_over;
use crate::selection::select_on_click;
use crate::selection::unhover_on_out;

pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_markers.after(super::spawn_globe))
            .add_systems(
                Update,
                apply_globe_config
                    .run_if(resource_changed::<GlobeConfig>)
                    .in_set(GlobeSet::Input),
            )
            .add_systems(
                Update,
                (highlight_markers, retarget_marker_scale)
                    .run_if(resource_changed::<Focus>)
                    .in_set(GlobeSet::Animation),
            )
            .add_systems(
                Update,
                animate_marker_scale
                    .after(retarget_marker_scale)
                    .in_set(GlobeSet::Animation),
            );
    }
}

#[derive(Component, Debug, Clone, Copy)]
struct Marker {
    angle: GeoAngle,
}

#[derive(Resource, Debug, Clone)]
struct MarkerMaterials {
    idle:    Handle<StandardMaterial>,
    hovered: Handle<StandardMaterial>,
    focused: Handle<StandardMaterial>,
}

impl MarkerMaterials {
    fn handle(&self, highlight: Highlight) -> Handle<StandardMaterial> {
        match highlight {
            Highlight::Idle => self.idle.clone(),
            Highlight::Hovered => self.hovered.clone(),
            Highlight::Focused => self.focused.clone(),
        }
    }
}

/// Shared size multiplier for all markers, eased between the overview and
/// focused sizes.
#[derive(Resource, Debug, Clone, Copy)]
struct MarkerScale {
    current: f32,
    target:  f32,
    tween:   Option<(f32, Progress)>,
}

impl MarkerScale {
    const fn new(scale: f32) -> Self {
        Self {
            current: scale,
            target:  scale,
            tween:   None,
        }
    }

    /// Starts easing from the live size unless `target` is already the goal.
    fn retarget(&mut self, target: f32, duration_secs: f32) {
        if (target - self.target).abs() <= f32::EPSILON {
            return;
        }
        self.target = target;
        self.tween = Some((self.current, Progress::new(duration_secs, MARKER_SCALE_EASING)));
    }

    /// Returns the new size while easing, `None` once at rest.
    fn tick(&mut self, delta_secs: f32) -> Option<f32> {
        let (start, progress) = self.tween.as_mut()?;
        progress.advance(delta_secs);
        self.current = (self.target - *start).mul_add(progress.eased(), *start);
        if progress.is_finished() {
            self.current = self.target;
            self.tween = None;
        }
        Some(self.current)
    }
}

fn marker_transform(angle: GeoAngle, config: &GlobeConfig, scale: f32) -> Transform {
    // markers are discs in the XY plane, so facing the center turns them outward
    Transform::from_translation(to_cartesian(angle, config.marker_height()))
        .looking_at(Vec3::ZERO, Vec3::Y)
        .with_scale(Vec3::splat(config.marker_radius * scale))
}

fn spawn_markers(
    mut commands: Commands,
    capitals: Res<Capitals>,
    config: Res<GlobeConfig>,
    focus: Res<Focus>,
    globe: Single<Entity, With<Globe>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let unlit = |color: Color| StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    };
    let marker_materials = MarkerMaterials {
        idle:    materials.add(unlit(config.marker_color)),
        hovered: materials.add(unlit(config.marker_hover_color)),
        focused: materials.add(unlit(config.marker_focus_color)),
    };
    let mesh = meshes.add(Circle::new(1.0));
    let scale = config.marker_scale(focus.focused.is_some());

    commands.entity(*globe).with_children(|parent| {
        for (index, capital) in capitals.iter().enumerate() {
            parent
                .spawn((
                    Name::new(format!("Marker {}", capital.city)),
                    Marker { angle: capital.angle },
                    CapitalIndex(index),
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(marker_materials.handle(Highlight::of(index, *focus))),
                    marker_transform(capital.angle, &config, scale),
                ))
                .observe(select_on_click)
                .observe(hover_on_over)
                .observe(unhover_on_out);
        }
    });

    debug!("spawned {} markers", capitals.len());
    commands.insert_resource(marker_materials);
    commands.insert_resource(MarkerScale::new(scale));
}

fn highlight_markers(
    focus: Res<Focus>,
    marker_materials: Res<MarkerMaterials>,
    mut markers: Query<(&CapitalIndex, &mut MeshMaterial3d<StandardMaterial>), With<Marker>>,
) {
    for (CapitalIndex(index), mut material) in &mut markers {
        let handle = marker_materials.handle(Highlight::of(*index, *focus));
        if material.0 != handle {
            material.0 = handle;
        }
    }
}

fn retarget_marker_scale(
    focus: Res<Focus>,
    config: Res<GlobeConfig>,
    mut marker_scale: ResMut<MarkerScale>,
) {
    marker_scale.retarget(
        config.marker_scale(focus.focused.is_some()),
        config.marker_scale_seconds,
    );
}

fn animate_marker_scale(
    time: Res<Time>,
    config: Res<GlobeConfig>,
    mut marker_scale: ResMut<MarkerScale>,
    mut markers: Query<&mut Transform, With<Marker>>,
) {
    let Some(scale) = marker_scale.tick(time.delta_secs()) else {
        return;
    };
    for mut transform in &mut markers {
        transform.scale = Vec3::splat(config.marker_radius * scale);
    }
}

/// Pushes live config edits to materials, marker placement and sizes.
fn apply_globe_config(
    config: Res<GlobeConfig>,
    focus: Res<Focus>,
    marker_materials: Res<MarkerMaterials>,
    mut marker_scale: ResMut<MarkerScale>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut markers: Query<(&Marker, &mut Transform)>,
) {
    for (handle, color) in [
        (&marker_materials.idle, config.marker_color),
        (&marker_materials.hovered, config.marker_hover_color),
        (&marker_materials.focused, config.marker_focus_color),
    ] {
        if let Some(material) = materials.get_mut(handle).as_deref_mut() {
            material.base_color = color;
        }
    }

    let scale = config.marker_scale(focus.focused.is_some());
    *marker_scale = MarkerScale::new(scale);
    for (marker, mut transform) in &mut markers {
        *transform = marker_transform(marker.angle, &config, scale);
    }
}
