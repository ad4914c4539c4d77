use bevy::color::palettes::tailwind;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::config::OrbitConfig;
use super::constants::CAMERA_SURFACE_CLEARANCE;
use super::controller::CameraOrbitController;
use super::controller::FocusState;
use super::controller::OrbitSettings;
use super::controller::RotatingFrame;
use crate::capitals::Capitals;
use crate::globe::Globe;
use crate::globe::GlobeConfig;
use crate::schedule::GlobeSet;
use crate::selection::Focus;
use crate::selection::SelectionRequest;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::from(tailwind::SLATE_950)))
            .add_systems(Startup, spawn_globe_camera)
            .add_systems(
                Update,
                apply_orbit_config
                    .run_if(resource_changed::<OrbitConfig>.or(resource_changed::<GlobeConfig>))
                    .in_set(GlobeSet::Input),
            )
            .add_systems(
                Update,
                apply_selection_requests.in_set(GlobeSet::Selection),
            )
            .add_systems(Update, drive_camera.in_set(GlobeSet::Animation));
    }
}

/// Configured radii, pushed out so the camera never enters the globe.
fn orbit_settings(orbit_config: &OrbitConfig, globe_config: &GlobeConfig) -> OrbitSettings {
    orbit_config
        .settings()
        .clamped_outside(globe_config.sphere_radius + CAMERA_SURFACE_CLEARANCE)
}

fn spawn_globe_camera(
    mut commands: Commands,
    orbit_config: Res<OrbitConfig>,
    globe_config: Res<GlobeConfig>,
) {
    let controller = CameraOrbitController::new(orbit_settings(&orbit_config, &globe_config));
    let position = controller.local_position();

    commands.spawn((
        Name::new("Globe Camera"),
        Camera3d::default(),
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        controller,
        // headlight keeps whichever side of the globe we look at lit
        children![(
            Name::new("Headlight"),
            DirectionalLight {
                illuminance: 4_000.0,
                ..default()
            },
        )],
    ));
}

fn apply_orbit_config(
    orbit_config: Res<OrbitConfig>,
    globe_config: Res<GlobeConfig>,
    mut controller: Single<&mut CameraOrbitController>,
) {
    controller.set_settings(orbit_settings(&orbit_config, &globe_config));
}

/// Feeds selection requests to the controller, then publishes the resulting
/// focus for highlighting.
///
/// Runs before `drive_camera` so a retarget lands before the frame's tick.
fn apply_selection_requests(
    mut requests: MessageReader<SelectionRequest>,
    capitals: Res<Capitals>,
    mut focus: ResMut<Focus>,
    globe: Single<&GlobalTransform, With<Globe>>,
    camera: Single<(&Transform, &mut CameraOrbitController)>,
) {
    let frame = *globe;
    let (camera_transform, mut controller) = camera.into_inner();
    let camera_world = camera_transform.translation;

    for request in requests.read() {
        let result = match *request {
            SelectionRequest::Toggle(index) => {
                let Some(capital) = capitals.get(index) else {
                    warn!("ignoring selection of unknown capital {index}");
                    continue;
                };
                controller.select_entity(index, capital.angle, camera_world, frame)
            },
            SelectionRequest::Clear => controller.deselect_entity(camera_world, frame),
            SelectionRequest::Hover(hovered) => {
                controller.set_hovered(hovered);
                continue;
            },
        };

        match result {
            Ok(FocusState::Focused(index)) => {
                if let Some(capital) = capitals.get(index) {
                    debug!("focusing {}", capital.city);
                }
            },
            Ok(FocusState::Overview) => debug!("returning to overview"),
            Err(error) => warn!("ignoring selection change: {error}"),
        }
    }

    focus.set_if_neq(Focus {
        focused: controller.focused_index(),
        hovered: controller.hovered_index(),
    });
}

/// Moves the camera along the running transition, if any.
fn drive_camera(
    time: Res<Time>,
    globe: Single<&GlobalTransform, With<Globe>>,
    camera: Single<(&mut Transform, &mut CameraOrbitController)>,
) {
    let (mut transform, mut controller) = camera.into_inner();
    if let Some(local) = controller.update(time.delta_secs()) {
        place_camera(&mut transform, *globe, local);
    }
}

/// Orbits the camera with a pointer drag on the globe while no transition is
/// running.
pub fn orbit_on_drag(
    drag: On<Pointer<Drag>>,
    orbit_config: Res<OrbitConfig>,
    globe: Single<&GlobalTransform, With<Globe>>,
    camera: Single<(&mut Transform, &CameraOrbitController)>,
) {
    let (mut transform, controller) = camera.into_inner();
    if !controller.is_at_rest() {
        return;
    }

    let focused = matches!(controller.focus(), FocusState::Focused(_));
    let drag_radians = drag.delta * orbit_config.drag_speed(focused);
    match CameraOrbitController::dragged_position(
        transform.translation,
        *globe,
        drag_radians,
        orbit_config.pole_margin,
    ) {
        Ok(world) => {
            transform.translation = world;
            aim_at_frame(&mut transform, *globe);
        },
        Err(error) => warn!("ignoring drag: {error}"),
    }
}

fn place_camera(transform: &mut Transform, frame: &GlobalTransform, local: Vec3) {
    transform.translation = frame.local_to_world(local);
    aim_at_frame(transform, frame);
}

fn aim_at_frame(transform: &mut Transform, frame: &GlobalTransform) {
    transform.look_at(frame.translation(), frame.up());
}
