//! Focus state machine for the globe camera.
//!
//! `Overview` ⇄ `Focused(index)`. Selection changes retarget the animator;
//! every frame [`CameraOrbitController::update`] hands back the desired
//! position in the globe's local frame while a transition is running.

use std::f32::consts::FRAC_PI_2;

use bevy::math::curve::EaseFunction;
use bevy::prelude::*;

use super::animator::AnimationTarget;
use super::animator::OrbitAnimator;
use super::projection::GeoAngle;
use super::projection::OrbitState;
use super::projection::ProjectionError;
use super::projection::to_cartesian;
use super::projection::to_spherical;

/// The body the camera orbits. Orbit angles are measured in its local frame.
pub trait RotatingFrame {
    fn world_to_local(&self, world: Vec3) -> Vec3;

    fn local_to_world(&self, local: Vec3) -> Vec3;
}

impl RotatingFrame for GlobalTransform {
    fn world_to_local(&self, world: Vec3) -> Vec3 { self.affine().inverse().transform_point3(world) }

    fn local_to_world(&self, local: Vec3) -> Vec3 { self.transform_point(local) }
}

/// Radii and timing used for every transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    pub radius_near:   f32,
    pub radius_far:    f32,
    pub duration_secs: f32,
    pub easing:        EaseFunction,
}

impl OrbitSettings {
    /// Pushes both radii out to at least `min_radius`, keeping the far radius
    /// no closer than the near one.
    pub fn clamped_outside(self, min_radius: f32) -> Self {
        let radius_near = self.radius_near.max(min_radius);
        Self {
            radius_near,
            radius_far: self.radius_far.max(radius_near),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Overview,
    Focused(usize),
}

#[derive(Component, Debug, Clone)]
pub struct CameraOrbitController {
    animator: OrbitAnimator,
    settings: OrbitSettings,
    focus:    FocusState,
    hovered:  Option<usize>,
}

impl CameraOrbitController {
    /// Starts in the overview, above latitude 0 / longitude 0.
    pub const fn new(settings: OrbitSettings) -> Self {
        let initial = OrbitState::new(
            GeoAngle {
                latitude:  0.0,
                longitude: 0.0,
            },
            settings.radius_far,
        );
        Self {
            animator: OrbitAnimator::new(initial),
            settings,
            focus: FocusState::Overview,
            hovered: None,
        }
    }

    /// Local position of the live orbit state.
    pub fn local_position(&self) -> Vec3 { self.animator.current().position() }

    pub const fn focus(&self) -> FocusState { self.focus }

    pub const fn focused_index(&self) -> Option<usize> {
        match self.focus {
            FocusState::Overview => None,
            FocusState::Focused(index) => Some(index),
        }
    }

    pub const fn hovered_index(&self) -> Option<usize> { self.hovered }

    pub fn set_hovered(&mut self, hovered: Option<usize>) { self.hovered = hovered; }

    /// Takes effect on the next selection change.
    pub fn set_settings(&mut self, settings: OrbitSettings) { self.settings = settings; }

    pub const fn is_at_rest(&self) -> bool { self.animator.is_settled() }

    /// Focuses entity `index`, or returns to the overview if it is already
    /// focused.
    pub fn select_entity(
        &mut self,
        index: usize,
        angle: GeoAngle,
        camera_world: Vec3,
        frame: &impl RotatingFrame,
    ) -> Result<FocusState, ProjectionError> {
        if self.focus == FocusState::Focused(index) {
            return self.deselect_entity(camera_world, frame);
        }

        let start = self.start_state(camera_world, frame)?;
        let target =
            AnimationTarget::focus(angle, self.settings.radius_near, self.settings.radius_far);
        self.retarget(target, start);
        self.focus = FocusState::Focused(index);
        Ok(self.focus)
    }

    pub fn deselect_entity(
        &mut self,
        camera_world: Vec3,
        frame: &impl RotatingFrame,
    ) -> Result<FocusState, ProjectionError> {
        let start = self.start_state(camera_world, frame)?;
        let target = AnimationTarget::overview(self.settings.radius_near, self.settings.radius_far);
        self.retarget(target, start);
        self.focus = FocusState::Overview;
        Ok(self.focus)
    }

    /// Advances the transition; `Some(local position)` while not at rest.
    ///
    /// The frame that completes a transition still reports, carrying the exact
    /// target position.
    pub fn update(&mut self, delta_secs: f32) -> Option<Vec3> {
        if self.animator.is_settled() {
            return None;
        }
        Some(self.animator.tick(delta_secs).position())
    }

    /// World position after orbiting the camera by a pointer drag.
    ///
    /// Dragging right turns the globe toward the viewer's right, dragging down
    /// raises the camera. Latitude stops `pole_margin` short of the poles.
    pub fn dragged_position(
        camera_world: Vec3,
        frame: &impl RotatingFrame,
        drag_radians: Vec2,
        pole_margin: f32,
    ) -> Result<Vec3, ProjectionError> {
        let state = to_spherical(frame.world_to_local(camera_world))?;
        let max_latitude = FRAC_PI_2 - pole_margin.clamp(0.0, FRAC_PI_2);
        let angle = GeoAngle::new(
            (state.angle.latitude + drag_radians.y).clamp(-max_latitude, max_latitude),
            state.angle.longitude - drag_radians.x,
        );
        Ok(frame.local_to_world(to_cartesian(angle, state.radius)))
    }

    /// Live value while in flight; otherwise wherever the camera actually is,
    /// which a user drag may have changed since the last transition.
    fn start_state(
        &self,
        camera_world: Vec3,
        frame: &impl RotatingFrame,
    ) -> Result<OrbitState, ProjectionError> {
        if self.animator.is_settled() {
            to_spherical(frame.world_to_local(camera_world))
        } else {
            Ok(self.animator.current())
        }
    }

    fn retarget(&mut self, target: AnimationTarget, start: OrbitState) {
        self.animator.retarget(
            target,
            start,
            self.settings.duration_secs,
            self.settings.easing,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn create_settings() -> OrbitSettings {
        OrbitSettings {
            radius_near:   2.2,
            radius_far:    5.0,
            duration_secs: 1.0,
            easing:        EaseFunction::QuadraticOut,
        }
    }

    fn identity_frame() -> GlobalTransform { GlobalTransform::IDENTITY }

    fn turned_frame(radians: f32) -> GlobalTransform {
        GlobalTransform::from(Transform::from_rotation(Quat::from_rotation_y(radians)))
    }

    fn assert_vec_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.distance(expected) < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    /// Runs updates the way the app does: the camera follows every emission.
    fn run(
        controller: &mut CameraOrbitController,
        frame: &GlobalTransform,
        camera: &mut Vec3,
        seconds: f32,
        steps: u16,
    ) {
        let delta = seconds / f32::from(steps);
        for _ in 0..steps {
            if let Some(local) = controller.update(delta) {
                *camera = frame.local_to_world(local);
            }
        }
    }

    #[test]
    fn test_settings_keep_the_camera_outside_the_sphere() {
        let inside = OrbitSettings {
            radius_near: 0.5,
            radius_far: 1.0,
            ..create_settings()
        };
        let clamped = inside.clamped_outside(2.1);
        assert!((clamped.radius_near - 2.1).abs() < f32::EPSILON);
        assert!((clamped.radius_far - 2.1).abs() < f32::EPSILON);

        let untouched = create_settings().clamped_outside(2.1);
        assert_eq!(untouched, create_settings());

        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(inside.clamped_outside(2.1));
        let mut camera = controller.local_position();
        assert!(camera.length() >= 2.1 - TOLERANCE);

        let selected = controller.select_entity(0, GeoAngle::new(0.3, 0.3), camera, &frame);
        assert!(selected.is_ok());
        run(&mut controller, &frame, &mut camera, 1.0, 20);
        assert!(camera.length() >= 2.1 - TOLERANCE);
    }

    #[test]
    fn test_starts_in_overview_at_far_radius() {
        let controller = CameraOrbitController::new(create_settings());
        assert_eq!(controller.focus(), FocusState::Overview);
        assert!(controller.is_at_rest());
        assert_vec_close(controller.local_position(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_focus_on_prime_meridian_ends_at_near_radius() {
        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(create_settings());
        let mut camera = controller.local_position();

        let state = controller.select_entity(0, GeoAngle::new(0.0, 0.0), camera, &frame);
        assert_eq!(state, Ok(FocusState::Focused(0)));

        let Some(local) = controller.update(1.0) else {
            panic!("transition should report its final frame");
        };
        assert_vec_close(local, Vec3::new(0.0, 0.0, 2.2));
        assert!(controller.update(0.016).is_none());

        camera = local;
        assert_eq!(controller.focused_index(), Some(0));
        assert_vec_close(camera, Vec3::new(0.0, 0.0, 2.2));
    }

    #[test]
    fn test_selecting_focused_entity_returns_to_overview() {
        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(create_settings());
        let mut camera = controller.local_position();
        let paris = GeoAngle::new(0.85, 0.04);

        assert!(controller.select_entity(3, paris, camera, &frame).is_ok());
        run(&mut controller, &frame, &mut camera, 1.0, 30);
        assert!((camera.length() - 2.2).abs() < TOLERANCE);

        let state = controller.select_entity(3, paris, camera, &frame);
        assert_eq!(state, Ok(FocusState::Overview));
        assert_eq!(controller.focused_index(), None);

        run(&mut controller, &frame, &mut camera, 1.0, 30);
        assert!((camera.length() - 5.0).abs() < TOLERANCE);
        assert!(controller.is_at_rest());
    }

    #[test]
    fn test_deselect_holds_angle_and_pulls_back() {
        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(create_settings());
        let mut camera = controller.local_position();
        let tokyo = GeoAngle::new(0.62, 2.44);

        assert!(controller.select_entity(1, tokyo, camera, &frame).is_ok());
        run(&mut controller, &frame, &mut camera, 1.0, 20);
        assert!(controller.deselect_entity(camera, &frame).is_ok());
        run(&mut controller, &frame, &mut camera, 1.0, 20);

        assert_eq!(controller.focus(), FocusState::Overview);
        assert_vec_close(camera, to_cartesian(tokyo, 5.0));
    }

    #[test]
    fn test_switching_targets_mid_flight_is_continuous() {
        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(create_settings());
        let mut camera = controller.local_position();
        let origin = camera;
        let target_a = GeoAngle::new(0.9, 1.2);
        let target_b = GeoAngle::new(-0.5, -2.2);

        assert!(controller.select_entity(0, target_a, camera, &frame).is_ok());
        run(&mut controller, &frame, &mut camera, 0.3, 6);
        let in_flight = camera;
        assert!(in_flight.distance(origin) > 0.1);
        assert!(in_flight.distance(to_cartesian(target_a, 2.2)) > 0.1);

        assert!(controller.select_entity(1, target_b, camera, &frame).is_ok());
        assert_eq!(controller.focused_index(), Some(1));

        let Some(next) = controller.update(1e-5) else {
            panic!("switch should start a new transition");
        };
        assert!(next.distance(in_flight) < 1e-3, "jumped to {next}");

        run(&mut controller, &frame, &mut camera, 1.0, 20);
        assert_vec_close(camera, to_cartesian(target_b, 2.2));
    }

    #[test]
    fn test_start_is_measured_in_the_rotating_frame() {
        let frame = turned_frame(FRAC_PI_2);
        let mut controller = CameraOrbitController::new(create_settings());
        let camera = Vec3::new(0.0, 0.0, 5.0);

        assert!(
            controller
                .select_entity(0, GeoAngle::new(0.0, 0.0), camera, &frame)
                .is_ok()
        );

        // the first emitted position continues from where the camera is
        let Some(first) = controller.update(1e-5) else {
            panic!("expected a transition");
        };
        assert!(frame.local_to_world(first).distance(camera) < 1e-3);

        // and the target is longitude 0 of the turned globe
        let Some(last) = controller.update(1.0) else {
            panic!("expected the final frame");
        };
        assert_vec_close(last, Vec3::new(0.0, 0.0, 2.2));
        assert_vec_close(frame.local_to_world(last), Vec3::new(2.2, 0.0, 0.0));
    }

    #[test]
    fn test_camera_at_center_is_rejected_without_state_change() {
        let frame = identity_frame();
        let mut controller = CameraOrbitController::new(create_settings());

        let result = controller.select_entity(2, GeoAngle::new(0.1, 0.1), Vec3::ZERO, &frame);
        assert_eq!(result, Err(ProjectionError::DegenerateRadius(Vec3::ZERO)));
        assert_eq!(controller.focus(), FocusState::Overview);
        assert!(controller.is_at_rest());
    }

    #[test]
    fn test_hover_is_passed_through() {
        let mut controller = CameraOrbitController::new(create_settings());
        controller.set_hovered(Some(7));
        assert_eq!(controller.hovered_index(), Some(7));
        assert_eq!(controller.focus(), FocusState::Overview);
        controller.set_hovered(None);
        assert_eq!(controller.hovered_index(), None);
    }

    #[test]
    fn test_drag_orbits_in_local_frame_and_stops_at_poles() {
        let frame = turned_frame(PI / 3.0);
        let camera = frame.local_to_world(Vec3::new(0.0, 0.0, 5.0));

        let Ok(moved) =
            CameraOrbitController::dragged_position(camera, &frame, Vec2::new(0.5, 0.0), 0.05)
        else {
            panic!("drag failed");
        };
        assert_vec_close(
            frame.world_to_local(moved),
            to_cartesian(GeoAngle::new(0.0, -0.5), 5.0),
        );

        let Ok(over_pole) =
            CameraOrbitController::dragged_position(camera, &frame, Vec2::new(0.0, 4.0), 0.05)
        else {
            panic!("drag failed");
        };
        let Ok(state) = to_spherical(frame.world_to_local(over_pole)) else {
            panic!("projection failed");
        };
        assert!((state.angle.latitude - (FRAC_PI_2 - 0.05)).abs() < TOLERANCE);
        assert!((state.radius - 5.0).abs() < TOLERANCE);
    }
}
