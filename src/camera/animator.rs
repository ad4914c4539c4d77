//! Time-eased orbit transitions.
//!
//! The animator owns the live [`OrbitState`]. Callers push targets with
//! [`OrbitAnimator::retarget`] and pull the eased state once per frame with
//! [`OrbitAnimator::tick`]; nothing is recomputed behind their back.

use std::f32::consts::FRAC_PI_2;

use bevy::math::curve::Curve;
use bevy::math::curve::EaseFunction;

use super::angle::normalize;
use super::angle::shortest_delta;
use super::projection::GeoAngle;
use super::projection::OrbitState;

/// Remaining time below which a transition counts as finished, so that frame
/// deltas summing to the duration land on the target despite rounding.
const FINISH_EPSILON: f32 = 1e-5;

/// Eased clock over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    elapsed:  f32,
    duration: f32,
    easing:   EaseFunction,
}

impl Progress {
    pub fn new(duration: f32, easing: EaseFunction) -> Self {
        debug_assert!(
            duration.is_finite() && duration >= 0.0,
            "invalid duration {duration}"
        );
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    pub fn advance(&mut self, delta_secs: f32) {
        self.elapsed = (self.elapsed + delta_secs.max(0.0)).min(self.duration);
    }

    pub fn is_finished(&self) -> bool { self.duration - self.elapsed <= FINISH_EPSILON }

    /// Eased fraction in `[0, 1]`, exactly 1 once finished.
    pub fn eased(&self) -> f32 {
        if self.is_finished() {
            1.0
        } else {
            self.easing.sample_clamped(self.elapsed / self.duration)
        }
    }
}

/// Where the camera should end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTarget {
    /// `None` pulls back to the overview and leaves the angle where it is.
    pub angle:       Option<GeoAngle>,
    pub radius_near: f32,
    pub radius_far:  f32,
}

impl AnimationTarget {
    pub const fn focus(angle: GeoAngle, radius_near: f32, radius_far: f32) -> Self {
        Self {
            angle: Some(angle),
            radius_near,
            radius_far,
        }
    }

    pub const fn overview(radius_near: f32, radius_far: f32) -> Self {
        Self {
            angle: None,
            radius_near,
            radius_far,
        }
    }

    pub const fn radius(&self) -> f32 {
        if self.angle.is_some() {
            self.radius_near
        } else {
            self.radius_far
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    start:          OrbitState,
    end:            OrbitState,
    /// Signed short-arc distance from `start` to `end` longitude.
    longitude_span: f32,
    progress:       Progress,
}

impl Tween {
    fn sample(&self) -> OrbitState {
        let t = self.progress.eased();
        // rounding at t = 1 can land an ulp past a pole
        let latitude = (self.end.angle.latitude - self.start.angle.latitude)
            .mul_add(t, self.start.angle.latitude)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
        let longitude = normalize(self.longitude_span.mul_add(t, self.start.angle.longitude));
        let radius = (self.end.radius - self.start.radius).mul_add(t, self.start.radius);
        OrbitState::new(GeoAngle::new(latitude, longitude), radius)
    }
}

/// Drives an [`OrbitState`] toward successive targets.
#[derive(Debug, Clone)]
pub struct OrbitAnimator {
    current: OrbitState,
    tween:   Option<Tween>,
}

impl OrbitAnimator {
    pub const fn new(initial: OrbitState) -> Self {
        Self {
            current: initial,
            tween:   None,
        }
    }

    /// The live value: whatever the last `tick` or `retarget` left behind.
    pub const fn current(&self) -> OrbitState { self.current }

    /// No transition in flight.
    pub const fn is_settled(&self) -> bool { self.tween.is_none() }

    /// Replaces any transition in flight with one from `current` to `target`.
    ///
    /// `current` becomes the live value immediately, so a caller that passes
    /// [`Self::current`] gets a seamless handover. Latitude and radius move
    /// linearly in eased time; longitude moves along the shorter arc. With no
    /// target angle the current angle is held.
    pub fn retarget(
        &mut self,
        target: AnimationTarget,
        current: OrbitState,
        duration_secs: f32,
        easing: EaseFunction,
    ) {
        let start = OrbitState::new(current.angle.canonical(), current.radius);
        let (end_angle, longitude_span) = match target.angle {
            Some(angle) => {
                let angle = angle.canonical();
                (
                    angle,
                    shortest_delta(start.angle.longitude, angle.longitude),
                )
            },
            None => (start.angle, 0.0),
        };

        self.current = start;
        self.tween = Some(Tween {
            start,
            end: OrbitState::new(end_angle, target.radius()),
            longitude_span,
            progress: Progress::new(duration_secs, easing),
        });
    }

    /// Advances the transition and returns the new live value.
    ///
    /// Once the duration has elapsed this returns the exact target and keeps
    /// returning it until the next `retarget`.
    pub fn tick(&mut self, delta_secs: f32) -> OrbitState {
        let Some(tween) = self.tween.as_mut() else {
            return self.current;
        };

        tween.progress.advance(delta_secs);
        if tween.progress.is_finished() {
            self.current = tween.end;
            self.tween = None;
        } else {
            self.current = tween.sample();
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;
    use std::f32::consts::PI;

    use super::*;

    const EASE: EaseFunction = EaseFunction::QuadraticOut;
    const TOLERANCE: f32 = 1e-4;

    fn create_animator(latitude: f32, longitude: f32, radius: f32) -> OrbitAnimator {
        OrbitAnimator::new(OrbitState::new(GeoAngle::new(latitude, longitude), radius))
    }

    fn focus(latitude: f32, longitude: f32) -> AnimationTarget {
        AnimationTarget::focus(GeoAngle::new(latitude, longitude), 2.2, 5.0)
    }

    fn distance(a: OrbitState, b: OrbitState) -> f32 { a.position().distance(b.position()) }

    #[test]
    fn test_progress_eases_out() {
        let mut progress = Progress::new(1.0, EASE);
        assert!(progress.eased().abs() < TOLERANCE);

        progress.advance(0.5);
        // quadratic ease-out covers three quarters of the way by half time
        assert!((progress.eased() - 0.75).abs() < TOLERANCE);

        progress.advance(0.5);
        assert!(progress.is_finished());
        assert!((progress.eased() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut animator = create_animator(0.0, 0.0, 5.0);
        let target = focus(0.4, 1.0);
        animator.retarget(target, animator.current(), 0.0, EASE);

        let state = animator.tick(0.0);
        assert_eq!(state, OrbitState::new(GeoAngle::new(0.4, 1.0), 2.2));
        assert!(animator.is_settled());
    }

    #[test]
    fn test_tick_without_target_holds_state() {
        let mut animator = create_animator(0.3, -1.0, 4.0);
        let before = animator.current();
        assert_eq!(animator.tick(0.25), before);
        assert!(animator.is_settled());
    }

    #[test]
    fn test_reaches_exact_target_after_duration() {
        let mut animator = create_animator(0.0, 2.0, 5.0);
        animator.retarget(focus(0.5, -1.0), animator.current(), 1.0, EASE);

        for _ in 0..10 {
            animator.tick(0.1);
        }

        assert!(animator.is_settled());
        assert_eq!(
            animator.current(),
            OrbitState::new(GeoAngle::new(0.5, -1.0), 2.2)
        );

        // further ticks neither overshoot nor oscillate
        assert_eq!(animator.tick(0.5), animator.current());
        assert_eq!(animator.tick(3.0).radius, 2.2);
    }

    #[test]
    fn test_single_tween_converges_monotonically() {
        let mut animator = create_animator(-0.6, 2.5, 5.0);
        let target = focus(0.7, -2.8);
        let goal = OrbitState::new(GeoAngle::new(0.7, -2.8), 2.2);
        animator.retarget(target, animator.current(), 1.0, EASE);

        let mut previous = animator.current();
        for _ in 0..25 {
            let state = animator.tick(0.04);

            assert!(state.radius <= previous.radius + f32::EPSILON);
            assert!(state.radius >= goal.radius - f32::EPSILON);
            assert!(state.angle.latitude >= previous.angle.latitude - f32::EPSILON);
            assert!(state.angle.latitude <= goal.angle.latitude + f32::EPSILON);

            let remaining = shortest_delta(state.angle.longitude, goal.angle.longitude).abs();
            let before = shortest_delta(previous.angle.longitude, goal.angle.longitude).abs();
            assert!(remaining <= before + TOLERANCE, "{remaining} > {before}");

            previous = state;
        }
        assert_eq!(previous, goal);
    }

    #[test]
    fn test_longitude_takes_the_short_arc_across_the_seam() {
        let mut animator = create_animator(0.0, 3.0, 5.0);
        animator.retarget(focus(0.0, -3.0), animator.current(), 1.0, EASE);

        for _ in 0..20 {
            let state = animator.tick(0.05);
            // the short arc runs through ±π, never through 0
            assert!(
                state.angle.longitude.abs() >= 3.0 - TOLERANCE,
                "wandered to {}",
                state.angle.longitude
            );
            assert!(state.angle.longitude > -PI && state.angle.longitude <= PI);
        }
        assert!((animator.current().angle.longitude + 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_overview_target_holds_angle_and_relaxes_radius() {
        let mut animator = create_animator(0.2, 1.1, 2.2);
        animator.retarget(
            AnimationTarget::overview(2.2, 5.0),
            animator.current(),
            1.0,
            EASE,
        );

        let mid = animator.tick(0.5);
        assert_eq!(mid.angle, GeoAngle::new(0.2, 1.1));
        assert!(mid.radius > 2.2 && mid.radius < 5.0);

        let end = animator.tick(0.5);
        assert_eq!(end, OrbitState::new(GeoAngle::new(0.2, 1.1), 5.0));
    }

    #[test]
    fn test_retarget_mid_flight_starts_from_live_value() {
        let mut animator = create_animator(0.0, 0.0, 5.0);
        let start = animator.current();
        animator.retarget(focus(0.8, 1.5), start, 1.0, EASE);

        let in_flight = animator.tick(0.3);
        let goal_a = OrbitState::new(GeoAngle::new(0.8, 1.5), 2.2);
        assert!(distance(in_flight, start) > 0.1);
        assert!(distance(in_flight, goal_a) > 0.1);

        animator.retarget(focus(-0.4, -2.0), animator.current(), 1.0, EASE);
        assert_eq!(animator.current(), in_flight);

        let first = animator.tick(1e-5);
        assert!(distance(first, in_flight) < 1e-3, "jumped {}", distance(first, in_flight));
        assert!(distance(first, goal_a) > 0.1);
        assert!(distance(first, start) > 0.1);
    }

    #[test]
    fn test_pole_target_never_overshoots_latitude() {
        // the last stretch where the eased value is already exactly 1
        for remaining in [1.5e-4, 1e-4, 5e-5, 2e-5] {
            let mut animator = create_animator(-1.570_749_3, 0.2, 5.0);
            animator.retarget(focus(FRAC_PI_2, 0.2), animator.current(), 1.0, EASE);

            let state = animator.tick(1.0 - remaining);
            assert!(
                state.angle.latitude <= FRAC_PI_2,
                "latitude {} past the pole with {remaining}s left",
                state.angle.latitude
            );
        }

        let mut animator = create_animator(1.570_749_3, -0.2, 5.0);
        animator.retarget(focus(-FRAC_PI_2, -0.2), animator.current(), 1.0, EASE);
        for _ in 0..2_100 {
            let state = animator.tick(5e-4);
            assert!(state.angle.latitude >= -FRAC_PI_2);
        }
        assert!(animator.is_settled());
    }

    #[test]
    fn test_retarget_continuity_across_elapsed_times() {
        for step in 0_u8..=10 {
            let elapsed = f32::from(step) * 0.1;
            let mut animator = create_animator(-0.3, -2.9, 5.0);
            animator.retarget(focus(0.6, 2.9), animator.current(), 1.0, EASE);
            let before = animator.tick(elapsed);

            animator.retarget(focus(-FRAC_PI_2 + 0.1, 0.4), animator.current(), 1.0, EASE);
            let after = animator.tick(0.0);
            assert!(distance(before, after) < TOLERANCE, "jump at {elapsed}");
        }
    }
}
