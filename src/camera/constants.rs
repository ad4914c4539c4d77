use bevy::math::curve::EaseFunction;

/// Camera distance from the globe center while a capital is focused.
pub const CAMERA_RADIUS_NEAR: f32 = 2.2;
/// Camera distance from the globe center in the overview.
pub const CAMERA_RADIUS_FAR: f32 = 5.0;

pub const CAMERA_TRANSITION_SECONDS: f32 = 1.0;
/// Starts fast and settles into the target.
pub const CAMERA_TRANSITION_EASING: EaseFunction = EaseFunction::QuadraticOut;

/// Orbit angle per pixel of pointer drag, before the rotate speed multiplier.
pub const DRAG_RADIANS_PER_PIXEL: f32 = 0.005;
pub const ROTATE_SPEED_OVERVIEW: f32 = 1.0;
pub const ROTATE_SPEED_FOCUSED: f32 = 0.03;

/// Dragging stops this far (in radians) short of either pole.
pub const DRAG_POLE_MARGIN: f32 = 0.05;

/// Closest the camera may get to the globe surface, whatever the radii say.
pub const CAMERA_SURFACE_CLEARANCE: f32 = 0.1;

pub const STAR_COUNT: usize = 1500;
/// Well beyond the far orbit radius, well inside the default far plane.
pub const STAR_FIELD_INNER_RADIUS: f32 = 80.0;
pub const STAR_FIELD_DEPTH: f32 = 60.0;
