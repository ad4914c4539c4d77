use bevy::input::common_conditions::input_toggle_active;
use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

use super::constants::CAMERA_RADIUS_FAR;
use super::constants::CAMERA_RADIUS_NEAR;
use super::constants::CAMERA_TRANSITION_EASING;
use super::constants::CAMERA_TRANSITION_SECONDS;
use super::constants::DRAG_POLE_MARGIN;
use super::constants::DRAG_RADIANS_PER_PIXEL;
use super::constants::ROTATE_SPEED_FOCUSED;
use super::constants::ROTATE_SPEED_OVERVIEW;
use super::constants::STAR_COUNT;
use super::constants::STAR_FIELD_DEPTH;
use super::constants::STAR_FIELD_INNER_RADIUS;
use super::controller::OrbitSettings;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<OrbitConfig>::default()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .init_resource::<OrbitConfig>()
        .add_plugins(
            ResourceInspectorPlugin::<StarConfig>::default()
                .run_if(input_toggle_active(false, KeyCode::F3)),
        )
        .init_resource::<StarConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct OrbitConfig {
    #[inspector(min = 0.5, max = 10.0, display = NumberDisplay::Slider)]
    pub radius_near:            f32,
    #[inspector(min = 0.5, max = 20.0, display = NumberDisplay::Slider)]
    pub radius_far:             f32,
    /// Duration of a focus or overview transition
    #[inspector(min = 0.0, max = 5.0, display = NumberDisplay::Slider)]
    pub transition_seconds:     f32,
    #[inspector(min = 0.0, max = 0.05, display = NumberDisplay::Slider)]
    pub drag_radians_per_pixel: f32,
    #[inspector(min = 0.0, max = 2.0, display = NumberDisplay::Slider)]
    pub rotate_speed_overview:  f32,
    #[inspector(min = 0.0, max = 2.0, display = NumberDisplay::Slider)]
    pub rotate_speed_focused:   f32,
    #[inspector(min = 0.0, max = 0.5, display = NumberDisplay::Slider)]
    pub pole_margin:            f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius_near:            CAMERA_RADIUS_NEAR,
            radius_far:             CAMERA_RADIUS_FAR,
            transition_seconds:     CAMERA_TRANSITION_SECONDS,
            drag_radians_per_pixel: DRAG_RADIANS_PER_PIXEL,
            rotate_speed_overview:  ROTATE_SPEED_OVERVIEW,
            rotate_speed_focused:   ROTATE_SPEED_FOCUSED,
            pole_margin:            DRAG_POLE_MARGIN,
        }
    }
}

impl OrbitConfig {
    pub const fn settings(&self) -> OrbitSettings {
        OrbitSettings {
            radius_near:   self.radius_near,
            radius_far:    self.radius_far,
            duration_secs: self.transition_seconds,
            easing:        CAMERA_TRANSITION_EASING,
        }
    }

    /// Orbit angle per pixel of drag; a focused camera turns much slower so a
    /// close-up stays steady.
    pub const fn drag_speed(&self, focused: bool) -> f32 {
        let rotate_speed = if focused {
            self.rotate_speed_focused
        } else {
            self.rotate_speed_overview
        };
        rotate_speed * self.drag_radians_per_pixel
    }
}

/// Backdrop of stars on a shell around the globe. Edits respawn the field.
#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct StarConfig {
    #[inspector(min = 0, max = 5000, display = NumberDisplay::Slider)]
    pub star_count:                   usize,
    #[inspector(min = 20.0, max = 400.0, display = NumberDisplay::Slider)]
    pub star_field_inner_radius:      f32,
    #[inspector(min = 1.0, max = 400.0, display = NumberDisplay::Slider)]
    pub star_field_depth:             f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub star_radius_min:              f32,
    #[inspector(min = 0.01, max = 1.0, display = NumberDisplay::Slider)]
    pub star_radius_max:              f32,
    /// Emissive channel range; colored stars draw each channel from it
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_start:             f32,
    #[inspector(min = 0.0, max = 4.0, display = NumberDisplay::Slider)]
    pub star_color_end:               f32,
    /// White stars start this close to `star_color_end`
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_start_ratio: f32,
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub star_color_white_probability: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            star_count:                   STAR_COUNT,
            star_field_inner_radius:      STAR_FIELD_INNER_RADIUS,
            star_field_depth:             STAR_FIELD_DEPTH,
            star_radius_min:              0.08,
            star_radius_max:              0.3,
            star_color_start:             0.2,
            star_color_end:               1.0,
            star_color_white_start_ratio: 0.85,
            star_color_white_probability: 0.7,
        }
    }
}
