use bevy::color::palettes::tailwind;
use bevy::input::common_conditions::input_toggle_active;
use bevy::math::curve::EaseFunction;
use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

pub const MARKER_SCALE_EASING: EaseFunction = EaseFunction::QuadraticIn;

pub struct GlobeConfigPlugin;

impl Plugin for GlobeConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<GlobeConfig>::default()
                .run_if(input_toggle_active(false, KeyCode::F2)),
        )
        .init_resource::<GlobeConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct GlobeConfig {
    #[inspector(min = 0.5, max = 4.0, display = NumberDisplay::Slider)]
    pub sphere_radius:           f32,
    #[inspector(min = 0.001, max = 0.1, display = NumberDisplay::Slider)]
    pub marker_radius:           f32,
    /// Height of the markers above the surface
    #[inspector(min = 0.0, max = 0.1, display = NumberDisplay::Slider)]
    pub marker_offset:           f32,
    #[inspector(min = 0.1, max = 10.0, display = NumberDisplay::Slider)]
    pub marker_scale_overview:   f32,
    #[inspector(min = 0.1, max = 10.0, display = NumberDisplay::Slider)]
    pub marker_scale_focused:    f32,
    #[inspector(min = 0.0, max = 3.0, display = NumberDisplay::Slider)]
    pub marker_scale_seconds:    f32,
    #[inspector(min = -1.0, max = 1.0, display = NumberDisplay::Slider)]
    pub spin_radians_per_second: f32,
    /// Spacing of the latitude and longitude lines; 0 hides them
    #[inspector(min = 0, max = 90, display = NumberDisplay::Slider)]
    pub graticule_step_degrees:  u16,
    #[inspector(min = 0.5, max = 5.0, display = NumberDisplay::Slider)]
    pub graticule_line_width:    f32,
    pub graticule_color:         Color,
    pub surface_color:           Color,
    pub marker_color:            Color,
    pub marker_hover_color:      Color,
    pub marker_focus_color:      Color,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            sphere_radius:           2.0,
            marker_radius:           0.01,
            marker_offset:           0.005,
            marker_scale_overview:   3.0,
            marker_scale_focused:    0.5,
            marker_scale_seconds:    0.5,
            spin_radians_per_second: 0.0,
            graticule_step_degrees:  30,
            graticule_line_width:    1.0,
            graticule_color:         Color::from(tailwind::SKY_600).with_alpha(0.5),
            surface_color:           Color::from(tailwind::SKY_900),
            marker_color:            Color::from(tailwind::GRAY_500),
            marker_hover_color:      Color::from(tailwind::GRAY_300),
            marker_focus_color:      Color::WHITE,
        }
    }
}

impl GlobeConfig {
    pub const fn marker_scale(&self, focused: bool) -> f32 {
        if focused {
            self.marker_scale_focused
        } else {
            self.marker_scale_overview
        }
    }

    pub fn marker_height(&self) -> f32 { self.sphere_radius + self.marker_offset }
}
