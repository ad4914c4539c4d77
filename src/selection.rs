//! Selection requests from pointer and keyboard, and the resulting focus.
//!
//! Globe markers and list rows share the pointer observers here, so both
//! select and hover the same way.

use bevy::ecs::message::Message;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::capitals::Capitals;
use crate::schedule::GlobeSet;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectionRequest>()
            .init_resource::<Focus>()
            .add_systems(Update, step_through_capitals.in_set(GlobeSet::Input));
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Focus this capital, or return to the overview if it is already focused.
    Toggle(usize),
    Clear,
    Hover(Option<usize>),
}

/// What the camera is focused on and what the pointer is over, by index into
/// [`Capitals`]. Updated once per frame after requests are applied.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Focus {
    pub focused: Option<usize>,
    pub hovered: Option<usize>,
}

/// Links a pickable entity (globe marker or list row) to its capital.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapitalIndex(pub usize);

/// How a capital's marker or list row should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Idle,
    Hovered,
    Focused,
}

impl Highlight {
    /// Focus wins over hover.
    pub fn of(index: usize, focus: Focus) -> Self {
        if focus.focused == Some(index) {
            Self::Focused
        } else if focus.hovered == Some(index) {
            Self::Hovered
        } else {
            Self::Idle
        }
    }
}

pub fn select_on_click(
    click: On<Pointer<Click>>,
    capitals: Query<&CapitalIndex>,
    mut requests: MessageWriter<SelectionRequest>,
) {
    if click.button != PointerButton::Primary {
        return;
    }
    if let Ok(CapitalIndex(index)) = capitals.get(click.entity) {
        requests.write(SelectionRequest::Toggle(*index));
    }
}

pub fn hover_on_over(
    over: On<Pointer<Over>>,
    capitals: Query<&CapitalIndex>,
    mut requests: MessageWriter<SelectionRequest>,
) {
    if let Ok(CapitalIndex(index)) = capitals.get(over.entity) {
        requests.write(SelectionRequest::Hover(Some(*index)));
    }
}

/// `Out` for the old entity always arrives before `Over` for the next one.
pub fn unhover_on_out(
    out: On<Pointer<Out>>,
    capitals: Query<&CapitalIndex>,
    mut requests: MessageWriter<SelectionRequest>,
) {
    if capitals.contains(out.entity) {
        requests.write(SelectionRequest::Hover(None));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
}

/// Arrow keys walk the alphabetical list, `Escape` pulls back.
fn step_through_capitals(
    keys: Res<ButtonInput<KeyCode>>,
    capitals: Res<Capitals>,
    focus: Res<Focus>,
    mut requests: MessageWriter<SelectionRequest>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        requests.write(SelectionRequest::Clear);
        return;
    }

    let step = if keys.any_just_pressed([KeyCode::ArrowDown, KeyCode::ArrowRight]) {
        Step::Next
    } else if keys.any_just_pressed([KeyCode::ArrowUp, KeyCode::ArrowLeft]) {
        Step::Previous
    } else {
        return;
    };

    if let Some(index) = stepped_index(focus.focused, capitals.len(), step) {
        requests.write(SelectionRequest::Toggle(index));
    }
}

/// Neighbour of `current` in a list of `len`, wrapping at both ends. With
/// nothing focused the walk starts at the first or last entry.
fn stepped_index(current: Option<usize>, len: usize, step: Step) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = match (current, step) {
        (None, Step::Next) => 0,
        (None, Step::Previous) => len - 1,
        (Some(index), Step::Next) => (index + 1) % len,
        (Some(index), Step::Previous) => (index + len - 1) % len,
    };
    Some(index)
}
