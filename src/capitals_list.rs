//! Scrollable list of every capital down the left edge of the window.
//!
//! Rows select and hover exactly like globe markers do, and the list scrolls
//! to keep the focused capital centered.

use bevy::color::palettes::tailwind;
use bevy::input::mouse::MouseScrollUnit;
use bevy::prelude::*;

use crate::capitals::Capitals;
use crate::schedule::GlobeSet;
use crate::selection::CapitalIndex;
use crate::selection::Focus;
use crate::selection::Highlight;
use crate::selection::hover_on_over;
use crate::selection::select_on_click;
use crate::selection::unhover_on_out;

const PANEL_MARGIN: f32 = 40.0;
const LIST_PADDING: f32 = 20.0;
const ROW_GAP: f32 = 12.0;
const ROW_INDENT: f32 = 8.0;
const ROW_FONT_SIZE: f32 = 16.0;
const HEADER_FONT_SIZE: f32 = 20.0;
/// Pixels scrolled per wheel line.
const SCROLL_LINE_HEIGHT: f32 = 28.0;

pub struct CapitalsListPlugin;

impl Plugin for CapitalsListPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_capitals_list).add_systems(
            Update,
            (restyle_rows, scroll_to_focused)
                .run_if(resource_changed::<Focus>)
                .in_set(GlobeSet::Animation),
        );
    }
}

#[derive(Component, Debug)]
struct CapitalsList;

#[derive(Component, Debug)]
struct CapitalRow;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RowStyle {
    color:  Color,
    indent: f32,
}

impl From<Highlight> for RowStyle {
    fn from(highlight: Highlight) -> Self {
        match highlight {
            Highlight::Idle => Self {
                color:  Color::from(tailwind::SLATE_400),
                indent: 0.0,
            },
            Highlight::Hovered => Self {
                color:  Color::from(tailwind::SLATE_200),
                indent: ROW_INDENT,
            },
            Highlight::Focused => Self {
                color:  Color::WHITE,
                indent: ROW_INDENT,
            },
        }
    }
}

/// Sizes of the list in logical pixels, as laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ListMetrics {
    rows:       usize,
    row_height: f32,
    viewport:   f32,
}

impl ListMetrics {
    fn row_top(&self, index: usize) -> f32 {
        let before = f32::from(u16::try_from(index).unwrap_or(u16::MAX));
        before.mul_add(self.row_height + ROW_GAP, LIST_PADDING)
    }

    fn content_height(&self) -> f32 {
        if self.rows == 0 {
            return 2.0 * LIST_PADDING;
        }
        self.row_top(self.rows - 1) + self.row_height + LIST_PADDING
    }

    fn max_offset(&self) -> f32 { (self.content_height() - self.viewport).max(0.0) }

    /// Scroll offset that centers row `index`, limited to the scrollable range.
    fn centered_offset(&self, index: usize) -> f32 {
        let center = self.row_top(index) + self.row_height / 2.0;
        (center - self.viewport / 2.0).clamp(0.0, self.max_offset())
    }
}

fn spawn_capitals_list(mut commands: Commands, capitals: Res<Capitals>, focus: Res<Focus>) {
    let panel = commands
        .spawn((
            Name::new("Capitals Panel"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                height: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(PANEL_MARGIN)),
                ..default()
            },
        ))
        .id();

    let column = commands
        .spawn((
            Name::new("Capitals Column"),
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(Color::from(tailwind::SLATE_900).with_alpha(0.75)),
            ChildOf(panel),
        ))
        .id();

    commands.spawn((
        Name::new("Capitals Header"),
        Text::new("Capitals List"),
        TextFont {
            font_size: HEADER_FONT_SIZE,
            ..default()
        },
        Node {
            padding: UiRect::all(Val::Px(12.0)),
            ..default()
        },
        ChildOf(column),
    ));

    let list = commands
        .spawn((
            Name::new("Capitals List"),
            CapitalsList,
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(ROW_GAP),
                padding: UiRect::all(Val::Px(LIST_PADDING)),
                flex_grow: 1.0,
                min_height: Val::Px(0.0),
                overflow: Overflow::scroll_y(),
                ..default()
            },
            ScrollPosition::default(),
            ChildOf(column),
        ))
        .observe(scroll_on_wheel)
        .id();

    for (index, capital) in capitals.iter().enumerate() {
        let style = RowStyle::from(Highlight::of(index, *focus));
        commands
            .spawn((
                Name::new(format!("Row {}", capital.city)),
                CapitalRow,
                CapitalIndex(index),
                Text::new(capital.city.clone()),
                TextFont {
                    font_size: ROW_FONT_SIZE,
                    ..default()
                },
                TextColor(style.color),
                Node {
                    margin: UiRect::left(Val::Px(style.indent)),
                    ..default()
                },
                ChildOf(list),
            ))
            .observe(select_on_click)
            .observe(hover_on_over)
            .observe(unhover_on_out);
    }
}

fn restyle_rows(
    focus: Res<Focus>,
    mut rows: Query<(&CapitalIndex, &mut TextColor, &mut Node), With<CapitalRow>>,
) {
    for (CapitalIndex(index), mut color, mut node) in &mut rows {
        let style = RowStyle::from(Highlight::of(*index, *focus));
        color.set_if_neq(TextColor(style.color));
        let margin = UiRect::left(Val::Px(style.indent));
        if node.margin != margin {
            node.margin = margin;
        }
    }
}

fn list_metrics(list: &ComputedNode, row: Option<&ComputedNode>, rows: usize) -> ListMetrics {
    let logical = |physical: f32, node: &ComputedNode| physical * node.inverse_scale_factor();
    ListMetrics {
        rows,
        row_height: row.map_or(0.0, |row| logical(row.size().y, row)),
        viewport: logical(list.size().y, list),
    }
}

/// Centers the focused row whenever the focus moves to a new capital.
fn scroll_to_focused(
    focus: Res<Focus>,
    mut last_focused: Local<Option<usize>>,
    list: Single<(&ComputedNode, &mut ScrollPosition), With<CapitalsList>>,
    rows: Query<&ComputedNode, With<CapitalRow>>,
) {
    if *last_focused == focus.focused {
        return;
    }
    *last_focused = focus.focused;
    let Some(index) = focus.focused else {
        return;
    };

    let (list_node, mut scroll) = list.into_inner();
    let metrics = list_metrics(list_node, rows.iter().next(), rows.iter().count());
    scroll.0.y = metrics.centered_offset(index);
}

fn scroll_on_wheel(
    scroll: On<Pointer<Scroll>>,
    list: Single<(&ComputedNode, &mut ScrollPosition), With<CapitalsList>>,
    rows: Query<&ComputedNode, With<CapitalRow>>,
) {
    let delta = match scroll.unit {
        MouseScrollUnit::Line => scroll.y * SCROLL_LINE_HEIGHT,
        MouseScrollUnit::Pixel => scroll.y,
    };
    let (list_node, mut position) = list.into_inner();
    let metrics = list_metrics(list_node, rows.iter().next(), rows.iter().count());
    position.0.y = (position.0.y - delta).clamp(0.0, metrics.max_offset());
}
