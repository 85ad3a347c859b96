//! Layout style helpers

use taffy::prelude::*;

pub use taffy::prelude::Style;

/// Helpers to create the layout styles the page is built from
pub struct LayoutStyle;

impl LayoutStyle {
    /// Create a flex row style
    pub fn flex_row(gap: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            align_items: Some(AlignItems::Center),
            gap: Size {
                width: length(gap),
                height: length(gap),
            },
            ..Default::default()
        }
    }

    /// Create a flex column style
    pub fn flex_column(gap: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            gap: Size {
                width: length(gap),
                height: length(gap),
            },
            ..Default::default()
        }
    }

    /// Flex row with items pushed to both ends
    pub fn space_between() -> Style {
        Style {
            justify_content: Some(JustifyContent::SpaceBetween),
            ..Self::flex_row(0.0)
        }
    }

    /// Column whose children are centered on both axes
    pub fn centered(min_height: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            justify_content: Some(JustifyContent::Center),
            align_items: Some(AlignItems::Center),
            min_size: Size {
                width: auto(),
                height: length(min_height),
            },
            ..Default::default()
        }
    }

    /// Block with a fixed height and auto width
    pub fn block(height: f32) -> Style {
        Style {
            size: Size {
                width: auto(),
                height: length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    /// Create a fixed size style
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: length(width),
                height: length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    /// Grid of `columns` equal tracks with fixed-height implicit rows
    pub fn grid(columns: u16, row_height: f32, gap: f32) -> Style {
        Style {
            display: Display::Grid,
            grid_template_columns: vec![fr(1.0); columns as usize],
            grid_auto_rows: vec![length(row_height)],
            gap: Size {
                width: length(gap),
                height: length(gap),
            },
            ..Default::default()
        }
    }

    /// Grid item spanning `columns` x `rows` tracks
    pub fn grid_span(columns: u16, rows: u16) -> Style {
        Style {
            grid_column: Line {
                start: auto(),
                end: span(columns),
            },
            grid_row: Line {
                start: auto(),
                end: span(rows),
            },
            ..Default::default()
        }
    }

    /// Wrapping flex row
    pub fn wrap_row(gap: f32) -> Style {
        Style {
            flex_wrap: FlexWrap::Wrap,
            ..Self::flex_row(gap)
        }
    }

    /// Grid card: a padded flex column spanning `columns` x `rows` tracks
    pub fn card(columns: u16, rows: u16, padding: f32) -> Style {
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            gap: Size {
                width: length(0.0),
                height: length(8.0),
            },
            ..Self::padded(Self::grid_span(columns, rows), padding, padding)
        }
    }

    /// Out-of-flow bar pinned across the top of its container
    pub fn pinned_top(height: f32) -> Style {
        Style {
            position: Position::Absolute,
            inset: Rect {
                left: length(0.0),
                right: length(0.0),
                top: length(0.0),
                bottom: auto(),
            },
            size: Size {
                width: auto(),
                height: length(height),
            },
            ..Default::default()
        }
    }

    /// Out-of-flow box pinned `offset` above the bottom edge
    pub fn pinned_bottom(width: f32, height: f32, offset: f32) -> Style {
        Style {
            position: Position::Absolute,
            inset: Rect {
                left: percent(0.5),
                right: auto(),
                top: auto(),
                bottom: length(offset),
            },
            ..Self::fixed_size(width, height)
        }
    }

    /// Add uniform horizontal/vertical padding to a style
    pub fn padded(style: Style, x: f32, y: f32) -> Style {
        Style {
            padding: Rect {
                left: length(x),
                right: length(x),
                top: length(y),
                bottom: length(y),
            },
            ..style
        }
    }

    /// Replace only the top padding
    pub fn padded_top(mut style: Style, top: f32) -> Style {
        style.padding.top = length(top);
        style
    }

    /// Cap the width of a style and center it with auto margins
    pub fn max_width(style: Style, width: f32) -> Style {
        Style {
            max_size: Size {
                width: length(width),
                height: auto(),
            },
            margin: Rect {
                left: auto(),
                right: auto(),
                top: zero(),
                bottom: zero(),
            },
            size: Size {
                width: percent(1.0),
                height: style.size.height,
            },
            ..style
        }
    }
}
