//! Widget components for the uniwork TUI.
//!
//! Each widget is a plain function rendering borrowed state into a buffer,
//! into rectangles computed by [`PanelLayout`](crate::layout::PanelLayout).
//!
//! # Modules
//!
//! - [`boards`]: the boards column
//! - [`lane`]: one list column with its cards and add-card row
//! - [`card`]: a single card
//! - [`status_bar`]: notices, loading indicator, and key hints
//! - [`overlay`]: credentials banner, floating drag card, new-card prompt
//! - [`help`]: keybinding overlay
//! - [`settings`]: credentials form
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use uniwork_protocol::Card;
//! use uniwork_tui::widgets::{self, CardStyle};
//!
//! let area = Rect::new(0, 0, 24, 3);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_card(&Card::new("c1", "l1", "Fix bug"), CardStyle::Normal, area, &mut buf);
//! ```

use ratatui::layout::Rect;

pub mod boards;
pub mod card;
pub mod help;
pub mod lane;
pub mod overlay;
pub mod settings;
pub mod status_bar;

pub use boards::render_boards_column;
pub use card::{CardStyle, render_card};
pub use help::render_help_overlay;
pub use lane::{ColumnState, render_list_column};
pub use overlay::{render_card_prompt, render_credentials_banner, render_floating_card};
pub use settings::render_settings_panel;
pub use status_bar::{StatusLine, render_status_bar};

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
