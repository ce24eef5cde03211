//! Screen geometry and pointer hit-testing.
//!
//! [`PanelLayout::compute`] splits the terminal into header, banner, boards
//! column, list columns, and status bar, and records where every board row,
//! card, and add-card row landed. Rendering draws into those rectangles, and
//! pointer events are resolved against the same ones, so a click always hits
//! what was drawn under it.

use ratatui::layout::{Constraint, Layout, Rect};
use uniwork_protocol::{BoardId, CardId, ListId, Store, Target};

use crate::state::{Focus, ViewState};

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the missing-credentials banner in rows.
pub const BANNER_HEIGHT: u16 = 1;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the boards column, borders included.
pub const BOARDS_WIDTH: u16 = 24;

/// Width of one list column, borders included.
pub const LIST_WIDTH: u16 = 26;

/// Height of each card in rows (border, name, border).
pub const CARD_HEIGHT: u16 = 3;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 40;

/// One board entry in the boards column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// The board shown on this row.
    pub board_id: BoardId,
    /// Index among the open boards.
    pub index: usize,
    /// The row itself.
    pub area: Rect,
}

/// One card drawn inside a list column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlot {
    /// The card drawn here.
    pub card_id: CardId,
    /// Index within its list.
    pub index: usize,
    /// Where the card is drawn.
    pub area: Rect,
}

/// A list column and its visible cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListColumn {
    /// The list shown in this column.
    pub list_id: ListId,
    /// Index among the board's lists.
    pub index: usize,
    /// The whole column, borders included.
    pub area: Rect,
    /// Cards that fit, top to bottom.
    pub cards: Vec<CardSlot>,
    /// The "add a card" row under the last visible card.
    pub add_card: Option<Rect>,
    /// Cards scrolled out above.
    pub hidden_above: usize,
    /// Cards scrolled out below.
    pub hidden_below: usize,
}

/// Where everything on screen goes for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLayout {
    /// The whole terminal.
    pub area: Rect,
    /// The header bar, when there is room for it.
    pub header: Option<Rect>,
    /// The missing-credentials banner, when shown.
    pub banner: Option<Rect>,
    /// The boards column.
    pub boards: Rect,
    /// Visible board rows.
    pub board_rows: Vec<BoardRow>,
    /// Boards scrolled out above.
    pub boards_hidden_above: usize,
    /// The region holding list columns.
    pub lists: Rect,
    /// Visible list columns, left to right.
    pub columns: Vec<ListColumn>,
    /// Lists scrolled out to the left.
    pub lists_hidden_left: usize,
    /// Lists scrolled out to the right.
    pub lists_hidden_right: usize,
    /// The status bar.
    pub status: Rect,
    /// Whether the terminal is below the minimum size.
    pub too_small: bool,
}

impl PanelLayout {
    /// Lays out the panel for `area`.
    #[must_use]
    pub fn compute(area: Rect, store: &Store, view: &ViewState, show_banner: bool) -> Self {
        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            return Self {
                area,
                too_small: true,
                ..Self::default()
            };
        }

        let header_height = if area.height >= MIN_HEIGHT_WITH_HEADER {
            HEADER_HEIGHT
        } else {
            0
        };
        let banner_height = if show_banner { BANNER_HEIGHT } else { 0 };
        let [header, banner, body, status] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);

        let [boards, lists] =
            Layout::horizontal([Constraint::Length(BOARDS_WIDTH), Constraint::Min(0)]).areas(body);

        let (board_rows, boards_hidden_above) = board_rows(boards, store, view);
        let (columns, lists_hidden_left, lists_hidden_right) = list_columns(lists, store, view);

        Self {
            area,
            header: (header_height > 0).then_some(header),
            banner: show_banner.then_some(banner),
            boards,
            board_rows,
            boards_hidden_above,
            lists,
            columns,
            lists_hidden_left,
            lists_hidden_right,
            status,
            too_small: false,
        }
    }

    /// Resolves a screen position to what is drawn there.
    ///
    /// Cards and the add-card row win over the list column around them.
    #[must_use]
    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        if self.too_small {
            return None;
        }
        let position = (column, row).into();

        if let Some(board) = self.board_rows.iter().find(|b| b.area.contains(position)) {
            return Some(Target::Board(board.board_id.clone()));
        }

        let list = self.columns.iter().find(|c| c.area.contains(position))?;
        if let Some(card) = list.cards.iter().find(|c| c.area.contains(position)) {
            return Some(Target::Card {
                list_id: list.list_id.clone(),
                card_id: card.card_id.clone(),
            });
        }
        if list.add_card.is_some_and(|area| area.contains(position)) {
            return Some(Target::NewCard(list.list_id.clone()));
        }
        Some(Target::List(list.list_id.clone()))
    }

    /// Returns the column showing `list_id`, if visible.
    #[must_use]
    pub fn column(&self, list_id: &str) -> Option<&ListColumn> {
        self.columns.iter().find(|c| c.list_id == list_id)
    }
}

/// Shrinks a rectangle by one cell on every side, like a bordered block.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn board_rows(boards: Rect, store: &Store, view: &ViewState) -> (Vec<BoardRow>, usize) {
    let inner = inner(boards);
    let total = store.open_boards().count();
    let visible = usize::from(inner.height);
    let offset = calculate_scroll_offset(Some(view.board_cursor), total, visible);

    let rows = store
        .open_boards()
        .enumerate()
        .skip(offset)
        .take(visible)
        .zip(inner.y..)
        .map(|((index, board), y)| BoardRow {
            board_id: board.id.clone(),
            index,
            area: Rect::new(inner.x, y, inner.width, 1),
        })
        .collect();
    (rows, offset)
}

fn list_columns(region: Rect, store: &Store, view: &ViewState) -> (Vec<ListColumn>, usize, usize) {
    let total = store.lists().len();
    if total == 0 || region.width == 0 {
        return (Vec::new(), 0, total);
    }

    let visible = usize::from((region.width / LIST_WIDTH).max(1));
    let offset = calculate_scroll_offset(Some(view.list_cursor), total, visible);
    let shown = total.saturating_sub(offset).min(visible);

    let columns = store
        .lists()
        .iter()
        .enumerate()
        .skip(offset)
        .take(shown)
        .zip(0u16..)
        .map(|((index, list), slot)| {
            let x = region.x + slot * LIST_WIDTH;
            let width = LIST_WIDTH.min(region.right().saturating_sub(x));
            let area = Rect::new(x, region.y, width, region.height);
            let cursor = (view.focus == Focus::Lists && index == view.list_cursor)
                .then_some(view.card_cursor)
                .flatten();
            list_column(list.id.clone(), index, area, store, cursor)
        })
        .collect();
    (columns, offset, total - offset - shown)
}

fn list_column(
    list_id: ListId,
    index: usize,
    area: Rect,
    store: &Store,
    cursor: Option<usize>,
) -> ListColumn {
    let inner = inner(area);
    let cards = store.cards(&list_id);

    // The last inner row is kept for the add-card row.
    let card_rows = inner.height.saturating_sub(1);
    let visible = usize::from(card_rows / CARD_HEIGHT);
    let offset = calculate_scroll_offset(cursor, cards.len(), visible);
    let shown = cards.len().saturating_sub(offset).min(visible);

    let slots: Vec<CardSlot> = cards
        .iter()
        .enumerate()
        .skip(offset)
        .take(shown)
        .zip(0u16..)
        .map(|((index, card), slot)| CardSlot {
            card_id: card.id.clone(),
            index,
            area: Rect::new(inner.x, inner.y + slot * CARD_HEIGHT, inner.width, CARD_HEIGHT),
        })
        .collect();

    let add_row = inner.y + slots.len() as u16 * CARD_HEIGHT;
    let add_card = (inner.height > 0 && add_row < inner.bottom())
        .then(|| Rect::new(inner.x, add_row, inner.width, 1));

    ListColumn {
        list_id,
        index,
        area,
        cards: slots,
        add_card,
        hidden_above: offset,
        hidden_below: cards.len() - offset - shown,
    }
}

/// Calculates the scroll offset that keeps the selected item visible.
#[must_use]
pub fn calculate_scroll_offset(
    selected_idx: Option<usize>,
    total_items: usize,
    visible_items: usize,
) -> usize {
    let Some(selected) = selected_idx else {
        return 0;
    };

    if total_items <= visible_items || visible_items == 0 {
        return 0;
    }

    let max_offset = total_items.saturating_sub(visible_items);

    if selected < visible_items / 2 {
        0
    } else {
        (selected.saturating_sub(visible_items / 2)).min(max_offset)
    }
}
