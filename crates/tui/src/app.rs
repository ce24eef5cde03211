//! Main application struct and run loop.
//!
//! The `App` binds the terminal to a [`Session`]: it turns key and mouse
//! messages into session intents, hands the resulting commands to the
//! [`Dispatcher`], applies responses as they arrive, and renders.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tracing::{debug, info, warn};
use uniwork_protocol::{DragState, ListId, Message, Pointer, Target};
use uniwork_session::runtime::ResponseReceiver;
use uniwork_session::{Command, Dispatcher, Notice, Response, Session};

use crate::{
    connection::Connection,
    event::{event_to_message, key_to_settings_message, key_to_text_message, poll_event},
    layout::{MIN_HEIGHT, MIN_WIDTH, PanelLayout},
    settings_state::SettingsState,
    state::{CardPrompt, Focus, ViewState},
    terminal::AppTerminal,
    widgets::{
        ColumnState, StatusLine, render_boards_column, render_card_prompt,
        render_credentials_banner, render_floating_card, render_help_overlay, render_list_column,
        render_settings_panel, render_status_bar,
    },
};

/// How long a notice stays in the status bar.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// The main application struct.
///
/// Owns the session (the single writer of panel state), the view cursors,
/// and the open overlays.
#[derive(Debug)]
pub struct App {
    session: Session,
    view: ViewState,
    settings: Option<SettingsState>,
    prompt: Option<CardPrompt>,
    /// Geometry of the last render, used for pointer hit-testing.
    layout: PanelLayout,
    connection: Connection,
    dispatcher: Option<Dispatcher>,
    /// Set by the session observer whenever panel state changes.
    redraw: Arc<AtomicBool>,
    notice_shown: Option<(Notice, Instant)>,
    should_quit: bool,
}

impl App {
    /// Creates an application over `connection`. Call [`App::open`] next.
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        let redraw = Arc::new(AtomicBool::new(true));
        let mut session = Session::new();
        let flag = Arc::clone(&redraw);
        session.subscribe(move |_| flag.store(true, Ordering::Release));

        Self {
            session,
            view: ViewState::new(),
            settings: None,
            prompt: None,
            layout: PanelLayout::default(),
            connection,
            dispatcher: None,
            redraw,
            notice_shown: None,
            should_quit: false,
        }
    }

    /// Connects with the current credentials and starts loading boards.
    ///
    /// Without usable credentials the banner is shown and nothing is
    /// fetched. Must be called within a tokio runtime.
    pub fn open(&mut self) {
        let commands = match self.connection.connect() {
            Ok(dispatcher) => {
                info!("connected to Trello");
                self.dispatcher = Some(dispatcher);
                let mut commands = self.session.open(true);
                if let Some(board_id) = self.session.selection().board_id().map(str::to_string) {
                    commands.extend(self.session.select_board(&board_id));
                    self.view.reset_lists();
                }
                commands
            }
            Err(err) => {
                info!(error = %err, "not connected");
                self.dispatcher = None;
                self.session.open(false)
            }
        };
        self.dispatch(commands);
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the view cursors.
    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Returns the layout of the last render.
    #[must_use]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Returns the credentials connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns the settings state, if the panel is open.
    #[must_use]
    pub fn settings(&self) -> Option<&SettingsState> {
        self.settings.as_ref()
    }

    /// Returns whether the settings panel is open.
    #[must_use]
    pub fn is_settings_open(&self) -> bool {
        self.settings.is_some()
    }

    /// Returns the new-card prompt, if open.
    #[must_use]
    pub fn prompt(&self) -> Option<&CardPrompt> {
        self.prompt.as_ref()
    }

    /// Returns whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Writes the stored credentials back to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential store cannot be written.
    pub fn save_credentials(&self) -> uniwork_config::Result<()> {
        self.connection.flush()
    }

    fn dispatch(&self, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }
        match &self.dispatcher {
            Some(dispatcher) => dispatcher.dispatch(commands),
            None => debug!(count = commands.len(), "dropping commands without a connection"),
        }
    }

    /// Applies a remote result and dispatches its follow-ups.
    pub fn handle_response(&mut self, response: Response) {
        let commands = self.session.apply(response);
        self.dispatch(commands);
        self.view.clamp(self.session.store());
    }

    /// Expires the status bar notice after [`NOTICE_TTL`].
    pub fn tick(&mut self, now: Instant) {
        let Some(notice) = self.session.notice() else {
            self.notice_shown = None;
            return;
        };
        match &self.notice_shown {
            Some((shown, since)) if shown == notice => {
                if now.duration_since(*since) >= NOTICE_TTL {
                    self.session.clear_notice();
                    self.notice_shown = None;
                }
            }
            _ => self.notice_shown = Some((notice.clone(), now)),
        }
    }

    /// Updates the application state based on a message.
    ///
    /// Open overlays take messages first: settings, then the new-card
    /// prompt, then help (which any message dismisses). `Quit` always works.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }
        if self.settings.is_some() {
            self.update_settings(msg);
            return;
        }
        if self.prompt.is_some() {
            self.update_prompt(msg);
            return;
        }
        if self.view.dismiss_help() {
            return;
        }

        let dragging = self.session.drag().is_dragging();
        match msg {
            Message::NavigateUp => self.view.navigate_up(self.session.store()),
            Message::NavigateDown => self.view.navigate_down(self.session.store()),
            Message::NavigateLeft => {
                // A held card can only travel between lists.
                let at_first_list = self.view.focus == Focus::Lists && self.view.list_cursor == 0;
                if !(dragging && at_first_list) {
                    self.view.navigate_left(self.session.store());
                }
            }
            Message::NavigateRight => self.view.navigate_right(self.session.store()),
            Message::ToggleFocus if !dragging => self.view.toggle_focus(self.session.store()),
            Message::Select if dragging => self.drop_on_focused_list(),
            Message::Select => {
                if self.view.focus == Focus::Boards {
                    self.select_focused_board();
                }
            }
            Message::Grab if dragging => self.drop_on_focused_list(),
            Message::Grab => self.grab_focused_card(),
            Message::Escape if dragging => self.session.cancel_drag(),
            Message::Escape => self.session.clear_notice(),
            Message::NewCard if !dragging => self.open_prompt_for_focused_list(),
            Message::Refresh => {
                let commands = self.session.refresh();
                self.dispatch(commands);
            }
            Message::ToggleHelp => self.view.toggle_help(),
            Message::OpenSettings => {
                self.session.cancel_drag();
                self.settings = Some(SettingsState::new(self.connection.stored().clone()));
            }
            Message::PointerDown { column, row } => self.pointer_down(Pointer::new(column, row)),
            Message::PointerMove { column, row } => {
                self.session.pointer_move(Pointer::new(column, row));
            }
            Message::PointerUp { column, row } => {
                let target = self.layout.target_at(column, row);
                let commands = self.session.pointer_up(target.as_ref());
                self.finish_drop(target, commands);
            }
            _ => {}
        }
        self.view.clamp(self.session.store());
    }

    fn update_settings(&mut self, msg: Message) {
        let Some(settings) = self.settings.as_mut() else {
            return;
        };
        match msg {
            Message::CloseSettings | Message::Escape if !settings.is_editing() => {
                self.settings = None;
            }
            Message::SettingsNavigate { delta } => settings.navigate(delta),
            Message::SettingsEdit => settings.start_edit(),
            Message::TextInput { ch } => settings.input_char(ch),
            Message::TextBackspace => settings.backspace(),
            Message::TextConfirm => settings.confirm_edit(),
            Message::TextCancel => settings.cancel_edit(),
            Message::SettingsSave if !settings.is_editing() => self.save_settings(),
            _ => {}
        }
    }

    /// Persists the edited credentials, reconnects, and reloads.
    fn save_settings(&mut self) {
        let Some(settings) = &self.settings else {
            return;
        };
        let credentials = settings.credentials().clone();
        if let Err(err) = self.connection.save(credentials) {
            warn!(error = %err, "failed to save credentials");
            self.session
                .set_notice(Notice::Error(format!("Failed to save credentials: {err}")));
            return;
        }

        self.settings = None;
        self.open();
        if !self.session.credentials_missing() {
            self.session
                .set_notice(Notice::Info("Credentials saved".to_string()));
        }
    }

    fn update_prompt(&mut self, msg: Message) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match msg {
            Message::TextInput { ch } => prompt.input.insert_char(ch),
            Message::TextBackspace => prompt.input.backspace(),
            Message::TextConfirm => {
                if let Some(prompt) = self.prompt.take() {
                    let commands = self
                        .session
                        .request_create_card(&prompt.list_id, prompt.input.value());
                    self.dispatch(commands);
                }
            }
            Message::TextCancel | Message::Escape => self.prompt = None,
            _ => {}
        }
    }

    fn select_focused_board(&mut self) {
        let Some(board_id) = self
            .view
            .focused_board(self.session.store())
            .map(|board| board.id.clone())
        else {
            return;
        };
        let commands = self.session.select_board(&board_id);
        self.view.reset_lists();
        self.dispatch(commands);
    }

    fn grab_focused_card(&mut self) {
        let store = self.session.store();
        let (Some(list), Some(card)) = (self.view.focused_list(store), self.view.focused_card(store))
        else {
            return;
        };
        let (list_id, card_id) = (list.id.clone(), card.id.clone());
        self.session.begin_drag(&card_id, &list_id, None);
    }

    fn drop_on_focused_list(&mut self) {
        let target = self
            .view
            .focused_list(self.session.store())
            .map(|list| Target::List(list.id.clone()));
        let commands = self.session.drop(target.as_ref());
        self.finish_drop(target, commands);
    }

    /// Dispatches the commands of a finished drag; a successful move puts
    /// the cursor on the moved card.
    fn finish_drop(&mut self, target: Option<Target>, commands: Vec<Command>) {
        let destination: Option<ListId> = target
            .as_ref()
            .and_then(Target::drop_list)
            .map(str::to_string);
        if !commands.is_empty()
            && let Some(destination) = destination
        {
            let store = self.session.store();
            self.view.focus_list(store, &destination);
            self.view.focus_last_card(store);
        }
        self.dispatch(commands);
    }

    fn open_prompt_for_focused_list(&mut self) {
        if self.view.focus != Focus::Lists {
            return;
        }
        if let Some(list) = self.view.focused_list(self.session.store()) {
            self.prompt = Some(CardPrompt::new(list));
        }
    }

    fn pointer_down(&mut self, pointer: Pointer) {
        let target = self.layout.target_at(pointer.column, pointer.row);
        match &target {
            Some(Target::Board(board_id)) => {
                if let Some(row) = self.layout.board_rows.iter().find(|r| r.board_id == *board_id) {
                    self.view.board_cursor = row.index;
                }
                self.view.focus = Focus::Boards;
                self.view.reset_lists();
            }
            Some(Target::Card { list_id, card_id }) => {
                let store = self.session.store();
                if let Some(list_index) = store.lists().iter().position(|l| l.id == *list_id) {
                    let card_index = store.card_position(list_id, card_id);
                    self.view.focus_card(store, list_index, card_index);
                }
            }
            Some(Target::NewCard(list_id)) => {
                let store = self.session.store();
                self.view.focus_list(store, list_id);
                if let Some(list) = store.list(list_id) {
                    self.prompt = Some(CardPrompt::new(list));
                }
            }
            Some(Target::List(list_id)) => self.view.focus_list(self.session.store(), list_id),
            None => {}
        }
        let commands = self.session.pointer_down(target.as_ref(), pointer);
        self.dispatch(commands);
    }

    /// Maps a terminal event to a message for whatever has input focus.
    fn event_message(&self, event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Press => None,
            Event::Key(key) => {
                if let Some(settings) = &self.settings {
                    key_to_settings_message(*key, settings.is_editing())
                } else if self.prompt.is_some() {
                    key_to_text_message(*key)
                } else {
                    event_to_message(event)
                }
            }
            Event::Mouse(_) if self.settings.is_some() || self.prompt.is_some() => None,
            _ => event_to_message(event),
        }
    }

    /// The list a held card would land in right now, if it differs from
    /// its source.
    fn hover_list(&self) -> Option<ListId> {
        let DragState::Dragging {
            source, pointer, ..
        } = self.session.drag()
        else {
            return None;
        };
        let list_id = match pointer {
            Some(pointer) => self
                .layout
                .target_at(pointer.column, pointer.row)
                .and_then(|target| target.drop_list().map(str::to_string)),
            None => self
                .view
                .focused_list(self.session.store())
                .map(|list| list.id.clone()),
        }?;
        (list_id != *source).then_some(list_id)
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - Below the minimum dimensions, shows a "terminal too small" message.
    /// - Below `MIN_HEIGHT_WITH_HEADER`, hides the header to reclaim space.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let snapshot = self.session.snapshot();
        self.layout = PanelLayout::compute(
            area,
            snapshot.store,
            &self.view,
            snapshot.credentials_missing,
        );

        if self.layout.too_small {
            render_terminal_too_small(frame, area);
            return;
        }

        if let Some(header) = self.layout.header {
            self.render_header(frame, header);
        }
        if let Some(banner) = self.layout.banner {
            render_credentials_banner(banner, frame.buffer_mut());
        }

        let board_cursor = (self.view.focus == Focus::Boards).then_some(self.view.board_cursor);
        let loading = snapshot.in_flight > 0;
        render_boards_column(
            &self.layout,
            snapshot.store,
            snapshot.selection,
            board_cursor,
            loading,
            frame.buffer_mut(),
        );

        if self.layout.columns.is_empty() {
            self.render_lists_placeholder(frame, loading);
        }
        let hover = self.hover_list();
        let held_card = snapshot.drag.card().map(|card| card.id.as_str());
        for column in &self.layout.columns {
            let Some(list) = snapshot.store.lists().get(column.index) else {
                continue;
            };
            let focused = self.view.focus == Focus::Lists && self.view.list_cursor == column.index;
            let state = ColumnState {
                focused,
                card_cursor: self.view.card_cursor,
                held_card,
                drop_target: hover.as_deref() == Some(list.id.as_str()),
            };
            render_list_column(column, list, snapshot.store, state, frame.buffer_mut());
        }

        render_status_bar(
            StatusLine {
                notice: snapshot.notice,
                in_flight: snapshot.in_flight,
                dragging: snapshot.drag.is_dragging(),
            },
            self.layout.status,
            frame.buffer_mut(),
        );

        if let DragState::Dragging {
            card,
            pointer: Some(pointer),
            ..
        } = snapshot.drag
        {
            render_floating_card(card, *pointer, area, frame.buffer_mut());
        }

        if let Some(prompt) = &self.prompt {
            render_card_prompt(prompt, area, frame.buffer_mut());
        }
        if self.view.help_visible {
            render_help_overlay(area, frame.buffer_mut());
        }
        if let Some(settings) = &self.settings {
            render_settings_panel(settings, area, frame.buffer_mut());
        }
    }

    /// Renders the header bar with title and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(inner);

        let board_name = self
            .session
            .selection()
            .board_id()
            .and_then(|id| self.session.store().board(id))
            .map_or("Trello", |board| board.name.as_str());
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "uniwork",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(board_name.to_string(), Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    fn render_lists_placeholder(&self, frame: &mut Frame, loading: bool) {
        let text = match self.session.selection().board_id() {
            None => "Select a board",
            Some(_) if loading => "Loading lists...",
            Some(_) => "No lists on this board",
        };
        let area = self.layout.lists;
        let inner = Rect {
            x: area.x.saturating_add(2),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(1),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            inner,
        );
    }

    /// Runs the main application loop until the user quits.
    ///
    /// Responses are drained from `responses` between terminal events, so
    /// the session is only ever touched from this task.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    pub async fn run(
        &mut self,
        terminal: &mut AppTerminal,
        responses: &mut ResponseReceiver,
    ) -> anyhow::Result<()> {
        let mut needs_draw = true;
        loop {
            while let Ok(response) = responses.try_recv() {
                self.handle_response(response);
            }
            self.tick(Instant::now());

            needs_draw |= self.redraw.swap(false, Ordering::AcqRel);
            if needs_draw {
                terminal.draw(|frame| self.view(frame))?;
                needs_draw = false;
            }

            if let Some(event) = poll_event()? {
                needs_draw = true;
                if let Some(msg) = self.event_message(&event) {
                    self.update(msg);
                }
            }

            if self.should_quit {
                break;
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + vertical_offset,
        width: area.width,
        height: area.height.saturating_sub(vertical_offset),
    };

    frame.render_widget(paragraph, centered_area);
}
