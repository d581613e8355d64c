// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    BarChart, Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Tabs, Wrap,
};
use staffdesk_app::validation::{format_cents, format_date, format_list, format_time};
use staffdesk_app::{
    AppCommand, AppMode, AppState, Bill, BudgetCategory, CHAT_GREETING, Case, ChatLog,
    ChatSender, ChatVisibility, CommsItem, Constituent, DEFAULT_PAGE_SIZE, DonationPledge,
    Event as OfficeEvent, Expense, FieldKind, FieldSpec, FormKind, FormPayload, FormTarget, Pager,
    Record, Series, TabKind, TabSummary, ValidatedForm, ValidationError, canned_reply,
    summary_for,
};
use std::collections::BTreeMap;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::{Date, OffsetDateTime};

const APP_TITLE: &str = "Congressional Staff Dashboard";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const DONATION_ALERT_AFTER: Duration = Duration::from_secs(5);
const CHAT_EXPANDED_HEIGHT: u16 = 9;
const CHAT_MINIMIZED_HEIGHT: u16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum TabSnapshot {
    Cases(Vec<Case>),
    Bills(Vec<Bill>),
    Events(Vec<OfficeEvent>),
    Constituents(Vec<Constituent>),
    Expenses(Vec<Expense>),
    Comms(Vec<CommsItem>),
}

impl TabSnapshot {
    pub const fn tab_kind(&self) -> TabKind {
        match self {
            Self::Cases(_) => TabKind::Casework,
            Self::Bills(_) => TabKind::Legislation,
            Self::Events(_) => TabKind::Schedule,
            Self::Constituents(_) => TabKind::Constituents,
            Self::Expenses(_) => TabKind::Budget,
            Self::Comms(_) => TabKind::Communications,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Cases(rows) => rows.len(),
            Self::Bills(rows) => rows.len(),
            Self::Events(rows) => rows.len(),
            Self::Constituents(rows) => rows.len(),
            Self::Expenses(rows) => rows.len(),
            Self::Comms(rows) => rows.len(),
        }
    }

    pub fn row_id_at(&self, index: usize) -> Option<i64> {
        match self {
            Self::Cases(rows) => rows.get(index).map(|row| row.row_id()),
            Self::Bills(rows) => rows.get(index).map(|row| row.row_id()),
            Self::Events(rows) => rows.get(index).map(|row| row.row_id()),
            Self::Constituents(rows) => rows.get(index).map(|row| row.row_id()),
            Self::Expenses(rows) => rows.get(index).map(|row| row.row_id()),
            Self::Comms(rows) => rows.get(index).map(|row| row.row_id()),
        }
    }

    fn projection(&self) -> TableProjection {
        match self {
            Self::Cases(rows) => project(rows),
            Self::Bills(rows) => project(rows),
            Self::Events(rows) => project(rows),
            Self::Constituents(rows) => project(rows),
            Self::Expenses(rows) => project(rows),
            Self::Comms(rows) => project(rows),
        }
    }
}

/// What a dialog submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved {
        noun: &'static str,
        id: i64,
        created: bool,
    },
    Pledged(DonationPledge),
}

pub trait AppRuntime {
    /// Rows for `tab` filtered by `query`. `None` for tabs without records.
    fn load_tab_snapshot(&mut self, tab: TabKind, query: &str) -> Result<Option<TabSnapshot>>;
    /// Dialog contents for editing an existing row.
    fn load_form_payload(&mut self, tab: TabKind, row_id: i64) -> Result<Option<FormPayload>>;
    /// Persists a validated dialog. Rejections that name a field should
    /// surface as a `ValidationError` so the dialog can mark it.
    fn submit_form(&mut self, target: FormTarget, form: ValidatedForm) -> Result<SubmitOutcome>;
    fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<()>;
    fn wallet_address(&self) -> String;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;

    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }

    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }

    fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(1000)
    }

    fn agent_reply(&mut self, prompt: &str) -> String {
        canned_reply(prompt)
    }

    /// Schedules the agent reply for `request_id` on a timer thread. The
    /// UI discards the reply if the request was superseded or canceled.
    fn spawn_chat_reply(
        &mut self,
        request_id: u64,
        prompt: &str,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let reply = self.agent_reply(prompt);
        let delay = self.chat_reply_delay();
        thread::Builder::new()
            .name("chat-reply".to_owned())
            .spawn(move || {
                thread::sleep(delay);
                let _ = tx.send(InternalEvent::ChatReply { request_id, reply });
            })
            .context("spawn chat reply timer")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    ChatReply { request_id: u64, reply: String },
    DismissAlert { token: u64 },
}

trait TableColumns: Record {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableColumns for Case {
    const COLUMNS: &'static [&'static str] = &["Constituent", "Issue", "Status", "Priority", "Date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.constituent.clone(),
            self.issue.clone(),
            self.status.label().to_owned(),
            self.priority.label().to_owned(),
            format_date(self.opened),
        ]
    }
}

impl TableColumns for Bill {
    const COLUMNS: &'static [&'static str] =
        &["Bill", "Title", "Sponsor", "Status", "Priority", "Last Action"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.title.clone(),
            self.sponsor.clone(),
            self.status.label().to_owned(),
            self.priority.label().to_owned(),
            self.last_action.clone(),
        ]
    }
}

impl TableColumns for OfficeEvent {
    const COLUMNS: &'static [&'static str] =
        &["Date", "Time", "Title", "Type", "Location", "Attendees", "Priority"];

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            format_time(self.time),
            self.title.clone(),
            self.kind.label().to_owned(),
            self.location.clone(),
            format_list(&self.attendees),
            self.priority.label().to_owned(),
        ]
    }
}

impl TableColumns for Constituent {
    const COLUMNS: &'static [&'static str] = &[
        "Name",
        "Email",
        "Phone",
        "District",
        "Category",
        "Last Contact",
        "Interests",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.district.clone(),
            self.category.label().to_owned(),
            format_date(self.last_contact),
            format_list(&self.interests),
        ]
    }
}

impl TableColumns for Expense {
    const COLUMNS: &'static [&'static str] = &["Date", "Category", "Description", "Amount"];

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            self.category.clone(),
            self.description.clone(),
            format_cents(self.amount_cents),
        ]
    }
}

impl TableColumns for CommsItem {
    const COLUMNS: &'static [&'static str] =
        &["Channel", "Title", "Date", "Status", "Reach", "Engagements"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.channel.label().to_owned(),
            self.title.clone(),
            format_date(self.date),
            self.status.label().to_owned(),
            self.reach.to_string(),
            self.engagements.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TableProjection {
    columns: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

fn project<R: TableColumns>(rows: &[R]) -> TableProjection {
    TableProjection {
        columns: R::COLUMNS,
        rows: rows.iter().map(|row| row.cells()).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListViewState {
    query: String,
    pager: Pager,
    /// Index into the visible page, not the full result.
    selected_row: usize,
}

impl ListViewState {
    fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            pager: Pager::new(page_size),
            selected_row: 0,
        }
    }

    fn clamp(&mut self, total: usize) {
        self.pager.clamp(total);
        let visible = self.pager.range(total).len();
        self.selected_row = self.selected_row.min(visible.saturating_sub(1));
    }

    fn reset_paging(&mut self) {
        self.pager.reset();
        self.selected_row = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    payload: FormPayload,
    target: FormTarget,
    field_index: usize,
    error: Option<ValidationError>,
}

impl FormUiState {
    fn new(payload: FormPayload, target: FormTarget) -> Self {
        Self {
            payload,
            target,
            field_index: 0,
            error: None,
        }
    }

    fn current_field(&self) -> FieldSpec {
        let fields = self.payload.fields();
        fields[self.field_index.min(fields.len() - 1)]
    }

    fn focus_field(&mut self, name: &str) {
        if let Some(index) = self
            .payload
            .fields()
            .iter()
            .position(|spec| spec.name == name)
        {
            self.field_index = index;
        }
    }

    fn step_field(&mut self, forward: bool) {
        let count = self.payload.fields().len();
        self.field_index = if forward {
            (self.field_index + 1) % count
        } else {
            (self.field_index + count - 1) % count
        };
    }

    fn clear_error_for(&mut self, name: &str) {
        if self.error.as_ref().is_some_and(|error| error.field() == name) {
            self.error = None;
        }
    }

    fn title(&self) -> String {
        let kind = self.payload.kind();
        match self.target {
            FormTarget::Create => kind.title().to_owned(),
            FormTarget::Update(id) => format!("Edit {} {id}", kind.noun()),
        }
    }

    fn submit_label(&self) -> &'static str {
        match (self.payload.kind(), self.target) {
            (FormKind::Donation, _) => "donate",
            (_, FormTarget::Create) => "create",
            (_, FormTarget::Update(_)) => "save",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ChatUiState {
    log: ChatLog,
    input: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DonationUiState {
    alert: Option<String>,
    alert_token: u64,
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    snapshot: Option<TabSnapshot>,
    lists: BTreeMap<TabKind, ListViewState>,
    page_size: usize,
    form: Option<FormUiState>,
    chat: ChatUiState,
    donation: DonationUiState,
    wallet_address: String,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            snapshot: None,
            lists: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            form: None,
            chat: ChatUiState::default(),
            donation: DonationUiState::default(),
            wallet_address: String::new(),
            help_visible: false,
            status_token: 0,
        }
    }
}

impl ViewData {
    fn list(&self, tab: TabKind) -> ListViewState {
        self.lists
            .get(&tab)
            .cloned()
            .unwrap_or_else(|| ListViewState::new(self.page_size))
    }

    fn list_mut(&mut self, tab: TabKind) -> &mut ListViewState {
        let page_size = self.page_size;
        self.lists
            .entry(tab)
            .or_insert_with(|| ListViewState::new(page_size))
    }

    fn total_rows(&self) -> usize {
        self.snapshot.as_ref().map_or(0, TabSnapshot::row_count)
    }

    fn selected_row_id(&self, tab: TabKind) -> Option<i64> {
        let snapshot = self.snapshot.as_ref()?;
        if snapshot.tab_kind() != tab {
            return None;
        }
        let list = self.lists.get(&tab)?;
        let start = list.pager.range(snapshot.row_count()).start;
        snapshot.row_id_at(start + list.selected_row)
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        page_size: runtime.page_size(),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        apply_internal_event(state, view_data, event);
    }
}

fn apply_internal_event(state: &mut AppState, view_data: &mut ViewData, event: InternalEvent) {
    match event {
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            state.dispatch(AppCommand::ClearStatus);
        }
        InternalEvent::ClearStatus { .. } => {}
        InternalEvent::ChatReply { request_id, reply } => {
            view_data.chat.log.deliver(request_id, reply);
        }
        InternalEvent::DismissAlert { token } if token == view_data.donation.alert_token => {
            view_data.donation.alert = None;
        }
        InternalEvent::DismissAlert { .. } => {}
    }
}

fn schedule_after(internal_tx: &Sender<InternalEvent>, delay: Duration, event: InternalEvent) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(event);
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_after(
        internal_tx,
        STATUS_CLEAR_AFTER,
        InternalEvent::ClearStatus {
            token: view_data.status_token,
        },
    );
}

fn show_donation_alert(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: String,
) {
    view_data.donation.alert = Some(message);
    view_data.donation.alert_token = view_data.donation.alert_token.saturating_add(1);
    schedule_after(
        internal_tx,
        DONATION_ALERT_AFTER,
        InternalEvent::DismissAlert {
            token: view_data.donation.alert_token,
        },
    );
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    view_data.wallet_address = runtime.wallet_address();
    let tab = state.active_tab;
    if !tab.has_records() {
        view_data.snapshot = None;
        return Ok(());
    }

    let query = view_data.list_mut(tab).query.clone();
    let snapshot = runtime
        .load_tab_snapshot(tab, &query)
        .with_context(|| format!("load {} rows", tab.label()))?;
    let total = snapshot.as_ref().map_or(0, TabSnapshot::row_count);
    view_data.list_mut(tab).clamp(total);
    view_data.snapshot = snapshot;
    Ok(())
}

fn refresh_or_report<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Err(error) = refresh_view_data(state, runtime, view_data) {
        emit_status(state, view_data, internal_tx, format!("load failed: {error:#}"));
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        view_data.chat.log.cancel_pending();
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if matches!(state.mode, AppMode::Form(_)) {
        handle_form_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.chat_focused {
        handle_chat_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    handle_table_key(state, runtime, view_data, internal_tx, key);
    false
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let tab = state.active_tab;
    let total = view_data.total_rows();
    match key.code {
        KeyCode::Char('f') | KeyCode::Tab => {
            state.dispatch(AppCommand::NextTab);
            refresh_or_report(state, runtime, view_data, internal_tx);
        }
        KeyCode::Char('b') | KeyCode::BackTab => {
            state.dispatch(AppCommand::PrevTab);
            refresh_or_report(state, runtime, view_data, internal_tx);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let list = view_data.list_mut(tab);
            let visible = list.pager.range(total).len();
            if list.selected_row + 1 < visible {
                list.selected_row += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let list = view_data.list_mut(tab);
            list.selected_row = list.selected_row.saturating_sub(1);
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            let list = view_data.list_mut(tab);
            if list.pager.next_page(total) {
                list.selected_row = 0;
            }
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            let list = view_data.list_mut(tab);
            if list.pager.prev_page() {
                list.selected_row = 0;
            }
        }
        KeyCode::Char('z') => {
            let list = view_data.list_mut(tab);
            list.pager.cycle_page_size();
            list.selected_row = 0;
            let size = list.pager.page_size();
            emit_status(state, view_data, internal_tx, format!("{size} per page"));
        }
        KeyCode::Char('/') => {
            if tab.has_records() {
                state.dispatch(AppCommand::EnterSearch);
            } else {
                emit_status(state, view_data, internal_tx, "nothing to search here");
            }
        }
        KeyCode::Char('@') => {
            state.dispatch(AppCommand::FocusChat);
        }
        KeyCode::Char('m') => {
            state.dispatch(AppCommand::ToggleChat);
            if state.chat == ChatVisibility::Minimized {
                view_data.chat.log.cancel_pending();
            }
        }
        KeyCode::Char('y') => copy_wallet_address(state, runtime, view_data, internal_tx),
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Enter if tab == TabKind::Donations => {
            open_blank_form(state, runtime, view_data, FormKind::Donation);
        }
        KeyCode::Char('i') if state.mode == AppMode::Nav => {
            state.dispatch(AppCommand::EnterEditMode);
        }
        KeyCode::Esc if state.mode == AppMode::Edit => {
            state.dispatch(AppCommand::ExitToNav);
        }
        KeyCode::Char('a') if state.mode == AppMode::Edit => {
            open_blank_form(state, runtime, view_data, tab.form_kind());
        }
        KeyCode::Char('e') if state.mode == AppMode::Edit => {
            open_edit_form(state, runtime, view_data, internal_tx);
        }
        KeyCode::Char('d') if state.mode == AppMode::Edit => {
            delete_selected_row(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let tab = state.active_tab;
    match key.code {
        KeyCode::Esc => {
            let list = view_data.list_mut(tab);
            list.query.clear();
            list.reset_paging();
            state.dispatch(AppCommand::ExitToNav);
            refresh_or_report(state, runtime, view_data, internal_tx);
        }
        KeyCode::Enter => {
            state.dispatch(AppCommand::ExitToNav);
            let total = view_data.total_rows();
            emit_status(state, view_data, internal_tx, format!("{total} matching rows"));
        }
        KeyCode::Backspace => {
            let list = view_data.list_mut(tab);
            if list.query.pop().is_some() {
                list.reset_paging();
                refresh_or_report(state, runtime, view_data, internal_tx);
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let list = view_data.list_mut(tab);
            list.query.push(ch);
            list.reset_paging();
            refresh_or_report(state, runtime, view_data, internal_tx);
        }
        _ => {}
    }
}

fn handle_chat_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::BlurChat);
        }
        KeyCode::Enter => submit_chat_input(state, runtime, view_data, internal_tx),
        KeyCode::Backspace => {
            view_data.chat.input.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.chat.input.push(ch);
        }
        _ => {}
    }
}

fn submit_chat_input<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let input = std::mem::take(&mut view_data.chat.input);
    let Some(pending) = view_data.chat.log.submit(&input) else {
        return;
    };
    if let Err(error) =
        runtime.spawn_chat_reply(pending.request_id, &pending.prompt, internal_tx.clone())
    {
        view_data.chat.log.cancel_pending();
        emit_status(state, view_data, internal_tx, format!("chat failed: {error:#}"));
    }
}

fn copy_wallet_address<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let address = runtime.wallet_address();
    let message = match runtime.copy_to_clipboard(&address) {
        Ok(()) => "wallet address copied".to_owned(),
        Err(error) => format!("copy failed: {error:#}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn open_blank_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    kind: FormKind,
) {
    let payload = FormPayload::blank_for(kind, runtime.today());
    open_form(state, view_data, payload, FormTarget::Create);
}

fn open_form(
    state: &mut AppState,
    view_data: &mut ViewData,
    payload: FormPayload,
    target: FormTarget,
) {
    let kind = payload.kind();
    view_data.form = Some(FormUiState::new(payload, target));
    state.dispatch(AppCommand::OpenForm(kind));
}

fn open_edit_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let tab = state.active_tab;
    let Some(row_id) = view_data.selected_row_id(tab) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    match runtime.load_form_payload(tab, row_id) {
        Ok(Some(payload)) => open_form(state, view_data, payload, FormTarget::Update(row_id)),
        Ok(None) => {
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("{} {row_id} not found", tab.form_kind().noun()),
            );
            refresh_or_report(state, runtime, view_data, internal_tx);
        }
        Err(error) => emit_status(state, view_data, internal_tx, format!("edit failed: {error:#}")),
    }
}

fn delete_selected_row<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let tab = state.active_tab;
    let Some(row_id) = view_data.selected_row_id(tab) else {
        emit_status(state, view_data, internal_tx, "no row selected");
        return;
    };
    let message = match runtime.delete_row(tab, row_id) {
        Ok(()) => format!("{} {row_id} deleted", tab.form_kind().noun()),
        Err(error) => format!("delete failed: {error:#}"),
    };
    refresh_or_report(state, runtime, view_data, internal_tx);
    emit_status(state, view_data, internal_tx, message);
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(spec) = view_data.form.as_ref().map(FormUiState::current_field) else {
        state.dispatch(AppCommand::ExitToNav);
        return;
    };

    match key.code {
        KeyCode::Esc => {
            view_data.form = None;
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "form canceled");
        }
        KeyCode::Enter => submit_active_form(state, runtime, view_data, internal_tx),
        _ => {
            if let Some(form) = view_data.form.as_mut() {
                edit_form_field(form, spec, key);
            }
        }
    }
}

fn edit_form_field(form: &mut FormUiState, spec: FieldSpec, key: KeyEvent) {
    let choice = spec.kind == FieldKind::Choice;
    let changed = match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.step_field(true);
            false
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.step_field(false);
            false
        }
        KeyCode::Left if choice => form.payload.cycle_choice(spec.name, false),
        KeyCode::Right | KeyCode::Char(' ') if choice => form.payload.cycle_choice(spec.name, true),
        KeyCode::Backspace => form.payload.pop_char(spec.name),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.payload.push_char(spec.name, ch)
        }
        _ => false,
    };
    if changed {
        form.clear_error_for(spec.name);
    }
}

fn submit_active_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };

    let missing = form.payload.missing_required();
    if !missing.is_empty() {
        let message = format!("required: {}", missing.join(", "));
        emit_status(state, view_data, internal_tx, message);
        return;
    }

    let validated = match form.payload.validate() {
        Ok(validated) => validated,
        Err(error) => {
            form.focus_field(error.field());
            let message = error.to_string();
            form.error = Some(error);
            emit_status(state, view_data, internal_tx, message);
            return;
        }
    };

    let target = form.target;
    match runtime.submit_form(target, validated) {
        Ok(SubmitOutcome::Saved { noun, id, created }) => {
            view_data.form = None;
            state.dispatch(AppCommand::ExitToNav);
            refresh_or_report(state, runtime, view_data, internal_tx);
            if created {
                show_last_row(state.active_tab, view_data);
            }
            let verb = if created { "created" } else { "updated" };
            emit_status(state, view_data, internal_tx, format!("{noun} {id} {verb}"));
        }
        Ok(SubmitOutcome::Pledged(pledge)) => {
            view_data.form = None;
            state.dispatch(AppCommand::ExitToNav);
            show_donation_alert(view_data, internal_tx, pledge.thank_you());
            emit_status(state, view_data, internal_tx, "donation pledged");
        }
        Err(error) => {
            if let Some(invalid) = error.downcast_ref::<ValidationError>()
                && let Some(form) = view_data.form.as_mut()
            {
                form.focus_field(invalid.field());
                form.error = Some(invalid.clone());
            }
            emit_status(state, view_data, internal_tx, format!("save failed: {error:#}"));
        }
    }
}

/// Pages forward to the end so a freshly created row is on screen.
fn show_last_row(tab: TabKind, view_data: &mut ViewData) {
    let total = view_data.total_rows();
    let list = view_data.list_mut(tab);
    while list.pager.next_page(total) {}
    list.selected_row = list.pager.range(total).len().saturating_sub(1);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DashboardLayout {
    header: Rect,
    table: Rect,
    summary: Rect,
    chat: Rect,
    status: Rect,
}

const fn chat_panel_height(visibility: ChatVisibility) -> u16 {
    match visibility {
        ChatVisibility::Expanded => CHAT_EXPANDED_HEIGHT,
        ChatVisibility::Minimized => CHAT_MINIMIZED_HEIGHT,
    }
}

fn dashboard_layout(area: Rect, chat: ChatVisibility) -> DashboardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(chat_panel_height(chat)),
            Constraint::Length(2),
        ])
        .split(area);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);

    DashboardLayout {
        header: rows[0],
        table: body[0],
        summary: body[1],
        chat: rows[2],
        status: rows[3],
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = dashboard_layout(frame.area(), state.chat);

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(TabKind::ALL.iter().map(|tab| tab.label()).collect::<Vec<_>>())
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout.header);

    if state.active_tab == TabKind::Donations {
        render_donation_panel(frame, layout.table, view_data);
    } else {
        render_table(frame, layout.table, state, view_data);
    }
    render_summary(frame, layout.summary, state.active_tab);
    render_chat_panel(frame, layout.chat, state, view_data);

    let status = Paragraph::new(status_text(state, view_data))
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(status, layout.status);

    if let Some(form) = &view_data.form {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let dialog = Paragraph::new(form_overlay_lines(form))
            .block(
                Block::default()
                    .title(form.title())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(dialog, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let tab = state.active_tab;
    let list = view_data.list(tab);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(table_title(state, &list));

    let Some(snapshot) = view_data
        .snapshot
        .as_ref()
        .filter(|snapshot| snapshot.tab_kind() == tab)
    else {
        frame.render_widget(Paragraph::new(String::new()).block(block), area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let projection = snapshot.projection();
    let total = projection.rows.len();
    let widths = vec![Constraint::Min(8); projection.columns.len().max(1)];

    let header = Row::new(projection.columns.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = list
        .pager
        .slice(&projection.rows)
        .iter()
        .enumerate()
        .map(|(row_index, cells)| {
            let selected = row_index == list.selected_row;
            Row::new(cells.iter().map(|text| {
                let mut style = Style::default();
                if let Some(color) = accent_for(text) {
                    style = style.fg(color);
                }
                if selected {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }
                Cell::from(text.clone()).style(style)
            }))
        })
        .collect::<Vec<_>>();

    if rows.is_empty() {
        let message = if list.query.is_empty() {
            "no rows yet; i then a to add one"
        } else {
            "no rows match the search"
        };
        frame.render_widget(
            Paragraph::new(message).style(Style::default().fg(Color::DarkGray)),
            parts[0],
        );
    } else {
        let table = Table::new(rows, widths).header(header).column_spacing(1);
        frame.render_widget(table, parts[0]);
    }

    let footer = Paragraph::new(list.pager.footer(total))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, parts[1]);
}

fn table_title(state: &AppState, list: &ListViewState) -> String {
    let heading = state.active_tab.heading();
    if state.mode == AppMode::Search {
        format!("{heading} · /{}_", list.query)
    } else if list.query.is_empty() {
        heading.to_owned()
    } else {
        format!("{heading} · /{}", list.query)
    }
}

fn accent_for(text: &str) -> Option<Color> {
    match text {
        "High" | "Failed" => Some(Color::Red),
        "Medium" | "In Progress" | "In Committee" | "Scheduled" => Some(Color::Yellow),
        "Low" | "Closed" | "Enacted" | "Published" => Some(Color::Green),
        "Open" | "Introduced" => Some(Color::Blue),
        _ => None,
    }
}

fn render_summary(frame: &mut ratatui::Frame<'_>, area: Rect, tab: TabKind) {
    let summary = summary_for(tab);
    let block = Block::default().borders(Borders::ALL).title(summary.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(summary.figures.len() as u16),
            Constraint::Length(1),
            Constraint::Length(summary.gauges.len() as u16 * 2),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(figure_lines(&summary)), parts[0]);
    render_gauges(frame, parts[2], summary.gauges);
    if let Some(series) = summary.series {
        render_series(frame, parts[3], tab, &series);
    }
}

fn figure_lines(summary: &TabSummary) -> Vec<Line<'static>> {
    summary
        .figures
        .iter()
        .map(|figure| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", figure.label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    figure.value,
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

fn render_gauges(frame: &mut ratatui::Frame<'_>, area: Rect, categories: &[BudgetCategory]) {
    if categories.is_empty() {
        return;
    }
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2); categories.len()])
        .split(area);
    for (category, slot) in categories.iter().zip(slots.iter()) {
        let color = if category.is_over_budget() {
            Color::Red
        } else {
            Color::Green
        };
        let gauge = Gauge::default()
            .block(Block::default().title(category.name))
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio(category.ratio())
            .label(category.gauge_label());
        frame.render_widget(gauge, *slot);
    }
}

fn render_series(frame: &mut ratatui::Frame<'_>, area: Rect, tab: TabKind, series: &Series) {
    if area.height == 0 || series.points.is_empty() {
        return;
    }
    let title = format!("{} ({})", series.title, series.unit);
    if tab == TabKind::Casework {
        let share_list = Paragraph::new(share_lines(series))
            .block(Block::default().title(title));
        frame.render_widget(share_list, area);
        return;
    }

    let count = series.points.len() as u16;
    let bar_width = (area.width.saturating_sub(count) / count.max(1)).clamp(3, 9);
    let chart = BarChart::default()
        .block(Block::default().title(title))
        .data(series.points)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

/// One line per slice of a distribution, largest share first.
fn share_lines(series: &Series) -> Vec<Line<'static>> {
    let mut slices = series
        .points
        .iter()
        .zip(series.shares())
        .map(|((label, value), share)| (*label, *value, share))
        .collect::<Vec<_>>();
    slices.sort_by(|left, right| right.1.cmp(&left.1));
    slices
        .into_iter()
        .map(|(label, value, share)| Line::raw(format!("{label:<20} {value:>4}  {share:>5.1}%")))
        .collect()
}

fn render_donation_panel(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let panel = Paragraph::new(donation_panel_lines(view_data))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(TabKind::Donations.heading()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn donation_panel_lines(view_data: &ViewData) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            "Support Our Work with Cryptocurrency Donations",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw("Contributions in USDC or USDT fund constituent outreach."),
        Line::raw(""),
    ];
    if let Some(alert) = &view_data.donation.alert {
        lines.push(Line::styled(
            alert.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw("enter  make a donation"));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Wallet Address",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::styled(
        view_data.wallet_address.clone(),
        Style::default().fg(Color::Cyan),
    ));
    lines.push(Line::raw("y  copy address"));
    lines
}

fn render_chat_panel(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    if state.chat == ChatVisibility::Minimized {
        let bar = Paragraph::new(minimized_chat_text(&view_data.chat.log)).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan),
        );
        frame.render_widget(bar, area);
        return;
    }

    let border = if state.chat_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("chat · m minimize")
        .border_style(Style::default().fg(border));
    let lines = chat_panel_lines(&view_data.chat, state.chat_focused);
    let visible = block.inner(area).height as usize;
    let skip = lines.len().saturating_sub(visible);
    let panel = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()).block(block);
    frame.render_widget(panel, area);
}

fn minimized_chat_text(log: &ChatLog) -> String {
    format!(" chat · {} messages · m restore", log.messages().len())
}

fn chat_panel_lines(chat: &ChatUiState, focused: bool) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    if chat.log.messages().is_empty() {
        lines.push(Line::styled(CHAT_GREETING, dim));
    }
    for message in chat.log.messages() {
        let color = match message.sender {
            ChatSender::User => Color::Cyan,
            ChatSender::Agent => Color::Green,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", message.sender.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(message.text.clone()),
        ]));
    }
    if chat.log.is_sending() {
        lines.push(Line::styled("agent is typing...", dim));
    }
    if focused {
        lines.push(Line::raw(format!("> {}_", chat.input)));
    } else {
        lines.push(Line::styled("@ to type a message", dim));
    }
    lines
}

fn form_overlay_lines(form: &FormUiState) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let error_style = Style::default().fg(Color::Red);
    let mut lines = Vec::new();

    for (index, spec) in form.payload.fields().iter().enumerate() {
        let active = index == form.field_index;
        let marker = if active { "> " } else { "  " };
        let label = if spec.required {
            format!("{}*", spec.label)
        } else {
            spec.label.to_owned()
        };
        let label_style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let value = form.payload.value(spec.name).unwrap_or_default();
        let value_span = if spec.kind == FieldKind::Choice {
            Span::raw(format!("< {value} >"))
        } else if value.is_empty() {
            Span::styled(spec.kind.hint(), dim)
        } else {
            Span::raw(value)
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label:<18}"), label_style),
            value_span,
        ]));

        if let Some(error) = &form.error
            && error.field() == spec.name
        {
            lines.push(Line::styled(format!("    {error}"), error_style));
        }
    }

    lines.push(Line::raw(""));
    let missing = form.payload.missing_required();
    if missing.is_empty() {
        lines.push(Line::styled(
            format!(
                "enter {} · tab next field · esc cancel",
                form.submit_label()
            ),
            dim,
        ));
    } else {
        lines.push(Line::styled(
            format!("{} disabled until filled: {}", form.submit_label(), missing.join(", ")),
            Style::default().fg(Color::Yellow),
        ));
    }
    lines
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let mode = match state.mode {
        AppMode::Nav => "NAV",
        AppMode::Edit => "EDIT",
        AppMode::Search => "SEARCH",
        AppMode::Form(_) => "FORM",
    };
    let hints = if state.chat_focused {
        "enter send | esc leave chat | ctrl+q"
    } else {
        match state.mode {
            AppMode::Nav => "f/b tab | j/k row | n/p page | z size | / search | i edit | @ chat | m min | ? | ctrl+q",
            AppMode::Edit => "a add | e edit | d delete | esc nav | ctrl+q",
            AppMode::Search => "type to filter | enter keep | esc clear",
            AppMode::Form(_) => "tab field | space/left/right choice | enter submit | esc cancel",
        }
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> String {
    [
        "global",
        "  ctrl+q        quit",
        "  ?             toggle help",
        "",
        "nav",
        "  f / b         next / previous tab",
        "  j / k         move row",
        "  n / p         next / previous page",
        "  z             cycle page size (5, 10, 25)",
        "  /             search this tab",
        "  i             edit mode",
        "  @             focus chat",
        "  m             minimize / restore chat",
        "  y             copy donation wallet address",
        "  enter         make a donation (donations tab)",
        "",
        "edit",
        "  a / e / d     add / edit / delete row",
        "  esc           back to nav",
        "",
        "form",
        "  tab / shift+tab  move between fields",
        "  space, left/right  change a choice",
        "  enter         submit",
        "  esc           cancel",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, ChatUiState, DashboardLayout, FormUiState, InternalEvent, SubmitOutcome,
        TabSnapshot, ViewData, apply_internal_event, chat_panel_lines, dashboard_layout,
        form_overlay_lines, handle_key_event, help_overlay_text, minimized_chat_text,
        process_internal_events, refresh_view_data, render, share_lines, status_text,
    };
    use anyhow::{Result, anyhow, bail};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::text::Line;
    use staffdesk_app::{
        AppMode, AppState, Case, CaseInput, CaseStatus, ChatVisibility, FormKind, FormPayload,
        FormTarget, ISSUE_TYPES, Priority, Record, TabKind, ValidatedForm, ValidationError,
        canned_reply, filter_records,
    };
    use staffdesk_testkit::fixture_date;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};
    use time::Date;

    const WALLET: &str = "0xfeedfacefeedfacefeedfacefeedfacefeedface";

    #[derive(Debug, Default)]
    struct TestRuntime {
        cases: Vec<Case>,
        deleted: Vec<(TabKind, i64)>,
        copied: Vec<String>,
        reject_with: Option<ValidationError>,
        fail_clipboard: bool,
        reply_delay: Duration,
    }

    impl TestRuntime {
        fn with_cases(count: i64) -> Self {
            Self {
                cases: (1..=count)
                    .map(|id| sample_case(id, &format!("Person {id}")))
                    .collect(),
                ..Self::default()
            }
        }

        fn next_id(&self) -> i64 {
            self.cases.iter().map(|row| row.row_id()).max().unwrap_or(0) + 1
        }
    }

    fn sample_case(id: i64, constituent: &str) -> Case {
        Case::assemble(
            id,
            CaseInput {
                constituent: constituent.to_owned(),
                issue: "VA Benefits".to_owned(),
                status: CaseStatus::Open,
                priority: Priority::Medium,
                opened: fixture_date(),
            },
        )
    }

    fn empty_snapshot(tab: TabKind) -> Option<TabSnapshot> {
        match tab {
            TabKind::Casework => Some(TabSnapshot::Cases(Vec::new())),
            TabKind::Legislation => Some(TabSnapshot::Bills(Vec::new())),
            TabKind::Schedule => Some(TabSnapshot::Events(Vec::new())),
            TabKind::Constituents => Some(TabSnapshot::Constituents(Vec::new())),
            TabKind::Budget => Some(TabSnapshot::Expenses(Vec::new())),
            TabKind::Communications => Some(TabSnapshot::Comms(Vec::new())),
            TabKind::Donations => None,
        }
    }

    impl AppRuntime for TestRuntime {
        fn load_tab_snapshot(&mut self, tab: TabKind, query: &str) -> Result<Option<TabSnapshot>> {
            if tab == TabKind::Casework {
                return Ok(Some(TabSnapshot::Cases(filter_records(&self.cases, query))));
            }
            Ok(empty_snapshot(tab))
        }

        fn load_form_payload(
            &mut self,
            tab: TabKind,
            row_id: i64,
        ) -> Result<Option<FormPayload>> {
            if tab != TabKind::Casework {
                return Ok(None);
            }
            Ok(self
                .cases
                .iter()
                .find(|case| case.row_id() == row_id)
                .map(FormPayload::from))
        }

        fn submit_form(
            &mut self,
            target: FormTarget,
            form: ValidatedForm,
        ) -> Result<SubmitOutcome> {
            if let Some(error) = self.reject_with.take() {
                return Err(error.into());
            }
            match (target, form) {
                (_, ValidatedForm::Donation(pledge)) => Ok(SubmitOutcome::Pledged(pledge)),
                (FormTarget::Create, ValidatedForm::Case(input)) => {
                    let id = self.next_id();
                    self.cases.push(Case::assemble(id, input));
                    Ok(SubmitOutcome::Saved {
                        noun: Case::NOUN,
                        id,
                        created: true,
                    })
                }
                (FormTarget::Update(id), ValidatedForm::Case(input)) => {
                    let row = self
                        .cases
                        .iter_mut()
                        .find(|case| case.row_id() == id)
                        .ok_or_else(|| anyhow!("case {id} not found"))?;
                    *row = Case::assemble(id, input);
                    Ok(SubmitOutcome::Saved {
                        noun: Case::NOUN,
                        id,
                        created: false,
                    })
                }
                (_, other) => bail!("unexpected form {other:?}"),
            }
        }

        fn delete_row(&mut self, tab: TabKind, row_id: i64) -> Result<()> {
            self.deleted.push((tab, row_id));
            self.cases.retain(|case| case.row_id() != row_id);
            Ok(())
        }

        fn wallet_address(&self) -> String {
            WALLET.to_owned()
        }

        fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
            if self.fail_clipboard {
                bail!("no clipboard available");
            }
            self.copied.push(text.to_owned());
            Ok(())
        }

        fn today(&self) -> Date {
            fixture_date()
        }

        fn chat_reply_delay(&self) -> Duration {
            self.reply_delay
        }
    }

    fn view_data_for_test() -> ViewData {
        ViewData::default()
    }

    fn internal_channel() -> (
        mpsc::Sender<InternalEvent>,
        mpsc::Receiver<InternalEvent>,
    ) {
        mpsc::channel()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chars(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
    }

    fn setup(count: i64) -> (AppState, TestRuntime, ViewData) {
        let state = AppState::default();
        let mut runtime = TestRuntime::with_cases(count);
        let mut view_data = view_data_for_test();
        refresh_view_data(&state, &mut runtime, &mut view_data).expect("initial refresh");
        (state, runtime, view_data)
    }

    fn run_key_script(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        tx: &mpsc::Sender<InternalEvent>,
        rx: &mpsc::Receiver<InternalEvent>,
        keys: &[KeyEvent],
    ) {
        for key in keys {
            let _ = handle_key_event(state, runtime, view_data, tx, *key);
            process_internal_events(state, view_data, rx);
        }
    }

    fn await_internal(
        state: &mut AppState,
        view_data: &mut ViewData,
        rx: &mpsc::Receiver<InternalEvent>,
    ) {
        let event = rx
            .recv_timeout(Duration::from_secs(2))
            .expect("internal event before timeout");
        apply_internal_event(state, view_data, event);
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn rendered(state: &AppState, view_data: &ViewData) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, state, view_data))
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    fn selected_constituent(view_data: &ViewData) -> Option<String> {
        let id = view_data.selected_row_id(TabKind::Casework)?;
        match &view_data.snapshot {
            Some(TabSnapshot::Cases(rows)) => rows
                .iter()
                .find(|case| case.row_id() == id)
                .map(|case| case.constituent.clone()),
            _ => None,
        }
    }

    #[test]
    fn tab_keys_cycle_and_load_snapshots() {
        let (mut state, mut runtime, mut view_data) = setup(3);
        let (tx, rx) = internal_channel();

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('f'))]);
        assert_eq!(state.active_tab, TabKind::Legislation);
        assert_eq!(
            view_data.snapshot.as_ref().map(TabSnapshot::tab_kind),
            Some(TabKind::Legislation)
        );

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('b')), key(KeyCode::Char('b'))],
        );
        assert_eq!(state.active_tab, TabKind::Donations);
        assert!(view_data.snapshot.is_none());
        assert_eq!(view_data.wallet_address, WALLET);
    }

    #[test]
    fn row_movement_stays_on_the_visible_page() {
        let (mut state, mut runtime, mut view_data) = setup(7);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('j')); 9],
        );
        assert_eq!(selected_constituent(&view_data).as_deref(), Some("Person 5"));

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('n'))]);
        assert_eq!(selected_constituent(&view_data).as_deref(), Some("Person 6"));
        assert_eq!(view_data.list(TabKind::Casework).pager.page(), 1);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('n'))]);
        assert_eq!(view_data.list(TabKind::Casework).pager.page(), 1);

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('k')), key(KeyCode::Char('p'))],
        );
        assert_eq!(selected_constituent(&view_data).as_deref(), Some("Person 1"));
    }

    #[test]
    fn page_size_cycles_and_resets_page() {
        let (mut state, mut runtime, mut view_data) = setup(30);
        let (tx, rx) = internal_channel();

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('n'))]);
        assert_eq!(view_data.list(TabKind::Casework).pager.page(), 1);

        let mut sizes = Vec::new();
        for _ in 0..3 {
            run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('z'))]);
            let list = view_data.list(TabKind::Casework);
            assert_eq!(list.pager.page(), 0);
            sizes.push(list.pager.page_size());
        }
        assert_eq!(sizes, vec![10, 25, 5]);
        assert_eq!(state.status_line.as_deref(), Some("5 per page"));
    }

    #[test]
    fn search_typing_filters_and_returns_to_first_page() {
        let (mut state, mut runtime, mut view_data) = setup(12);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('n')), key(KeyCode::Char('/'))],
        );
        assert_eq!(state.mode, AppMode::Search);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &chars("PERSON 1"));
        let list = view_data.list(TabKind::Casework);
        assert_eq!(list.query, "PERSON 1");
        assert_eq!(list.pager.page(), 0);
        // Person 1, 10, 11, 12
        assert_eq!(view_data.total_rows(), 4);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Enter)]);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("4 matching rows"));
        assert_eq!(view_data.list(TabKind::Casework).query, "PERSON 1");

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('/')), key(KeyCode::Esc)],
        );
        assert!(view_data.list(TabKind::Casework).query.is_empty());
        assert_eq!(view_data.total_rows(), 12);
    }

    #[test]
    fn search_is_refused_on_the_donations_tab() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();
        state.active_tab = TabKind::Donations;

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('/'))]);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("nothing to search here"));
    }

    #[test]
    fn submit_is_disabled_until_required_fields_are_filled() {
        let (mut state, mut runtime, mut view_data) = setup(3);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('i')), key(KeyCode::Char('a')), key(KeyCode::Enter)],
        );
        assert_eq!(state.mode, AppMode::Form(FormKind::Case));
        assert!(view_data.form.is_some());
        assert_eq!(
            state.status_line.as_deref(),
            Some("required: Constituent Name, Issue")
        );
        assert_eq!(runtime.cases.len(), 3);

        let form = view_data.form.as_ref().expect("form open");
        let footer = form_overlay_lines(form)
            .last()
            .map(line_text)
            .unwrap_or_default();
        assert_eq!(
            footer,
            "create disabled until filled: Constituent Name, Issue"
        );
    }

    #[test]
    fn creating_a_case_appends_and_resets_the_form() {
        let (mut state, mut runtime, mut view_data) = setup(8);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('i')), key(KeyCode::Char('a'))];
        keys.extend(chars("Jane Roe"));
        keys.push(key(KeyCode::Tab));
        keys.extend(chars("Passport"));
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert_eq!(runtime.cases.len(), 9);
        let created = runtime.cases.last().expect("created case");
        assert_eq!(created.row_id(), 9);
        assert_eq!(created.constituent, "Jane Roe");
        assert_eq!(created.status, CaseStatus::Open);
        assert_eq!(created.opened, fixture_date());
        assert!(view_data.form.is_none());
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("case 9 created"));
        assert_eq!(selected_constituent(&view_data).as_deref(), Some("Jane Roe"));

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('i')), key(KeyCode::Char('a'))],
        );
        let form = view_data.form.as_ref().expect("form reopened");
        assert_eq!(form.payload, FormPayload::blank_for(FormKind::Case, fixture_date()));
        assert_eq!(form.field_index, 0);
    }

    #[test]
    fn choice_fields_cycle_with_space_and_arrows() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[
                key(KeyCode::Char('i')),
                key(KeyCode::Char('a')),
                key(KeyCode::Tab),
                key(KeyCode::Tab),
                key(KeyCode::Char(' ')),
            ],
        );
        let form = view_data.form.as_ref().expect("form open");
        assert_eq!(form.payload.value("status").as_deref(), Some("In Progress"));

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Left), key(KeyCode::Left)],
        );
        let form = view_data.form.as_ref().expect("form open");
        assert_eq!(form.payload.value("status").as_deref(), Some("Closed"));
    }

    #[test]
    fn invalid_date_is_shown_next_to_its_field() {
        let (mut state, mut runtime, mut view_data) = setup(2);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('i')), key(KeyCode::Char('a'))];
        keys.extend(chars("Jane Roe"));
        keys.push(key(KeyCode::Tab));
        keys.extend(chars("Passport"));
        keys.push(key(KeyCode::BackTab));
        keys.push(key(KeyCode::BackTab));
        keys.extend(vec![key(KeyCode::Backspace); 10]);
        keys.extend(chars("2024-13-01"));
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert_eq!(runtime.cases.len(), 2);
        let form = view_data.form.as_ref().expect("form stays open");
        assert_eq!(form.field_index, 4);
        assert!(matches!(
            form.error,
            Some(ValidationError::InvalidDate { field: "date", .. })
        ));

        let texts = form_overlay_lines(form)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        let date_line = texts
            .iter()
            .position(|text| text.contains("Date*"))
            .expect("date row");
        let error = form.error.as_ref().expect("error").to_string();
        assert_eq!(texts[date_line + 1].trim(), error);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Backspace)]);
        assert!(view_data.form.as_ref().expect("form").error.is_none());
    }

    #[test]
    fn runtime_validation_errors_mark_the_field() {
        let (mut state, mut runtime, mut view_data) = setup(2);
        let (tx, rx) = internal_channel();
        runtime.reject_with = Some(ValidationError::Required { field: "issue" });

        let mut keys = vec![key(KeyCode::Char('i')), key(KeyCode::Char('a'))];
        keys.extend(chars("Jane Roe"));
        keys.push(key(KeyCode::Tab));
        keys.extend(chars("Passport"));
        keys.push(key(KeyCode::Tab));
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        let form = view_data.form.as_ref().expect("form stays open");
        assert_eq!(form.field_index, 1);
        assert_eq!(
            form.error,
            Some(ValidationError::Required { field: "issue" })
        );
        assert!(
            state
                .status_line
                .as_deref()
                .is_some_and(|status| status.starts_with("save failed:"))
        );
    }

    #[test]
    fn escape_cancels_the_form() {
        let (mut state, mut runtime, mut view_data) = setup(2);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('i')), key(KeyCode::Char('a'))];
        keys.extend(chars("half typed"));
        keys.push(key(KeyCode::Esc));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert!(view_data.form.is_none());
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("form canceled"));
        assert_eq!(runtime.cases.len(), 2);
    }

    #[test]
    fn editing_a_row_updates_it_in_place() {
        let (mut state, mut runtime, mut view_data) = setup(3);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[
                key(KeyCode::Char('j')),
                key(KeyCode::Char('i')),
                key(KeyCode::Char('e')),
            ],
        );
        let form = view_data.form.as_ref().expect("edit form");
        assert_eq!(form.target, FormTarget::Update(2));
        assert_eq!(form.title(), "Edit case 2");
        assert_eq!(form.payload.value("constituent").as_deref(), Some("Person 2"));

        let mut keys = chars("x");
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert_eq!(runtime.cases.len(), 3);
        assert_eq!(runtime.cases[1].constituent, "Person 2x");
        assert_eq!(state.status_line.as_deref(), Some("case 2 updated"));
    }

    #[test]
    fn delete_removes_the_selected_row() {
        let (mut state, mut runtime, mut view_data) = setup(3);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('i')), key(KeyCode::Char('d'))],
        );
        assert_eq!(runtime.deleted, vec![(TabKind::Casework, 1)]);
        assert_eq!(view_data.total_rows(), 2);
        assert_eq!(state.status_line.as_deref(), Some("case 1 deleted"));
        assert_eq!(state.mode, AppMode::Edit);
    }

    #[test]
    fn edit_keys_need_a_selected_row() {
        let (mut state, mut runtime, mut view_data) = setup(0);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('i')), key(KeyCode::Char('e'))],
        );
        assert!(view_data.form.is_none());
        assert_eq!(state.status_line.as_deref(), Some("no row selected"));
    }

    #[test]
    fn chat_reply_arrives_after_the_delay() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('@'))];
        keys.extend(chars("  hello  "));
        keys.push(key(KeyCode::Enter));
        for key in keys {
            let _ = handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key);
        }
        assert!(state.chat_focused);
        assert!(view_data.chat.log.is_sending());
        assert!(view_data.chat.input.is_empty());

        await_internal(&mut state, &mut view_data, &rx);
        let texts = view_data
            .chat
            .log
            .messages()
            .iter()
            .map(|message| message.text.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec!["  hello  ".to_owned(), canned_reply("  hello  ")]
        );
        assert!(!view_data.chat.log.is_sending());
    }

    #[test]
    fn chat_reply_waits_for_the_configured_delay() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        runtime.reply_delay = Duration::from_millis(200);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('@'))];
        keys.extend(chars("status?"));
        for key in keys {
            let _ = handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key);
        }
        let sent_at = Instant::now();
        let _ = handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key(KeyCode::Enter));

        assert!(rx.try_recv().is_err());
        assert!(view_data.chat.log.is_sending());
        assert_eq!(view_data.chat.log.messages().len(), 1);

        await_internal(&mut state, &mut view_data, &rx);
        assert!(sent_at.elapsed() >= Duration::from_millis(200));
        let texts = view_data
            .chat
            .log
            .messages()
            .iter()
            .map(|message| message.text.clone())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["status?".to_owned(), canned_reply("status?")]);
        assert!(!view_data.chat.log.is_sending());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn blank_chat_input_sends_nothing() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('@'))];
        keys.extend(chars("   "));
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert!(view_data.chat.log.messages().is_empty());
        assert!(!view_data.chat.log.is_sending());
    }

    #[test]
    fn newer_chat_prompt_supersedes_the_pending_reply() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('@'))];
        keys.extend(chars("first"));
        keys.push(key(KeyCode::Enter));
        keys.extend(chars("second"));
        keys.push(key(KeyCode::Enter));
        for key in keys {
            let _ = handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key);
        }

        await_internal(&mut state, &mut view_data, &rx);
        await_internal(&mut state, &mut view_data, &rx);
        let texts = view_data
            .chat
            .log
            .messages()
            .iter()
            .map(|message| message.text.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                "first".to_owned(),
                "second".to_owned(),
                canned_reply("second")
            ]
        );
    }

    #[test]
    fn minimizing_cancels_the_pending_reply() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        let mut keys = vec![key(KeyCode::Char('@'))];
        keys.extend(chars("hello"));
        keys.push(key(KeyCode::Enter));
        keys.push(key(KeyCode::Esc));
        keys.push(key(KeyCode::Char('m')));
        for key in keys {
            let _ = handle_key_event(&mut state, &mut runtime, &mut view_data, &tx, key);
        }
        assert_eq!(state.chat, ChatVisibility::Minimized);
        assert!(!view_data.chat.log.is_sending());

        await_internal(&mut state, &mut view_data, &rx);
        assert_eq!(view_data.chat.log.messages().len(), 1);
        assert_eq!(
            minimized_chat_text(&view_data.chat.log),
            " chat · 1 messages · m restore"
        );
    }

    #[test]
    fn minimize_twice_restores_the_layout() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();
        let area = Rect::new(0, 0, 120, 40);
        let before: DashboardLayout = dashboard_layout(area, state.chat);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('m'))]);
        let minimized = dashboard_layout(area, state.chat);
        assert_eq!(minimized.chat.height, 1);
        assert!(minimized.table.height > before.table.height);

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('m'))]);
        assert_eq!(dashboard_layout(area, state.chat), before);
        assert_eq!(state.status_line.as_deref(), Some("chat restored"));
    }

    #[test]
    fn chat_panel_shows_greeting_then_typing_indicator() {
        let mut chat = ChatUiState::default();
        let texts = chat_panel_lines(&chat, false)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert_eq!(texts[0], "How can I help you today?");

        chat.log.submit("status of HR 1234");
        chat.input = "more".to_owned();
        let texts = chat_panel_lines(&chat, true)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                "you: status of HR 1234".to_owned(),
                "agent is typing...".to_owned(),
                "> more_".to_owned(),
            ]
        );
    }

    #[test]
    fn ctrl_q_quits_and_drops_pending_reply() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, _rx) = internal_channel();
        view_data.chat.log.submit("hello");

        let quit = handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(quit);
        assert!(!view_data.chat.log.is_sending());
    }

    #[test]
    fn donation_shows_thank_you_until_dismissed() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();
        state.active_tab = TabKind::Donations;
        refresh_view_data(&state, &mut runtime, &mut view_data).expect("refresh");

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Enter), key(KeyCode::Enter)],
        );
        assert_eq!(state.mode, AppMode::Form(FormKind::Donation));
        assert_eq!(state.status_line.as_deref(), Some("required: Amount"));

        let mut keys = chars("50");
        keys.push(key(KeyCode::Tab));
        keys.push(key(KeyCode::Right));
        keys.push(key(KeyCode::Enter));
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &keys);

        assert!(view_data.form.is_none());
        assert_eq!(
            view_data.donation.alert.as_deref(),
            Some("Thank you for your donation! Please send 50 USDT to the wallet address below.")
        );

        let token = view_data.donation.alert_token;
        apply_internal_event(
            &mut state,
            &mut view_data,
            InternalEvent::DismissAlert { token: token - 1 },
        );
        assert!(view_data.donation.alert.is_some());
        apply_internal_event(&mut state, &mut view_data, InternalEvent::DismissAlert { token });
        assert!(view_data.donation.alert.is_none());
    }

    #[test]
    fn copy_wallet_reports_success_and_failure() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('y'))]);
        assert_eq!(runtime.copied, vec![WALLET.to_owned()]);
        assert_eq!(state.status_line.as_deref(), Some("wallet address copied"));

        runtime.fail_clipboard = true;
        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Char('y'))]);
        assert_eq!(
            state.status_line.as_deref(),
            Some("copy failed: no clipboard available")
        );
    }

    #[test]
    fn stale_status_clear_is_ignored() {
        let (mut state, _runtime, mut view_data) = setup(1);
        state.status_line = Some("case 9 created".to_owned());
        view_data.status_token = 3;

        apply_internal_event(&mut state, &mut view_data, InternalEvent::ClearStatus { token: 2 });
        assert!(state.status_line.is_some());
        apply_internal_event(&mut state, &mut view_data, InternalEvent::ClearStatus { token: 3 });
        assert!(state.status_line.is_none());
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let (mut state, mut runtime, mut view_data) = setup(1);
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &mut runtime,
            &mut view_data,
            &tx,
            &rx,
            &[key(KeyCode::Char('?')), key(KeyCode::Char('f'))],
        );
        assert!(view_data.help_visible);
        assert_eq!(state.active_tab, TabKind::Casework);
        assert!(status_text(&state, &view_data).is_empty());
        assert!(help_overlay_text().contains("cycle page size"));

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Esc)]);
        assert!(!view_data.help_visible);
    }

    #[test]
    fn status_text_names_the_mode() {
        let mut state = AppState::default();
        let view_data = view_data_for_test();
        assert!(status_text(&state, &view_data).starts_with("NAV | f/b tab"));

        state.mode = AppMode::Search;
        state.status_line = Some("4 matching rows".to_owned());
        assert!(status_text(&state, &view_data).starts_with("SEARCH | 4 matching rows |"));

        state.mode = AppMode::Form(FormKind::Case);
        assert!(status_text(&state, &view_data).starts_with("FORM |"));
    }

    #[test]
    fn issue_shares_list_largest_first() {
        let lines = share_lines(&ISSUE_TYPES)
            .iter()
            .map(line_text)
            .collect::<Vec<_>>();
        assert_eq!(lines.len(), ISSUE_TYPES.points.len());
        assert!(lines[0].starts_with(ISSUE_TYPES.points[0].0));
        assert!(lines[0].ends_with("25.0%"));
    }

    #[test]
    fn edit_form_title_names_the_row() {
        let case = sample_case(4, "Maria Garcia");
        let form = FormUiState::new(FormPayload::from(&case), FormTarget::Update(4));
        assert_eq!(form.title(), "Edit case 4");
        assert_eq!(form.submit_label(), "save");
    }

    #[test]
    fn renders_casework_table_and_summary() {
        let (state, _runtime, view_data) = setup(6);
        let screen = rendered(&state, &view_data);
        assert!(screen.contains("Congressional Staff Dashboard"));
        assert!(screen.contains("Constituent Casework"));
        assert!(screen.contains("Person 5"));
        assert!(!screen.contains("Person 6"));
        assert!(screen.contains("rows 1-5 of 6"));
        assert!(screen.contains("How can I help you today?"));
    }

    #[test]
    fn renders_budget_gauges() {
        let (mut state, mut runtime, mut view_data) = setup(0);
        state.active_tab = TabKind::Budget;
        refresh_view_data(&state, &mut runtime, &mut view_data).expect("refresh");
        let screen = rendered(&state, &view_data);
        assert!(screen.contains("Staff Salaries"));
        assert!(screen.contains("$500k of $800k (62.5%)"));
        assert!(screen.contains("no rows yet"));
    }

    #[test]
    fn renders_donation_panel_and_form_overlay() {
        let (mut state, mut runtime, mut view_data) = setup(0);
        let (tx, rx) = internal_channel();
        state.active_tab = TabKind::Donations;
        refresh_view_data(&state, &mut runtime, &mut view_data).expect("refresh");
        let screen = rendered(&state, &view_data);
        assert!(screen.contains(WALLET));
        assert!(screen.contains("Support Our Work"));

        run_key_script(&mut state, &mut runtime, &mut view_data, &tx, &rx, &[key(KeyCode::Enter)]);
        let screen = rendered(&state, &view_data);
        assert!(screen.contains("Make a Donation"));
        assert!(screen.contains("Cryptocurrency*"));
    }
}
