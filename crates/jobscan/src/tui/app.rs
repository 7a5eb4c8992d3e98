//! Application state and event loop.

use super::fetch::{FetchOutcome, FetchRequest, spawn_worker};
use super::ui;
use crate::pager::Pager;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use jobscan_remotive::{CATEGORIES, Category, Job};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Position, Rect},
    widgets::ListState,
};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

/// Informational notice for a valid zero-match search.
pub const EMPTY_NOTICE: &str = "No results found.";
/// Generic notice for any transport or parse failure.
pub const ERROR_NOTICE: &str = "Failed to fetch jobs. Please try again.";

/// Simple single-line text input with cursor.
#[derive(Default, Clone)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .chars()
                .next()
                .map(|c| self.cursor + c.len_utf8())
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Delete the whitespace-delimited word before the cursor.
    pub fn delete_word_before(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let s = &self.text[..self.cursor];
        let trimmed_len = s
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let start = s[..trimmed_len]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Handle a key event, returns true if the event was consumed.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = modifiers.contains(KeyModifiers::ALT);

        match code {
            KeyCode::Char('u') if has_ctrl => self.clear(),
            KeyCode::Char('w') if has_ctrl => self.delete_word_before(),
            KeyCode::Char('a') if has_ctrl => self.move_start(),
            KeyCode::Char('e') if has_ctrl => self.move_end(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Char(c) if !has_ctrl && !has_alt => self.insert_char(c),
            _ => return false,
        }
        true
    }
}

/// Toast notification state.
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
    pub is_error: bool,
}

impl Toast {
    pub fn new(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: false,
        }
    }

    pub fn error(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
            is_error: true,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// What occupies the results area. The panels are mutually exclusive: listing
/// cards are never composed with a notice or the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading { started_at: Instant },
    Results,
    Empty,
    Error,
}

/// Detail overlay for one listing, addressed by id into the live result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub job_id: u64,
    pub scroll: u16,
}

/// Application state. All reads and writes happen on the UI thread; the fetch
/// worker only communicates through channels.
pub struct App {
    pub search_input: TextInput,
    pub category_index: usize,
    pub state: SearchState,
    /// The live result set, replaced wholesale per search.
    pub jobs: Vec<Job>,
    pub pager: Pager,
    /// Selection within the current page.
    pub list_state: ListState,
    pub overlay: Option<Overlay>,
    /// Area of the overlay as last rendered, for backdrop click dismissal.
    pub overlay_area: Option<Rect>,
    pub toast: Option<Toast>,
    pub last_fetch: Option<Duration>,
    pub should_quit: bool,
    query_counter: u64,
    req_tx: Sender<FetchRequest>,
    out_rx: Receiver<FetchOutcome>,
}

impl App {
    pub fn new() -> Self {
        let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
        let (out_tx, out_rx) = mpsc::channel::<FetchOutcome>();
        spawn_worker(req_rx, out_tx);
        Self::with_channels(req_tx, out_rx)
    }

    fn with_channels(req_tx: Sender<FetchRequest>, out_rx: Receiver<FetchOutcome>) -> Self {
        Self {
            search_input: TextInput::default(),
            category_index: 0,
            state: SearchState::Idle,
            jobs: Vec::new(),
            pager: Pager::new(0),
            list_state: ListState::default(),
            overlay: None,
            overlay_area: None,
            toast: None,
            last_fetch: None,
            should_quit: false,
            query_counter: 0,
            req_tx,
            out_rx,
        }
    }

    pub fn current_category(&self) -> &'static Category {
        &CATEGORIES[self.category_index]
    }

    /// Issue a search with the current criteria. Entering Loading discards the
    /// previous result set and hides any notice and pagination at once, so
    /// stale results are never shown alongside the loading indicator.
    pub fn submit_search(&mut self) {
        self.query_counter += 1;
        let request = FetchRequest {
            id: self.query_counter,
            keyword: self.search_input.text.trim().to_string(),
            category: self.current_category().slug.to_string(),
        };

        self.state = SearchState::Loading {
            started_at: Instant::now(),
        };
        self.jobs.clear();
        self.pager = Pager::new(0);
        self.list_state = ListState::default();
        self.overlay = None;

        let _ = self.req_tx.send(request);
    }

    /// Apply a worker outcome. Responses from superseded searches are dropped:
    /// only the most recently issued query's outcome is ever applied.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.request_id != self.query_counter {
            log::debug!(
                "dropping stale response {} (current {})",
                outcome.request_id,
                self.query_counter
            );
            return;
        }

        self.last_fetch = Some(outcome.duration);
        self.overlay = None;

        match outcome.result {
            Ok(jobs) if !jobs.is_empty() => {
                self.pager = Pager::new(jobs.len());
                self.jobs = jobs;
                self.state = SearchState::Results;
                self.list_state = ListState::default();
                self.list_state.select(Some(0));
            }
            Ok(_) => {
                self.jobs.clear();
                self.pager = Pager::new(0);
                self.state = SearchState::Empty;
            }
            Err(_) => {
                self.jobs.clear();
                self.pager = Pager::new(0);
                self.state = SearchState::Error;
            }
        }
    }

    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.out_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Listings of the current page.
    pub fn page_slice(&self) -> &[Job] {
        &self.jobs[self.pager.range()]
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.page_slice().get(self.list_state.selected()?)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.page_slice().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let new_index = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(new_index));
    }

    fn next_page(&mut self) {
        if self.state == SearchState::Results && self.pager.next() {
            self.list_state = ListState::default();
            self.list_state.select(Some(0));
        }
    }

    fn prev_page(&mut self) {
        if self.state == SearchState::Results && self.pager.prev() {
            self.list_state = ListState::default();
            self.list_state.select(Some(0));
        }
    }

    fn cycle_category(&mut self, delta: isize) {
        let len = CATEGORIES.len() as isize;
        self.category_index = ((self.category_index as isize + delta).rem_euclid(len)) as usize;
        // Changing category immediately re-runs the search.
        self.submit_search();
    }

    /// Open the detail overlay for a listing id. A no-op when the id is not in
    /// the live result set.
    pub fn open_overlay(&mut self, job_id: u64) {
        if self.jobs.iter().any(|j| j.id == job_id) {
            self.overlay = Some(Overlay { job_id, scroll: 0 });
        }
    }

    fn open_selected_overlay(&mut self) {
        if let Some(id) = self.selected_job().map(|j| j.id) {
            self.open_overlay(id);
        }
    }

    /// Dismiss the overlay; the list underneath is untouched.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.overlay_area = None;
    }

    /// The listing the overlay points at, if both still exist.
    pub fn overlay_job(&self) -> Option<&Job> {
        let overlay = self.overlay.as_ref()?;
        self.jobs.iter().find(|j| j.id == overlay.job_id)
    }

    fn scroll_overlay(&mut self, delta: i32) {
        if let Some(ref mut overlay) = self.overlay {
            overlay.scroll = overlay.scroll.saturating_add_signed(delta as i16);
        }
    }

    /// Open the apply URL in the system browser.
    fn open_apply_url(&mut self) {
        let url = self
            .overlay_job()
            .or_else(|| self.selected_job())
            .map(|j| j.url.clone());
        let Some(url) = url else { return };

        if open::that(&url).is_ok() {
            self.toast = Some(Toast::new(
                "Opened apply page in browser".to_string(),
                Duration::from_secs(2),
            ));
        } else {
            self.toast = Some(Toast::error(
                "Failed to open browser".to_string(),
                Duration::from_secs(2),
            ));
        }
    }

    pub fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        if self.overlay.is_some() {
            self.handle_overlay_event(event);
            return;
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    self.should_quit = true
                }
                (KeyCode::Enter, _) => self.submit_search(),
                (KeyCode::Tab, _) => self.cycle_category(1),
                (KeyCode::BackTab, _) => self.cycle_category(-1),
                (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                    self.move_selection(-1)
                }
                (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
                    self.move_selection(1)
                }
                (KeyCode::PageUp, _) => self.prev_page(),
                (KeyCode::PageDown, _) => self.next_page(),
                (KeyCode::Char('p'), KeyModifiers::CONTROL) => self.open_selected_overlay(),
                (KeyCode::Char('o'), KeyModifiers::CONTROL) => self.open_apply_url(),
                _ => {
                    self.search_input.handle_key(key.code, key.modifiers);
                }
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.move_selection(-1),
                MouseEventKind::ScrollDown => self.move_selection(1),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_overlay_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match (key.code, key.modifiers) {
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
                (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => self.close_overlay(),
                (KeyCode::Up, _) => self.scroll_overlay(-1),
                (KeyCode::Down, _) => self.scroll_overlay(1),
                (KeyCode::PageUp, _) => self.scroll_overlay(-10),
                (KeyCode::PageDown, _) => self.scroll_overlay(10),
                (KeyCode::Char('o'), KeyModifiers::CONTROL) => self.open_apply_url(),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_overlay(-1),
                MouseEventKind::ScrollDown => self.scroll_overlay(1),
                // A click on the backdrop dismisses the overlay
                MouseEventKind::Down(_) => {
                    let inside = self
                        .overlay_area
                        .is_some_and(|r| r.contains(Position::new(mouse.column, mouse.row)));
                    if !inside {
                        self.close_overlay();
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
}

/// Run the interactive browser.
pub fn run(keyword: String, category_index: usize) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.search_input.text = keyword;
    app.search_input.move_end();
    app.category_index = category_index;
    // Initial entry is an implicit search with the starting criteria.
    app.submit_search();

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const FRAME_TIME: Duration = Duration::from_millis(33);

    loop {
        let frame_start = Instant::now();

        // Drain pending input first
        let mut events_processed = 0usize;
        while event::poll(Duration::from_millis(0))? && events_processed < 100 {
            app.handle_event(event::read()?);
            events_processed += 1;
            if app.should_quit {
                break;
            }
        }

        if app.should_quit {
            break;
        }

        app.update_toast();
        app.poll_outcomes();

        terminal.draw(|f| ui::render(f, app))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (App, Receiver<FetchRequest>) {
        let (req_tx, req_rx) = mpsc::channel();
        let (_out_tx, out_rx) = mpsc::channel();
        (App::with_channels(req_tx, out_rx), req_rx)
    }

    fn job(id: u64) -> Job {
        Job {
            id,
            url: format!("https://remotive.com/remote-jobs/{id}"),
            title: format!("Job {id}"),
            company_name: "Acme".to_string(),
            company_logo: None,
            category: "Software Development".to_string(),
            job_type: "full_time".to_string(),
            publication_date: "2026-08-20T09:15:00".to_string(),
            candidate_required_location: "Worldwide".to_string(),
            salary: String::new(),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    fn jobs(n: u64) -> Vec<Job> {
        (1..=n).map(job).collect()
    }

    fn outcome(id: u64, result: Result<Vec<Job>, String>) -> FetchOutcome {
        FetchOutcome {
            request_id: id,
            result,
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn submitting_enters_loading_and_clears_results() {
        let (mut app, req_rx) = test_app();
        app.jobs = jobs(5);
        app.pager = Pager::new(5);
        app.state = SearchState::Results;

        app.submit_search();

        assert!(matches!(app.state, SearchState::Loading { .. }));
        assert!(app.jobs.is_empty());
        assert_eq!(app.pager.total_pages(), 0);
        assert_eq!(req_rx.try_recv().unwrap().id, 1);
    }

    #[test]
    fn non_empty_outcome_shows_page_one() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(45))));

        assert_eq!(app.state, SearchState::Results);
        assert_eq!(app.pager.page(), 1);
        assert_eq!(app.pager.total_pages(), 3);
        assert_eq!(app.page_slice().len(), 20);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn empty_outcome_shows_empty_notice_not_error() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(Vec::new())));

        assert_eq!(app.state, SearchState::Empty);
        assert_eq!(app.pager.total_pages(), 0);
    }

    #[test]
    fn failed_outcome_clears_prior_results() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(45))));

        app.submit_search();
        app.apply_outcome(outcome(2, Err("timed out".to_string())));

        assert_eq!(app.state, SearchState::Error);
        assert!(app.jobs.is_empty());
        assert_eq!(app.pager.total_pages(), 0);
    }

    #[test]
    fn stale_response_is_dropped() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.submit_search();

        // The slow first request resolves after the second was issued
        app.apply_outcome(outcome(1, Ok(jobs(45))));
        assert!(matches!(app.state, SearchState::Loading { .. }));
        assert!(app.jobs.is_empty());

        app.apply_outcome(outcome(2, Ok(jobs(3))));
        assert_eq!(app.state, SearchState::Results);
        assert_eq!(app.jobs.len(), 3);
    }

    #[test]
    fn page_navigation_moves_by_one_and_clamps() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(45))));

        app.prev_page();
        assert_eq!(app.pager.page(), 1);

        app.next_page();
        app.next_page();
        assert_eq!(app.pager.page(), 3);
        assert_eq!(app.page_slice().len(), 5);

        app.next_page();
        assert_eq!(app.pager.page(), 3);

        app.prev_page();
        app.prev_page();
        assert_eq!(app.pager.page(), 1);
        assert_eq!(app.page_slice().len(), 20);
    }

    #[test]
    fn overlay_for_unknown_id_is_noop() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(3))));

        app.open_overlay(999);
        assert!(app.overlay.is_none());

        app.open_overlay(2);
        assert_eq!(app.overlay.map(|o| o.job_id), Some(2));
    }

    #[test]
    fn closing_overlay_preserves_selection() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(10))));

        app.move_selection(4);
        app.open_selected_overlay();
        assert!(app.overlay.is_some());

        app.close_overlay();
        assert!(app.overlay.is_none());
        assert_eq!(app.list_state.selected(), Some(4));
    }

    #[test]
    fn category_change_triggers_search() {
        let (mut app, req_rx) = test_app();
        app.submit_search();
        let _ = req_rx.try_recv();

        app.cycle_category(1);
        assert!(matches!(app.state, SearchState::Loading { .. }));
        let req = req_rx.try_recv().unwrap();
        assert_eq!(req.id, 2);
        assert_eq!(req.category, CATEGORIES[1].slug);
    }

    #[test]
    fn category_cycle_wraps_around() {
        let (mut app, _req_rx) = test_app();
        app.cycle_category(-1);
        assert_eq!(app.category_index, CATEGORIES.len() - 1);
        app.cycle_category(1);
        assert_eq!(app.category_index, 0);
    }

    #[test]
    fn selection_stays_within_page() {
        let (mut app, _req_rx) = test_app();
        app.submit_search();
        app.apply_outcome(outcome(1, Ok(jobs(45))));

        app.move_selection(-3);
        assert_eq!(app.list_state.selected(), Some(0));

        app.move_selection(30);
        assert_eq!(app.list_state.selected(), Some(19));
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::default();
        for c in "rust".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.insert_char('!');
        assert_eq!(input.text, "rus!t");

        input.delete_char_before();
        assert_eq!(input.text, "rust");

        input.move_end();
        input.delete_word_before();
        assert_eq!(input.text, "");
    }
}
