//! Terminal-independent dashboard: key handling, command dispatch and the
//! per-frame snapshot. The actor in `tui` only adds the terminal around it.
use center_common::Locale;
use center_core::{ActiveView, AnalyticsCache, AppState};
use chrono::{DateTime, Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    command::{Command, parse_command},
    input::InputLine,
    labels::{labels, usage},
    notice::{Notice, NoticeLevel},
    view::{GridShape, ViewSnap},
};

/// Keep the activity log bounded.
const MAX_NOTICES: usize = 200;

/// What the caller has to do after a key press or a submitted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit(String),
    Quit,
}

pub struct Dashboard {
    state: AppState,
    analytics: AnalyticsCache,
    locale: Locale,
    overdue_after: Duration,
    input: InputLine,
    notices: Vec<Notice>,
    scroll: usize, // card rows from the top
    grid: GridShape,
    dirty: bool,
}

impl Dashboard {
    pub fn new(
        state: AppState,
        analytics: AnalyticsCache,
        locale: Locale,
        overdue_after: Duration,
    ) -> Self {
        Self {
            state,
            analytics,
            locale,
            overdue_after,
            input: InputLine::default(),
            notices: vec![Notice::new(labels(locale).welcome, NoticeLevel::System)],
            scroll: 0,
            grid: GridShape::default(),
            dirty: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Switch views; the card scroll position starts over.
    pub fn navigate(&mut self, view: ActiveView) {
        if self.state.active_view() != view {
            tracing::debug!(target: "center-tui", view = view.tag(), "view changed");
        }
        self.state.set_active_view(view);
        self.scroll = 0;
        self.dirty = true;
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.push(Notice::new(text, NoticeLevel::Error));
    }

    fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
        self.dirty = true;
    }

    /// Record the grid the last frame was drawn with; the scroll offset is
    /// pulled back if a resize left it past the last full page.
    pub fn set_grid(&mut self, grid: GridShape) {
        self.grid = grid;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        let cards = match self.state.active_view() {
            ActiveView::Warranty => self.state.claims().len(),
            ActiveView::Support => self.state.tickets().len(),
            ActiveView::Analytics => 0,
        };
        self.grid.max_scroll(cards)
    }

    fn scroll_by(&mut self, delta: isize) {
        let scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        if scroll != self.scroll {
            self.scroll = scroll;
            self.dirty = true;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(Action::Quit),
            (KeyCode::Tab, _) => self.navigate(self.state.active_view().next()),
            (KeyCode::BackTab, _) => self.navigate(self.state.active_view().prev()),
            (KeyCode::F(n @ 1..=3), _) => self.navigate(ActiveView::ALL[n as usize - 1]),
            (KeyCode::PageUp, _) => self.scroll_by(-3),
            (KeyCode::PageDown, _) => self.scroll_by(3),
            (KeyCode::Up, _) => self.scroll_by(-1),
            (KeyCode::Down, _) => self.scroll_by(1),
            (KeyCode::Enter, _) => {
                self.dirty = true;
                return Some(Action::Submit(self.input.take()));
            }
            (KeyCode::Left, _) => self.edit(InputLine::left),
            (KeyCode::Right, _) => self.edit(InputLine::right),
            (KeyCode::Home, _) => self.edit(InputLine::home),
            (KeyCode::End, _) => self.edit(InputLine::end),
            (KeyCode::Backspace, _) => self.edit(InputLine::backspace),
            (KeyCode::Delete, _) => self.edit(InputLine::delete),
            (KeyCode::Esc, _) => self.edit(InputLine::clear),
            (KeyCode::Char(ch), _) => self.edit(|input| input.insert(ch)),
            _ => {}
        }
        None
    }

    fn edit(&mut self, f: impl FnOnce(&mut InputLine)) {
        f(&mut self.input);
        self.dirty = true;
    }

    /// Run one submitted line. Returns `Some(Action::Quit)` for `/quit`.
    pub fn submit(&mut self, line: &str, now: DateTime<Utc>) -> Option<Action> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let l = labels(self.locale);

        match parse_command(line) {
            Command::Quit => return Some(Action::Quit),
            Command::Help => {
                for h in l.help {
                    self.push(Notice::new(*h, NoticeLevel::Help));
                }
            }
            Command::View(name) => match ActiveView::from_name(&name) {
                Some(view) => self.navigate(view),
                None => self.push_error(format!("{}: {name}", l.unknown_view)),
            },
            Command::NewClaim(draft) => match self.state.create_claim(draft, now) {
                Ok(claim) => {
                    let text = format!("{}: {}", l.claim_created, claim.id);
                    self.push(Notice::new(text, NoticeLevel::Success));
                    self.navigate(ActiveView::Warranty);
                }
                Err(e) => self.push_error(format!("{}: {e}", l.rejected)),
            },
            Command::NewTicket(draft) => match self.state.create_ticket(draft, now) {
                Ok(ticket) => {
                    let text = format!("{}: {}", l.ticket_created, ticket.id);
                    self.push(Notice::new(text, NoticeLevel::Success));
                    self.navigate(ActiveView::Support);
                }
                Err(e) => self.push_error(format!("{}: {e}", l.rejected)),
            },
            Command::Usage(u) => self.push_error(usage(self.locale, u)),
            Command::Unknown(s) => self.push_error(format!("{}: {s}", l.unknown_command)),
        }
        None
    }

    /// Refresh cached analytics and borrow everything the next frame draws.
    pub fn snapshot(&mut self, now: DateTime<Utc>) -> ViewSnap<'_> {
        self.analytics
            .refresh(self.state.claims(), self.state.tickets());
        ViewSnap {
            locale: self.locale,
            active: self.state.active_view(),
            claims: self.state.claims().as_slice(),
            tickets: self.state.tickets().as_slice(),
            analytics: self.analytics.view(),
            now,
            overdue_after: self.overdue_after,
            input: &self.input,
            notices: &self.notices,
            scroll: self.scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use center_core::{ClaimStatus, TicketStatus, seed::seed_dataset};

    fn dashboard() -> Dashboard {
        let now = Utc::now();
        Dashboard::new(
            AppState::new(seed_dataset(now)),
            AnalyticsCache::default(),
            Locale::En,
            Duration::hours(48),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(d: &mut Dashboard, s: &str) -> Option<Action> {
        s.chars().for_each(|c| {
            d.handle_key(key(KeyCode::Char(c)));
        });
        d.handle_key(key(KeyCode::Enter))
    }

    #[test]
    fn tab_cycles_views_without_touching_records() {
        let mut d = dashboard();
        let claims = d.state().claims().clone();
        let tickets = d.state().tickets().clone();

        assert_eq!(d.state().active_view(), ActiveView::Warranty);
        d.handle_key(key(KeyCode::Tab));
        assert_eq!(d.state().active_view(), ActiveView::Support);
        d.handle_key(key(KeyCode::Tab));
        assert_eq!(d.state().active_view(), ActiveView::Analytics);
        d.handle_key(key(KeyCode::BackTab));
        assert_eq!(d.state().active_view(), ActiveView::Support);
        d.handle_key(key(KeyCode::F(1)));
        assert_eq!(d.state().active_view(), ActiveView::Warranty);

        assert_eq!(d.state().claims().as_slice(), claims.as_slice());
        assert_eq!(d.state().claims().revision(), claims.revision());
        assert_eq!(d.state().tickets().revision(), tickets.revision());
    }

    #[test]
    fn ctrl_c_quits_and_enter_submits_the_line() {
        let mut d = dashboard();
        let quit = d.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(quit, Some(Action::Quit));

        assert_eq!(
            type_line(&mut d, "/view analytics"),
            Some(Action::Submit("/view analytics".into()))
        );
        assert!(d.input().is_empty());
    }

    #[test]
    fn claim_command_appends_a_pending_claim() {
        let mut d = dashboard();
        d.navigate(ActiveView::Analytics);
        let before = d.state().claims().len();
        let now = Utc::now();

        let out = d.submit("/claim 1hgcm82633a004352 | jeddah | عطل في المكيف", now);
        assert_eq!(out, None);

        let claims = d.state().claims().as_slice();
        assert_eq!(claims.len(), before + 1);
        let claim = &claims[before];
        assert_eq!(claim.id, "WC-008");
        assert_eq!(claim.vehicle_vin, "1HGCM82633A004352");
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.created_at, now);
        assert_eq!(claim.updated_at, now);
        assert_eq!(d.state().active_view(), ActiveView::Warranty);
        assert_eq!(d.notices().last().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn ticket_command_appends_an_open_ticket() {
        let mut d = dashboard();
        d.submit("/ticket riyadh | urgent | battery drains overnight", Utc::now());
        let ticket = d.state().tickets().as_slice().last().unwrap();
        assert_eq!(ticket.id, "ST-006");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.assigned_to.is_none());
        assert_eq!(d.state().active_view(), ActiveView::Support);
    }

    #[test]
    fn invalid_input_only_adds_an_error_notice() {
        let mut d = dashboard();
        let claims = d.state().claims().revision();
        let now = Utc::now();

        for line in [
            "/claim TOO-SHORT | riyadh | noise",
            "/claim 1HGCM82633A004352 | tabuk | noise",
            "/ticket riyadh | whenever | noise",
            "/ticket riyadh",
            "/view settings",
            "/frobnicate",
        ] {
            let count = d.notices().len();
            assert_eq!(d.submit(line, now), None, "{line}");
            assert_eq!(d.notices().len(), count + 1, "{line}");
            assert_eq!(d.notices().last().unwrap().level, NoticeLevel::Error, "{line}");
        }
        assert_eq!(d.state().claims().revision(), claims);
        assert_eq!(d.state().tickets().len(), 5);
    }

    #[test]
    fn help_and_quit_commands() {
        let mut d = dashboard();
        let count = d.notices().len();
        d.submit("/help", Utc::now());
        assert_eq!(d.notices().len(), count + 4);
        assert_eq!(d.submit("/quit", Utc::now()), Some(Action::Quit));
        assert_eq!(d.submit("   ", Utc::now()), None);
    }

    #[test]
    fn scroll_is_clamped_to_grid_rows_and_reset_on_navigation() {
        let mut d = dashboard();
        // 7 claims in rows of three, one row on screen: rows 0..=2 can lead.
        d.set_grid(GridShape { cols: 3, visible_rows: 1 });
        for _ in 0..20 {
            d.handle_key(key(KeyCode::PageDown));
        }
        assert_eq!(d.snapshot(Utc::now()).scroll, 2);
        d.handle_key(key(KeyCode::Up));
        assert_eq!(d.snapshot(Utc::now()).scroll, 1);
        d.handle_key(key(KeyCode::Tab));
        assert_eq!(d.snapshot(Utc::now()).scroll, 0);
    }

    #[test]
    fn growing_the_grid_pulls_scroll_back() {
        let mut d = dashboard();
        d.set_grid(GridShape { cols: 1, visible_rows: 1 });
        for _ in 0..20 {
            d.handle_key(key(KeyCode::Down));
        }
        assert_eq!(d.snapshot(Utc::now()).scroll, 6);

        d.set_grid(GridShape { cols: 2, visible_rows: 3 });
        assert_eq!(d.snapshot(Utc::now()).scroll, 1);
        d.set_grid(GridShape { cols: 3, visible_rows: 3 });
        assert_eq!(d.snapshot(Utc::now()).scroll, 0);
        d.mark_clean();
        d.handle_key(key(KeyCode::PageDown));
        assert!(!d.is_dirty());
    }

    #[test]
    fn snapshot_reuses_analytics_until_records_change() {
        let mut d = dashboard();
        let first = d.snapshot(Utc::now()).analytics.recurring_issues.to_vec();
        assert_eq!(first[0].1, 3);

        d.submit("/claim 1HGCM82633A004352 | riyadh | تسريب زيت المحرك", Utc::now());
        let second = d.snapshot(Utc::now()).analytics.recurring_issues.to_vec();
        assert_eq!(second[0], (first[0].0.clone(), 4));
    }
}
