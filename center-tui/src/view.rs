use crate::{
    cards::{CARD_HEIGHT, CardCtx, claim_card, ticket_card},
    charts::draw_analytics,
    input::InputLine,
    labels::labels,
    notice::Notice,
    styles,
};
use anyhow::Result;
use center_common::Locale;
use center_core::{ActiveView, AnalyticsView, SupportTicket, WarrantyClaim};
use chrono::{DateTime, Duration, Utc};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
};
use textwrap::wrap;

/// Everything one frame needs, borrowed from the dashboard.
pub struct ViewSnap<'a> {
    pub locale: Locale,
    pub active: ActiveView,
    pub claims: &'a [WarrantyClaim],
    pub tickets: &'a [SupportTicket],
    pub analytics: AnalyticsView<'a>,
    pub now: DateTime<Utc>,
    pub overdue_after: Duration,
    pub input: &'a InputLine,
    pub notices: &'a [Notice],
    pub scroll: usize,
}

/// 3 columns on wide terminals, 2 on medium, 1 otherwise.
pub fn grid_columns(width: u16) -> usize {
    match width {
        120.. => 3,
        80.. => 2,
        _ => 1,
    }
}

/// Card grid geometry of a drawn frame, fed back so scrolling stops where drawing does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub cols: usize,
    pub visible_rows: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            cols: 1,
            visible_rows: 1,
        }
    }
}

impl GridShape {
    pub fn for_area(area: Rect) -> Self {
        Self {
            cols: grid_columns(area.width),
            visible_rows: (area.height / CARD_HEIGHT).max(1) as usize,
        }
    }

    /// Highest first-row offset that still fills the body with `items` cards.
    ///
    /// ```
    /// # use center_tui::GridShape;
    /// let shape = GridShape { cols: 3, visible_rows: 1 };
    /// assert_eq!(shape.max_scroll(7), 2);
    /// assert_eq!(shape.max_scroll(0), 0);
    /// ```
    pub fn max_scroll(&self, items: usize) -> usize {
        items
            .div_ceil(self.cols.max(1))
            .saturating_sub(self.visible_rows)
    }
}

pub fn draw<B: Backend>(term: &mut Terminal<B>, snap: &ViewSnap<'_>) -> Result<GridShape> {
    let mut shape = GridShape::default();
    term.draw(|frame| {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw_tabs(frame, layout[0], snap);

        let ctx = CardCtx {
            locale: snap.locale,
            now: snap.now,
            overdue_after: snap.overdue_after,
        };
        let empty = labels(snap.locale).no_records;
        let body = layout[1];
        shape = GridShape::for_area(body);
        match snap.active {
            ActiveView::Warranty => {
                draw_grid(frame, body, snap.claims, snap.scroll, empty, |c| {
                    claim_card(c, &ctx)
                })
            }
            ActiveView::Support => {
                draw_grid(frame, body, snap.tickets, snap.scroll, empty, |t| {
                    ticket_card(t, &ctx)
                })
            }
            ActiveView::Analytics => draw_analytics(frame, body, snap.analytics, snap.locale),
        }

        draw_activity(frame, layout[2], snap);

        let input_box = Paragraph::new(snap.input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", labels(snap.locale).input)),
        );
        frame.render_widget(Clear, layout[3]);
        frame.render_widget(input_box, layout[3]);
        frame.set_cursor_position(Position {
            x: layout[3].x + 1 + snap.input.caret_col(),
            y: layout[3].y + 1,
        });
    })?;

    Ok(shape)
}

fn draw_tabs(frame: &mut Frame, area: Rect, snap: &ViewSnap<'_>) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .map(|v| {
            let title = v.title(snap.locale);
            let text = match v {
                ActiveView::Warranty => format!("{title} ({})", snap.claims.len()),
                ActiveView::Support => format!("{title} ({})", snap.tickets.len()),
                ActiveView::Analytics => title.to_string(),
            };
            Line::from(text)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", labels(snap.locale).app_title),
                    styles::label(),
                )),
        )
        .select(snap.active.index())
        .style(styles::system())
        .highlight_style(styles::tab_active());
    frame.render_widget(tabs, area);
}

fn draw_grid<T>(
    frame: &mut Frame,
    area: Rect,
    items: &[T],
    scroll: usize,
    empty: &str,
    card: impl Fn(&T) -> Paragraph<'static>,
) {
    if items.is_empty() {
        frame.render_widget(Paragraph::new(empty).style(styles::dim()), area);
        return;
    }

    let shape = GridShape::for_area(area);
    let GridShape { cols, visible_rows } = shape;
    let first = scroll.min(shape.max_scroll(items.len()));

    for (n, row) in items.chunks(cols).skip(first).take(visible_rows).enumerate() {
        let y = area.y + n as u16 * CARD_HEIGHT;
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: CARD_HEIGHT.min(area.bottom().saturating_sub(y)),
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(row_area);
        for (item, cell) in row.iter().zip(cells.iter()) {
            frame.render_widget(card(item), *cell);
        }
    }
}

fn draw_activity(frame: &mut Frame, area: Rect, snap: &ViewSnap<'_>) {
    let visible_h = area.height.saturating_sub(2) as usize;
    let wrapped = wrap_notices(snap.notices, area.width.saturating_sub(2) as usize);
    let start = wrapped.len().saturating_sub(visible_h);

    let items: Vec<ListItem> = wrapped[start..]
        .iter()
        .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", labels(snap.locale).activity)),
    );
    frame.render_widget(list, area);
}

fn wrap_notices(notices: &[Notice], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for notice in notices {
        let style = styles::notice(notice.level);
        for raw_line in notice.text.split('\n') {
            let segments = wrap(raw_line, effective_width);
            if segments.is_empty() {
                out.push((String::new(), style));
            } else {
                out.extend(segments.into_iter().map(|seg| (seg.into_owned(), style)));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;
    use center_core::{AnalyticsCache, AppState, Dataset, seed::seed_dataset};
    use ratatui::backend::TestBackend;

    fn render(state: &AppState, active: ActiveView, width: u16, height: u16) -> String {
        render_with_shape(state, active, width, height).0
    }

    fn render_with_shape(
        state: &AppState,
        active: ActiveView,
        width: u16,
        height: u16,
    ) -> (String, GridShape) {
        let mut analytics = AnalyticsCache::default();
        analytics.refresh(state.claims(), state.tickets());
        let input = InputLine::default();
        let notices = vec![Notice::new("ready", NoticeLevel::System)];
        let snap = ViewSnap {
            locale: Locale::En,
            active,
            claims: state.claims().as_slice(),
            tickets: state.tickets().as_slice(),
            analytics: analytics.view(),
            now: Utc::now(),
            overdue_after: Duration::hours(48),
            input: &input,
            notices: &notices,
            scroll: 0,
        };
        let mut term = Terminal::new(TestBackend::new(width, height)).unwrap();
        let shape = draw(&mut term, &snap).unwrap();
        let screen = term
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        (screen, shape)
    }

    #[test]
    fn column_count_follows_width() {
        assert_eq!(grid_columns(60), 1);
        assert_eq!(grid_columns(80), 2);
        assert_eq!(grid_columns(119), 2);
        assert_eq!(grid_columns(160), 3);
    }

    #[test]
    fn draw_reports_the_card_grid_it_used() {
        let state = AppState::new(seed_dataset(Utc::now()));
        // 40 rows leave 29 for the body: three card rows of three.
        let (_, shape) = render_with_shape(&state, ActiveView::Warranty, 130, 40);
        assert_eq!(shape, GridShape { cols: 3, visible_rows: 3 });
        assert_eq!(shape.max_scroll(state.claims().len()), 0);

        let (_, shape) = render_with_shape(&state, ActiveView::Warranty, 60, 20);
        assert_eq!(shape, GridShape { cols: 1, visible_rows: 1 });
        assert_eq!(shape.max_scroll(state.claims().len()), 6);
    }

    #[test]
    fn empty_ticket_collection_renders_no_cards() {
        let state = AppState::new(Dataset::default());
        let screen = render(&state, ActiveView::Support, 100, 30);
        assert!(screen.contains("No records"));
        assert!(!screen.contains("ST-"));
    }

    #[test]
    fn support_view_flags_overdue_tickets() {
        let state = AppState::new(seed_dataset(Utc::now()));
        let screen = render(&state, ActiveView::Support, 130, 40);
        assert!(screen.contains("ST-001"));
        assert!(screen.contains("Overdue"));
    }

    #[test]
    fn analytics_view_draws_all_three_charts() {
        let state = AppState::new(seed_dataset(Utc::now()));
        let screen = render(&state, ActiveView::Analytics, 130, 40);
        assert!(screen.contains("Most recurring warranty issues"));
        assert!(screen.contains("Warranty claim statuses"));
        assert!(screen.contains("Support ticket statuses"));
    }

    #[test]
    fn long_notices_wrap_to_the_panel() {
        let notices = vec![Notice::new("one two three four", NoticeLevel::Help)];
        let lines = wrap_notices(&notices, 10);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, "one two");
    }
}
