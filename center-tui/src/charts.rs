//! Analytics view: recurring issues and the two status breakdowns as bar charts.
use center_common::Locale;
use center_core::{AnalyticsView, RecordStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::{labels::labels, styles};

/// Share of `count` in `total`, rounded to whole percent.
pub fn percent(count: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    ((count as f64 * 100.0) / total as f64).round() as u64
}

pub fn draw_analytics(
    frame: &mut Frame,
    area: Rect,
    analytics: AnalyticsView<'_>,
    locale: Locale,
) {
    let l = labels(locale);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let issues: Vec<Bar> = analytics
        .recurring_issues
        .iter()
        .enumerate()
        .map(|(i, (issue, count))| {
            Bar::default()
                .label(Line::from(issue.clone()))
                .value(*count as u64)
                .style(styles::bar(i))
                .value_style(styles::bar_value())
        })
        .collect();
    draw_chart(frame, rows[0], l.chart_recurring, issues, l.no_records);

    let claims = status_bars(analytics.claims_by_status, locale);
    draw_chart(frame, cols[0], l.chart_claims, claims, l.no_records);

    let tickets = status_bars(analytics.tickets_by_status, locale);
    draw_chart(frame, cols[1], l.chart_tickets, tickets, l.no_records);
}

fn status_bars<S>(counts: &[(S, usize)], locale: Locale) -> Vec<Bar<'static>>
where
    S: Copy + Into<RecordStatus>,
{
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .enumerate()
        .map(|(i, &(status, count))| {
            let status: RecordStatus = status.into();
            Bar::default()
                .label(Line::from(status.label(locale)))
                .value(count as u64)
                .text_value(format!("{count} · {}%", percent(count, total)))
                .style(styles::bar(i))
                .value_style(styles::bar_value())
        })
        .collect()
}

fn draw_chart(frame: &mut Frame, area: Rect, title: &str, bars: Vec<Bar<'_>>, empty: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::card_border())
        .title(Line::styled(format!(" {title} "), styles::card_title()));

    if bars.is_empty() {
        frame.render_widget(Paragraph::new(empty).style(styles::dim()).block(block), area);
        return;
    }
    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_and_tolerate_empty_totals() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }
}
