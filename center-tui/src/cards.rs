//! Fixed-height cards for claims and tickets.
use center_common::Locale;
use center_core::{
    RecordStatus, SupportTicket, TicketPriority, WarrantyClaim,
    model::media_counts,
    present::{priority_style, relative_age, status_icon, status_style},
};
use chrono::{DateTime, Duration, Utc};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    labels::{labels, overdue_banner},
    styles,
};

/// Rows taken by one card, borders included.
pub const CARD_HEIGHT: u16 = 8;

/// What every card needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct CardCtx {
    pub locale: Locale,
    pub now: DateTime<Utc>,
    pub overdue_after: Duration,
}

impl CardCtx {
    fn alignment(&self) -> Alignment {
        if self.locale.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

pub fn claim_card(claim: &WarrantyClaim, ctx: &CardCtx) -> Paragraph<'static> {
    let l = labels(ctx.locale);
    let lines = vec![
        Line::from(status_badge(claim.status.into(), ctx.locale)),
        field(l.vin, claim.vehicle_vin.clone()),
        field(l.branch, claim.branch.label(ctx.locale).to_string()),
        id_and_age(&claim.id, claim.status.into(), claim.created_at, ctx),
        counts(
            &media_counts(&claim.attachments),
            claim.comments.len(),
            ctx.locale,
        ),
    ];
    Paragraph::new(lines)
        .alignment(ctx.alignment())
        .block(card_block(&claim.issue, ctx, false))
}

pub fn ticket_card(ticket: &SupportTicket, ctx: &CardCtx) -> Paragraph<'static> {
    let l = labels(ctx.locale);
    let overdue = ticket.is_overdue(ctx.now, ctx.overdue_after);

    let mut lines = vec![
        Line::from(vec![
            status_badge(ticket.status.into(), ctx.locale),
            Span::raw(" "),
            priority_badge(ticket.priority, ctx.locale),
        ]),
        field(l.branch, ticket.branch.label(ctx.locale).to_string()),
    ];
    if let Some(who) = &ticket.assigned_to {
        lines.push(field(l.assignee, who.clone()));
    }
    lines.push(id_and_age(
        &ticket.id,
        ticket.status.into(),
        ticket.created_at,
        ctx,
    ));
    lines.push(counts(
        &media_counts(&ticket.attachments),
        ticket.comments.len(),
        ctx.locale,
    ));
    if overdue {
        lines.push(Line::from(Span::styled(
            overdue_banner(ctx.locale, ctx.overdue_after.num_hours()),
            styles::overdue_banner(),
        )));
    }

    Paragraph::new(lines)
        .alignment(ctx.alignment())
        .block(card_block(&ticket.issue, ctx, overdue))
}

fn card_block(title: &str, ctx: &CardCtx, overdue: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(format!(" {title} "), styles::card_title()))
        .title_alignment(ctx.alignment());
    if overdue {
        block
            .border_type(BorderType::Thick)
            .border_style(styles::overdue_border())
    } else {
        block.border_style(styles::card_border())
    }
}

fn status_badge(status: RecordStatus, locale: Locale) -> Span<'static> {
    Span::styled(
        format!(" {} ", status.label(locale)),
        styles::badge(status_style(status)),
    )
}

fn priority_badge(priority: TicketPriority, locale: Locale) -> Span<'static> {
    Span::styled(
        format!(" {} ", priority.label(locale)),
        styles::badge(priority_style(priority)),
    )
}

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name}: "), styles::dim()),
        Span::styled(value, styles::value()),
    ])
}

fn id_and_age(
    id: &str,
    status: RecordStatus,
    created: DateTime<Utc>,
    ctx: &CardCtx,
) -> Line<'static> {
    let icon = status_icon(status);
    Line::from(vec![
        Span::styled(styles::glyph_symbol(icon.glyph), styles::icon(icon.tone)),
        Span::styled(format!(" {id}   "), styles::label()),
        Span::styled("◷ ", styles::dim()),
        Span::styled(relative_age(created, ctx.now, ctx.locale), styles::system()),
    ])
}

fn counts(&(photos, videos): &(usize, usize), comments: usize, locale: Locale) -> Line<'static> {
    let l = labels(locale);
    Line::from(Span::styled(
        format!(
            "{} {photos} · {} {videos} · {} {comments}",
            l.photos, l.videos, l.comments
        ),
        styles::dim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use center_core::seed::seed_dataset;

    fn ctx(now: DateTime<Utc>) -> CardCtx {
        CardCtx {
            locale: Locale::En,
            now,
            overdue_after: Duration::hours(48),
        }
    }

    fn text_of(p: &Paragraph<'_>) -> String {
        let backend = ratatui::backend::TestBackend::new(60, CARD_HEIGHT);
        let mut term = ratatui::Terminal::new(backend).unwrap();
        term.draw(|f| f.render_widget(p.clone(), f.area())).unwrap();
        term.backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn overdue_ticket_shows_banner() {
        let now = Utc::now();
        let data = seed_dataset(now);
        let threshold = Duration::hours(48);
        let overdue = data.tickets.iter().find(|t| t.is_overdue(now, threshold)).unwrap();
        let fresh = data.tickets.iter().find(|t| !t.is_overdue(now, threshold)).unwrap();

        assert!(text_of(&ticket_card(overdue, &ctx(now))).contains("Overdue"));
        assert!(!text_of(&ticket_card(fresh, &ctx(now))).contains("Overdue"));
    }

    #[test]
    fn claim_card_lists_vin_and_id() {
        let now = Utc::now();
        let claim = &seed_dataset(now).claims[0];
        let text = text_of(&claim_card(claim, &ctx(now)));
        assert!(text.contains(&claim.vehicle_vin));
        assert!(text.contains(&claim.id));
    }
}
