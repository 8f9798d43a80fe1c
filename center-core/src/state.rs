//! Application state owned by the dashboard shell.
//!
//! [`AppState`] is the only writer of the two record collections. Views get
//! `&AppState` and can only ask for navigation through [`AppState::set_active_view`].

use center_common::Locale;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dataset::Dataset;
use crate::error::DraftError;
use crate::model::{Branch, SupportTicket, WarrantyClaim, is_valid_vin};
use crate::status::{ClaimStatus, TicketPriority, TicketStatus};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Identity of one state of one collection. Fresh on every mutation, never
/// reused, so it can key memoized derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Revision(u64);

impl Revision {
    fn next() -> Self {
        Revision(NEXT_REVISION.fetch_add(1, Ordering::Relaxed))
    }
}

/// A record collection tagged with its current [`Revision`].
#[derive(Debug, Clone)]
pub struct Records<T> {
    items: Vec<T>,
    revision: Revision,
}

impl<T> Records<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            revision: Revision::next(),
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.revision = Revision::next();
    }
}

/// Which list or chart page the shell renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActiveView {
    #[default]
    Warranty,
    Support,
    Analytics,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [
        ActiveView::Warranty,
        ActiveView::Support,
        ActiveView::Analytics,
    ];

    pub fn index(self) -> usize {
        match self {
            ActiveView::Warranty => 0,
            ActiveView::Support => 1,
            ActiveView::Analytics => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn tag(self) -> &'static str {
        match self {
            ActiveView::Warranty => "warranty",
            ActiveView::Support => "support",
            ActiveView::Analytics => "analytics",
        }
    }

    /// Match a navigation tag or a localized title.
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = name.trim();
        Self::ALL.into_iter().find(|v| {
            v.tag().eq_ignore_ascii_case(needle)
                || Locale::ALL.iter().any(|l| v.title(*l) == needle)
        })
    }

    pub fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ActiveView::Warranty, Locale::Ar) => "مطالبات الضمان",
            (ActiveView::Warranty, Locale::En) => "Warranty claims",
            (ActiveView::Support, Locale::Ar) => "الدعم الفني",
            (ActiveView::Support, Locale::En) => "Technical support",
            (ActiveView::Analytics, Locale::Ar) => "التحليلات",
            (ActiveView::Analytics, Locale::En) => "Analytics",
        }
    }
}

/// Unvalidated fields of a new claim, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimDraft {
    pub vin: String,
    pub branch: String,
    pub issue: String,
    pub report: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub branch: String,
    pub priority: String,
    pub issue: String,
    pub report: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    active_view: ActiveView,
    claims: Records<WarrantyClaim>,
    tickets: Records<SupportTicket>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            active_view: ActiveView::default(),
            claims: Records::new(dataset.claims),
            tickets: Records::new(dataset.tickets),
        }
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub fn claims(&self) -> &Records<WarrantyClaim> {
        &self.claims
    }

    pub fn tickets(&self) -> &Records<SupportTicket> {
        &self.tickets
    }

    /// Validate `draft` and append it as a pending claim.
    pub fn create_claim(
        &mut self,
        draft: ClaimDraft,
        now: DateTime<Utc>,
    ) -> Result<&WarrantyClaim, DraftError> {
        let vin = draft.vin.trim().to_ascii_uppercase();
        if !is_valid_vin(&vin) {
            return Err(DraftError::InvalidVin(draft.vin));
        }
        let branch: Branch = draft.branch.parse()?;
        let issue = non_empty_issue(&draft.issue)?;

        let claim = WarrantyClaim {
            id: next_id("WC", self.claims.iter().map(|c| c.id.as_str()))?,
            vehicle_vin: vin,
            branch,
            issue,
            technical_report: draft.report.unwrap_or_default(),
            attachments: Vec::new(),
            status: ClaimStatus::Pending,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        tracing::info!(target: "center-core", id = %claim.id, branch = branch.key(), "claim created");
        self.claims.push(claim);
        Ok(&self.claims.as_slice()[self.claims.len() - 1])
    }

    /// Validate `draft` and append it as an open, unassigned ticket.
    pub fn create_ticket(
        &mut self,
        draft: TicketDraft,
        now: DateTime<Utc>,
    ) -> Result<&SupportTicket, DraftError> {
        let branch: Branch = draft.branch.parse()?;
        let priority: TicketPriority = draft.priority.parse()?;
        let issue = non_empty_issue(&draft.issue)?;

        let ticket = SupportTicket {
            id: next_id("ST", self.tickets.iter().map(|t| t.id.as_str()))?,
            branch,
            issue,
            technical_report: draft.report.unwrap_or_default(),
            attachments: Vec::new(),
            priority,
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
            assigned_to: None,
            comments: Vec::new(),
        };
        tracing::info!(target: "center-core", id = %ticket.id, ?priority, "ticket created");
        self.tickets.push(ticket);
        Ok(&self.tickets.as_slice()[self.tickets.len() - 1])
    }
}

fn non_empty_issue(issue: &str) -> Result<String, DraftError> {
    let issue = issue.trim();
    if issue.is_empty() {
        Err(DraftError::EmptyIssue)
    } else {
        Ok(issue.to_string())
    }
}

/// `PREFIX-NNN`, one past the highest numeric suffix already in use.
fn next_id<'a>(
    prefix: &'static str,
    existing: impl Iterator<Item = &'a str>,
) -> Result<String, DraftError> {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let next = highest
        .checked_add(1)
        .ok_or(DraftError::IdsExhausted(prefix))?;
    Ok(format!("{prefix}-{next:03}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_dataset;

    fn state() -> (AppState, DateTime<Utc>) {
        let now = Utc::now();
        (AppState::new(seed_dataset(now)), now)
    }

    #[test]
    fn starts_on_warranty_view() {
        let (s, _) = state();
        assert_eq!(s.active_view(), ActiveView::Warranty);
    }

    #[test]
    fn navigation_leaves_collections_untouched() {
        let (mut s, _) = state();
        let claims_before = (s.claims().revision(), s.claims().as_slice().to_vec());
        let tickets_before = (s.tickets().revision(), s.tickets().as_slice().to_vec());

        s.set_active_view(ActiveView::Analytics);
        s.set_active_view(ActiveView::Support);

        assert_eq!(s.active_view(), ActiveView::Support);
        assert_eq!(claims_before, (s.claims().revision(), s.claims().as_slice().to_vec()));
        assert_eq!(tickets_before, (s.tickets().revision(), s.tickets().as_slice().to_vec()));
    }

    #[test]
    fn views_cycle_both_ways() {
        assert_eq!(ActiveView::Analytics.next(), ActiveView::Warranty);
        assert_eq!(ActiveView::Warranty.prev(), ActiveView::Analytics);
        assert_eq!(ActiveView::from_name("SUPPORT"), Some(ActiveView::Support));
        assert_eq!(ActiveView::from_name("التحليلات"), Some(ActiveView::Analytics));
        assert_eq!(ActiveView::from_name("reports"), None);
    }

    #[test]
    fn creates_claim_with_next_id() {
        let (mut s, now) = state();
        let before = s.claims().revision();
        let expected = next_id("WC", s.claims().iter().map(|c| c.id.as_str())).unwrap();
        let claim = s
            .create_claim(
                ClaimDraft {
                    vin: "jn1az4eh8fm730841".into(),
                    branch: "khobar".into(),
                    issue: "  Sunroof leak ".into(),
                    report: None,
                },
                now,
            )
            .unwrap()
            .clone();
        assert_eq!(claim.id, expected);
        assert_eq!(claim.vehicle_vin, "JN1AZ4EH8FM730841");
        assert_eq!(claim.issue, "Sunroof leak");
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_ne!(s.claims().revision(), before);
    }

    #[test]
    fn rejects_bad_drafts_without_mutation() {
        let (mut s, now) = state();
        let before = s.tickets().revision();
        let err = s
            .create_ticket(
                TicketDraft {
                    branch: "riyadh".into(),
                    priority: "whenever".into(),
                    issue: "Lift broken".into(),
                    report: None,
                },
                now,
            )
            .unwrap_err();
        assert_eq!(err, DraftError::UnknownPriority("whenever".into()));
        assert_eq!(s.tickets().revision(), before);

        let err = s
            .create_claim(
                ClaimDraft {
                    vin: "SHORT".into(),
                    branch: "riyadh".into(),
                    issue: "x".into(),
                    report: None,
                },
                now,
            )
            .unwrap_err();
        assert_eq!(err, DraftError::InvalidVin("SHORT".into()));
    }

    #[test]
    fn id_sequence_ignores_foreign_ids() {
        let ids = ["ST-004", "ST-010", "LEGACY-99", "ST-x"];
        assert_eq!(next_id("ST", ids.into_iter()).unwrap(), "ST-011");
        assert_eq!(next_id("WC", std::iter::empty()).unwrap(), "WC-001");
    }

    #[test]
    fn exhausted_id_space_is_a_draft_error() {
        assert_eq!(
            next_id("WC", ["WC-4294967295"].into_iter()),
            Err(DraftError::IdsExhausted("WC"))
        );

        let now = Utc::now();
        let mut dataset = seed_dataset(now);
        dataset.claims.truncate(1);
        dataset.claims[0].id = "WC-4294967295".into();
        let mut s = AppState::new(dataset);
        let before = s.claims().revision();
        let err = s
            .create_claim(
                ClaimDraft {
                    vin: "JN1AZ4EH8FM730841".into(),
                    branch: "riyadh".into(),
                    issue: "Brake noise".into(),
                    report: None,
                },
                now,
            )
            .unwrap_err();
        assert_eq!(err, DraftError::IdsExhausted("WC"));
        assert_eq!(s.claims().len(), 1);
        assert_eq!(s.claims().revision(), before);
    }
}
