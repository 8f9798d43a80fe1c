//! Chart inputs derived from the record collections.
//!
//! Every summary is a `(key, count)` sequence. Grouping keeps first-seen
//! order; [`top_recurring_issues`] additionally sorts by count with a stable
//! sort, so ties stay in encounter order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::model::{SupportTicket, WarrantyClaim};
use crate::state::{Records, Revision};
use crate::status::{ClaimStatus, TicketStatus};

pub const DEFAULT_TOP_ISSUES: usize = 5;

/// Chart colours as RGB triples (blue, emerald, amber, red, indigo).
pub const CHART_PALETTE: [(u8, u8, u8); 5] = [
    (0x3B, 0x82, 0xF6),
    (0x10, 0xB9, 0x81),
    (0xF5, 0x9E, 0x0B),
    (0xEF, 0x44, 0x44),
    (0x63, 0x66, 0xF1),
];

/// Colour for the `index`-th slice of a chart, cycling through the palette.
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// Count items per key, keeping the order in which keys were first seen.
pub fn count_by<T, K, F>(items: &[T], key: F) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, usize)> = Vec::new();
    for item in items {
        let k = key(item);
        match slots.get(&k) {
            Some(&idx) => out[idx].1 += 1,
            None => {
                slots.insert(k.clone(), out.len());
                out.push((k, 1));
            }
        }
    }
    out
}

/// Most frequent claim issues, highest count first.
///
/// ```
/// # use center_core::{aggregate::top_recurring_issues, seed::seed_dataset};
/// # use chrono::Utc;
/// let mut claims = seed_dataset(Utc::now()).claims;
/// claims.truncate(1);
/// let top = top_recurring_issues(&claims, 5);
/// assert_eq!(top, vec![(claims[0].issue.clone(), 1)]);
/// ```
pub fn top_recurring_issues(claims: &[WarrantyClaim], limit: usize) -> Vec<(String, usize)> {
    let mut counts = count_by(claims, |c| c.issue.clone());
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

pub fn claims_by_status(claims: &[WarrantyClaim]) -> Vec<(ClaimStatus, usize)> {
    count_by(claims, |c| c.status)
}

pub fn tickets_by_status(tickets: &[SupportTicket]) -> Vec<(TicketStatus, usize)> {
    count_by(tickets, |t| t.status)
}

/// Single-slot cache: holds the value computed for the last key it saw.
#[derive(Debug)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: V,
}

impl<K: PartialEq, V: Default> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            key: None,
            value: V::default(),
        }
    }

    /// Recompute when `key` differs from the cached one. Returns whether it did.
    pub fn update_with(&mut self, key: K, compute: impl FnOnce() -> V) -> bool {
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.value = compute();
        self.key = Some(key);
        true
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Read-only view over the three cached summaries.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsView<'a> {
    pub recurring_issues: &'a [(String, usize)],
    pub claims_by_status: &'a [(ClaimStatus, usize)],
    pub tickets_by_status: &'a [(TicketStatus, usize)],
}

/// Memoized analytics, keyed on the revision of each source collection.
#[derive(Debug)]
pub struct AnalyticsCache {
    top_limit: usize,
    recurring: Memo<Revision, Vec<(String, usize)>>,
    claims: Memo<Revision, Vec<(ClaimStatus, usize)>>,
    tickets: Memo<Revision, Vec<(TicketStatus, usize)>>,
}

impl Default for AnalyticsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_ISSUES)
    }
}

impl AnalyticsCache {
    pub fn new(top_limit: usize) -> Self {
        Self {
            top_limit,
            recurring: Memo::new(),
            claims: Memo::new(),
            tickets: Memo::new(),
        }
    }

    /// Bring every summary up to date; returns how many were recomputed.
    pub fn refresh(
        &mut self,
        claims: &Records<WarrantyClaim>,
        tickets: &Records<SupportTicket>,
    ) -> usize {
        let limit = self.top_limit;
        let recomputed = [
            self.recurring.update_with(claims.revision(), || {
                top_recurring_issues(claims.as_slice(), limit)
            }),
            self.claims
                .update_with(claims.revision(), || claims_by_status(claims.as_slice())),
            self.tickets
                .update_with(tickets.revision(), || tickets_by_status(tickets.as_slice())),
        ]
        .into_iter()
        .filter(|r| *r)
        .count();

        if recomputed > 0 {
            tracing::debug!(target: "center-core", recomputed, "analytics refreshed");
        }
        recomputed
    }

    pub fn view(&self) -> AnalyticsView<'_> {
        AnalyticsView {
            recurring_issues: self.recurring.value(),
            claims_by_status: self.claims.value(),
            tickets_by_status: self.tickets.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Branch;
    use chrono::Utc;

    fn claim(id: usize, issue: &str, status: ClaimStatus) -> WarrantyClaim {
        let now = Utc::now();
        WarrantyClaim {
            id: format!("WC-{id:03}"),
            vehicle_vin: "1HGCM82633A004352".into(),
            branch: Branch::Riyadh,
            issue: issue.into(),
            technical_report: String::new(),
            attachments: vec![],
            status,
            created_at: now,
            updated_at: now,
            comments: vec![],
        }
    }

    fn claims_with_issues(issues: &[&str]) -> Vec<WarrantyClaim> {
        issues
            .iter()
            .enumerate()
            .map(|(i, issue)| claim(i, issue, ClaimStatus::Pending))
            .collect()
    }

    #[test]
    fn recurring_issues_sorted_by_count() {
        let claims = claims_with_issues(&["A", "A", "B", "C", "C", "C"]);
        assert_eq!(
            top_recurring_issues(&claims, 5),
            vec![("C".to_string(), 3), ("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn ties_keep_encounter_order_and_limit_applies() {
        let claims = claims_with_issues(&["F", "E", "D", "C", "B", "A", "A"]);
        let top = top_recurring_issues(&claims, 5);
        let names: Vec<_> = top.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["A", "F", "E", "D", "C"]);
    }

    #[test]
    fn status_counts_follow_first_seen_order() {
        let claims = vec![
            claim(1, "x", ClaimStatus::Rejected),
            claim(2, "x", ClaimStatus::Pending),
            claim(3, "x", ClaimStatus::Rejected),
        ];
        assert_eq!(
            claims_by_status(&claims),
            vec![(ClaimStatus::Rejected, 2), (ClaimStatus::Pending, 1)]
        );
    }

    #[test]
    fn empty_tickets_give_empty_breakdown() {
        assert!(tickets_by_status(&[]).is_empty());
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), palette_color(5));
        assert_ne!(palette_color(0), palette_color(1));
    }

    #[test]
    fn memo_recomputes_only_on_new_key() {
        let mut memo: Memo<u32, usize> = Memo::new();
        let mut calls = 0;
        assert!(memo.update_with(1, || {
            calls += 1;
            10
        }));
        assert!(!memo.update_with(1, || {
            calls += 1;
            20
        }));
        assert_eq!((*memo.value(), calls), (10, 1));
        assert!(memo.update_with(2, || 30));
        assert_eq!(*memo.value(), 30);
    }

    #[test]
    fn cache_follows_collection_revisions() {
        let mut claims = Records::new(claims_with_issues(&["A", "B"]));
        let tickets = Records::new(vec![]);
        let mut cache = AnalyticsCache::default();

        assert_eq!(cache.refresh(&claims, &tickets), 3);
        assert_eq!(cache.refresh(&claims, &tickets), 0);

        claims.push(claim(9, "B", ClaimStatus::Approved));
        assert_eq!(cache.refresh(&claims, &tickets), 2);
        assert_eq!(cache.view().recurring_issues[0], ("B".to_string(), 2));
        assert!(cache.view().tickets_by_status.is_empty());
    }
}
