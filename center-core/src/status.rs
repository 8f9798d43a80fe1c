use center_common::Locale;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DraftError;

/// Review state of a warranty claim.
///
/// `Unrecognized` absorbs any value a dataset file carries outside the known
/// set, so a bad row still renders (with neutral styling) instead of failing
/// the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    RevisionNeeded,
    Invoiced,
    #[serde(other)]
    Unrecognized,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::RevisionNeeded,
        ClaimStatus::Invoiced,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ClaimStatus::Pending, Locale::Ar) => "قيد المراجعة",
            (ClaimStatus::Pending, Locale::En) => "Pending",
            (ClaimStatus::Approved, Locale::Ar) => "مقبول",
            (ClaimStatus::Approved, Locale::En) => "Approved",
            (ClaimStatus::Rejected, Locale::Ar) => "مرفوض",
            (ClaimStatus::Rejected, Locale::En) => "Rejected",
            (ClaimStatus::RevisionNeeded, Locale::Ar) => "يحتاج تعديل",
            (ClaimStatus::RevisionNeeded, Locale::En) => "Revision needed",
            (ClaimStatus::Invoiced, Locale::Ar) => "تمت الفوترة",
            (ClaimStatus::Invoiced, Locale::En) => "Invoiced",
            (ClaimStatus::Unrecognized, Locale::Ar) => "غير معروف",
            (ClaimStatus::Unrecognized, Locale::En) => "Unknown",
        }
    }
}

/// Progress of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Solved,
    #[serde(other)]
    Unrecognized,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Solved,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (TicketStatus::Open, Locale::Ar) => "مفتوحة",
            (TicketStatus::Open, Locale::En) => "Open",
            (TicketStatus::InProgress, Locale::Ar) => "تحت الإجراء",
            (TicketStatus::InProgress, Locale::En) => "In progress",
            (TicketStatus::Solved, Locale::Ar) => "تم الحل",
            (TicketStatus::Solved, Locale::En) => "Solved",
            (TicketStatus::Unrecognized, Locale::Ar) => "غير معروف",
            (TicketStatus::Unrecognized, Locale::En) => "Unknown",
        }
    }
}

/// Union of both status sets, the domain of the style and icon lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordStatus {
    Claim(ClaimStatus),
    Ticket(TicketStatus),
}

impl RecordStatus {
    pub fn label(self, locale: Locale) -> &'static str {
        match self {
            RecordStatus::Claim(s) => s.label(locale),
            RecordStatus::Ticket(s) => s.label(locale),
        }
    }
}

impl From<ClaimStatus> for RecordStatus {
    fn from(s: ClaimStatus) -> Self {
        RecordStatus::Claim(s)
    }
}

impl From<TicketStatus> for RecordStatus {
    fn from(s: TicketStatus) -> Self {
        RecordStatus::Ticket(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    #[default]
    Normal,
    Urgent,
}

impl TicketPriority {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (TicketPriority::Normal, Locale::Ar) => "عادي",
            (TicketPriority::Normal, Locale::En) => "Normal",
            (TicketPriority::Urgent, Locale::Ar) => "عاجل",
            (TicketPriority::Urgent, Locale::En) => "Urgent",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = DraftError;

    /// Accepts the English key or either localized label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        [TicketPriority::Normal, TicketPriority::Urgent]
            .into_iter()
            .find(|p| {
                Locale::ALL
                    .iter()
                    .any(|l| p.label(*l).eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| DraftError::UnknownPriority(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_strings_deserialize_to_fallback() {
        let s: ClaimStatus = serde_yaml::from_str("escalated").unwrap();
        assert_eq!(s, ClaimStatus::Unrecognized);
        let t: TicketStatus = serde_yaml::from_str("in_progress").unwrap();
        assert_eq!(t, TicketStatus::InProgress);
    }

    #[test]
    fn priority_parses_keys_and_arabic_labels() {
        assert_eq!("urgent".parse::<TicketPriority>().unwrap(), TicketPriority::Urgent);
        assert_eq!("URGENT".parse::<TicketPriority>().unwrap(), TicketPriority::Urgent);
        assert_eq!("عادي".parse::<TicketPriority>().unwrap(), TicketPriority::Normal);
        assert!(matches!(
            "soon".parse::<TicketPriority>(),
            Err(DraftError::UnknownPriority(p)) if p == "soon"
        ));
    }

    #[test]
    fn every_known_status_has_distinct_labels() {
        for locale in Locale::ALL {
            let mut labels: Vec<_> = ClaimStatus::ALL.iter().map(|s| s.label(locale)).collect();
            labels.sort();
            labels.dedup();
            assert_eq!(labels.len(), ClaimStatus::ALL.len());
        }
    }
}
