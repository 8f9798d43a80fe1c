use center_common::Locale;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::LazyLock};

use crate::error::DraftError;
use crate::status::{ClaimStatus, TicketPriority, TicketStatus};

/// Tickets older than this that are not solved get the overdue banner.
pub const DEFAULT_OVERDUE_AFTER: Duration = Duration::hours(48);

static VIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("static VIN pattern"));

/// ISO 3779 shape check: 17 characters, digits and capitals except I, O, Q.
pub fn is_valid_vin(vin: &str) -> bool {
    VIN_RE.is_match(vin)
}

/// Physical service locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Riyadh,
    Jeddah,
    Dammam,
    Khobar,
    Makkah,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::Riyadh,
        Branch::Jeddah,
        Branch::Dammam,
        Branch::Khobar,
        Branch::Makkah,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Branch::Riyadh => "riyadh",
            Branch::Jeddah => "jeddah",
            Branch::Dammam => "dammam",
            Branch::Khobar => "khobar",
            Branch::Makkah => "makkah",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Branch::Riyadh, Locale::Ar) => "الرياض",
            (Branch::Riyadh, Locale::En) => "Riyadh",
            (Branch::Jeddah, Locale::Ar) => "جدة",
            (Branch::Jeddah, Locale::En) => "Jeddah",
            (Branch::Dammam, Locale::Ar) => "الدمام",
            (Branch::Dammam, Locale::En) => "Dammam",
            (Branch::Khobar, Locale::Ar) => "الخبر",
            (Branch::Khobar, Locale::En) => "Khobar",
            (Branch::Makkah, Locale::Ar) => "مكة",
            (Branch::Makkah, Locale::En) => "Makkah",
        }
    }
}

impl FromStr for Branch {
    type Err = DraftError;

    /// Accepts the key or either localized label, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Branch::ALL
            .into_iter()
            .find(|b| {
                b.key().eq_ignore_ascii_case(needle)
                    || Locale::ALL
                        .iter()
                        .any(|l| b.label(*l).eq_ignore_ascii_case(needle))
            })
            .ok_or_else(|| DraftError::UnknownBranch(needle.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

/// Reference to a photo or video held by the media store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: MediaKind,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Counts of attached photos and videos, in that order.
pub fn media_counts(attachments: &[Attachment]) -> (usize, usize) {
    attachments
        .iter()
        .fold((0, 0), |(photos, videos), a| match a.kind {
            MediaKind::Photo => (photos + 1, videos),
            MediaKind::Video => (photos, videos + 1),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyClaim {
    pub id: String,
    pub vehicle_vin: String,
    pub branch: Branch,
    pub issue: String,
    #[serde(default)]
    pub technical_report: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub branch: Branch,
    pub issue: String,
    #[serde(default)]
    pub technical_report: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl SupportTicket {
    /// Open longer than `threshold` and not yet solved. Advisory only.
    ///
    /// ```
    /// use center_core::{DEFAULT_OVERDUE_AFTER, seed::seed_dataset};
    /// use chrono::{Duration, Utc};
    ///
    /// let now = Utc::now();
    /// let mut ticket = seed_dataset(now).tickets.remove(0);
    /// ticket.created_at = now - Duration::hours(49);
    /// assert_eq!(
    ///     ticket.is_overdue(now, DEFAULT_OVERDUE_AFTER),
    ///     ticket.status != center_core::TicketStatus::Solved
    /// );
    /// ```
    pub fn is_overdue(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.status != TicketStatus::Solved && now - self.created_at > threshold
    }
}
