//! Pure lookups from domain values to display tags, plus relative-age text.
//!
//! Nothing here knows about terminals: a [`Tone`] is mapped to a concrete
//! colour by the UI layer.

use center_common::Locale;
use chrono::{DateTime, Utc};

use crate::status::{ClaimStatus, RecordStatus, TicketPriority, TicketStatus};

/// Semantic colour family of a badge or icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Info,
    Warning,
    Danger,
    Accent,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    CheckCircle,
    Clock,
    PencilSquare,
    XCircle,
    DocumentCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconTag {
    pub glyph: Glyph,
    pub tone: Tone,
}

impl IconTag {
    /// Grey clock, shown for statuses outside the known sets.
    pub const DEFAULT: IconTag = IconTag {
        glyph: Glyph::Clock,
        tone: Tone::Neutral,
    };
}

impl Default for IconTag {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Badge tone for a claim or ticket status.
///
/// ```
/// use center_core::{ClaimStatus, TicketStatus, present::{status_style, Tone}};
///
/// assert_eq!(status_style(ClaimStatus::Approved), Tone::Success);
/// assert_eq!(status_style(TicketStatus::Solved), Tone::Success);
/// assert_eq!(status_style(ClaimStatus::Unrecognized), Tone::Neutral);
/// ```
pub fn status_style(status: impl Into<RecordStatus>) -> Tone {
    use RecordStatus::{Claim, Ticket};

    match status.into() {
        Claim(ClaimStatus::Approved) | Ticket(TicketStatus::Solved) => Tone::Success,
        Claim(ClaimStatus::Pending) | Ticket(TicketStatus::Open) => Tone::Info,
        Claim(ClaimStatus::RevisionNeeded) | Ticket(TicketStatus::InProgress) => Tone::Warning,
        Claim(ClaimStatus::Rejected) => Tone::Danger,
        Claim(ClaimStatus::Invoiced) => Tone::Accent,
        Claim(ClaimStatus::Unrecognized) | Ticket(TicketStatus::Unrecognized) => Tone::default(),
    }
}

/// Icon shown next to a record id. Shares the tone of [`status_style`].
pub fn status_icon(status: impl Into<RecordStatus>) -> IconTag {
    use RecordStatus::{Claim, Ticket};

    let status = status.into();
    let glyph = match status {
        Claim(ClaimStatus::Approved) | Ticket(TicketStatus::Solved) => Glyph::CheckCircle,
        Claim(ClaimStatus::Pending) | Ticket(TicketStatus::Open) => Glyph::Clock,
        Claim(ClaimStatus::RevisionNeeded) | Ticket(TicketStatus::InProgress) => {
            Glyph::PencilSquare
        }
        Claim(ClaimStatus::Rejected) => Glyph::XCircle,
        Claim(ClaimStatus::Invoiced) => Glyph::DocumentCheck,
        Claim(ClaimStatus::Unrecognized) | Ticket(TicketStatus::Unrecognized) => {
            return IconTag::DEFAULT;
        }
    };
    IconTag {
        glyph,
        tone: status_style(status),
    }
}

pub fn priority_style(priority: TicketPriority) -> Tone {
    match priority {
        TicketPriority::Urgent => Tone::Danger,
        TicketPriority::Normal => Tone::Neutral,
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

/// Bucket a relative age falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl AgeUnit {
    fn words(self, locale: Locale) -> (&'static str, &'static str) {
        match (self, locale) {
            (AgeUnit::Year, Locale::Ar) => ("سنة", "سنة"),
            (AgeUnit::Month, Locale::Ar) => ("شهر", "شهر"),
            (AgeUnit::Day, Locale::Ar) => ("يوم", "يوم"),
            (AgeUnit::Hour, Locale::Ar) => ("ساعة", "ساعة"),
            (AgeUnit::Minute, Locale::Ar) => ("دقيقة", "دقيقة"),
            (AgeUnit::Second, Locale::Ar) => ("ثانية", "ثانية"),
            (AgeUnit::Year, Locale::En) => ("year", "years"),
            (AgeUnit::Month, Locale::En) => ("month", "months"),
            (AgeUnit::Day, Locale::En) => ("day", "days"),
            (AgeUnit::Hour, Locale::En) => ("hour", "hours"),
            (AgeUnit::Minute, Locale::En) => ("minute", "minutes"),
            (AgeUnit::Second, Locale::En) => ("second", "seconds"),
        }
    }
}

/// Split the elapsed time into the largest unit that fits more than once.
///
/// Future instants clamp to zero seconds.
pub fn age_bucket(instant: DateTime<Utc>, now: DateTime<Utc>) -> (i64, AgeUnit) {
    let seconds = (now - instant).num_seconds().max(0);
    [
        (YEAR, AgeUnit::Year),
        (MONTH, AgeUnit::Month),
        (DAY, AgeUnit::Day),
        (HOUR, AgeUnit::Hour),
        (MINUTE, AgeUnit::Minute),
    ]
    .into_iter()
    .find(|(size, _)| seconds > *size)
    .map(|(size, unit)| (seconds / size, unit))
    .unwrap_or((seconds, AgeUnit::Second))
}

/// Localized "N units ago" text.
///
/// ```
/// use center_common::Locale;
/// use center_core::present::relative_age;
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// assert_eq!(relative_age(now - Duration::minutes(90), now, Locale::En), "1 hour ago");
/// assert_eq!(relative_age(now, now, Locale::Ar), "قبل 0 ثانية");
/// ```
pub fn relative_age(instant: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let (value, unit) = age_bucket(instant, now);
    let (one, many) = unit.words(locale);
    match locale {
        Locale::Ar => format!("قبل {value} {one}"),
        Locale::En if value == 1 => format!("{value} {one} ago"),
        Locale::En => format!("{value} {many} ago"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn known_statuses_never_fall_back() {
        for s in ClaimStatus::ALL {
            assert_ne!(status_style(s), Tone::Neutral, "{s:?}");
            assert_ne!(status_icon(s), IconTag::DEFAULT, "{s:?}");
        }
        for s in TicketStatus::ALL {
            assert_ne!(status_style(s), Tone::Neutral, "{s:?}");
            assert_ne!(status_icon(s), IconTag::DEFAULT, "{s:?}");
        }
    }

    #[test]
    fn unrecognized_statuses_use_defaults() {
        assert_eq!(status_style(ClaimStatus::Unrecognized), Tone::Neutral);
        assert_eq!(status_style(TicketStatus::Unrecognized), Tone::Neutral);
        assert_eq!(status_icon(ClaimStatus::Unrecognized), IconTag::DEFAULT);
        assert_eq!(status_icon(TicketStatus::Unrecognized), IconTag::DEFAULT);
    }

    #[test]
    fn pending_clock_differs_from_default_clock() {
        let icon = status_icon(ClaimStatus::Pending);
        assert_eq!(icon.glyph, Glyph::Clock);
        assert_eq!(icon.tone, Tone::Info);
    }

    #[test]
    fn priority_tones() {
        assert_eq!(priority_style(TicketPriority::Urgent), Tone::Danger);
        assert_eq!(priority_style(TicketPriority::Normal), Tone::Neutral);
    }

    #[test]
    fn now_is_zero_seconds() {
        let now = Utc::now();
        assert_eq!(age_bucket(now, now), (0, AgeUnit::Second));
        assert_eq!(relative_age(now, now, Locale::En), "0 seconds ago");
    }

    #[test]
    fn ninety_minutes_is_one_hour() {
        let now = Utc::now();
        let then = now - Duration::minutes(90);
        assert_eq!(age_bucket(then, now), (1, AgeUnit::Hour));
        assert_eq!(relative_age(then, now, Locale::Ar), "قبل 1 ساعة");
    }

    #[test]
    fn exact_unit_stays_in_smaller_bucket() {
        let now = Utc::now();
        assert_eq!(age_bucket(now - Duration::hours(1), now), (60, AgeUnit::Minute));
        assert_eq!(age_bucket(now - Duration::seconds(60), now), (60, AgeUnit::Second));
    }

    #[test]
    fn long_spans_use_months_and_years() {
        let now = Utc::now();
        assert_eq!(age_bucket(now - Duration::days(45), now), (1, AgeUnit::Month));
        assert_eq!(age_bucket(now - Duration::days(800), now), (2, AgeUnit::Year));
        assert_eq!(age_bucket(now - Duration::hours(50), now), (2, AgeUnit::Day));
    }

    #[test]
    fn future_instants_clamp_to_zero() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        assert_eq!(age_bucket(later, now), (0, AgeUnit::Second));
    }
}
