//! Types and utilities shared across the service-center crates.
//!
//! This crate is intentionally small so every other crate in the workspace can
//! depend on it without pulling in UI or configuration machinery.
//!
//! # Overview
//!
//! - [`Locale`]: display language for labels and relative-time strings
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use center_common::Locale;
//!
//! let locale: Locale = "EN".parse().unwrap();
//! assert_eq!(locale, Locale::En);
//! assert!(Locale::default().is_rtl());
//! ```
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub mod observability;

/// Display language. Arabic is the default, matching the service centres'
/// working language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Whether the language reads right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Locale::Ar)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a locale code is not one of [`Locale::ALL`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown locale '{0}' (expected 'ar' or 'en')")]
pub struct LocaleError(pub String);

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Ar),
            "en" | "english" => Ok(Locale::En),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}
