//! Domain model and view-state logic for the service-center dashboard.
//!
//! - [`model`]: claims, tickets, comments, branches
//! - [`status`]: closed status/priority enums with an `Unrecognized` fallback
//! - [`present`]: status → tone/icon lookups and relative-age text
//! - [`aggregate`]: chart inputs and their memoization
//! - [`state`]: the shell's [`AppState`] and active view
//! - [`dataset`] / [`seed`]: where the records come from
pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod model;
pub mod present;
pub mod seed;
pub mod state;
pub mod status;

pub use aggregate::{AnalyticsCache, AnalyticsView};
pub use dataset::Dataset;
pub use error::{DatasetError, DraftError};
pub use model::{
    Attachment, Branch, Comment, DEFAULT_OVERDUE_AFTER, MediaKind, SupportTicket, WarrantyClaim,
};
pub use state::{ActiveView, AppState, ClaimDraft, Records, TicketDraft};
pub use status::{ClaimStatus, RecordStatus, TicketPriority, TicketStatus};
