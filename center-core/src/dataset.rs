//! Dataset files: the claims and tickets the dashboard starts from.
//!
//! A dataset is YAML (or JSON, which YAML accepts) with two lists:
//!
//! ```yaml
//! claims:
//!   - id: WC-001
//!     vehicle_vin: 1HGCM82633A004352
//!     branch: riyadh
//!     issue: Transmission slipping
//!     status: pending
//!     created_at: 2026-10-01T08:00:00Z
//!     updated_at: 2026-10-02T10:30:00Z
//! tickets: []
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::DatasetError;
use crate::model::{SupportTicket, WarrantyClaim, is_valid_vin};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub claims: Vec<WarrantyClaim>,
    #[serde(default)]
    pub tickets: Vec<SupportTicket>,
}

impl Dataset {
    /// Parse and validate a dataset document.
    ///
    /// ```
    /// use center_core::{ClaimStatus, dataset::Dataset};
    ///
    /// let ds = Dataset::from_yaml_str(r#"
    /// claims:
    ///   - id: WC-001
    ///     vehicle_vin: 1HGCM82633A004352
    ///     branch: jeddah
    ///     issue: AC not cooling
    ///     status: escalated
    ///     created_at: 2026-10-01T08:00:00Z
    ///     updated_at: 2026-10-01T08:00:00Z
    /// "#).unwrap();
    ///
    /// assert_eq!(ds.claims[0].status, ClaimStatus::Unrecognized);
    /// assert!(ds.tickets.is_empty());
    /// ```
    pub fn from_yaml_str(doc: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_yaml::from_str(doc)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_yaml_str(&doc)?;
        tracing::info!(
            target: "center-core",
            path = %path.display(),
            claims = dataset.claims.len(),
            tickets = dataset.tickets.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn to_yaml(&self) -> Result<String, DatasetError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the collection invariants: unique ids, `updated_at >= created_at`
    /// and well-formed VINs.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = HashSet::new();
        for claim in &self.claims {
            if !seen.insert(claim.id.as_str()) {
                return Err(DatasetError::DuplicateId {
                    kind: "claim",
                    id: claim.id.clone(),
                });
            }
            if claim.updated_at < claim.created_at {
                return Err(DatasetError::InvalidTimeline {
                    kind: "claim",
                    id: claim.id.clone(),
                });
            }
            if !is_valid_vin(&claim.vehicle_vin) {
                return Err(DatasetError::InvalidVin {
                    id: claim.id.clone(),
                    vin: claim.vehicle_vin.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for ticket in &self.tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(DatasetError::DuplicateId {
                    kind: "ticket",
                    id: ticket.id.clone(),
                });
            }
            if ticket.updated_at < ticket.created_at {
                return Err(DatasetError::InvalidTimeline {
                    kind: "ticket",
                    id: ticket.id.clone(),
                });
            }
        }
        Ok(())
    }
}
