use std::path::PathBuf;

/// Failures while loading or validating a dataset file.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} '{id}' was updated before it was created")]
    InvalidTimeline { kind: &'static str, id: String },

    #[error("claim '{id}' has an invalid VIN '{vin}'")]
    InvalidVin { id: String, vin: String },
}

/// Rejections for a new claim or ticket typed on the command line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("unknown branch '{0}'")]
    UnknownBranch(String),

    #[error("unknown priority '{0}' (expected normal or urgent)")]
    UnknownPriority(String),

    #[error("invalid VIN '{0}' (17 characters, no I, O or Q)")]
    InvalidVin(String),

    #[error("the issue description is empty")]
    EmptyIssue,

    #[error("no {0} ids left to assign")]
    IdsExhausted(&'static str),
}
