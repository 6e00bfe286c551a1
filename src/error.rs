//! Error types for the stronghold core.
//!
//! Nothing here is fatal: every variant is recovered from by reverting a
//! world change or by telling the actor why their attempt failed.

use thiserror::Error;

/// Why reaching full capture did not produce a claim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimRejection {
    /// The territory's area intersects an already registered one.
    #[error("area overlaps an existing stronghold")]
    Overlap,
    /// The marker sits deeper below the surface than allowed.
    #[error("marker is {depth} blocks underground (limit {limit})")]
    TooDeep { depth: i32, limit: i32 },
}

impl ClaimRejection {
    /// In-game error code shown to the contesting actor.
    pub fn code(&self) -> &'static str {
        match self {
            ClaimRejection::Overlap => "stronghold-alreadyclaimed",
            ClaimRejection::TooDeep { .. } => "stronghold-undergroundflag",
        }
    }
}

/// A block mutation refused by territory privileges.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationDenied {
    #[error("no build privilege here")]
    Place,
    #[error("no break privilege here")]
    Break,
}

impl MutationDenied {
    pub fn code(&self) -> &'static str {
        match self {
            MutationDenied::Place => "stronghold-nobuildprivilege",
            MutationDenied::Break => "stronghold-nobreakprivilege-warning",
        }
    }
}

/// Failure loading [`crate::config::StrongholdConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure encoding or decoding persisted attributes.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("malformed attributes: {0}")]
    Json(#[from] serde_json::Error),
}
