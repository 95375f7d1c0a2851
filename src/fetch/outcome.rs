//! Fetch outcomes.
//!
//! Exactly one outcome is produced per completed fetch. Transport and parse
//! failures are folded into [`FetchOutcome::Error`] at the executor
//! boundary; nothing else crosses back to the serialized context.

use crate::classify::ResponseDirectives;
use crate::error::{ErrorReason, FetchError};
use crate::fetch::TaskId;
use crate::variant::AdVariant;

/// Result of one fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The task observed its cancellation flag at a checkpoint.
    Cancelled,
    /// The server answered with a 4xx/5xx status; backoff applies.
    ServerErrorRetryable {
        /// HTTP status code
        status: u16,
    },
    /// The server answered with an invalid non-error response; no backoff.
    ServerErrorTerminal {
        /// HTTP status code
        status: u16,
    },
    /// The server had no inventory for the ad unit.
    NoInventory,
    /// The ad unit is still warming up server-side.
    WarmingUp,
    /// Transport or parse failure with no other classification.
    Error(FetchError),
    /// A typed ad variant ready to apply.
    Success(AdVariant),
}

impl FetchOutcome {
    /// Maps a failure outcome to the public reason reported to the surface.
    ///
    /// Returns `None` for [`FetchOutcome::Success`].
    pub fn error_reason(&self) -> Option<ErrorReason> {
        match self {
            FetchOutcome::Cancelled => Some(ErrorReason::Cancelled),
            FetchOutcome::ServerErrorRetryable { .. } | FetchOutcome::ServerErrorTerminal { .. } => {
                Some(ErrorReason::ServerError)
            }
            FetchOutcome::NoInventory | FetchOutcome::WarmingUp => Some(ErrorReason::NoFill),
            FetchOutcome::Error(_) => Some(ErrorReason::Unspecified),
            FetchOutcome::Success(_) => None,
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Cancelled => "cancelled",
            FetchOutcome::ServerErrorRetryable { .. } => "server-error-retryable",
            FetchOutcome::ServerErrorTerminal { .. } => "server-error-terminal",
            FetchOutcome::NoInventory => "no-inventory",
            FetchOutcome::WarmingUp => "warming-up",
            FetchOutcome::Error(_) => "error",
            FetchOutcome::Success(_) => "success",
        }
    }
}

/// A finished fetch, as delivered back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCompletion {
    /// Identity of the completed task
    pub task_id: TaskId,
    /// What the fetch produced
    pub outcome: FetchOutcome,
    /// Surface directives parsed from the response headers; present only
    /// for well-formed 200 responses
    pub directives: Option<ResponseDirectives>,
}

impl FetchCompletion {
    /// Creates a completion with no directives attached.
    pub fn bare(task_id: TaskId, outcome: FetchOutcome) -> Self {
        Self {
            task_id,
            outcome,
            directives: None,
        }
    }
}
