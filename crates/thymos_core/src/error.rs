//! Error taxonomy for the decision core.
//!
//! Only configuration/lookup mistakes are surfaced to callers. Transient
//! execution failures become failure `Outcome`s, generation failures degrade
//! to no-change, and scheduling misuse is a silent no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThymosError {
    /// A task referenced an action name with no registered executor.
    /// This indicates a programming/config error, not a runtime fluke,
    /// so it is signaled immediately and never retried.
    #[error("unknown action '{action}': no executor registered")]
    UnknownAction { action: String },

    /// An executor was registered twice under the same action name.
    #[error("action '{action}' is already registered")]
    DuplicateAction { action: String },

    /// An action name failed registration-time validation.
    #[error("invalid action name '{action}': {reason}")]
    InvalidAction { action: String, reason: String },
}
