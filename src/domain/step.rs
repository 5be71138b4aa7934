//! Step outcome types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a bootstrap step did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Dependency directory exists and no update was requested
    AlreadyPresent,
    /// Native artifact exists and no update was requested
    ArtifactPresent,
    /// No native build is configured
    NoNativeBuild,
    /// Build directory exists and configure was not forced
    BuildDirExists,
    /// The corresponding flag was not passed
    NotRequested,
    /// Configure ran and failed
    ConfigureFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyPresent => write!(f, "already present"),
            SkipReason::ArtifactPresent => write!(f, "artifact present"),
            SkipReason::NoNativeBuild => write!(f, "no native build configured"),
            SkipReason::BuildDirExists => write!(f, "build directory exists"),
            SkipReason::NotRequested => write!(f, "not requested"),
            SkipReason::ConfigureFailed => write!(f, "configure failed"),
        }
    }
}

/// Outcome of a single bootstrap step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The step was not run
    Skipped {
        /// Why it was not run
        reason: SkipReason,
    },
    /// Every invocation of the step exited with status zero
    Succeeded,
    /// An invocation exited non-zero or could not be spawned
    Failed {
        /// Exit code, when the process produced one
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<i32>,
        /// Spawn error, when the process could not be started
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl StepStatus {
    /// Creates a skipped status
    pub fn skipped(reason: SkipReason) -> Self {
        StepStatus::Skipped { reason }
    }

    /// Returns true if the step was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, StepStatus::Skipped { .. })
    }

    /// Returns true if the step ran and failed
    pub fn is_failed(&self) -> bool {
        matches!(self, StepStatus::Failed { .. })
    }

    /// Returns true if the step ran and succeeded
    pub fn is_succeeded(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }

    /// Returns true if the steps depending on this one may run
    ///
    /// A skipped step does not block what follows it.
    pub fn allows_next(&self) -> bool {
        !self.is_failed()
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Skipped { reason } => write!(f, "skipped ({})", reason),
            StepStatus::Succeeded => write!(f, "ok"),
            StepStatus::Failed {
                code: Some(code), ..
            } => write!(f, "failed (exit code {})", code),
            StepStatus::Failed {
                error: Some(error), ..
            } => write!(f, "failed ({})", error),
            StepStatus::Failed { .. } => write!(f, "failed"),
        }
    }
}

/// What the sync step did with a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Cloned with depth 1
    ShallowClone,
    /// Cloned with full history
    FullClone,
    /// Pulled and updated submodules
    Update,
    /// Left untouched
    None,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::ShallowClone => write!(f, "cloned (shallow)"),
            SyncAction::FullClone => write!(f, "cloned (full)"),
            SyncAction::Update => write!(f, "updated"),
            SyncAction::None => write!(f, "unchanged"),
        }
    }
}
