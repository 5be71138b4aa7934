//! Bootstrap run report types
//!
//! Provides structures for tracking outcomes at dependency and run level.

use super::{Platform, StepStatus, SyncAction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sync outcome for a single dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    /// Dependency name
    pub name: String,
    /// What the sync step decided to do
    pub action: SyncAction,
    /// How it went
    #[serde(flatten)]
    pub status: StepStatus,
}

impl DependencyReport {
    /// Creates a new DependencyReport
    pub fn new(name: impl Into<String>, action: SyncAction, status: StepStatus) -> Self {
        Self {
            name: name.into(),
            action,
            status,
        }
    }
}

/// Overall report of one bootstrap run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Platform the run targeted
    pub platform: Platform,
    /// Whether commands were only printed
    pub dry_run: bool,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Per-dependency sync outcomes, in declaration order
    pub dependencies: Vec<DependencyReport>,
    /// Native pre-build outcome
    pub native_build: StepStatus,
    /// CMake configure outcome
    pub configure: StepStatus,
    /// CMake build outcome
    pub build: StepStatus,
}

impl BootstrapReport {
    /// Returns the number of dependencies cloned
    pub fn cloned_count(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| matches!(d.action, SyncAction::ShallowClone | SyncAction::FullClone))
            .count()
    }

    /// Returns the number of dependencies updated
    pub fn updated_count(&self) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.action == SyncAction::Update)
            .count()
    }

    /// Returns all dependencies whose sync failed
    pub fn failed_dependencies(&self) -> impl Iterator<Item = &DependencyReport> {
        self.dependencies.iter().filter(|d| d.status.is_failed())
    }

    /// Process exit code for this run
    ///
    /// Only a failed build changes it, passing the builder's code through.
    /// Every other failure is reported but exits with 0.
    pub fn exit_code(&self) -> u8 {
        match &self.build {
            StepStatus::Failed { code, .. } => match code {
                Some(c) if (1..=255).contains(c) => *c as u8,
                _ => 1,
            },
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkipReason;

    fn sample_report() -> BootstrapReport {
        BootstrapReport {
            platform: Platform::Linux,
            dry_run: false,
            started_at: Utc::now(),
            dependencies: vec![
                DependencyReport::new("SDL", SyncAction::ShallowClone, StepStatus::Succeeded),
                DependencyReport::new("luajit", SyncAction::FullClone, StepStatus::Succeeded),
                DependencyReport::new("glm", SyncAction::Update, StepStatus::Succeeded),
                DependencyReport::new(
                    "imgui",
                    SyncAction::None,
                    StepStatus::skipped(SkipReason::AlreadyPresent),
                ),
            ],
            native_build: StepStatus::skipped(SkipReason::ArtifactPresent),
            configure: StepStatus::Succeeded,
            build: StepStatus::skipped(SkipReason::NotRequested),
        }
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.cloned_count(), 2);
        assert_eq!(report.updated_count(), 1);
        assert_eq!(report.failed_dependencies().count(), 0);
    }

    #[test]
    fn test_failed_dependencies() {
        let mut report = sample_report();
        report.dependencies[2].status = StepStatus::Failed {
            code: Some(128),
            error: None,
        };
        let failed: Vec<_> = report.failed_dependencies().map(|d| d.name.as_str()).collect();
        assert_eq!(failed, vec!["glm"]);
    }

    #[test]
    fn test_exit_code_success_ignores_sync_failures() {
        let mut report = sample_report();
        report.dependencies[0].status = StepStatus::Failed {
            code: Some(128),
            error: None,
        };
        report.native_build = StepStatus::Failed {
            code: Some(2),
            error: None,
        };
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_exit_code_build_failure_propagates() {
        let mut report = sample_report();
        report.build = StepStatus::Failed {
            code: Some(7),
            error: None,
        };
        assert_eq!(report.exit_code(), 7);

        report.build = StepStatus::Failed {
            code: None,
            error: Some("failed to execute cmake".to_string()),
        };
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_configure_failure_is_zero() {
        let mut report = sample_report();
        report.configure = StepStatus::Failed {
            code: Some(1),
            error: None,
        };
        report.build = StepStatus::skipped(SkipReason::ConfigureFailed);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_dependency_report_serialization_is_flat() {
        let dep = DependencyReport::new("glm", SyncAction::Update, StepStatus::Succeeded);
        let json = serde_json::to_value(&dep).unwrap();
        assert_eq!(json["name"], "glm");
        assert_eq!(json["action"], "update");
        assert_eq!(json["status"], "succeeded");
    }
}
