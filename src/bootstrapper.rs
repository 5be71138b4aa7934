//! Bootstrap workflow
//!
//! This module provides:
//! - Workflow coordination: sync → native build → configure → build
//! - Filesystem checks deciding which steps run
//! - Step outcome collection into a report
//!
//! Failed clones, pulls and native builds are reported and logged but do not
//! stop the run. A failed configure skips the build step.

use crate::commands;
use crate::config::BootstrapConfig;
use crate::domain::{
    BootstrapReport, DependencyReport, DependencySpec, Platform, SkipReason, StepStatus,
    SyncAction,
};
use crate::progress::Progress;
use crate::runner::{CommandRunner, Invocation, RunOutcome};
use chrono::Utc;
use std::path::PathBuf;

/// Flags controlling which steps run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapArgs {
    /// Pull existing dependencies and rebuild the native one
    pub update: bool,
    /// Re-run the generator even if the build directory exists
    pub force_configure: bool,
    /// Run the builder after configure
    pub build: bool,
}

/// Runs the bootstrap steps against a project root
pub struct Bootstrapper<'a, R: CommandRunner> {
    /// Dependency set and layout
    config: &'a BootstrapConfig,
    /// Step flags
    args: BootstrapArgs,
    /// Platform selecting the native command and toolchain
    platform: Platform,
    /// Project root all configured paths are relative to
    root: PathBuf,
    /// Executes the invocations
    runner: R,
    /// Print step headers to stdout
    headers: bool,
    /// Spinner shown instead of headers
    progress: Progress,
    /// Whether the runner only prints
    dry_run: bool,
}

impl<'a, R: CommandRunner> Bootstrapper<'a, R> {
    /// Create a new bootstrapper
    pub fn new(
        config: &'a BootstrapConfig,
        args: BootstrapArgs,
        platform: Platform,
        root: impl Into<PathBuf>,
        runner: R,
    ) -> Self {
        Self {
            config,
            args,
            platform,
            root: root.into(),
            runner,
            headers: true,
            progress: Progress::disabled(),
            dry_run: false,
        }
    }

    /// Enable or disable the `  Cloning [name]` style headers
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// Use a spinner for step messages
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Mark the report as a dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Access the runner (used by tests to inspect recorded invocations)
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run every step in order
    pub fn run(&mut self) -> BootstrapReport {
        let started_at = Utc::now();
        self.progress.start("Bootstrapping...");

        tracing::debug!(
            platform = %self.platform,
            root = %self.root.display(),
            update = self.args.update,
            force_configure = self.args.force_configure,
            build = self.args.build,
            "starting bootstrap"
        );

        let dependencies = self.sync_all();
        let native_build = self.build_native();
        let configure = self.configure();
        let build = self.build(&configure);

        self.progress.clear();

        BootstrapReport {
            platform: self.platform,
            dry_run: self.dry_run,
            started_at,
            dependencies,
            native_build,
            configure,
            build,
        }
    }

    /// Directory a dependency is cloned into
    pub fn dependency_dir(&self, dep: &DependencySpec) -> PathBuf {
        self.root.join(self.config.vendor_dir()).join(&dep.name)
    }

    /// Build output directory
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(self.config.build_dir())
    }

    /// Sync every declared dependency, in declaration order
    pub fn sync_all(&self) -> Vec<DependencyReport> {
        self.config
            .dependencies
            .iter()
            .map(|dep| self.sync_dependency(dep))
            .collect()
    }

    /// Clone a missing dependency, or pull it when updating
    pub fn sync_dependency(&self, dep: &DependencySpec) -> DependencyReport {
        let path = self.dependency_dir(dep);
        tracing::debug!(dependency = %dep, path = %path.display(), "syncing");

        if path.exists() {
            if !self.args.update {
                return DependencyReport::new(
                    &dep.name,
                    SyncAction::None,
                    StepStatus::skipped(SkipReason::AlreadyPresent),
                );
            }

            self.announce(&format!("Updating [{}]", dep.name));
            let pull = self.execute(&commands::git_pull(&path));
            let submodules = self.execute(&commands::git_submodule_update(&path));
            let status = first_failure([&pull, &submodules]);
            self.warn_ignored(&dep.name, "update", &status);
            return DependencyReport::new(&dep.name, SyncAction::Update, status);
        }

        self.announce(&format!("Cloning [{}]", dep.name));
        let action = if dep.full_clone {
            SyncAction::FullClone
        } else {
            SyncAction::ShallowClone
        };
        let outcome = self.execute(&commands::git_clone(dep, &path, &self.root));
        let status = status_from(&outcome);
        self.warn_ignored(&dep.name, "clone", &status);
        DependencyReport::new(&dep.name, action, status)
    }

    /// Expected native artifact, if a native build is configured
    pub fn native_artifact(&self) -> Option<PathBuf> {
        let dep = self.config.native_dependency()?;
        let command = self.config.native_build.command_for(self.platform);
        Some(self.dependency_dir(dep).join(&command.artifact))
    }

    /// Build the native dependency when its artifact is missing or updating
    pub fn build_native(&self) -> StepStatus {
        let Some(dep) = self.config.native_dependency() else {
            return StepStatus::skipped(SkipReason::NoNativeBuild);
        };
        let command = self.config.native_build.command_for(self.platform);
        let dep_dir = self.dependency_dir(dep);

        if dep_dir.join(&command.artifact).exists() && !self.args.update {
            return StepStatus::skipped(SkipReason::ArtifactPresent);
        }

        self.announce(&format!("Building native [{}]", dep.name));
        let outcome = self.execute(&commands::native_build(command, &dep_dir));
        let status = status_from(&outcome);
        self.warn_ignored(&dep.name, "native build", &status);
        status
    }

    /// Run the generator when the build directory is missing or forced
    pub fn configure(&self) -> StepStatus {
        if self.build_dir().exists() && !self.args.force_configure {
            return StepStatus::skipped(SkipReason::BuildDirExists);
        }

        self.announce(&format!("Configuring [{}]", self.config.build_type));
        let outcome = self.execute(&commands::cmake_configure(
            self.config,
            self.platform,
            &self.root,
        ));
        let status = status_from(&outcome);
        if status.is_failed() {
            tracing::error!(status = %status, "configure failed, build step will not run");
        }
        status
    }

    /// Run the builder when requested and configure did not fail
    pub fn build(&self, configure: &StepStatus) -> StepStatus {
        if !self.args.build {
            return StepStatus::skipped(SkipReason::NotRequested);
        }
        if !configure.allows_next() {
            return StepStatus::skipped(SkipReason::ConfigureFailed);
        }

        self.announce(&format!("Building [{}]", self.config.build_type));
        let outcome = self.execute(&commands::cmake_build(self.config, &self.root));
        status_from(&outcome)
    }

    fn execute(&self, invocation: &Invocation) -> RunOutcome {
        let outcome = self.runner.run(invocation);
        tracing::debug!(command = %invocation, success = outcome.success, "finished");
        outcome
    }

    fn announce(&self, message: &str) {
        tracing::info!("{}", message);
        if self.headers {
            println!("  {}", message);
        }
        self.progress.set_message(message);
    }

    fn warn_ignored(&self, name: &str, step: &str, status: &StepStatus) {
        if status.is_failed() {
            tracing::warn!(dependency = name, status = %status, "{} failed, continuing", step);
        }
    }
}

fn status_from(outcome: &RunOutcome) -> StepStatus {
    if outcome.success {
        StepStatus::Succeeded
    } else {
        StepStatus::Failed {
            code: outcome.code,
            error: outcome.error.clone(),
        }
    }
}

fn first_failure<const N: usize>(outcomes: [&RunOutcome; N]) -> StepStatus {
    outcomes
        .iter()
        .find(|o| !o.success)
        .map(|o| status_from(o))
        .unwrap_or(StepStatus::Succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Records invocations and answers with scripted exit codes
    #[derive(Default)]
    struct MockRunner {
        calls: RefCell<Vec<Invocation>>,
        fail_program_sub: Option<(&'static str, &'static str, i32)>,
    }

    impl MockRunner {
        fn failing(program: &'static str, sub: &'static str, code: i32) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_program_sub: Some((program, sub, code)),
            }
        }

        fn count(&self, program: &str, sub: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.is_subcommand(program, sub))
                .count()
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, invocation: &Invocation) -> RunOutcome {
            self.calls.borrow_mut().push(invocation.clone());
            match self.fail_program_sub {
                Some((program, sub, code)) if invocation.is_subcommand(program, sub) => {
                    RunOutcome::exited(code)
                }
                _ => RunOutcome::success(),
            }
        }
    }

    fn args(update: bool, force_configure: bool, build: bool) -> BootstrapArgs {
        BootstrapArgs {
            update,
            force_configure,
            build,
        }
    }

    fn bootstrapper<'a>(
        config: &'a BootstrapConfig,
        root: &Path,
        args: BootstrapArgs,
        runner: MockRunner,
    ) -> Bootstrapper<'a, MockRunner> {
        Bootstrapper::new(config, args, Platform::Linux, root, runner).with_headers(false)
    }

    #[test]
    fn test_sync_absent_dependency_clones_once() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());

        let report = boot.sync_dependency(&config.dependencies[0]);
        assert_eq!(report.action, SyncAction::ShallowClone);
        assert!(report.status.is_succeeded());
        assert_eq!(boot.runner().count("git", "clone"), 1);
        assert!(boot.runner().calls.borrow()[0]
            .args
            .iter()
            .any(|a| a == "--depth"));
    }

    #[test]
    fn test_sync_present_without_update_is_noop() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());
        fs::create_dir_all(boot.dependency_dir(&config.dependencies[0])).unwrap();

        let report = boot.sync_dependency(&config.dependencies[0]);
        assert_eq!(report.action, SyncAction::None);
        assert!(report.status.is_skipped());
        assert!(boot.runner().calls.borrow().is_empty());
    }

    #[test]
    fn test_sync_present_with_update_pulls() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(true, false, false), MockRunner::default());
        let dep_dir = boot.dependency_dir(&config.dependencies[0]);
        fs::create_dir_all(&dep_dir).unwrap();

        let report = boot.sync_dependency(&config.dependencies[0]);
        assert_eq!(report.action, SyncAction::Update);
        assert_eq!(boot.runner().count("git", "pull"), 1);
        assert_eq!(boot.runner().count("git", "submodule"), 1);
        assert!(boot.runner().calls.borrow().iter().all(|c| c.cwd == dep_dir));
    }

    #[test]
    fn test_failed_pull_still_updates_submodules() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(
            &config,
            dir.path(),
            args(true, false, false),
            MockRunner::failing("git", "pull", 1),
        );
        fs::create_dir_all(boot.dependency_dir(&config.dependencies[0])).unwrap();

        let report = boot.sync_dependency(&config.dependencies[0]);
        assert!(report.status.is_failed());
        assert_eq!(boot.runner().count("git", "submodule"), 1);
    }

    #[test]
    fn test_failed_clone_does_not_stop_sync() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(
            &config,
            dir.path(),
            args(false, false, false),
            MockRunner::failing("git", "clone", 128),
        );

        let reports = boot.sync_all();
        assert_eq!(reports.len(), config.dependencies.len());
        assert!(reports.iter().all(|r| r.status.is_failed()));
        assert_eq!(boot.runner().count("git", "clone"), config.dependencies.len());
    }

    #[test]
    fn test_native_build_when_artifact_missing() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());

        assert!(boot.build_native().is_succeeded());
        let calls = boot.runner().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "make");
        assert!(calls[0].cwd.ends_with("luajit"));
    }

    #[test]
    fn test_native_build_skipped_when_artifact_present() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());
        let artifact = boot.native_artifact().unwrap();
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, b"").unwrap();

        assert_eq!(
            boot.build_native(),
            StepStatus::skipped(SkipReason::ArtifactPresent)
        );
        assert!(boot.runner().calls.borrow().is_empty());
    }

    #[test]
    fn test_native_build_forced_by_update() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(true, false, false), MockRunner::default());
        let artifact = boot.native_artifact().unwrap();
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, b"").unwrap();

        assert!(boot.build_native().is_succeeded());
        assert_eq!(boot.runner().calls.borrow().len(), 1);
    }

    #[test]
    fn test_native_build_disabled() {
        let dir = TempDir::new().unwrap();
        let mut config = BootstrapConfig::default();
        config.native_build.enabled = false;
        let boot = bootstrapper(&config, dir.path(), args(true, false, false), MockRunner::default());

        assert_eq!(boot.build_native(), StepStatus::skipped(SkipReason::NoNativeBuild));
        assert!(boot.native_artifact().is_none());
    }

    #[test]
    fn test_windows_native_artifact() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = Bootstrapper::new(
            &config,
            BootstrapArgs::default(),
            Platform::Windows,
            dir.path(),
            MockRunner::default(),
        )
        .with_headers(false);
        assert!(boot.native_artifact().unwrap().ends_with("src/lua51.lib"));
    }

    #[test]
    fn test_configure_runs_when_build_dir_missing() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());

        assert!(boot.configure().is_succeeded());
        assert_eq!(boot.runner().count("cmake", "-B"), 1);
    }

    #[test]
    fn test_configure_skipped_when_build_dir_exists() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());
        fs::create_dir_all(boot.build_dir()).unwrap();

        assert_eq!(boot.configure(), StepStatus::skipped(SkipReason::BuildDirExists));
        assert!(boot.runner().calls.borrow().is_empty());
    }

    #[test]
    fn test_configure_forced() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let boot = bootstrapper(&config, dir.path(), args(false, true, false), MockRunner::default());
        fs::create_dir_all(boot.build_dir()).unwrap();

        assert!(boot.configure().is_succeeded());
        assert_eq!(boot.runner().count("cmake", "-B"), 1);
    }

    #[test]
    fn test_build_gating() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();

        let boot = bootstrapper(&config, dir.path(), args(false, false, false), MockRunner::default());
        assert_eq!(
            boot.build(&StepStatus::Succeeded),
            StepStatus::skipped(SkipReason::NotRequested)
        );

        let boot = bootstrapper(&config, dir.path(), args(false, false, true), MockRunner::default());
        let failed = StepStatus::Failed {
            code: Some(1),
            error: None,
        };
        assert_eq!(
            boot.build(&failed),
            StepStatus::skipped(SkipReason::ConfigureFailed)
        );
        assert!(boot.runner().calls.borrow().is_empty());

        assert!(boot
            .build(&StepStatus::skipped(SkipReason::BuildDirExists))
            .is_succeeded());
        assert_eq!(boot.runner().count("cmake", "--build"), 1);
    }

    #[test]
    fn test_run_reports_every_step() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::default();
        let mut boot = bootstrapper(&config, dir.path(), args(false, false, true), MockRunner::default())
            .with_dry_run(true);

        let report = boot.run();
        assert!(report.dry_run);
        assert_eq!(report.platform, Platform::Linux);
        assert_eq!(report.cloned_count(), config.dependencies.len());
        assert!(report.native_build.is_succeeded());
        assert!(report.configure.is_succeeded());
        assert!(report.build.is_succeeded());
    }

    #[test]
    fn test_first_failure() {
        let ok = RunOutcome::success();
        let bad = RunOutcome::exited(4);
        assert!(first_failure([&ok, &ok]).is_succeeded());
        assert_eq!(
            first_failure([&ok, &bad]),
            StepStatus::Failed {
                code: Some(4),
                error: None
            }
        );
    }
}
