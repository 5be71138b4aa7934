//! Core domain models for vendorboot
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency descriptors for vendored repositories
//! - Platform and toolchain selection
//! - Step outcomes and the run report

mod dependency;
mod platform;
mod step;
mod summary;

pub use dependency::DependencySpec;
pub use platform::{Platform, Toolchain};
pub use step::{SkipReason, StepStatus, SyncAction};
pub use summary::{BootstrapReport, DependencyReport};
