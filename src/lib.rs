//! vendorboot - Vendored dependency bootstrapper library
//!
//! This library provides the core functionality for preparing a CMake
//! project whose third-party sources live in a vendor directory:
//! - Cloning or updating each dependency with git
//! - Building one dependency with its native toolchain
//! - Configuring and building with CMake using a per-platform toolchain

pub mod bootstrapper;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod progress;
pub mod runner;
