//! spotless-applier - Run Spotless on Gradle and Maven projects
//!
//! This crate provides functionality to:
//! - Detect whether a directory is built with Gradle or Maven
//! - Resolve the independently buildable modules of a project
//! - Build the exact `spotlessApply` / `spotless:apply` invocation for a
//!   whole module or a single file
//! - Run those invocations asynchronously and report their outcome
pub mod build_system;
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod modules;
pub mod runner;
pub mod runners;
pub mod services;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use build_system::{BuildToolDetector, BuildToolKind, DefaultBuildToolDetector, ToolVersion, VersionGate};
pub use command::{TaskArgumentBuilder, TaskInvocationSpec};
pub use config::Config;
pub use modules::{ModuleResolver, ResolvedModules, SelectionCoordinator};
pub use runner::SpotlessApplier;
pub use runners::{TaskHandle, TaskOutcome, TaskRunner};
