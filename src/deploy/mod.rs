//! Deployment commands
//!
//! This module contains the two deployment commands: packaging workflow
//! items into a file, and building a project and deploying it against a
//! resolved environment.

mod build;
mod package;

pub use build::{BuildDeployOptions, build_and_deploy, prepare_package};
pub use package::{PackageOptions, build_package};
