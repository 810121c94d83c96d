//! Remote capabilities
//!
//! This module contains the capability traits for the three remote
//! protocols the toolkit talks to (workflow server, deployment-management
//! server, environment-settings server) plus the local project system.
//! All traits are blocking; connections are opened per operation and
//! never pooled. The shipped implementation is the JSON gateway client
//! in [`gateway`].

mod connection;
mod deployment;
mod environment;
mod project;
mod workflow;

pub mod gateway;

pub use connection::ConnectionStringBuilder;
pub use deployment::{
    DependencyMode, DeploymentExecutor, DeploymentOutcome, DeploymentPackage, DeploymentServer,
    DeploymentSession, ItemQuery, PackageItem, PackageSelection,
};
pub use environment::{
    EnvironmentField, EnvironmentInstance, EnvironmentServer, EnvironmentTemplate,
};
pub use gateway::GatewayClient;
pub use project::{CompileOutcome, Project, ProjectSystem};
pub use workflow::{DataField, ProcessInstance, WorkflowConnection, with_process_instance};
