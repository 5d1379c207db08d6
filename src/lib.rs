//! Client for an External Node Classifier registry.
//!
//! [`Classifier`] lists, finds and creates registry records, and reconciles a
//! declared node (classes, parameters, groups) against what the registry holds.

pub mod classifier;
pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod names;

pub use classifier::{Classifier, Conflict, NodeOutcome, NodeRequest};
pub use config::{ConnectionOptions, ConnectionSettings};
pub use entity::{Entity, EntityId, EntityKind, Parameter};
pub use error::ClassifierError;
