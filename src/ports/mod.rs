//! Ports - boundaries between the learning core and its collaborators
//!
//! Following hexagonal architecture, these traits define the seams the
//! pipeline operates across: policies ([`Agent`]), game environments
//! ([`Environment`]), and training telemetry ([`Observer`]).

pub mod agent;
pub mod environment;
pub mod observer;

pub use agent::Agent;
pub use environment::Environment;
pub use observer::Observer;
