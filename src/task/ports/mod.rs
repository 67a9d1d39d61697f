//! Port contracts for the task lifecycle core.
//!
//! Ports define infrastructure-agnostic interfaces to the hosted data store,
//! the collaborator-membership store, and the change-notification bus.

pub mod collaborators;
pub mod events;
pub mod store;

pub use collaborators::{
    CollaboratorAdd, CollaboratorStore, CollaboratorStoreError, CollaboratorStoreResult,
};
pub use events::{TaskChange, TaskEvents, TaskWatch};
pub use store::{
    TaskDetailsPatch, TaskPatch, TaskRecord, TaskStore, TaskStoreError, TaskStoreResult,
};
