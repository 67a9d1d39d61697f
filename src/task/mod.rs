//! Task lifecycle management for Taskdesk.
//!
//! This module implements the task/subtask lifecycle: the pure status
//! transition rules coupling subtask completion to task status, the subtask
//! mutation operations that feed them, the optimistic board reconciler, and
//! the permission checks guarding manual status changes. The module follows
//! hexagonal architecture:
//!
//! - Domain types and engines in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
