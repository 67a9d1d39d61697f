//! Taskdesk: task lifecycle core for an office task tracker.
//!
//! This crate implements the business rules behind a task board: the
//! subtask-driven status transition engine, subtask list mutations, and the
//! optimistic board reconciler, together with ports for the hosted data
//! store that owns persistence, collaborator membership, and change
//! notification.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory today)
//!
//! # Modules
//!
//! - [`task`]: Task/subtask lifecycle rules, services, and ports

pub mod task;
