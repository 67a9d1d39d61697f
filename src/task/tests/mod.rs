//! Unit and service tests for the task lifecycle.

mod board_tests;
mod domain_tests;
mod support;
