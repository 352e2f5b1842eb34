//! `fitstock-admin`
//!
//! **Responsibility:** the inventory administration screen.
//!
//! This crate provides:
//! - The screen controller (filters, table rows, add/edit modal, delete gate)
//! - Form state and notifications
//! - Plain-text rendering and an interactive console
//! - Runtime configuration for the `fitstock-admin` binary
//!
//! All inventory rules live in `fitstock-inventory`; this crate only presents them.

pub mod args;
pub mod config;
pub mod console;
pub mod form;
pub mod notify;
pub mod render;
pub mod screen;

pub use args::Cli;
pub use config::{AdminConfig, ConfigError};
pub use console::{Command, CommandError, Console, Target};
pub use form::{FormState, ModalState};
pub use notify::{Notification, NotificationQueue, Notifier, Severity};
pub use screen::{InventoryScreen, LoadState, Row};
