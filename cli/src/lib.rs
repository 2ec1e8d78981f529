//! Terminal host for `todoapp-core`.
//!
//! # Overview
//! Reads one command per line, turns it into a `Session` intent, executes the
//! resulting requests with ureq and prints the view after every command.
//!
//! # Design
//! - `command` parses input lines; it knows nothing about the session.
//! - `executor` is the only module that touches the network.
//! - `render` turns a `ViewModel` into text and nothing else.

pub mod command;
pub mod config;
pub mod executor;
pub mod render;

pub use command::{Command, CommandError};
pub use config::Config;
pub use executor::Executor;
