//! # CLI Behavior
//!
//! This is **one possible UI client** for creel, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Naked Execution (`creel`)
//!
//! Running `creel` with no arguments defaults to `creel list`.
//!
//! ## Adding and Editing
//!
//! `creel add` starts from the current date and time and the configured default
//! species and spot; every flag replaces one field. `creel edit <selector>` starts
//! from the stored catch instead, so only the flags given change anything.
//! Times are checked strictly (`HH:MM`) before anything is written.
//!
//! ## Locked Table
//!
//! When the table cannot be written (typically because it is open in a spreadsheet
//! program), the command prints a warning and the affected catch, and exits
//! successfully. Nothing was persisted; close the file and run the command again.
//!
//! ## Module Structure
//!
//! - `commands`: Entry point, logging setup and dispatch
//! - `handlers`: Per-command handlers that call the API and print output
//! - `render`: Output formatting (tables, messages, JSON)
//! - `setup`: Argument parsing via clap, help text
//! - `styles`: Terminal styling constants

mod commands;
mod handlers;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
