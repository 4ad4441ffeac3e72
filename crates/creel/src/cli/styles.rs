//! Terminal styles for the creel CLI.
//!
//! Code refers to styles by what the text *is* (a position, a warning, a muted
//! detail), never by color. `console` drops the escape codes when stdout is not a
//! terminal, so piped output stays plain.

use console::Style;
use once_cell::sync::Lazy;

pub static POSITION: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold().underlined());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red().bold());
