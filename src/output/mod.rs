//! Output formatting for lookup reports.
//!
//! This module handles presenting results:
//! - [`messages`] - Localized message text
//! - [`terminal`] - Terminal output with colors
//! - [`json`] - JSON output

mod json;
mod messages;
mod terminal;

pub use json::render_json;
pub use messages::{Lang, Msg};
pub use terminal::{
    describe_error, format_field, format_network, please_wait, print_report, render_as_info,
    render_report,
};
