//! # civic-report
//!
//! Exports of a Civic Architect analysis:
//! - a standalone HTML document (inline styles, embedded image, print CSS)
//! - the pretty-printed JSON record, which reads back to an equal value
//!
//! Also carries the static About content shown by front ends.

pub mod about;
pub mod html;
pub mod json;

mod error;

pub use error::ReportError;
pub use html::{render_html, report_filename, write_html};
pub use json::{from_json, read_json, to_json, write_json};
