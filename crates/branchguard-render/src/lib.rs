//! Rendering for the audit report: an append-only document, its page layout, and writers.

#![forbid(unsafe_code)]

mod error;
mod layout;
mod markdown;
mod model;
mod pdf;

pub use error::RenderError;
pub use layout::{layout, wrap_line, LineKind, Page, PageSetup, PlacedLine};
pub use markdown::render_markdown;
pub use model::{Block, Document};
pub use pdf::render_pdf;
