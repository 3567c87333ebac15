//! Sheet export renderers
//!
//! - [`TextRenderer`]: printable plain text, one form-fed block per page
//! - [`JsonRenderer`]: the layout model itself, for clients that draw PDFs

mod json_renderer;
mod text_renderer;

pub use json_renderer::JsonRenderer;
pub use text_renderer::TextRenderer;
