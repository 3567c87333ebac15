//! Document renderer port - turns a laid-out sheet into bytes

use crate::application::dto::SheetDocument;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Output format backed by a renderer
pub trait DocumentRendererPort: Send + Sync {
    /// File extension without the dot (e.g. "txt")
    fn extension(&self) -> &'static str;

    /// MIME type for HTTP responses
    fn content_type(&self) -> &'static str;

    fn render(&self, document: &SheetDocument) -> Result<Vec<u8>, RenderError>;
}
