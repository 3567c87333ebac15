use crate::application::dto::SheetDocument;
use crate::application::ports::outbound::{DocumentRendererPort, RenderError};

/// Serializes the laid-out document for clients that draw it themselves
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl DocumentRendererPort for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, document: &SheetDocument) -> Result<Vec<u8>, RenderError> {
        serde_json::to_vec_pretty(document).map_err(|e| RenderError::Serialization(e.to_string()))
    }
}
