//! Outbound ports - Interfaces that the application requires from external systems

mod document_renderer_port;
mod random_port;
mod session_repository_port;

pub use document_renderer_port::{DocumentRendererPort, RenderError};
pub use random_port::RandomPort;
#[cfg(test)]
pub use random_port::{FixedRandomPort, MockRandomPort};
pub use session_repository_port::{RepositoryError, SessionRepositoryPort, StoredSession};
