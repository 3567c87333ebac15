//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - State: Shared application state
//! - HTTP: REST API routes
//! - WebSocket: Live session updates for sheet clients
//! - Persistence: In-memory and SQLite session storage
//! - Export: Text and JSON sheet renderers
//! - Workers: Background persistence of store events

pub mod config;
pub mod export;
pub mod http;
pub mod persistence;
pub mod random_adapter;
pub mod state;
pub mod websocket;
pub mod workers;
