//! Application layer - Use cases over the domain
//!
//! - Services: the character store, dice rolling, themes and sheet export
//! - Ports: interfaces for randomness, persistence and rendering
//! - DTOs: serde shapes for the HTTP/WebSocket boundary and storage

pub mod dto;
pub mod ports;
pub mod services;
