//! Domain layer - Core rules with no I/O
//!
//! This layer contains:
//! - Entities: the character sheet aggregate
//! - Value Objects: abilities, themes, dice results, identifiers, settings
//! - Domain Events: store state changes
//! - Domain Services: the derived-statistics engine

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;
