//! Domain services - Pure rule logic over domain entities

pub mod derivation;

pub use derivation::{
    ability_modifier, derive, derived, is_consistent, PASSIVE_PERCEPTION_BASE, PERCEPTION_SKILL,
};
