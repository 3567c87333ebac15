//! The six core abilities and a total mapping over them

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name one of the six abilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ability: '{0}'")]
pub struct UnknownAbilityError(pub String);

/// One of the six core character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All abilities in sheet order
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Lowercase key used in the sheet JSON (e.g. "strength")
    pub fn key(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    /// Three-letter uppercase abbreviation (e.g. "STR")
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Short label shown next to skills (e.g. "Dex")
    pub fn short_name(&self) -> &'static str {
        match self {
            Ability::Strength => "Str",
            Ability::Dexterity => "Dex",
            Ability::Constitution => "Con",
            Ability::Intelligence => "Int",
            Ability::Wisdom => "Wis",
            Ability::Charisma => "Cha",
        }
    }

    fn index(self) -> usize {
        match self {
            Ability::Strength => 0,
            Ability::Dexterity => 1,
            Ability::Constitution => 2,
            Ability::Intelligence => 3,
            Ability::Wisdom => 4,
            Ability::Charisma => 5,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Ability {
    type Err = UnknownAbilityError;

    /// Accepts the key or the abbreviation, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Ability::ALL
            .into_iter()
            .find(|a| {
                a.key().eq_ignore_ascii_case(needle)
                    || a.abbreviation().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownAbilityError(s.to_string()))
    }
}

/// Exactly one value per ability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityMap<T>([T; 6]);

impl<T> AbilityMap<T> {
    pub fn from_fn(mut f: impl FnMut(Ability) -> T) -> Self {
        Self(Ability::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, &T)> {
        Ability::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Ability, &mut T)> {
        Ability::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Ability, &T) -> U) -> AbilityMap<U> {
        AbilityMap::from_fn(|ability| f(ability, &self[ability]))
    }
}

impl<T: Default> Default for AbilityMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Ability> for AbilityMap<T> {
    type Output = T;

    fn index(&self, ability: Ability) -> &T {
        &self.0[ability.index()]
    }
}

impl<T> IndexMut<Ability> for AbilityMap<T> {
    fn index_mut(&mut self, ability: Ability) -> &mut T {
        &mut self.0[ability.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_and_abbreviation() {
        assert_eq!("wisdom".parse::<Ability>(), Ok(Ability::Wisdom));
        assert_eq!("DEX".parse::<Ability>(), Ok(Ability::Dexterity));
        assert_eq!(" Charisma ".parse::<Ability>(), Ok(Ability::Charisma));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "luck".parse::<Ability>().unwrap_err();
        assert_eq!(err, UnknownAbilityError("luck".to_string()));
    }

    #[test]
    fn test_ability_map_indexing() {
        let mut map = AbilityMap::from_fn(|a| a.abbreviation().len() as i32);
        map[Ability::Wisdom] = 42;
        assert_eq!(map[Ability::Wisdom], 42);
        assert_eq!(map[Ability::Strength], 3);

        let order: Vec<Ability> = map.iter().map(|(a, _)| a).collect();
        assert_eq!(order, Ability::ALL.to_vec());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Ability::Constitution).unwrap();
        assert_eq!(json, "\"constitution\"");
    }
}
