//! Damage types and specifiers

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Damage type keys understood by the host's damage system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Blunt,
    Piercing,
    /// Negative damage. Restores health instead of removing it.
    Healing,
}

impl DamageType {
    /// Stable string key for this damage type
    pub fn key(&self) -> &'static str {
        match self {
            DamageType::Blunt => "Blunt",
            DamageType::Piercing => "Piercing",
            DamageType::Healing => "Healing",
        }
    }

    pub fn is_healing(&self) -> bool {
        matches!(self, DamageType::Healing)
    }
}

/// A bundle of typed amounts applied to one target in one go
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageSpecifier {
    pub amounts: SmallVec<[(DamageType, f32); 2]>,
}

impl DamageSpecifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount of the given type, merging with an existing entry
    pub fn with(mut self, damage_type: DamageType, amount: f32) -> Self {
        match self.amounts.iter_mut().find(|(t, _)| *t == damage_type) {
            Some((_, existing)) => *existing += amount,
            None => self.amounts.push((damage_type, amount)),
        }
        self
    }

    pub fn get(&self, damage_type: DamageType) -> f32 {
        self.amounts
            .iter()
            .filter(|(t, _)| *t == damage_type)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Sum of all non-healing amounts
    pub fn total_damage(&self) -> f32 {
        self.amounts
            .iter()
            .filter(|(t, _)| !t.is_healing())
            .map(|(_, amount)| *amount)
            .sum()
    }

    pub fn total_healing(&self) -> f32 {
        self.get(DamageType::Healing)
    }

    /// "20 Blunt, 15 Piercing"
    pub fn describe(&self) -> String {
        self.amounts
            .iter()
            .map(|(t, amount)| format!("{:.0} {}", amount, t.key()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
