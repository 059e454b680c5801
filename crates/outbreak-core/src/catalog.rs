//! Evolution catalog item types.
//!
//! Each catalog kind has its own struct; [`CatalogItem`] is the tagged union
//! used wherever an item of any kind must be handled uniformly.

use serde::{Deserialize, Serialize};

/// A purchasable symptom with additive stat bonuses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    pub infectivity_bonus: f64,
    pub severity_bonus: f64,
    pub lethality_bonus: f64,
    pub unlocked: bool,
    /// Symptom ids that must be unlocked first.
    pub requires: Vec<String>,
}

/// Transmission vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionKind {
    Air,
    Water,
    Insect,
    Blood,
}

impl TransmissionKind {
    /// Flat infectivity bump granted with every tier.
    pub const fn infectivity_bump(self) -> f64 {
        match self {
            TransmissionKind::Air | TransmissionKind::Water => 3.0,
            TransmissionKind::Insect | TransmissionKind::Blood => 2.0,
        }
    }
}

/// One level of a transmission chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransmissionTier {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    pub kind: TransmissionKind,
    /// 1-based; level N requires level N-1 of the same kind.
    pub level: u32,
    pub unlocked: bool,
}

/// Environmental or pharmaceutical resistance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResistanceKind {
    Cold,
    Heat,
    Drug,
}

/// One level of a resistance chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResistanceAbility {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    pub kind: ResistanceKind,
    pub level: u32,
    pub unlocked: bool,
}

/// Grouping shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialCategory {
    Stealth,
    Mutation,
    Resilience,
    Spread,
    Lethal,
}

/// What a special ability does to the pathogen when bought.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    CureSlowdown(f64),
    VisibilityReduction(f64),
    Infectivity(f64),
    Severity(f64),
    Lethality(f64),
    /// Knocks cure progress back by this many points.
    CureSetback(f64),
    AllResistance(u32),
    DrugResistance(u32),
    Airborne(u32),
    Waterborne(u32),
    Insectborne(u32),
    BorderBypass(f64),
    AirportBypass(f64),
    SeaportBypass(f64),
    /// Lethality bump plus a fixed +5 severity.
    OrganFailure(f64),
    /// Lethality bump plus a fixed +10 severity.
    CytokineStorm(f64),
    MaxLethality,
}

/// A special ability, optionally repeatable with rising cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price of the next purchase.
    pub cost: u32,
    pub category: SpecialCategory,
    pub effect: SpecialEffect,
    /// Set once no further purchase is possible.
    pub unlocked: bool,
    pub repeatable: bool,
    pub times_purchased: u32,
    pub max_purchases: u32,
}

impl SpecialAbility {
    pub fn is_maxed(&self) -> bool {
        self.times_purchased >= self.max_purchases
    }
}

/// Any catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CatalogItem {
    Symptom(Symptom),
    Transmission(TransmissionTier),
    Resistance(ResistanceAbility),
    Special(SpecialAbility),
}

impl CatalogItem {
    pub fn id(&self) -> &str {
        match self {
            CatalogItem::Symptom(s) => &s.id,
            CatalogItem::Transmission(t) => &t.id,
            CatalogItem::Resistance(r) => &r.id,
            CatalogItem::Special(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogItem::Symptom(s) => &s.name,
            CatalogItem::Transmission(t) => &t.name,
            CatalogItem::Resistance(r) => &r.name,
            CatalogItem::Special(a) => &a.name,
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            CatalogItem::Symptom(s) => s.cost,
            CatalogItem::Transmission(t) => t.cost,
            CatalogItem::Resistance(r) => r.cost,
            CatalogItem::Special(a) => a.cost,
        }
    }

    /// True when the item can no longer be bought.
    pub fn is_unlocked(&self) -> bool {
        match self {
            CatalogItem::Symptom(s) => s.unlocked,
            CatalogItem::Transmission(t) => t.unlocked,
            CatalogItem::Resistance(r) => r.unlocked,
            CatalogItem::Special(a) => a.unlocked || a.is_maxed(),
        }
    }
}
