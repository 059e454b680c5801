//! Per-session registry of catalog unlock state.

use crate::catalog::{CatalogItem, ResistanceAbility, SpecialAbility, Symptom, TransmissionTier};
use crate::data;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Purchase status of a catalog item for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Already evolved (or purchase cap reached).
    Evolved,
    Affordable,
    TooExpensive,
    /// Prerequisite or previous level missing.
    Locked,
    Unknown,
}

/// Current unlock state of the four evolution catalogs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeStore {
    symptoms: Vec<Symptom>,
    transmissions: Vec<TransmissionTier>,
    abilities: Vec<ResistanceAbility>,
    special_abilities: Vec<SpecialAbility>,
}

impl Default for UpgradeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeStore {
    /// Fresh catalogs with nothing unlocked.
    pub fn new() -> Self {
        Self {
            symptoms: data::symptoms(),
            transmissions: data::transmissions(),
            abilities: data::resistances(),
            special_abilities: data::special_abilities(),
        }
    }

    /// Restore every catalog to its seed state.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!(
            symptoms = self.symptoms.len(),
            transmissions = self.transmissions.len(),
            abilities = self.abilities.len(),
            specials = self.special_abilities.len(),
            "upgrade catalogs reset"
        );
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn transmissions(&self) -> &[TransmissionTier] {
        &self.transmissions
    }

    pub fn abilities(&self) -> &[ResistanceAbility] {
        &self.abilities
    }

    pub fn special_abilities(&self) -> &[SpecialAbility] {
        &self.special_abilities
    }

    pub fn symptom_mut(&mut self, id: &str) -> Option<&mut Symptom> {
        self.symptoms.iter_mut().find(|s| s.id == id)
    }

    pub fn transmission_mut(&mut self, id: &str) -> Option<&mut TransmissionTier> {
        self.transmissions.iter_mut().find(|t| t.id == id)
    }

    pub fn ability_mut(&mut self, id: &str) -> Option<&mut ResistanceAbility> {
        self.abilities.iter_mut().find(|a| a.id == id)
    }

    pub fn special_mut(&mut self, id: &str) -> Option<&mut SpecialAbility> {
        self.special_abilities.iter_mut().find(|a| a.id == id)
    }

    /// Look an item up across all catalogs.
    pub fn find(&self, id: &str) -> Option<CatalogItem> {
        if let Some(s) = self.symptoms.iter().find(|s| s.id == id) {
            return Some(CatalogItem::Symptom(s.clone()));
        }
        if let Some(t) = self.transmissions.iter().find(|t| t.id == id) {
            return Some(CatalogItem::Transmission(t.clone()));
        }
        if let Some(a) = self.abilities.iter().find(|a| a.id == id) {
            return Some(CatalogItem::Resistance(a.clone()));
        }
        self.special_abilities
            .iter()
            .find(|a| a.id == id)
            .map(|a| CatalogItem::Special(a.clone()))
    }

    /// Missing symptom prerequisites, in declaration order.
    pub fn missing_requirements(&self, symptom: &Symptom) -> Vec<String> {
        symptom
            .requires
            .iter()
            .filter(|r| !self.symptoms.iter().any(|s| &s.id == *r && s.unlocked))
            .cloned()
            .collect()
    }

    /// True when the previous transmission level of the same kind is unlocked.
    pub fn transmission_chain_ok(&self, tier: &TransmissionTier) -> bool {
        tier.level <= 1
            || self
                .transmissions
                .iter()
                .any(|t| t.kind == tier.kind && t.level == tier.level - 1 && t.unlocked)
    }

    pub fn resistance_chain_ok(&self, ability: &ResistanceAbility) -> bool {
        ability.level <= 1
            || self
                .abilities
                .iter()
                .any(|a| a.kind == ability.kind && a.level == ability.level - 1 && a.unlocked)
    }

    /// Whether `id` could be bought with `dna` points right now.
    pub fn availability(&self, id: &str, dna: u32) -> Availability {
        let Some(item) = self.find(id) else {
            return Availability::Unknown;
        };
        if item.is_unlocked() {
            return Availability::Evolved;
        }
        let chain_ok = match &item {
            CatalogItem::Symptom(s) => self.missing_requirements(s).is_empty(),
            CatalogItem::Transmission(t) => self.transmission_chain_ok(t),
            CatalogItem::Resistance(a) => self.resistance_chain_ok(a),
            CatalogItem::Special(_) => true,
        };
        if !chain_ok {
            Availability::Locked
        } else if dna < item.cost() {
            Availability::TooExpensive
        } else {
            Availability::Affordable
        }
    }
}
