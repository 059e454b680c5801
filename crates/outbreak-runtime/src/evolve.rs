//! Evolution purchases.
//!
//! Every mutator validates against the [`UpgradeStore`] first and only then
//! touches it, so an `Err` leaves both the store and the state unchanged.

use outbreak_core::{
    GameState, Pathogen, ResistanceKind, SpecialEffect, Symptom, TransmissionKind, UpgradeStore,
};
use thiserror::Error;
use tracing::debug;

/// Upper bound for infectivity, severity and lethality.
pub const MAX_STAT: f64 = 100.0;
pub const MAX_RESISTANCE: u32 = 5;
pub const MAX_TRANSMISSION_LEVEL: u32 = 10;
pub const MAX_CURE_SLOWDOWN: f64 = 0.9;
pub const MAX_VISIBILITY_REDUCTION: f64 = 50.0;
pub const MAX_BYPASS: f64 = 0.5;
/// Price multiplier applied after each purchase of a repeatable ability.
pub const REPEAT_COST_FACTOR: f64 = 1.5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvolveError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("{0} already evolved")]
    AlreadyUnlocked(String),
    #[error("not enough DNA: need {needed}, have {available}")]
    InsufficientDna { needed: u32, available: u32 },
    #[error("{item} requires {missing}")]
    MissingPrerequisite { item: String, missing: String },
    #[error("{0} cannot be bought again")]
    MaxedOut(String),
}

fn check_funds(state: &GameState, cost: u32) -> Result<(), EvolveError> {
    if state.dna_points < cost {
        return Err(EvolveError::InsufficientDna {
            needed: cost,
            available: state.dna_points,
        });
    }
    Ok(())
}

fn add_stat(value: f64, bonus: f64) -> f64 {
    (value + bonus).min(MAX_STAT)
}

/// Buy a symptom: its bonuses are added to the pathogen and it joins the
/// symptom list.
pub fn evolve_symptom(
    state: &GameState,
    store: &mut UpgradeStore,
    id: &str,
) -> Result<GameState, EvolveError> {
    let symptom = store
        .symptoms()
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| EvolveError::UnknownItem(id.to_string()))?;
    if symptom.unlocked {
        return Err(EvolveError::AlreadyUnlocked(id.to_string()));
    }
    check_funds(state, symptom.cost)?;
    if let Some(missing) = store.missing_requirements(&symptom).into_iter().next() {
        return Err(EvolveError::MissingPrerequisite {
            item: id.to_string(),
            missing,
        });
    }

    if let Some(entry) = store.symptom_mut(id) {
        entry.unlocked = true;
    }
    let mut next = state.clone();
    next.dna_points -= symptom.cost;
    let p = &mut next.pathogen;
    p.infectivity = add_stat(p.infectivity, symptom.infectivity_bonus);
    p.severity = add_stat(p.severity, symptom.severity_bonus);
    p.lethality = add_stat(p.lethality, symptom.lethality_bonus);
    let cost = symptom.cost;
    p.symptoms.push(Symptom {
        unlocked: true,
        ..symptom
    });
    debug!(symptom = id, cost, "symptom evolved");
    Ok(next)
}

/// Buy a transmission level. Level N needs level N-1 of the same vector.
pub fn evolve_transmission(
    state: &GameState,
    store: &mut UpgradeStore,
    id: &str,
) -> Result<GameState, EvolveError> {
    let tier = store
        .transmissions()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| EvolveError::UnknownItem(id.to_string()))?;
    if tier.unlocked {
        return Err(EvolveError::AlreadyUnlocked(id.to_string()));
    }
    check_funds(state, tier.cost)?;
    if !store.transmission_chain_ok(&tier) {
        let missing = store
            .transmissions()
            .iter()
            .find(|t| t.kind == tier.kind && t.level + 1 == tier.level)
            .map(|t| t.id.clone())
            .unwrap_or_default();
        return Err(EvolveError::MissingPrerequisite {
            item: id.to_string(),
            missing,
        });
    }

    if let Some(entry) = store.transmission_mut(id) {
        entry.unlocked = true;
    }
    let mut next = state.clone();
    next.dna_points -= tier.cost;
    let p = &mut next.pathogen;
    match tier.kind {
        TransmissionKind::Air => p.airborne = tier.level,
        TransmissionKind::Water => p.waterborne = tier.level,
        TransmissionKind::Insect => p.insectborne = tier.level,
        TransmissionKind::Blood => p.bloodborne = tier.level,
    }
    p.infectivity = add_stat(p.infectivity, tier.kind.infectivity_bump());
    debug!(transmission = id, level = tier.level, "transmission evolved");
    Ok(next)
}

/// Buy a resistance level.
pub fn evolve_ability(
    state: &GameState,
    store: &mut UpgradeStore,
    id: &str,
) -> Result<GameState, EvolveError> {
    let ability = store
        .abilities()
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| EvolveError::UnknownItem(id.to_string()))?;
    if ability.unlocked {
        return Err(EvolveError::AlreadyUnlocked(id.to_string()));
    }
    check_funds(state, ability.cost)?;
    if !store.resistance_chain_ok(&ability) {
        let missing = store
            .abilities()
            .iter()
            .find(|a| a.kind == ability.kind && a.level + 1 == ability.level)
            .map(|a| a.id.clone())
            .unwrap_or_default();
        return Err(EvolveError::MissingPrerequisite {
            item: id.to_string(),
            missing,
        });
    }

    if let Some(entry) = store.ability_mut(id) {
        entry.unlocked = true;
    }
    let mut next = state.clone();
    next.dna_points -= ability.cost;
    let p = &mut next.pathogen;
    match ability.kind {
        ResistanceKind::Cold => p.cold_resistance = ability.level,
        ResistanceKind::Heat => p.heat_resistance = ability.level,
        ResistanceKind::Drug => p.drug_resistance = ability.level,
    }
    debug!(ability = id, level = ability.level, "resistance evolved");
    Ok(next)
}

fn apply_effect(effect: SpecialEffect, next: &mut GameState) {
    let p: &mut Pathogen = &mut next.pathogen;
    match effect {
        SpecialEffect::CureSlowdown(v) => {
            p.cure_slowdown = (p.cure_slowdown + v).min(MAX_CURE_SLOWDOWN)
        }
        SpecialEffect::VisibilityReduction(v) => {
            p.visibility_reduction = (p.visibility_reduction + v).min(MAX_VISIBILITY_REDUCTION)
        }
        SpecialEffect::Infectivity(v) => p.infectivity = add_stat(p.infectivity, v),
        SpecialEffect::Severity(v) => p.severity = add_stat(p.severity, v),
        SpecialEffect::Lethality(v) => p.lethality = add_stat(p.lethality, v),
        SpecialEffect::CureSetback(v) => next.cure_progress = (next.cure_progress - v).max(0.0),
        SpecialEffect::AllResistance(v) => {
            p.cold_resistance = (p.cold_resistance + v).min(MAX_RESISTANCE);
            p.heat_resistance = (p.heat_resistance + v).min(MAX_RESISTANCE);
            p.drug_resistance = (p.drug_resistance + v).min(MAX_RESISTANCE);
        }
        SpecialEffect::DrugResistance(v) => {
            p.drug_resistance = (p.drug_resistance + v).min(MAX_RESISTANCE)
        }
        SpecialEffect::Airborne(v) => p.airborne = (p.airborne + v).min(MAX_TRANSMISSION_LEVEL),
        SpecialEffect::Waterborne(v) => {
            p.waterborne = (p.waterborne + v).min(MAX_TRANSMISSION_LEVEL)
        }
        SpecialEffect::Insectborne(v) => {
            p.insectborne = (p.insectborne + v).min(MAX_TRANSMISSION_LEVEL)
        }
        SpecialEffect::BorderBypass(v) => p.border_bypass = (p.border_bypass + v).min(MAX_BYPASS),
        SpecialEffect::AirportBypass(v) => {
            p.airport_bypass = (p.airport_bypass + v).min(MAX_BYPASS)
        }
        SpecialEffect::SeaportBypass(v) => {
            p.seaport_bypass = (p.seaport_bypass + v).min(MAX_BYPASS)
        }
        SpecialEffect::OrganFailure(v) => {
            p.lethality = add_stat(p.lethality, v);
            p.severity = add_stat(p.severity, 5.0);
        }
        SpecialEffect::CytokineStorm(v) => {
            p.lethality = add_stat(p.lethality, v);
            p.severity = add_stat(p.severity, 10.0);
        }
        SpecialEffect::MaxLethality => p.lethality = MAX_STAT,
    }
}

/// Buy a special ability.
///
/// DNA is charged at the current price; a repeatable ability then gets
/// `floor(cost * 1.5)` as its next price. The ability locks once it is
/// non-repeatable or has hit its purchase cap.
pub fn evolve_special_ability(
    state: &GameState,
    store: &mut UpgradeStore,
    id: &str,
) -> Result<GameState, EvolveError> {
    let ability = store
        .special_abilities()
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| EvolveError::UnknownItem(id.to_string()))?;
    if ability.unlocked {
        return Err(EvolveError::AlreadyUnlocked(id.to_string()));
    }
    if ability.is_maxed() {
        return Err(EvolveError::MaxedOut(id.to_string()));
    }
    check_funds(state, ability.cost)?;

    let mut next = state.clone();
    next.dna_points -= ability.cost;
    apply_effect(ability.effect, &mut next);

    if let Some(entry) = store.special_mut(id) {
        entry.times_purchased += 1;
        if !entry.repeatable || entry.is_maxed() {
            entry.unlocked = true;
        }
        if entry.repeatable {
            entry.cost = (f64::from(entry.cost) * REPEAT_COST_FACTOR).floor() as u32;
        }
        debug!(
            ability = id,
            purchases = entry.times_purchased,
            next_cost = entry.cost,
            "special ability evolved"
        );
    }
    Ok(next)
}
