#![deny(warnings)]

//! Core domain models and invariants for the outbreak simulation.
//!
//! This crate defines the serializable state shared by every other crate:
//! countries, the pathogen, the aggregated [`GameState`], transit and news
//! records, the difficulty table, and validation helpers that check the
//! population and clamping invariants after every state transition.

pub mod catalog;
pub mod data;
pub mod random;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use catalog::{
    CatalogItem, ResistanceAbility, ResistanceKind, SpecialAbility, SpecialCategory,
    SpecialEffect, Symptom, TransmissionKind, TransmissionTier,
};
pub use random::{FixedSource, RandomSource, ScriptedSource};
pub use store::{Availability, UpgradeStore};

/// Name given to a pathogen when the player leaves it blank.
pub const DEFAULT_PATHOGEN_NAME: &str = "Unknown Pathogen";
/// Transit events older than this many days are evicted.
pub const TRANSIT_WINDOW_DAYS: u32 = 20;
/// Maximum retained transit events.
pub const MAX_TRANSITS: usize = 50;
/// Maximum retained news items.
pub const MAX_NEWS: usize = 50;

/// Unique identifier for a country, e.g. "usa", "china".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryId(pub String);

impl CountryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Climate class; cold and hot climates dampen spread unless resisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Climate {
    Hot,
    Cold,
    Temperate,
}

/// Wealth class; drives healthcare quality and cure research capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wealth {
    Rich,
    Average,
    Poor,
}

/// Population density class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Urban,
    Rural,
    Mixed,
}

/// A country and its outbreak state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    /// Display name, e.g. "United States".
    pub name: String,
    /// Fixed at creation.
    pub population: u64,
    pub healthy: u64,
    pub infected: u64,
    pub dead: u64,
    pub climate: Climate,
    pub wealth: Wealth,
    pub density: Density,
    /// Countries sharing a land border (symmetric).
    pub borders: Vec<CountryId>,
    pub has_airport: bool,
    pub has_seaport: bool,
    /// Land borders open. Only ever transitions open -> closed.
    pub borders_open: bool,
    pub airport_open: bool,
    pub seaport_open: bool,
    /// Public/government recognition of the outbreak in [0, 100].
    pub awareness: f64,
    /// Per-tick contribution to global cure research.
    pub cure_contribution: f64,
}

impl Country {
    /// A fresh, uninfected country with every route open.
    pub fn new(
        id: &str,
        name: &str,
        population: u64,
        climate: Climate,
        wealth: Wealth,
        density: Density,
    ) -> Self {
        Self {
            id: CountryId::new(id),
            name: name.to_string(),
            population,
            healthy: population,
            infected: 0,
            dead: 0,
            climate,
            wealth,
            density,
            borders: Vec::new(),
            has_airport: true,
            has_seaport: true,
            borders_open: true,
            airport_open: true,
            seaport_open: true,
            awareness: 0.0,
            cure_contribution: 0.0,
        }
    }

    pub fn borders_with(&self, other: &CountryId) -> bool {
        self.borders.contains(other)
    }

    pub fn infected_ratio(&self) -> f64 {
        ratio(self.infected, self.population)
    }

    pub fn dead_ratio(&self) -> f64 {
        ratio(self.dead, self.population)
    }
}

/// `part / whole`, or zero for an empty whole.
pub fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// The player's pathogen and its evolved trait vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pathogen {
    pub name: String,
    /// How easily it spreads, [0, 100].
    pub infectivity: f64,
    /// How sick people get, [0, 100].
    pub severity: f64,
    /// How deadly it is, [0, 100].
    pub lethality: f64,
    pub airborne: u32,
    pub waterborne: u32,
    pub insectborne: u32,
    pub bloodborne: u32,
    pub cold_resistance: u32,
    pub heat_resistance: u32,
    pub drug_resistance: u32,
    /// Unlocked symptoms in purchase order.
    pub symptoms: Vec<Symptom>,
    /// Fractional reduction of cure speed, [0, 0.9].
    pub cure_slowdown: f64,
    /// Flat reduction of global visibility.
    pub visibility_reduction: f64,
    /// Probability of crossing a closed land border.
    pub border_bypass: f64,
    pub airport_bypass: f64,
    pub seaport_bypass: f64,
}

impl Default for Pathogen {
    fn default() -> Self {
        Self {
            name: DEFAULT_PATHOGEN_NAME.to_string(),
            infectivity: 5.0,
            severity: 1.0,
            lethality: 0.0,
            airborne: 0,
            waterborne: 0,
            insectborne: 0,
            bloodborne: 0,
            cold_resistance: 0,
            heat_resistance: 0,
            drug_resistance: 0,
            symptoms: Vec::new(),
            cure_slowdown: 0.0,
            visibility_reduction: 0.0,
            border_bypass: 0.0,
            airport_bypass: 0.0,
            seaport_bypass: 0.0,
        }
    }
}

/// Difficulty preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Tuning knobs selected by [`Difficulty`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub cure_speed_multiplier: f64,
    pub awareness_multiplier: f64,
    pub starting_dna: u32,
    pub dna_gain_multiplier: f64,
    /// Scales every closure roll.
    pub border_close_chance: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub const fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                cure_speed_multiplier: 0.3,
                awareness_multiplier: 0.5,
                starting_dna: 15,
                dna_gain_multiplier: 1.5,
                border_close_chance: 0.5,
            },
            Difficulty::Normal => DifficultySettings {
                cure_speed_multiplier: 0.6,
                awareness_multiplier: 0.8,
                starting_dna: 10,
                dna_gain_multiplier: 1.0,
                border_close_chance: 0.8,
            },
            Difficulty::Hard => DifficultySettings {
                cure_speed_multiplier: 1.0,
                awareness_multiplier: 1.2,
                starting_dna: 5,
                dna_gain_multiplier: 0.7,
                border_close_chance: 1.2,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        })
    }
}

/// Unrecognized difficulty name.
#[derive(Debug, Error, PartialEq)]
#[error("unknown difficulty: {0} (expected easy, normal or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Route a cross-border transmission travelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitMode {
    Land,
    Air,
    Sea,
}

/// One successful cross-border transmission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitEvent {
    pub id: String,
    pub from: CountryId,
    pub to: CountryId,
    pub mode: TransitMode,
    pub day: u32,
    /// Infected count seeded in the destination.
    pub infected: u64,
}

/// Headline category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    FirstCase,
    SpreadToCountry,
    DeathsStart,
    MassDeaths,
    CountryDevastated,
    BorderClosed,
    AirportClosed,
    SeaportClosed,
    Awareness,
    CureStarted,
    CureProgress,
    SymptomNoticed,
    General,
}

impl NewsCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            NewsCategory::FirstCase => "first_case",
            NewsCategory::SpreadToCountry => "spread_to_country",
            NewsCategory::DeathsStart => "deaths_start",
            NewsCategory::MassDeaths => "mass_deaths",
            NewsCategory::CountryDevastated => "country_devastated",
            NewsCategory::BorderClosed => "border_closed",
            NewsCategory::AirportClosed => "airport_closed",
            NewsCategory::SeaportClosed => "seaport_closed",
            NewsCategory::Awareness => "awareness",
            NewsCategory::CureStarted => "cure_started",
            NewsCategory::CureProgress => "cure_progress",
            NewsCategory::SymptomNoticed => "symptom_noticed",
            NewsCategory::General => "general",
        }
    }
}

/// A rendered headline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub day: u32,
    pub category: NewsCategory,
    pub headline: String,
    /// Higher is more important.
    pub priority: u8,
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
    /// Ticks per second multiplier, 1..=3.
    pub game_speed: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            game_speed: 1,
        }
    }
}

/// Aggregated state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub pathogen: Pathogen,
    pub countries: Vec<Country>,
    pub dna_points: u32,
    pub day: u32,
    /// 1..=3.
    pub game_speed: u8,
    pub paused: bool,
    /// [0, 100].
    pub cure_progress: f64,
    pub total_infected: u64,
    pub total_dead: u64,
    pub total_population: u64,
    pub game_over: bool,
    /// Meaningful once `game_over`: true when the living were eradicated.
    pub victory: bool,
    pub starting_country: Option<CountryId>,
    pub game_started: bool,
    pub difficulty: Difficulty,
    /// [0, 100].
    pub visibility: f64,
    pub recent_transits: Vec<TransitEvent>,
    pub news: Vec<NewsItem>,
}

impl GameState {
    pub fn country(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id.as_str() == id)
    }

    pub fn total_healthy(&self) -> u64 {
        self.countries.iter().map(|c| c.healthy).sum()
    }

    pub fn settings(&self) -> DifficultySettings {
        self.difficulty.settings()
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// healthy + infected + dead differs from the fixed population.
    #[error("country {0}: population buckets do not sum to population")]
    PopulationMismatch(String),
    /// Global totals disagree with the per-country buckets.
    #[error("global totals do not match country buckets")]
    TotalsMismatch,
    /// A bounded metric left its range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Numeric field must be finite.
    #[error("non-finite numeric value in {0}")]
    NonFinite(&'static str),
    /// Two countries share an id.
    #[error("duplicate country id: {0}")]
    DuplicateCountry(String),
    /// A border references a missing country or is not reciprocated.
    #[error("border {0} -> {1} is not symmetric")]
    AsymmetricBorder(String, String),
    /// Speed outside 1..=3.
    #[error("game speed {0} is out of range [1, 3]")]
    InvalidSpeed(u8),
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate a single country's buckets and bounded metrics.
pub fn validate_country(c: &Country) -> Result<(), ValidationError> {
    let sum = c
        .healthy
        .checked_add(c.infected)
        .and_then(|s| s.checked_add(c.dead));
    if sum != Some(c.population) {
        return Err(ValidationError::PopulationMismatch(c.id.0.clone()));
    }
    check_range("awareness", c.awareness, 0.0, 100.0)?;
    if !c.cure_contribution.is_finite() || c.cure_contribution < 0.0 {
        return Err(ValidationError::NonFinite("cure_contribution"));
    }
    Ok(())
}

/// Validate the pathogen's clamped stats.
pub fn validate_pathogen(p: &Pathogen) -> Result<(), ValidationError> {
    check_range("infectivity", p.infectivity, 0.0, 100.0)?;
    check_range("severity", p.severity, 0.0, 100.0)?;
    check_range("lethality", p.lethality, 0.0, 100.0)?;
    check_range("cure_slowdown", p.cure_slowdown, 0.0, 0.9)?;
    check_range("border_bypass", p.border_bypass, 0.0, 0.5)?;
    check_range("airport_bypass", p.airport_bypass, 0.0, 0.5)?;
    check_range("seaport_bypass", p.seaport_bypass, 0.0, 0.5)?;
    Ok(())
}

/// Validate the whole state, including the border graph and global totals.
pub fn validate_state(state: &GameState) -> Result<(), ValidationError> {
    validate_pathogen(&state.pathogen)?;
    check_range("cure_progress", state.cure_progress, 0.0, 100.0)?;
    check_range("visibility", state.visibility, 0.0, 100.0)?;
    if !(1..=3).contains(&state.game_speed) {
        return Err(ValidationError::InvalidSpeed(state.game_speed));
    }

    let mut ids: BTreeSet<&CountryId> = BTreeSet::new();
    for c in &state.countries {
        validate_country(c)?;
        if !ids.insert(&c.id) {
            return Err(ValidationError::DuplicateCountry(c.id.0.clone()));
        }
    }
    for c in &state.countries {
        for b in &c.borders {
            let reciprocated = state
                .countries
                .iter()
                .find(|o| &o.id == b)
                .is_some_and(|o| o.borders_with(&c.id));
            if !reciprocated {
                return Err(ValidationError::AsymmetricBorder(c.id.0.clone(), b.0.clone()));
            }
        }
    }

    let infected: u64 = state.countries.iter().map(|c| c.infected).sum();
    let dead: u64 = state.countries.iter().map(|c| c.dead).sum();
    if infected != state.total_infected
        || dead != state.total_dead
        || infected + dead + state.total_healthy() != state.total_population
    {
        return Err(ValidationError::TotalsMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_state() -> GameState {
        let mut a = Country::new("a", "Alpha", 1_000, Climate::Hot, Wealth::Poor, Density::Urban);
        let mut b = Country::new("b", "Beta", 500, Climate::Cold, Wealth::Rich, Density::Rural);
        a.borders.push(b.id.clone());
        b.borders.push(a.id.clone());
        GameState {
            pathogen: Pathogen::default(),
            countries: vec![a, b],
            dna_points: 0,
            day: 0,
            game_speed: 1,
            paused: true,
            cure_progress: 0.0,
            total_infected: 0,
            total_dead: 0,
            total_population: 1_500,
            game_over: false,
            victory: false,
            starting_country: None,
            game_started: false,
            difficulty: Difficulty::Normal,
            visibility: 0.0,
            recent_transits: Vec::new(),
            news: Vec::new(),
        }
    }

    #[test]
    fn fresh_state_is_valid() {
        validate_state(&small_state()).unwrap();
    }

    #[test]
    fn bucket_mismatch_is_reported() {
        let mut s = small_state();
        s.countries[0].infected = 10;
        assert_eq!(
            validate_state(&s),
            Err(ValidationError::PopulationMismatch("a".to_string()))
        );
    }

    #[test]
    fn stale_totals_are_reported() {
        let mut s = small_state();
        s.countries[0].healthy -= 10;
        s.countries[0].infected += 10;
        assert_eq!(validate_state(&s), Err(ValidationError::TotalsMismatch));
        s.total_infected = 10;
        validate_state(&s).unwrap();
    }

    #[test]
    fn one_sided_border_is_rejected() {
        let mut s = small_state();
        s.countries[1].borders.clear();
        assert!(matches!(
            validate_state(&s),
            Err(ValidationError::AsymmetricBorder(_, _))
        ));
    }

    #[test]
    fn cure_progress_must_be_clamped() {
        let mut s = small_state();
        s.cure_progress = 100.5;
        assert!(matches!(
            validate_state(&s),
            Err(ValidationError::OutOfRange { field: "cure_progress", .. })
        ));
    }

    #[test]
    fn difficulty_table_matches_presets() {
        let normal = Difficulty::Normal.settings();
        assert_eq!(normal.starting_dna, 10);
        assert_eq!(normal.cure_speed_multiplier, 0.6);
        assert_eq!(Difficulty::Easy.settings().starting_dna, 15);
        assert_eq!(Difficulty::Hard.settings().border_close_chance, 1.2);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn state_serde_roundtrip() {
        let s = small_state();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"difficulty\":\"normal\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    proptest! {
        #[test]
        fn ratio_is_a_fraction(part in 0u64..1_000_000, extra in 0u64..1_000_000) {
            let r = ratio(part, part + extra);
            prop_assert!((0.0..=1.0).contains(&r));
        }

        #[test]
        fn moving_people_between_buckets_keeps_state_valid(n in 0u64..=1_000, d in 0u64..=1_000) {
            let mut s = small_state();
            let moved = n.min(1_000);
            let died = d.min(moved);
            let c = &mut s.countries[0];
            c.healthy -= moved;
            c.infected += moved - died;
            c.dead += died;
            s.total_infected = moved - died;
            s.total_dead = died;
            prop_assert!(validate_state(&s).is_ok());
        }
    }
}
