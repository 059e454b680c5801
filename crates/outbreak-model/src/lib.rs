#![deny(warnings)]

//! Epidemiology and policy-response formulas for the outbreak simulation.
//!
//! Everything here is a pure function of country and pathogen state; the few
//! helpers that roll dice take an explicit [`RandomSource`]. This crate
//! provides:
//! - Intra-country spread and death rates
//! - Cross-border route eligibility and transmission chance
//! - Global visibility, awareness growth and closure rolls
//! - Cure contribution, cure speed and DNA income

use outbreak_core::{
    ratio, Climate, Country, Density, DifficultySettings, Pathogen, RandomSource, TransitMode,
    Wealth,
};
use serde::{Deserialize, Serialize};

/// Lower bound of the daily intra-country spread rate.
pub const MIN_SPREAD_RATE: f64 = 0.001;
/// Upper bound of the daily intra-country spread rate.
pub const MAX_SPREAD_RATE: f64 = 0.5;
/// Upper bound of the daily death rate.
pub const MAX_DEATH_RATE: f64 = 0.1;
/// Fraction of the summed cure speed added to progress each tick.
pub const CURE_PROGRESS_RATE: f64 = 0.08;
/// Share of population infected at game start.
pub const INITIAL_INFECTED_FRACTION: f64 = 1e-6;

/// Daily infection rate inside `country`.
///
/// Starts at `infectivity / 100` and is scaled by climate (unless resisted),
/// wealth, density and local awareness. Clamped to
/// [`MIN_SPREAD_RATE`, `MAX_SPREAD_RATE`].
pub fn spread_rate(country: &Country, pathogen: &Pathogen) -> f64 {
    let mut rate = pathogen.infectivity / 100.0;
    match country.climate {
        Climate::Cold => rate *= 0.5 + pathogen.cold_resistance as f64 * 0.2,
        Climate::Hot => rate *= 0.5 + pathogen.heat_resistance as f64 * 0.2,
        Climate::Temperate => {}
    }
    match country.wealth {
        Wealth::Rich => rate *= 0.7 - pathogen.drug_resistance as f64 * 0.1,
        Wealth::Poor => rate *= 1.3,
        Wealth::Average => {}
    }
    match country.density {
        Density::Urban => rate *= 1.4,
        Density::Rural => rate *= 0.7,
        Density::Mixed => {}
    }
    rate *= 1.0 - country.awareness / 200.0;
    rate.clamp(MIN_SPREAD_RATE, MAX_SPREAD_RATE)
}

/// Daily death rate among the infected in `country`, in `[0, MAX_DEATH_RATE]`.
pub fn death_rate(country: &Country, pathogen: &Pathogen) -> f64 {
    let mut rate = pathogen.lethality / 1000.0;
    match country.wealth {
        Wealth::Rich => rate *= 0.5 - pathogen.drug_resistance as f64 * 0.05,
        Wealth::Poor => rate *= 1.5,
        Wealth::Average => {}
    }
    rate.clamp(0.0, MAX_DEATH_RATE)
}

fn shares_airports(from: &Country, to: &Country) -> bool {
    from.has_airport && to.has_airport
}

fn shares_seaports(from: &Country, to: &Country) -> bool {
    from.has_seaport && to.has_seaport
}

fn airports_open(from: &Country, to: &Country) -> bool {
    shares_airports(from, to) && from.airport_open && to.airport_open
}

fn seaports_open(from: &Country, to: &Country) -> bool {
    shares_seaports(from, to) && from.seaport_open && to.seaport_open
}

fn bypass(probability: f64, rng: &mut dyn RandomSource) -> bool {
    probability > 0.0 && rng.next_f64() < probability
}

/// First usable route from `from` to `to`, checked land, then air, then sea.
///
/// A closed route can still be used when the matching bypass roll succeeds.
/// Rolls are only drawn for routes that physically exist and are closed.
pub fn route(
    from: &Country,
    to: &Country,
    pathogen: &Pathogen,
    rng: &mut dyn RandomSource,
) -> Option<TransitMode> {
    if from.borders_with(&to.id)
        && (from.borders_open || to.borders_open || bypass(pathogen.border_bypass, rng))
    {
        return Some(TransitMode::Land);
    }
    if shares_airports(from, to)
        && (airports_open(from, to) || bypass(pathogen.airport_bypass, rng))
    {
        return Some(TransitMode::Air);
    }
    if shares_seaports(from, to)
        && (seaports_open(from, to) || bypass(pathogen.seaport_bypass, rng))
    {
        return Some(TransitMode::Sea);
    }
    None
}

/// True when infection can reach `to` from `from` this tick.
pub fn can_spread_to(
    from: &Country,
    to: &Country,
    pathogen: &Pathogen,
    rng: &mut dyn RandomSource,
) -> bool {
    to.infected > 0 || route(from, to, pathogen, rng).is_some()
}

/// Probability that `from` seeds `to` this tick, assuming a route exists.
pub fn spread_chance(from: &Country, to: &Country, pathogen: &Pathogen) -> f64 {
    let mut chance = from.infected_ratio() * 0.5;
    if from.borders_with(&to.id) {
        chance *= 2.0;
        if from.borders_open && to.borders_open {
            chance *= 1.5;
        }
    }
    if airports_open(from, to) {
        chance *= 1.0 + pathogen.airborne as f64 * 0.3;
    }
    if seaports_open(from, to) {
        chance *= 1.0 + pathogen.waterborne as f64 * 0.3;
    }
    if pathogen.insectborne > 0 && (from.climate == Climate::Hot || to.climate == Climate::Hot) {
        chance *= 1.0 + pathogen.insectborne as f64 * 0.2;
    }
    chance * (1.0 + pathogen.infectivity * 0.02)
}

/// Infected count carried into a newly reached country: 1 to 9.
pub fn seed_count(rng: &mut dyn RandomSource) -> u64 {
    ((rng.next_f64() * 10.0).floor() as u64).clamp(1, 9)
}

/// Infected count for the starting country.
pub fn initial_infected(population: u64) -> u64 {
    ((population as f64 * INITIAL_INFECTED_FRACTION).floor() as u64).max(1)
}

/// How noticeable the pathogen is worldwide, in `[0, 100]`.
pub fn visibility(pathogen: &Pathogen, infected: u64, dead: u64, population: u64) -> f64 {
    let symptoms: f64 = pathogen
        .symptoms
        .iter()
        .map(|s| s.severity_bonus * 0.3 + s.lethality_bonus * 0.5)
        .sum();
    let v = pathogen.severity * 0.5
        + pathogen.lethality * 0.8
        + symptoms
        + ratio(infected, population) * 100.0
        + ratio(dead, population) * 200.0
        - pathogen.visibility_reduction;
    v.clamp(0.0, 100.0)
}

/// World-wide infection and death ratios for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalRatios {
    pub infected: f64,
    pub dead: f64,
}

impl GlobalRatios {
    pub fn new(infected: u64, dead: u64, population: u64) -> Self {
        Self {
            infected: ratio(infected, population),
            dead: ratio(dead, population),
        }
    }
}

/// Awareness added to `country` this tick (before clamping at 100).
pub fn awareness_gain(
    country: &Country,
    global: GlobalRatios,
    visibility: f64,
    awareness_multiplier: f64,
) -> f64 {
    let local = country.infected_ratio();
    let mut gain = 0.0;
    if local > 0.001 {
        gain += 0.3;
    }
    if local > 0.01 {
        gain += 0.5;
    }
    if local > 0.1 {
        gain += 1.0;
    }
    if global.infected > 0.01 {
        gain += 0.2;
    }
    if global.dead > 0.001 {
        gain += 0.5;
    }
    gain * (1.0 + visibility / 100.0) * awareness_multiplier
}

/// A one-way policy closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Closure {
    Borders,
    Airport,
    Seaport,
}

impl Closure {
    pub const ALL: [Closure; 3] = [Closure::Borders, Closure::Airport, Closure::Seaport];

    /// Awareness that must be exceeded before the closure is considered.
    pub const fn threshold(self) -> f64 {
        match self {
            Closure::Borders => 40.0,
            Closure::Airport => 60.0,
            Closure::Seaport => 80.0,
        }
    }

    /// Per-tick closure probability before the difficulty multiplier.
    pub const fn base_chance(self) -> f64 {
        match self {
            Closure::Borders => 0.015,
            Closure::Airport => 0.02,
            Closure::Seaport => 0.015,
        }
    }

    /// Whether the country still has this route open to close.
    pub fn is_open(self, country: &Country) -> bool {
        match self {
            Closure::Borders => country.borders_open,
            Closure::Airport => country.has_airport && country.airport_open,
            Closure::Seaport => country.has_seaport && country.seaport_open,
        }
    }

    pub fn close(self, country: &mut Country) {
        match self {
            Closure::Borders => country.borders_open = false,
            Closure::Airport => country.airport_open = false,
            Closure::Seaport => country.seaport_open = false,
        }
    }
}

/// Roll each eligible closure once; returns the closures applied.
pub fn roll_closures(
    country: &mut Country,
    border_close_chance: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Closure> {
    let mut applied = Vec::new();
    for closure in Closure::ALL {
        if country.awareness > closure.threshold()
            && closure.is_open(country)
            && rng.next_f64() < closure.base_chance() * border_close_chance
        {
            closure.close(country);
            applied.push(closure);
        }
    }
    applied
}

pub const fn wealth_research_multiplier(wealth: Wealth) -> f64 {
    match wealth {
        Wealth::Rich => 2.0,
        Wealth::Average => 1.0,
        Wealth::Poor => 0.5,
    }
}

/// Cure research this country contributes per tick.
///
/// Zero until awareness exceeds 20 and the country has active infections;
/// heavy local death and infection tolls erode research capacity.
/// A country that stops qualifying drops to zero instead of keeping its last value.
pub fn cure_contribution(country: &Country) -> f64 {
    if country.awareness <= 20.0 || country.infected == 0 {
        return 0.0;
    }
    let death_penalty = (1.0 - country.dead_ratio() * 5.0).max(0.2);
    let infected_penalty = (1.0 - country.infected_ratio() * 2.0).max(0.3);
    country.awareness
        * wealth_research_multiplier(country.wealth)
        * 0.01
        * death_penalty
        * infected_penalty
}

/// Global cure speed from the summed country contributions.
pub fn cure_speed(
    total_contribution: f64,
    pathogen: &Pathogen,
    global_dead_ratio: f64,
    settings: &DifficultySettings,
) -> f64 {
    let drug = 1.0 - pathogen.drug_resistance as f64 * 0.15;
    let death_slowdown = (1.0 - global_dead_ratio * 3.0).max(0.1);
    let ability_slowdown = 1.0 - pathogen.cure_slowdown;
    total_contribution * drug * death_slowdown * ability_slowdown * settings.cure_speed_multiplier
}

/// Cure progress after one tick at `speed`, never above 100.
pub fn advance_cure(progress: f64, speed: f64) -> f64 {
    (progress + speed * CURE_PROGRESS_RATE).clamp(0.0, 100.0)
}

/// DNA earned from the change in global infections and deaths.
pub fn dna_income(delta_infected: i64, delta_dead: i64, dna_gain_multiplier: f64) -> u32 {
    let raw = (delta_infected as f64 / 100_000.0 + delta_dead as f64 / 50_000.0)
        * dna_gain_multiplier;
    raw.floor().max(0.0) as u32
}

/// Size of a random DNA bubble for a uniform draw `u`.
pub fn dna_bubble(u: f64, dna_gain_multiplier: f64) -> u32 {
    ((u * 3.0 + 1.0) * dna_gain_multiplier).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_core::{Difficulty, FixedSource, Symptom};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn country(id: &str, climate: Climate, wealth: Wealth, density: Density) -> Country {
        Country::new(id, id, 1_000_000, climate, wealth, density)
    }

    fn infect(c: &mut Country, n: u64) {
        c.healthy -= n;
        c.infected += n;
    }

    #[test]
    fn spread_rate_for_starting_pathogen() {
        let c = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let p = Pathogen::default();
        assert!((spread_rate(&c, &p) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn cold_climate_is_offset_by_resistance() {
        let c = country("a", Climate::Cold, Wealth::Average, Density::Mixed);
        let mut p = Pathogen::default();
        let base = spread_rate(&c, &p);
        p.cold_resistance = 2;
        assert!(spread_rate(&c, &p) > base);
    }

    #[test]
    fn spread_rate_is_clamped() {
        let c = country("a", Climate::Temperate, Wealth::Poor, Density::Urban);
        let mut p = Pathogen::default();
        p.infectivity = 100.0;
        assert_eq!(spread_rate(&c, &p), MAX_SPREAD_RATE);
        let rich = country("b", Climate::Cold, Wealth::Rich, Density::Rural);
        p.infectivity = 0.0;
        assert_eq!(spread_rate(&rich, &p), MIN_SPREAD_RATE);
    }

    #[test]
    fn awareness_dampens_spread() {
        let mut c = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let p = Pathogen::default();
        let before = spread_rate(&c, &p);
        c.awareness = 100.0;
        assert!((spread_rate(&c, &p) - before * 0.5).abs() < 1e-12);
    }

    #[test]
    fn poor_countries_die_faster() {
        let mut p = Pathogen::default();
        p.lethality = 20.0;
        let rich = country("a", Climate::Temperate, Wealth::Rich, Density::Mixed);
        let poor = country("b", Climate::Temperate, Wealth::Poor, Density::Mixed);
        assert!(death_rate(&poor, &p) > death_rate(&rich, &p));
        assert!((death_rate(&poor, &p) - 0.03).abs() < 1e-12);
        p.lethality = 100.0;
        assert_eq!(death_rate(&poor, &p), MAX_DEATH_RATE);
    }

    #[test]
    fn route_prefers_land_then_air_then_sea() {
        let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let mut b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        a.borders.push(b.id.clone());
        b.borders.push(a.id.clone());
        let p = Pathogen::default();
        let mut rng = FixedSource(0.99);
        assert_eq!(route(&a, &b, &p, &mut rng), Some(TransitMode::Land));
        a.borders_open = false;
        b.borders_open = false;
        assert_eq!(route(&a, &b, &p, &mut rng), Some(TransitMode::Air));
        b.airport_open = false;
        assert_eq!(route(&a, &b, &p, &mut rng), Some(TransitMode::Sea));
        a.seaport_open = false;
        assert_eq!(route(&a, &b, &p, &mut rng), None);
        assert!(!can_spread_to(&a, &b, &p, &mut rng));
    }

    #[test]
    fn one_open_border_side_is_enough() {
        let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let mut b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        a.borders.push(b.id.clone());
        b.borders.push(a.id.clone());
        a.borders_open = false;
        let p = Pathogen::default();
        assert_eq!(route(&a, &b, &p, &mut FixedSource(0.5)), Some(TransitMode::Land));
    }

    #[test]
    fn bypass_reopens_closed_routes() {
        let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        a.airport_open = false;
        a.seaport_open = false;
        let mut p = Pathogen::default();
        assert_eq!(route(&a, &b, &p, &mut FixedSource(0.0)), None);
        p.seaport_bypass = 0.2;
        assert_eq!(route(&a, &b, &p, &mut FixedSource(0.1)), Some(TransitMode::Sea));
        p.airport_bypass = 0.2;
        assert_eq!(route(&a, &b, &p, &mut FixedSource(0.1)), Some(TransitMode::Air));
        assert_eq!(route(&a, &b, &p, &mut FixedSource(0.3)), None);
    }

    #[test]
    fn infected_destination_is_always_reachable() {
        let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let mut b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        a.airport_open = false;
        a.seaport_open = false;
        infect(&mut b, 1);
        assert!(can_spread_to(&a, &b, &Pathogen::default(), &mut FixedSource(0.9)));
    }

    #[test]
    fn spread_chance_multipliers() {
        let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        let mut b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        infect(&mut a, 100_000);
        let p = Pathogen {
            infectivity: 0.0,
            ..Pathogen::default()
        };
        // air and sea open with zero levels: base only
        assert!((spread_chance(&a, &b, &p) - 0.05).abs() < 1e-12);
        a.borders.push(b.id.clone());
        b.borders.push(a.id.clone());
        assert!((spread_chance(&a, &b, &p) - 0.15).abs() < 1e-12);
        b.borders_open = false;
        assert!((spread_chance(&a, &b, &p) - 0.10).abs() < 1e-12);
        let airborne = Pathogen {
            airborne: 2,
            ..p.clone()
        };
        assert!((spread_chance(&a, &b, &airborne) - 0.16).abs() < 1e-12);
    }

    #[test]
    fn insects_need_heat() {
        let mut a = country("a", Climate::Cold, Wealth::Average, Density::Mixed);
        let b = country("b", Climate::Temperate, Wealth::Average, Density::Mixed);
        infect(&mut a, 10_000);
        let p = Pathogen {
            insectborne: 2,
            ..Pathogen::default()
        };
        let cold = spread_chance(&a, &b, &p);
        let hot_b = country("c", Climate::Hot, Wealth::Average, Density::Mixed);
        assert!((spread_chance(&a, &hot_b, &p) - cold * 1.4).abs() < 1e-12);
    }

    #[test]
    fn seed_count_range() {
        assert_eq!(seed_count(&mut FixedSource(0.0)), 1);
        assert_eq!(seed_count(&mut FixedSource(0.55)), 5);
        assert_eq!(seed_count(&mut FixedSource(0.999)), 9);
    }

    #[test]
    fn initial_infected_has_floor_of_one() {
        assert_eq!(initial_infected(331_000_000), 331);
        assert_eq!(initial_infected(56_000), 1);
    }

    #[test]
    fn visibility_counts_symptoms_and_reduction() {
        let mut p = Pathogen::default();
        p.severity = 10.0;
        p.lethality = 5.0;
        p.symptoms.push(Symptom {
            id: "x".into(),
            name: "X".into(),
            description: String::new(),
            cost: 1,
            infectivity_bonus: 0.0,
            severity_bonus: 10.0,
            lethality_bonus: 2.0,
            unlocked: true,
            requires: vec![],
        });
        // 5 + 4 + 3 + 1 + 10% infected (10) + 1% dead (2)
        let v = visibility(&p, 100, 10, 1_000);
        assert!((v - 25.0).abs() < 1e-9);
        p.visibility_reduction = 30.0;
        assert_eq!(visibility(&p, 100, 10, 1_000), 0.0);
    }

    #[test]
    fn awareness_gain_stacks_thresholds() {
        let mut c = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        assert_eq!(awareness_gain(&c, GlobalRatios::default(), 0.0, 1.0), 0.0);
        infect(&mut c, 200_000);
        let g = awareness_gain(&c, GlobalRatios { infected: 0.02, dead: 0.0 }, 0.0, 1.0);
        assert!((g - 2.0).abs() < 1e-12);
        let scaled = awareness_gain(&c, GlobalRatios { infected: 0.02, dead: 0.0 }, 50.0, 0.8);
        assert!((scaled - 2.4).abs() < 1e-12);
    }

    #[test]
    fn closures_respect_thresholds_and_are_one_time() {
        let mut c = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        c.awareness = 65.0;
        let applied = roll_closures(&mut c, 1.0, &mut FixedSource(0.0));
        assert_eq!(applied, vec![Closure::Borders, Closure::Airport]);
        assert!(!c.borders_open && !c.airport_open && c.seaport_open);
        assert!(roll_closures(&mut c, 1.0, &mut FixedSource(0.0)).is_empty());
        c.awareness = 90.0;
        assert!(roll_closures(&mut c, 1.0, &mut FixedSource(0.02)).is_empty());
        assert_eq!(roll_closures(&mut c, 1.0, &mut FixedSource(0.01)), vec![Closure::Seaport]);
    }

    #[test]
    fn closure_chance_scales_with_difficulty() {
        let mut c = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
        c.awareness = 45.0;
        // 0.015 * 1.0 = 0.015 misses a 0.017 draw
        assert!(roll_closures(&mut c.clone(), 1.0, &mut FixedSource(0.017)).is_empty());
        // 0.015 * 1.2 = 0.018 catches it
        assert_eq!(roll_closures(&mut c, 1.2, &mut FixedSource(0.017)), vec![Closure::Borders]);
        assert!(!c.borders_open && c.airport_open && c.seaport_open);
    }

    #[test]
    fn closure_skips_missing_facility() {
        let mut c = country("a", Climate::Cold, Wealth::Average, Density::Rural);
        c.has_airport = false;
        c.awareness = 70.0;
        let applied = roll_closures(&mut c, 1.0, &mut FixedSource(0.0));
        assert_eq!(applied, vec![Closure::Borders]);
    }

    #[test]
    fn cure_contribution_requires_awareness_and_cases() {
        let mut c = country("a", Climate::Temperate, Wealth::Rich, Density::Mixed);
        c.awareness = 50.0;
        assert_eq!(cure_contribution(&c), 0.0);
        infect(&mut c, 100_000);
        // 50 * 2 * 0.01 * 1.0 * (1 - 0.2)
        assert!((cure_contribution(&c) - 0.8).abs() < 1e-12);
        c.awareness = 20.0;
        assert_eq!(cure_contribution(&c), 0.0);
        // burned out: every case has died
        c.awareness = 80.0;
        c.dead = c.infected;
        c.infected = 0;
        assert_eq!(cure_contribution(&c), 0.0);
    }

    #[test]
    fn cure_speed_factors() {
        let settings = Difficulty::Normal.settings();
        let mut p = Pathogen::default();
        assert!((cure_speed(10.0, &p, 0.0, &settings) - 6.0).abs() < 1e-12);
        p.drug_resistance = 2;
        p.cure_slowdown = 0.5;
        assert!((cure_speed(10.0, &p, 0.0, &settings) - 2.1).abs() < 1e-12);
        assert!((cure_speed(10.0, &Pathogen::default(), 0.5, &settings) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn cure_never_exceeds_100() {
        assert_eq!(advance_cure(99.9, 100.0), 100.0);
        assert!((advance_cure(10.0, 5.0) - 10.4).abs() < 1e-12);
    }

    #[test]
    fn dna_income_floors_and_clamps() {
        assert_eq!(dna_income(250_000, 0, 1.0), 2);
        assert_eq!(dna_income(150_000, 75_000, 1.0), 3);
        assert_eq!(dna_income(-500_000, 0, 1.0), 0);
        assert_eq!(dna_income(100_000, 0, 1.5), 1);
        assert_eq!(dna_bubble(0.0, 1.0), 1);
        assert_eq!(dna_bubble(0.99, 1.5), 5);
    }

    fn climate_strategy() -> impl Strategy<Value = Climate> {
        prop_oneof![Just(Climate::Hot), Just(Climate::Cold), Just(Climate::Temperate)]
    }

    fn wealth_strategy() -> impl Strategy<Value = Wealth> {
        prop_oneof![Just(Wealth::Rich), Just(Wealth::Average), Just(Wealth::Poor)]
    }

    fn density_strategy() -> impl Strategy<Value = Density> {
        prop_oneof![Just(Density::Urban), Just(Density::Rural), Just(Density::Mixed)]
    }

    proptest! {
        #[test]
        fn rates_stay_in_bounds(
            climate in climate_strategy(),
            wealth in wealth_strategy(),
            density in density_strategy(),
            awareness in 0.0f64..=100.0,
            infectivity in 0.0f64..=100.0,
            lethality in 0.0f64..=100.0,
            cold in 0u32..=5,
            heat in 0u32..=5,
            drug in 0u32..=5
        ) {
            let mut c = country("a", climate, wealth, density);
            c.awareness = awareness;
            let p = Pathogen {
                infectivity,
                lethality,
                cold_resistance: cold,
                heat_resistance: heat,
                drug_resistance: drug,
                ..Pathogen::default()
            };
            let s = spread_rate(&c, &p);
            prop_assert!((MIN_SPREAD_RATE..=MAX_SPREAD_RATE).contains(&s));
            let d = death_rate(&c, &p);
            prop_assert!((0.0..=MAX_DEATH_RATE).contains(&d));
        }

        #[test]
        fn visibility_stays_in_bounds(
            severity in 0.0f64..=100.0,
            lethality in 0.0f64..=100.0,
            reduction in 0.0f64..=50.0,
            infected in 0u64..=1_000,
            dead in 0u64..=1_000
        ) {
            let p = Pathogen {
                severity,
                lethality,
                visibility_reduction: reduction,
                ..Pathogen::default()
            };
            let v = visibility(&p, infected, dead, 2_000);
            prop_assert!((0.0..=100.0).contains(&v));
        }

        #[test]
        fn uninfected_source_never_spreads(airborne in 0u32..=10, infectivity in 0.0f64..=100.0) {
            let a = country("a", Climate::Hot, Wealth::Poor, Density::Urban);
            let b = country("b", Climate::Hot, Wealth::Poor, Density::Urban);
            let p = Pathogen { airborne, infectivity, ..Pathogen::default() };
            prop_assert_eq!(spread_chance(&a, &b, &p), 0.0);
        }

        #[test]
        fn closed_routes_without_bypass_never_route(
            seed in any::<u64>(),
            bordering in any::<bool>()
        ) {
            let mut a = country("a", Climate::Temperate, Wealth::Average, Density::Mixed);
            let mut b = country("b", Climate::Hot, Wealth::Poor, Density::Urban);
            if bordering {
                a.borders.push(b.id.clone());
                b.borders.push(a.id.clone());
            }
            for c in [&mut a, &mut b] {
                c.borders_open = false;
                c.airport_open = false;
                c.seaport_open = false;
            }
            let p = Pathogen::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..64 {
                prop_assert_eq!(route(&a, &b, &p, &mut rng), None);
                prop_assert!(!can_spread_to(&a, &b, &p, &mut rng));
            }
        }

        #[test]
        fn cure_contribution_is_non_negative(
            awareness in 0.0f64..=100.0,
            infected in 0u64..=500_000,
            dead in 0u64..=500_000,
            wealth in wealth_strategy()
        ) {
            let mut c = country("a", Climate::Temperate, wealth, Density::Mixed);
            c.awareness = awareness;
            c.healthy -= infected + dead;
            c.infected = infected;
            c.dead = dead;
            prop_assert!(cure_contribution(&c) >= 0.0);
        }
    }
}
