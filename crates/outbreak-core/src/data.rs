//! Immutable seed tables: the world map and the four evolution catalogs.
//!
//! Every call returns a fresh copy so a new game never inherits state.

use crate::catalog::{
    ResistanceAbility, ResistanceKind, SpecialAbility, SpecialCategory, SpecialEffect, Symptom,
    TransmissionKind, TransmissionTier,
};
use crate::{Climate, Country, CountryId, Density, Wealth};

use Climate::{Cold, Hot, Temperate};
use Density::{Mixed, Rural, Urban};
use Wealth::{Average, Poor, Rich};

/// (id, name, population, climate, wealth, density, airport, seaport)
type CountryRow = (&'static str, &'static str, u64, Climate, Wealth, Density, bool, bool);

const COUNTRIES: &[CountryRow] = &[
    ("usa", "United States", 331_000_000, Temperate, Rich, Mixed, true, true),
    ("canada", "Canada", 38_000_000, Cold, Rich, Rural, true, true),
    ("mexico", "Mexico", 128_000_000, Hot, Average, Mixed, true, true),
    ("greenland", "Greenland", 56_000, Cold, Average, Rural, false, true),
    ("brazil", "Brazil", 212_000_000, Hot, Average, Urban, true, true),
    ("argentina", "Argentina", 45_000_000, Temperate, Average, Mixed, true, true),
    ("uk", "United Kingdom", 67_000_000, Temperate, Rich, Urban, true, true),
    ("france", "France", 65_000_000, Temperate, Rich, Mixed, true, true),
    ("germany", "Germany", 83_000_000, Temperate, Rich, Urban, true, true),
    ("spain", "Spain", 47_000_000, Hot, Average, Mixed, true, true),
    ("italy", "Italy", 60_000_000, Temperate, Average, Mixed, true, true),
    ("poland", "Poland", 38_000_000, Cold, Average, Mixed, true, true),
    ("iceland", "Iceland", 364_000, Cold, Rich, Rural, true, true),
    ("egypt", "Egypt", 102_000_000, Hot, Poor, Mixed, true, true),
    ("morocco", "Morocco", 37_000_000, Hot, Poor, Mixed, true, true),
    ("southafrica", "South Africa", 59_000_000, Temperate, Average, Mixed, true, true),
    ("madagascar", "Madagascar", 27_000_000, Hot, Poor, Rural, true, true),
    ("russia", "Russia", 146_000_000, Cold, Average, Rural, true, true),
    ("china", "China", 1_402_000_000, Temperate, Average, Urban, true, true),
    ("india", "India", 1_380_000_000, Hot, Poor, Urban, true, true),
    ("japan", "Japan", 126_000_000, Temperate, Rich, Urban, true, true),
    ("saudi", "Saudi Arabia", 35_000_000, Hot, Rich, Mixed, true, true),
    ("pakistan", "Pakistan", 220_000_000, Hot, Poor, Mixed, true, true),
    ("australia", "Australia", 25_000_000, Hot, Rich, Rural, true, true),
    ("indonesia", "Indonesia", 273_000_000, Hot, Poor, Urban, true, true),
];

/// Undirected land borders.
const LAND_BORDERS: &[(&str, &str)] = &[
    ("usa", "canada"),
    ("usa", "mexico"),
    ("brazil", "argentina"),
    ("france", "spain"),
    ("france", "germany"),
    ("france", "italy"),
    ("germany", "poland"),
    ("poland", "russia"),
    ("russia", "china"),
    ("china", "india"),
    ("china", "pakistan"),
    ("india", "pakistan"),
    ("egypt", "saudi"),
];

/// The world map with every country healthy and every route open.
pub fn countries() -> Vec<Country> {
    let mut out: Vec<Country> = COUNTRIES
        .iter()
        .map(|&(id, name, pop, climate, wealth, density, airport, seaport)| {
            let mut c = Country::new(id, name, pop, climate, wealth, density);
            c.has_airport = airport;
            c.has_seaport = seaport;
            c
        })
        .collect();
    for &(a, b) in LAND_BORDERS {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(c) = out.iter_mut().find(|c| c.id.as_str() == from) {
                c.borders.push(CountryId::new(to));
            }
        }
    }
    out
}

fn symptom(
    id: &str,
    name: &str,
    description: &str,
    cost: u32,
    (infectivity, severity, lethality): (f64, f64, f64),
    requires: &[&str],
) -> Symptom {
    Symptom {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        infectivity_bonus: infectivity,
        severity_bonus: severity,
        lethality_bonus: lethality,
        unlocked: false,
        requires: requires.iter().map(|s| s.to_string()).collect(),
    }
}

// One row per item.
#[rustfmt::skip]
pub fn symptoms() -> Vec<Symptom> {
    vec![
        symptom("coughing", "Coughing", "Expels droplets into the air around the host.", 4, (3.0, 1.0, 0.0), &[]),
        symptom("sneezing", "Sneezing", "Violent sneezes spray pathogen far and wide.", 5, (4.0, 1.0, 0.0), &[]),
        symptom("rash", "Rash", "Irritated skin encourages scratching and contact spread.", 3, (1.0, 1.0, 0.0), &[]),
        symptom("sweating", "Sweating", "Damp skin leaves pathogen on every surface touched.", 3, (1.0, 1.0, 0.0), &[]),
        symptom("nausea", "Nausea", "Mild stomach upset, easily dismissed.", 4, (1.0, 2.0, 0.0), &[]),
        symptom("insomnia", "Insomnia", "Sleepless hosts grow weak and erratic.", 6, (0.0, 2.0, 0.0), &[]),
        symptom("vomiting", "Vomiting", "Contaminates food and water supplies.", 7, (3.0, 3.0, 0.0), &["nausea"]),
        symptom("fever", "Fever", "Raised body temperature weakens the host.", 8, (2.0, 4.0, 1.0), &["sweating"]),
        symptom("pneumonia", "Pneumonia", "Fluid in the lungs makes every cough count.", 10, (3.0, 4.0, 2.0), &["coughing"]),
        symptom("cysts", "Cysts", "Fluid-filled sacs burst and spread infection.", 6, (2.0, 2.0, 0.0), &["rash"]),
        symptom("lesions", "Lesions", "Open sores shed pathogen on contact.", 9, (3.0, 3.0, 1.0), &["cysts"]),
        symptom("paranoia", "Paranoia", "Distrust of doctors delays diagnosis.", 8, (0.0, 4.0, 0.0), &["insomnia"]),
        symptom("diarrhoea", "Diarrhoea", "Rapid fluid loss fouls sanitation systems.", 9, (5.0, 3.0, 1.0), &["vomiting"]),
        symptom("pulmonary_edema", "Pulmonary Edema", "Lungs flood; breathing becomes a struggle.", 14, (1.0, 5.0, 5.0), &["pneumonia"]),
        symptom("hemorrhagic_shock", "Hemorrhagic Shock", "Uncontrolled internal bleeding.", 18, (2.0, 8.0, 10.0), &["lesions"]),
        symptom("coma", "Coma", "Hosts fall into an unresponsive state.", 20, (0.0, 12.0, 8.0), &["paranoia"]),
        symptom("organ_failure", "Organ Failure", "Vital organs begin to shut down.", 22, (0.0, 10.0, 15.0), &["pulmonary_edema"]),
        symptom("total_organ_failure", "Total Organ Failure", "Every organ system collapses at once.", 30, (0.0, 15.0, 25.0), &["organ_failure", "hemorrhagic_shock"]),
    ]
}

fn tier(
    kind: TransmissionKind,
    level: u32,
    name: &str,
    description: &str,
    cost: u32,
) -> TransmissionTier {
    let prefix = match kind {
        TransmissionKind::Air => "air",
        TransmissionKind::Water => "water",
        TransmissionKind::Insect => "insect",
        TransmissionKind::Blood => "blood",
    };
    TransmissionTier {
        id: format!("{prefix}_{level}"),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        kind,
        level,
        unlocked: false,
    }
}

pub fn transmissions() -> Vec<TransmissionTier> {
    use TransmissionKind::*;
    vec![
        tier(Air, 1, "Air 1", "Survives briefly in aerosol droplets.", 9),
        tier(Air, 2, "Air 2", "Lingers in recirculated cabin air.", 14),
        tier(Air, 3, "Air 3", "Rides dust and wind across continents.", 20),
        tier(Water, 1, "Water 1", "Survives in fresh water supplies.", 8),
        tier(Water, 2, "Water 2", "Thrives in ballast and bilge water.", 13),
        tier(Water, 3, "Water 3", "Resists chlorination and filtration.", 18),
        tier(Insect, 1, "Insect 1", "Mosquitoes carry the pathogen between hosts.", 10),
        tier(Insect, 2, "Insect 2", "Adapts to fleas, ticks and flies.", 16),
        tier(Blood, 1, "Blood 1", "Spreads through contaminated blood and needles.", 7),
        tier(Blood, 2, "Blood 2", "Survives blood screening and storage.", 12),
    ]
}

fn resistance(
    kind: ResistanceKind,
    level: u32,
    name: &str,
    description: &str,
    cost: u32,
) -> ResistanceAbility {
    let prefix = match kind {
        ResistanceKind::Cold => "cold",
        ResistanceKind::Heat => "heat",
        ResistanceKind::Drug => "drug",
    };
    ResistanceAbility {
        id: format!("{prefix}_res_{level}"),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        kind,
        level,
        unlocked: false,
    }
}

pub fn resistances() -> Vec<ResistanceAbility> {
    use ResistanceKind::*;
    vec![
        resistance(Cold, 1, "Cold Resistance 1", "Tolerates cool climates.", 7),
        resistance(Cold, 2, "Cold Resistance 2", "Thrives in freezing conditions.", 12),
        resistance(Heat, 1, "Heat Resistance 1", "Tolerates hot climates.", 7),
        resistance(Heat, 2, "Heat Resistance 2", "Thrives in arid and tropical heat.", 12),
        resistance(Drug, 1, "Drug Resistance 1", "Shrugs off common antibiotics.", 10),
        resistance(Drug, 2, "Drug Resistance 2", "Resists antiviral treatment.", 16),
        resistance(Drug, 3, "Drug Resistance 3", "Immune to most modern medicine.", 22),
    ]
}

#[allow(clippy::too_many_arguments)]
fn special(
    id: &str,
    name: &str,
    description: &str,
    cost: u32,
    category: SpecialCategory,
    effect: SpecialEffect,
    repeatable: bool,
    max_purchases: u32,
) -> SpecialAbility {
    SpecialAbility {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        category,
        effect,
        unlocked: false,
        repeatable,
        times_purchased: 0,
        max_purchases,
    }
}

#[rustfmt::skip]
pub fn special_abilities() -> Vec<SpecialAbility> {
    use SpecialCategory::*;
    use SpecialEffect::*;
    vec![
        special("dormancy", "Dormancy", "Hides in hosts without showing symptoms.", 8, Stealth, VisibilityReduction(10.0), true, 3),
        special("genetic_hardening", "Genetic Hardening", "Makes the genome harder to sequence.", 12, Stealth, CureSlowdown(0.1), true, 5),
        special("genetic_reshuffle", "Genetic Reshuffle", "Scrambles the genome, invalidating research.", 20, Stealth, CureSetback(10.0), true, 3),
        special("rapid_mutation", "Rapid Mutation", "Accelerated mutation improves transmissibility.", 6, Mutation, Infectivity(5.0), true, 5),
        special("aggressive_strain", "Aggressive Strain", "A harsher strain makes hosts sicker.", 6, Mutation, Severity(5.0), true, 4),
        special("environmental_hardening", "Environmental Hardening", "Resists cold, heat and drugs alike.", 25, Resilience, AllResistance(1), true, 2),
        special("drug_tolerance", "Drug Tolerance", "Rapid adaptation to treatment.", 15, Resilience, DrugResistance(1), true, 2),
        special("aerosol_bond", "Aerosol Bond", "Binds to airborne particulates.", 12, Spread, Airborne(1), false, 1),
        special("aquatic_vector", "Aquatic Vector", "Colonises marine organisms.", 12, Spread, Waterborne(1), false, 1),
        special("swarm_host", "Swarm Host", "Hijacks insect swarms.", 12, Spread, Insectborne(1), false, 1),
        special("smuggler_strain", "Smuggler Strain", "Slips through closed land borders.", 10, Spread, BorderBypass(0.1), true, 3),
        special("stowaway_strain", "Stowaway Strain", "Hitches rides on cargo flights.", 10, Spread, AirportBypass(0.1), true, 3),
        special("bilge_strain", "Bilge Strain", "Survives in ship ballast past port controls.", 10, Spread, SeaportBypass(0.1), true, 3),
        special("necrosis", "Necrosis", "Tissue death raises fatality rates.", 10, Lethal, Lethality(5.0), true, 4),
        special("systemic_failure", "Systemic Failure", "Attacks multiple organ systems.", 18, Lethal, OrganFailure(10.0), false, 1),
        special("cytokine_storm", "Cytokine Storm", "Turns the immune system against its host.", 24, Lethal, CytokineStorm(15.0), false, 1),
        special("doomsday_protocol", "Doomsday Protocol", "Maximum lethality, no survivors.", 45, Lethal, MaxLethality, false, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn world_ids_are_unique() {
        let cs = countries();
        let ids: BTreeSet<_> = cs.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), cs.len());
        assert_eq!(cs.len(), 25);
    }

    #[test]
    fn borders_are_symmetric_and_resolve() {
        let cs = countries();
        for c in &cs {
            for b in &c.borders {
                let other = cs.iter().find(|o| &o.id == b).expect("border target exists");
                assert!(other.borders_with(&c.id), "{} -> {}", c.id, b);
            }
        }
    }

    #[test]
    fn countries_start_healthy_and_open() {
        for c in countries() {
            assert_eq!(c.healthy, c.population);
            assert!(c.borders_open && c.airport_open && c.seaport_open);
            assert_eq!(c.awareness, 0.0);
        }
    }

    #[test]
    fn symptom_prerequisites_exist() {
        let all = symptoms();
        for s in &all {
            for r in &s.requires {
                assert!(all.iter().any(|o| &o.id == r), "{} requires missing {}", s.id, r);
            }
        }
    }

    #[test]
    fn chains_are_contiguous() {
        let ts = transmissions();
        for t in &ts {
            if t.level > 1 {
                assert!(ts.iter().any(|o| o.kind == t.kind && o.level == t.level - 1));
            }
        }
        let rs = resistances();
        for r in &rs {
            if r.level > 1 {
                assert!(rs.iter().any(|o| o.kind == r.kind && o.level == r.level - 1));
            }
        }
    }

    #[test]
    fn non_repeatable_specials_have_single_purchase() {
        for a in special_abilities() {
            assert!(a.max_purchases >= 1);
            if !a.repeatable {
                assert_eq!(a.max_purchases, 1, "{}", a.id);
            }
        }
    }
}
