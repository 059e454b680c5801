//! Headline generation from the difference between two consecutive states.

use outbreak_core::random::pick_index;
use outbreak_core::{CountryId, GameState, NewsCategory, NewsItem, RandomSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cure milestones announced once each.
pub const CURE_MILESTONES: [u32; 4] = [25, 50, 75, 90];
/// Chance per tick of a flavour headline once visibility passes 20.
pub const GENERAL_NEWS_CHANCE: f64 = 0.02;

/// Events already reported this game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsTracker {
    pub first_case_reported: bool,
    pub infected: BTreeSet<CountryId>,
    pub with_deaths: BTreeSet<CountryId>,
    /// `(country, band)` death bands already announced.
    pub death_bands: BTreeSet<(CountryId, u32)>,
    pub devastated: BTreeSet<CountryId>,
    pub borders_closed: BTreeSet<CountryId>,
    pub airports_closed: BTreeSet<CountryId>,
    pub seaports_closed: BTreeSet<CountryId>,
    pub awareness_alerts: BTreeSet<CountryId>,
    pub cure_started: bool,
    pub cure_milestones: BTreeSet<u32>,
    pub symptoms_noticed: BTreeSet<String>,
    /// Sequence number used to keep item ids unique.
    pub issued: u64,
}

impl NewsTracker {
    fn item(
        &mut self,
        day: u32,
        category: NewsCategory,
        headline: String,
        priority: u8,
    ) -> NewsItem {
        self.issued += 1;
        NewsItem {
            id: format!("{}-{}-{}", category.as_str(), day, self.issued),
            day,
            category,
            headline,
            priority,
        }
    }
}

/// Compact count: `950`, `12K`, `3.4M`, `1.2B`.
pub fn format_count(n: u64) -> String {
    let v = n as f64;
    if n >= 1_000_000_000 {
        format!("{:.1}B", v / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", v / 1e6)
    } else if n >= 1_000 {
        format!("{:.0}K", v / 1e3)
    } else {
        n.to_string()
    }
}

fn pick(pool: &[String], rng: &mut dyn RandomSource) -> String {
    pool[pick_index(rng, pool.len())].clone()
}

fn first_case_lines(country: &str, pathogen: &str) -> Vec<String> {
    vec![
        format!("Unidentified illness surfaces in {country}"),
        format!("{country} doctors baffled by new infection"),
        format!("Health authorities in {country} name new pathogen {pathogen}"),
        format!("Cluster of strange fevers reported in {country}"),
        format!("Laboratory in {country} isolates {pathogen}"),
    ]
}

fn arrival_lines(country: &str, pathogen: &str) -> Vec<String> {
    vec![
        format!("{pathogen} detected in {country}"),
        format!("{country} confirms its first {pathogen} case"),
        format!("Returning traveller carries {pathogen} into {country}"),
        format!("{country} added to list of affected nations"),
        format!("Emergency meeting in {country} as {pathogen} arrives"),
    ]
}

fn first_death_lines(country: &str, pathogen: &str) -> Vec<String> {
    vec![
        format!("{country} records first {pathogen} fatality"),
        format!("{pathogen} claims its first victim in {country}"),
        format!("Hospital in {country} confirms death from {pathogen}"),
        format!("{country} in mourning after first {pathogen} death"),
    ]
}

fn mass_death_lines(country: &str, dead: &str) -> Vec<String> {
    vec![
        format!("Death toll in {country} passes {dead}"),
        format!("{country} overwhelmed as {dead} lie dead"),
        format!("Field morgues set up across {country}, {dead} dead"),
        format!("{country} declares national emergency with {dead} dead"),
    ]
}

fn devastated_lines(country: &str) -> Vec<String> {
    vec![
        format!("Government of {country} collapses"),
        format!("Silence falls over the cities of {country}"),
        format!("{country} no longer responding to outside contact"),
        format!("Survivors abandon {country}"),
    ]
}

fn border_lines(country: &str) -> Vec<String> {
    vec![
        format!("{country} seals its land borders"),
        format!("Troops deployed to {country} border crossings"),
        format!("{country} halts all overland travel"),
        format!("Checkpoints close along every {country} border"),
    ]
}

fn airport_lines(country: &str) -> Vec<String> {
    vec![
        format!("{country} grounds every flight"),
        format!("Airports in {country} shut until further notice"),
        format!("{country} closes its airspace"),
        format!("International flights to {country} cancelled"),
    ]
}

fn seaport_lines(country: &str) -> Vec<String> {
    vec![
        format!("{country} closes its harbours"),
        format!("Shipping to {country} suspended"),
        format!("Coast guard turns back vessels bound for {country}"),
        format!("Ports of {country} fall silent"),
    ]
}

fn awareness_lines(country: &str, pathogen: &str) -> Vec<String> {
    vec![
        format!("{country} on high alert over {pathogen}"),
        format!("Supermarket shelves empty in {country}"),
        format!("{country} begins mandatory health checks"),
        format!("Fear of {pathogen} grips {country}"),
    ]
}

fn cure_started_lines(pathogen: &str) -> Vec<String> {
    vec![
        format!("Research into a {pathogen} cure begins"),
        format!("Laboratories worldwide turn to {pathogen}"),
        format!("International fund launched to fight {pathogen}"),
        format!("First trials planned against {pathogen}"),
    ]
}

fn cure_progress_lines(pathogen: &str, pct: u32) -> Vec<String> {
    vec![
        format!("{pathogen} cure now {pct}% complete"),
        format!("Researchers report {pct}% progress against {pathogen}"),
        format!("{pathogen} treatment reaches {pct}% milestone"),
        format!("Hopes rise as {pathogen} cure hits {pct}%"),
    ]
}

fn symptom_lines(symptom: &str, pathogen: &str) -> Vec<String> {
    vec![
        format!("Patients with {pathogen} now showing {symptom}"),
        format!("Doctors link {symptom} to {pathogen}"),
        format!("{pathogen} has started causing {symptom}"),
        format!("New {pathogen} symptom documented: {symptom}"),
    ]
}

fn general_lines(pathogen: &str) -> Vec<String> {
    vec![
        format!("Markets slide on {pathogen} fears"),
        format!("Experts warn {pathogen} could mutate"),
        "Schools shut across several continents".to_string(),
        "Stadiums stand empty as tournaments are called off".to_string(),
        format!("Rumours about the origin of {pathogen} spread online"),
        "Hospitals report shortages of basic supplies".to_string(),
        "Streets empty as people stay indoors".to_string(),
        format!("Economists predict recession driven by {pathogen}"),
        "Delivery services struggle to keep up with demand".to_string(),
        "Key workers applauded from balconies".to_string(),
    ]
}

/// Headlines for the transition `prev` -> `next`, in announcement order.
///
/// Marks every reported event in `tracker` so it is never repeated.
pub fn generate(
    prev: &GameState,
    next: &GameState,
    tracker: &mut NewsTracker,
    rng: &mut dyn RandomSource,
) -> Vec<NewsItem> {
    let mut out = Vec::new();
    let day = next.day;
    let pathogen = next.pathogen.name.as_str();

    if !tracker.first_case_reported && next.total_infected > 0 {
        let origin = next
            .starting_country
            .as_ref()
            .and_then(|id| next.country(id.as_str()));
        if let Some(origin) = origin {
            let line = pick(&first_case_lines(&origin.name, pathogen), rng);
            out.push(tracker.item(day, NewsCategory::FirstCase, line, 10));
            tracker.first_case_reported = true;
            tracker.infected.insert(origin.id.clone());
        }
    }

    for country in &next.countries {
        let Some(before) = prev.country(country.id.as_str()) else {
            continue;
        };
        let name = country.name.as_str();

        if before.infected == 0
            && country.infected > 0
            && tracker.infected.insert(country.id.clone())
        {
            let line = pick(&arrival_lines(name, pathogen), rng);
            out.push(tracker.item(day, NewsCategory::SpreadToCountry, line, 8));
        }

        if before.dead == 0 && country.dead > 0 && tracker.with_deaths.insert(country.id.clone()) {
            let line = pick(&first_death_lines(name, pathogen), rng);
            out.push(tracker.item(day, NewsCategory::DeathsStart, line, 9));
        }

        let band = (country.dead_ratio() * 10.0).floor() as u32 * 10;
        if band >= 10 && tracker.death_bands.insert((country.id.clone(), band)) {
            if band >= 50 {
                if tracker.devastated.insert(country.id.clone()) {
                    let line = pick(&devastated_lines(name), rng);
                    out.push(tracker.item(day, NewsCategory::CountryDevastated, line, 10));
                }
            } else {
                let line = pick(&mass_death_lines(name, &format_count(country.dead)), rng);
                out.push(tracker.item(day, NewsCategory::MassDeaths, line, 7));
            }
        }

        if before.borders_open
            && !country.borders_open
            && tracker.borders_closed.insert(country.id.clone())
        {
            let line = pick(&border_lines(name), rng);
            out.push(tracker.item(day, NewsCategory::BorderClosed, line, 7));
        }
        if before.airport_open
            && !country.airport_open
            && tracker.airports_closed.insert(country.id.clone())
        {
            let line = pick(&airport_lines(name), rng);
            out.push(tracker.item(day, NewsCategory::AirportClosed, line, 6));
        }
        if before.seaport_open
            && !country.seaport_open
            && tracker.seaports_closed.insert(country.id.clone())
        {
            let line = pick(&seaport_lines(name), rng);
            out.push(tracker.item(day, NewsCategory::SeaportClosed, line, 6));
        }

        if before.awareness < 50.0
            && country.awareness >= 50.0
            && tracker.awareness_alerts.insert(country.id.clone())
        {
            let line = pick(&awareness_lines(name, pathogen), rng);
            out.push(tracker.item(day, NewsCategory::Awareness, line, 5));
        }
    }

    if !tracker.cure_started && next.cure_progress > 0.0 {
        tracker.cure_started = true;
        let line = pick(&cure_started_lines(pathogen), rng);
        out.push(tracker.item(day, NewsCategory::CureStarted, line, 9));
    }
    for milestone in CURE_MILESTONES {
        if next.cure_progress >= f64::from(milestone) && tracker.cure_milestones.insert(milestone) {
            let line = pick(&cure_progress_lines(pathogen, milestone), rng);
            out.push(tracker.item(day, NewsCategory::CureProgress, line, 8));
        }
    }

    for symptom in &next.pathogen.symptoms {
        if tracker.symptoms_noticed.insert(symptom.id.clone()) {
            let line = pick(&symptom_lines(&symptom.name.to_lowercase(), pathogen), rng);
            out.push(tracker.item(day, NewsCategory::SymptomNoticed, line, 6));
        }
    }

    if next.visibility > 20.0 && rng.next_f64() < GENERAL_NEWS_CHANCE {
        let line = pick(&general_lines(pathogen), rng);
        out.push(tracker.item(day, NewsCategory::General, line, 2));
    }
    out
}
