//! Game setup and the daily tick.

use crate::news::{self, NewsTracker};
use outbreak_core::{
    data, ratio, Country, CountryId, Difficulty, GameState, Pathogen, RandomSource, TransitEvent,
    UpgradeStore, DEFAULT_PATHOGEN_NAME, MAX_NEWS, MAX_TRANSITS, TRANSIT_WINDOW_DAYS,
};
use outbreak_model as model;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Rejected engine operations. The state passed in is left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("game already started")]
    AlreadyStarted,
}

/// A fresh, unstarted world. Resets every catalog in `store`.
pub fn create_initial_state(difficulty: Difficulty, store: &mut UpgradeStore) -> GameState {
    store.reset();
    let countries = data::countries();
    let total_population = countries.iter().map(|c| c.population).sum();
    GameState {
        pathogen: Pathogen::default(),
        countries,
        dna_points: 0,
        day: 0,
        game_speed: 1,
        paused: true,
        cure_progress: 0.0,
        total_infected: 0,
        total_dead: 0,
        total_population,
        game_over: false,
        victory: false,
        starting_country: None,
        game_started: false,
        difficulty,
        visibility: 0.0,
        recent_transits: Vec::new(),
        news: Vec::new(),
    }
}

/// Seed patient zero in `country_id` and start the clock.
///
/// Clears `tracker` so headlines from a previous game are never suppressed.
pub fn start_game(
    state: &GameState,
    country_id: &str,
    pathogen_name: &str,
    tracker: &mut NewsTracker,
) -> Result<GameState, EngineError> {
    if state.game_started {
        return Err(EngineError::AlreadyStarted);
    }
    let idx = state
        .countries
        .iter()
        .position(|c| c.id.as_str() == country_id)
        .ok_or_else(|| EngineError::UnknownCountry(country_id.to_string()))?;

    *tracker = NewsTracker::default();

    let mut next = state.clone();
    let country = &mut next.countries[idx];
    let seeded = model::initial_infected(country.population).min(country.healthy);
    country.healthy -= seeded;
    country.infected += seeded;

    let name = pathogen_name.trim();
    next.pathogen.name = if name.is_empty() {
        DEFAULT_PATHOGEN_NAME.to_string()
    } else {
        name.to_string()
    };
    next.starting_country = Some(CountryId::new(country_id));
    next.game_started = true;
    next.paused = false;
    next.dna_points = state.difficulty.settings().starting_dna;
    next.total_infected = next.countries.iter().map(|c| c.infected).sum();
    info!(
        country = country_id,
        pathogen = %next.pathogen.name,
        difficulty = %next.difficulty,
        seeded,
        "game started"
    );
    Ok(next)
}

pub fn toggle_pause(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.paused = !state.paused;
    next
}

/// Set the speed multiplier, clamped to 1..=3.
pub fn set_speed(state: &GameState, speed: u8) -> GameState {
    let mut next = state.clone();
    next.game_speed = speed.clamp(1, 3);
    next
}

/// Wall-clock interval between ticks at `speed`.
pub fn tick_interval(speed: u8) -> Duration {
    Duration::from_millis(1000 / u64::from(speed.clamp(1, 3)))
}

/// Spread and kill inside one country.
fn progress_country(country: &Country, pathogen: &Pathogen, rng: &mut dyn RandomSource) -> Country {
    let mut c = country.clone();
    if c.infected == 0 {
        return c;
    }
    let spread = model::spread_rate(&c, pathogen);
    let death = model::death_rate(&c, pathogen);
    let infected = c.infected as f64;

    let new_infections =
        ((infected * spread * (1.0 + rng.next_f64())).floor() as u64).min(c.healthy);
    let mut deaths = (infected * death * (0.5 + rng.next_f64())).floor() as u64;
    // A burned-out country must still be able to reach zero infected.
    if c.healthy == 0 && death > 0.0 {
        deaths = deaths.max(1);
    }
    let deaths = deaths.min(c.infected);

    c.healthy -= new_infections;
    c.infected = c.infected + new_infections - deaths;
    c.dead += deaths;
    c
}

/// Roll cross-border transmission for every infected source and every
/// destination that was clean at the start of the phase.
fn spread_between_countries(
    countries: &mut [Country],
    pathogen: &Pathogen,
    day: u32,
    rng: &mut dyn RandomSource,
) -> Vec<TransitEvent> {
    let snapshot = countries.to_vec();
    let mut transits = Vec::new();
    for from in snapshot.iter().filter(|c| c.infected > 0) {
        for (idx, to) in snapshot.iter().enumerate() {
            if to.id == from.id || to.infected > 0 || countries[idx].infected > 0 {
                continue;
            }
            let Some(mode) = model::route(from, to, pathogen, rng) else {
                continue;
            };
            let chance = model::spread_chance(from, to, pathogen);
            if rng.next_f64() >= chance {
                continue;
            }
            let target = &mut countries[idx];
            let seeded = model::seed_count(rng).min(target.healthy);
            if seeded == 0 {
                continue;
            }
            target.healthy -= seeded;
            target.infected += seeded;
            trace!(from = %from.id, to = %to.id, ?mode, seeded, "transit");
            transits.push(TransitEvent {
                id: format!("{}-{}-{}", from.id, to.id, day),
                from: from.id.clone(),
                to: to.id.clone(),
                mode,
                day,
                infected: seeded,
            });
        }
    }
    transits
}

/// Append `fresh` and evict entries outside the window or over the cap.
fn merge_transits(
    recent: &[TransitEvent],
    fresh: Vec<TransitEvent>,
    day: u32,
) -> Vec<TransitEvent> {
    let mut merged: Vec<TransitEvent> = recent
        .iter()
        .cloned()
        .chain(fresh)
        .filter(|t| day.saturating_sub(t.day) < TRANSIT_WINDOW_DAYS)
        .collect();
    if merged.len() > MAX_TRANSITS {
        merged.drain(..merged.len() - MAX_TRANSITS);
    }
    merged
}

/// Advance the simulation by one day.
///
/// Returns an identical copy when the game is paused, not started or over.
pub fn tick(state: &GameState, tracker: &mut NewsTracker, rng: &mut dyn RandomSource) -> GameState {
    if state.paused || !state.game_started || state.game_over {
        return state.clone();
    }
    let settings = state.difficulty.settings();
    let pathogen = &state.pathogen;

    let mut countries: Vec<Country> = state
        .countries
        .iter()
        .map(|c| progress_country(c, pathogen, rng))
        .collect();

    let fresh = spread_between_countries(&mut countries, pathogen, state.day, rng);
    let new_arrivals = fresh.len();
    let recent_transits = merge_transits(&state.recent_transits, fresh, state.day);

    let total_infected: u64 = countries.iter().map(|c| c.infected).sum();
    let total_dead: u64 = countries.iter().map(|c| c.dead).sum();
    let population = state.total_population;

    let visibility = model::visibility(pathogen, total_infected, total_dead, population);
    let global = model::GlobalRatios::new(total_infected, total_dead, population);

    for c in countries.iter_mut() {
        let gain = model::awareness_gain(c, global, visibility, settings.awareness_multiplier);
        c.awareness = (c.awareness + gain).min(100.0);
        for closure in model::roll_closures(c, settings.border_close_chance, rng) {
            debug!(country = %c.id, ?closure, awareness = c.awareness, "route closed");
        }
        c.cure_contribution = model::cure_contribution(c);
    }

    let delta_infected = total_infected as i64 - state.total_infected as i64;
    let delta_dead = total_dead as i64 - state.total_dead as i64;
    let mut dna_points = state.dna_points
        + model::dna_income(delta_infected, delta_dead, settings.dna_gain_multiplier);
    if total_infected > 1000 && rng.next_f64() < 0.1 {
        dna_points += model::dna_bubble(rng.next_f64(), settings.dna_gain_multiplier);
    }

    let contribution: f64 = countries.iter().map(|c| c.cure_contribution).sum();
    let speed = model::cure_speed(
        contribution,
        pathogen,
        ratio(total_dead, population),
        &settings,
    );
    let cure_progress = model::advance_cure(state.cure_progress, speed);

    let total_healthy: u64 = countries.iter().map(|c| c.healthy).sum();
    let eradicated = total_healthy == 0 && total_infected == 0;
    let cured = cure_progress >= 100.0;

    let mut next = GameState {
        countries,
        dna_points,
        day: state.day + 1,
        cure_progress,
        total_infected,
        total_dead,
        game_over: eradicated || cured,
        victory: eradicated,
        visibility,
        recent_transits,
        ..state.clone()
    };

    let headlines = news::generate(state, &next, tracker, rng);
    next.news.extend(headlines);
    if next.news.len() > MAX_NEWS {
        let excess = next.news.len() - MAX_NEWS;
        next.news.drain(..excess);
    }

    debug!(
        day = next.day,
        infected = total_infected,
        dead = total_dead,
        new_arrivals,
        visibility,
        cure = cure_progress,
        dna = dna_points,
        "tick"
    );
    if next.game_over {
        info!(
            day = next.day,
            victory = next.victory,
            dead = total_dead,
            cure = cure_progress,
            "game over"
        );
    }
    next
}
