#![deny(warnings)]

//! Headless driver: plays one game from a run file or flags and reports it.

mod config;

use anyhow::{Context, Result};
use config::{Purchase, RunConfig};
use outbreak_core::validate_state;
use outbreak_runtime::{EvolveError, Session};
use persistence::Snapshot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Try every due purchase in order. Purchases short on DNA stay queued;
/// any other rejection drops them.
fn run_purchases(session: &mut Session, pending: &mut Vec<Purchase>) {
    let day = session.state().day;
    pending.retain(|p| {
        if p.day > day {
            return true;
        }
        match session.evolve(&p.item) {
            Ok(()) => {
                info!(day, item = %p.item, dna = session.state().dna_points, "evolved");
                false
            }
            Err(EvolveError::InsufficientDna { .. }) => true,
            Err(err) => {
                warn!(day, item = %p.item, %err, "dropping purchase");
                false
            }
        }
    });
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = RunConfig::from_args(std::env::args().skip(1)).context("reading configuration")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        build = env!("OUTBREAK_GIT_SHA"),
        difficulty = %cfg.difficulty,
        country = %cfg.country,
        days = cfg.days,
        seed = cfg.seed,
        "starting outbreak"
    );

    let mut session = Session::with_config(cfg.difficulty, &cfg.sim_config());
    session
        .start_game(&cfg.country, &cfg.pathogen)
        .with_context(|| format!("starting in {}", cfg.country))?;

    let mut pending = cfg.purchases.clone();
    pending.sort_by_key(|p| p.day);

    for _ in 0..cfg.days {
        if session.state().game_over {
            break;
        }
        run_purchases(&mut session, &mut pending);
        let state = session.tick();

        for item in state.news.iter().filter(|n| n.day == state.day) {
            info!(day = item.day, category = item.category.as_str(), "{}", item.headline);
        }

        if cfg.realtime {
            std::thread::sleep(session.tick_interval());
        }
    }

    let state = session.state();
    validate_state(state).context("final state failed validation")?;
    if !pending.is_empty() {
        warn!(count = pending.len(), "purchases never made");
    }

    let outcome = match (state.game_over, state.victory) {
        (true, true) => "eradicated humanity",
        (true, false) => "cured",
        _ => "ongoing",
    };
    let reached = state
        .countries
        .iter()
        .filter(|c| c.infected > 0 || c.dead > 0)
        .count();
    println!(
        "{} | day {} | outcome: {} | infected: {} | dead: {} | healthy: {}",
        state.pathogen.name,
        state.day,
        outcome,
        state.total_infected,
        state.total_dead,
        state.total_healthy()
    );
    println!(
        "countries reached: {}/{} | cure: {:.1}% | visibility: {:.1} | dna: {} | symptoms: {}",
        reached,
        state.countries.len(),
        state.cure_progress,
        state.visibility,
        state.dna_points,
        state.pathogen.symptoms.len()
    );

    if cfg.dump_json {
        let snapshot = Snapshot::capture(&session)?;
        println!("{}", snapshot.to_json()?);
    }
    Ok(())
}
