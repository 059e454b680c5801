//! One game: state, upgrade catalogs, news tracker and a seeded RNG.

use crate::engine::{self, EngineError};
use crate::evolve::{self, EvolveError};
use crate::news::NewsTracker;
use outbreak_core::{Difficulty, GameState, SimConfig, UpgradeStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Owns everything a running game mutates.
///
/// Failed operations leave the session exactly as it was.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    store: UpgradeStore,
    news: NewsTracker,
    rng: ChaCha8Rng,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut store = UpgradeStore::new();
        let state = engine::create_initial_state(difficulty, &mut store);
        info!(%difficulty, seed, "session created");
        Self {
            state,
            store,
            news: NewsTracker::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A session configured from `config`; the speed is clamped to 1..=3.
    pub fn with_config(difficulty: Difficulty, config: &SimConfig) -> Self {
        let mut session = Self::new(difficulty, config.rng_seed);
        session.state = engine::set_speed(&session.state, config.game_speed);
        session
    }

    /// Rebuild a session from saved parts. `rng` carries the stream position.
    pub fn from_parts(
        state: GameState,
        store: UpgradeStore,
        news: NewsTracker,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            state,
            store,
            news,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &UpgradeStore {
        &self.store
    }

    pub fn news(&self) -> &NewsTracker {
        &self.news
    }

    pub fn rng(&self) -> &ChaCha8Rng {
        &self.rng
    }

    /// Throw the current game away and start fresh at `difficulty`.
    pub fn restart(&mut self, difficulty: Difficulty) {
        self.state = engine::create_initial_state(difficulty, &mut self.store);
        self.news = NewsTracker::default();
        info!(%difficulty, "session restarted");
    }

    pub fn start_game(&mut self, country_id: &str, pathogen_name: &str) -> Result<(), EngineError> {
        let mut news = self.news.clone();
        match engine::start_game(&self.state, country_id, pathogen_name, &mut news) {
            Ok(next) => {
                self.state = next;
                self.news = news;
                Ok(())
            }
            Err(err) => {
                debug!(country = country_id, %err, "start rejected");
                Err(err)
            }
        }
    }

    /// Advance one day and return the new state.
    pub fn tick(&mut self) -> &GameState {
        self.state = engine::tick(&self.state, &mut self.news, &mut self.rng);
        &self.state
    }

    pub fn toggle_pause(&mut self) {
        self.state = engine::toggle_pause(&self.state);
    }

    pub fn set_speed(&mut self, speed: u8) {
        self.state = engine::set_speed(&self.state, speed);
    }

    /// Wall-clock time between ticks at the current speed.
    pub fn tick_interval(&self) -> Duration {
        engine::tick_interval(self.state.game_speed)
    }

    fn purchase(
        &mut self,
        kind: &'static str,
        id: &str,
        op: fn(&GameState, &mut UpgradeStore, &str) -> Result<GameState, EvolveError>,
    ) -> Result<(), EvolveError> {
        match op(&self.state, &mut self.store, id) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(err) => {
                debug!(kind, item = id, %err, "purchase rejected");
                Err(err)
            }
        }
    }

    pub fn evolve_symptom(&mut self, id: &str) -> Result<(), EvolveError> {
        self.purchase("symptom", id, evolve::evolve_symptom)
    }

    pub fn evolve_transmission(&mut self, id: &str) -> Result<(), EvolveError> {
        self.purchase("transmission", id, evolve::evolve_transmission)
    }

    pub fn evolve_ability(&mut self, id: &str) -> Result<(), EvolveError> {
        self.purchase("ability", id, evolve::evolve_ability)
    }

    pub fn evolve_special_ability(&mut self, id: &str) -> Result<(), EvolveError> {
        self.purchase("special", id, evolve::evolve_special_ability)
    }

    /// Buy `id` from whichever catalog holds it.
    pub fn evolve(&mut self, id: &str) -> Result<(), EvolveError> {
        use outbreak_core::CatalogItem;
        let item = self
            .store
            .find(id)
            .ok_or_else(|| EvolveError::UnknownItem(id.to_string()))?;
        debug!(item = item.id(), name = item.name(), cost = item.cost(), "evolving");
        match item {
            CatalogItem::Symptom(_) => self.evolve_symptom(id),
            CatalogItem::Transmission(_) => self.evolve_transmission(id),
            CatalogItem::Resistance(_) => self.evolve_ability(id),
            CatalogItem::Special(_) => self.evolve_special_ability(id),
        }
    }
}
