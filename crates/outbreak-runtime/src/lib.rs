#![deny(warnings)]

//! Game runtime: the daily tick, evolution purchases, headline generation and
//! the [`Session`] that owns a running game.

pub mod engine;
pub mod evolve;
pub mod news;
pub mod session;

pub use engine::{
    create_initial_state, set_speed, start_game, tick, tick_interval, toggle_pause, EngineError,
};
pub use evolve::{
    evolve_ability, evolve_special_ability, evolve_symptom, evolve_transmission, EvolveError,
};
pub use news::{generate as generate_news, NewsTracker};
pub use session::Session;
