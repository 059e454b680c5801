use outbreak_core::{validate_state, Difficulty, GameState};
use outbreak_runtime::{EvolveError, Session};
use proptest::prelude::*;

fn run(
    difficulty: Difficulty,
    seed: u64,
    country: &str,
    days: u32,
    buys: &[&str],
) -> Vec<GameState> {
    let mut session = Session::new(difficulty, seed);
    session.start_game(country, "Scenario").unwrap();
    let mut states = vec![session.state().clone()];
    for day in 0..days {
        if day % 10 == 0 && !session.state().game_over {
            for id in buys {
                let _ = session.evolve(id);
            }
        }
        states.push(session.tick().clone());
    }
    states
}

#[test]
fn usa_start() {
    let mut session = Session::new(Difficulty::Normal, 42);
    session.start_game("usa", "Patient Zero").unwrap();
    let s = session.state();
    assert_eq!(s.dna_points, 10);
    assert_eq!(s.total_infected, 331);
    assert_eq!(s.day, 0);
    assert!(!s.paused);
}

#[test]
fn low_dna_purchase_is_a_no_op() {
    let mut session = Session::new(Difficulty::Hard, 1);
    session.start_game("egypt", "Poor").unwrap();
    let before = session.state().clone();
    let store = session.store().clone();
    assert!(matches!(
        session.evolve("total_organ_failure"),
        Err(EvolveError::InsufficientDna { available: 5, .. })
    ));
    assert_eq!(session.state(), &before);
    assert_eq!(session.store(), &store);
}

#[test]
fn aggressive_build_spreads_and_kills() {
    let buys = [
        "coughing", "sneezing", "air_1", "water_1", "rapid_mutation", "air_2", "nausea",
        "vomiting", "cold_res_1", "heat_res_1", "drug_res_1", "pneumonia", "necrosis",
        "doomsday_protocol",
    ];
    let states = run(Difficulty::Easy, 11, "india", 1500, &buys);
    let last = states.last().unwrap();
    assert!(last.total_dead > 0);
    assert!(last.pathogen.symptoms.len() >= 2);
    assert!(last.countries.iter().filter(|c| c.infected + c.dead > 0).count() > 1);
}

#[test]
fn news_is_capped_and_ordered_by_day() {
    let states = run(Difficulty::Normal, 5, "uk", 300, &["coughing", "air_1"]);
    for s in &states {
        assert!(s.news.len() <= outbreak_core::MAX_NEWS);
        assert!(s.news.windows(2).all(|w| w[0].day <= w[1].day));
        assert!(s.recent_transits.len() <= outbreak_core::MAX_TRANSITS);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn tick_invariants_hold(
        seed in any::<u64>(),
        country in prop::sample::select(vec!["usa", "china", "brazil", "iceland", "egypt"]),
        difficulty in prop::sample::select(Difficulty::ALL.to_vec())
    ) {
        let states = run(difficulty, seed, country, 150, &["coughing", "air_1", "rash"]);
        for pair in states.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            prop_assert!(validate_state(next).is_ok());
            prop_assert!(next.cure_progress >= prev.cure_progress || next.game_over);
            prop_assert!((0.0..=100.0).contains(&next.visibility));
            for (a, b) in prev.countries.iter().zip(&next.countries) {
                prop_assert_eq!(a.healthy + a.infected + a.dead, b.healthy + b.infected + b.dead);
                prop_assert!(b.awareness >= a.awareness);
                prop_assert!(b.dead >= a.dead);
                prop_assert!(a.borders_open || !b.borders_open);
                prop_assert!(a.airport_open || !b.airport_open);
                prop_assert!(a.seaport_open || !b.seaport_open);
            }
            if prev.game_over {
                prop_assert_eq!(prev, next);
            }
        }
    }
}
