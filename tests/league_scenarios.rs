use rand::SeedableRng;
use rand::rngs::StdRng;

use pistol_league_ranking::bracket::SlotPos;
use pistol_league_ranking::config::{AppConfig, RatingSettings};
use pistol_league_ranking::domain::{EventKind, MatchResult, RosterEntry};
use pistol_league_ranking::rating::RatingModel;
use pistol_league_ranking::services::league::{LeagueEngine, LeagueService};
use pistol_league_ranking::storage::PersistedState;

fn engine() -> LeagueEngine {
    LeagueEngine::new(PersistedState::default(), &RatingSettings::default())
}

fn roster(ids: &[&str]) -> Vec<RosterEntry> {
    ids.iter()
        .map(|id| RosterEntry::new(*id, id.to_uppercase()))
        .collect()
}

#[test]
fn fresh_players_ten_to_five() {
    let model = RatingModel::new(500.0, 100.0);
    assert!((model.expected_outcome(1500.0, 1500.0) - 0.5).abs() < 1e-12);

    let mut engine = engine();
    let report = engine.report_match(MatchResult::new("A", 10, "B", 5)).unwrap();

    assert!((report.update.delta - 16.67).abs() < 0.01);
    assert!((report.update.new_rating_a - 1516.67).abs() < 0.01);
    assert!((report.update.new_rating_b - 1483.33).abs() < 0.01);
    assert_eq!(engine.registry().get("A").unwrap().wins, 1);
    assert_eq!(engine.registry().get("B").unwrap().losses, 1);
}

#[test]
fn five_player_tournament_then_first_round_result() {
    let mut engine = engine();
    engine
        .start_tournament(roster(&["a", "b", "c", "d", "e"]), &mut StdRng::seed_from_u64(21))
        .unwrap();

    let bracket = &engine.tournament().unwrap().bracket;
    assert_eq!(bracket.round_zero_size(), 8);

    let byes = bracket.byes();
    assert_eq!(byes.len(), 3);
    for &pos in &byes {
        let (low, high) = bracket.children(pos).unwrap();
        assert!(bracket.slot(low).is_none() && bracket.slot(high).is_none());
    }

    // Find the one first-round pairing and play it.
    let pair_start = (0..8)
        .step_by(2)
        .find(|&i| bracket.slot(SlotPos::new(0, i)).is_some())
        .unwrap();
    let low = SlotPos::new(0, pair_start);
    let high = bracket.opponent(low);
    let parent = bracket.parent(low).unwrap();
    let low_id = bracket.slot(low).unwrap().player_id.clone();
    let high_id = bracket.slot(high).unwrap().player_id.clone();

    let report = engine
        .report_match(MatchResult::new(low_id.clone(), 3, high_id.clone(), 8))
        .unwrap();
    assert!(report.bracket_advanced);

    let bracket = &engine.tournament().unwrap().bracket;
    assert_eq!(bracket.slot(low).unwrap().score, Some(3));
    assert_eq!(bracket.slot(high).unwrap().score, Some(8));
    let promoted = bracket.slot(parent).unwrap();
    assert_eq!(promoted.player_id, high_id);
    assert_eq!(promoted.score, None);

    // Reporting the same pairing again rates the players but leaves the bracket alone.
    let before = bracket.clone();
    let again = engine
        .report_match(MatchResult::new(low_id, 9, high_id, 1))
        .unwrap();
    assert!(!again.bracket_advanced);
    assert_eq!(engine.tournament().unwrap().bracket, before);
}

#[test]
fn air_scores_over_two_sessions() {
    let mut engine = engine();
    engine.record_scores("air", &[("P".to_string(), 550)]).unwrap();
    engine.record_scores("air", &[("P".to_string(), 560)]).unwrap();

    let record = engine.registry().get("P").unwrap();
    assert_eq!(record.best_for(EventKind::Air), Some(560));
    assert_eq!(record.average_for(EventKind::Air), Some(555.0));
    assert_eq!(record.scores.len(), 2);
}

#[test]
fn state_survives_a_restart() {
    let path = std::env::temp_dir()
        .join("pistol_league_scenarios")
        .join("restart.json");
    let _ = std::fs::remove_file(&path);
    let config = AppConfig::new().with_state_path(path.to_string_lossy().to_string());

    {
        let mut league = LeagueService::open(&config).unwrap();
        league.record_scores("sport", &[("x".to_string(), 571)]).unwrap();
        league.start_tournament(roster(&["x", "y"])).unwrap();
        league.report_match(MatchResult::new("y", 6, "x", 2)).unwrap();
    }

    let league = LeagueService::open(&config).unwrap();
    let engine = league.engine();
    assert_eq!(engine.registry().len(), 2);
    assert_eq!(engine.registry().get("x").unwrap().best_for(EventKind::Sport), Some(571));
    assert_eq!(engine.champion().unwrap().id, "y");
    assert_eq!(engine.champion().unwrap().label(), "Y");

    std::fs::remove_file(path).unwrap();
}
