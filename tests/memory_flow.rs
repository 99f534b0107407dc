//! End-to-end turns against a virtual clock.

use std::time::Duration;

use pairterm::{
    ClickOutcome, GameConfig, IgnoreReason, ManualScheduler, MemoryGame, MemoryTimer, Phase,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

type Game = MemoryGame<ManualScheduler<MemoryTimer>, StdRng>;

fn game_with(config: GameConfig, seed: u64) -> Game {
    let mut game =
        MemoryGame::new(config, StdRng::seed_from_u64(seed), ManualScheduler::new()).unwrap();
    game.initialize();
    game
}

fn advance(game: &mut Game, ms: u64) {
    for fired in game.scheduler_mut().advance(Duration::from_millis(ms)) {
        game.handle_timer(fired);
    }
}

fn partner_of(game: &Game, index: usize) -> usize {
    let deck = &game.state().deck;
    deck.iter()
        .enumerate()
        .position(|(i, card)| i != index && card.pair_id == deck[index].pair_id)
        .unwrap()
}

#[test]
fn test_full_game_with_mistakes() {
    let mut game = game_with(GameConfig::default(), 2024);
    let len = game.state().deck.len();

    for index in 0..len {
        if game.is_card_face_up(index) {
            continue;
        }
        // Miss once whenever a wrong card is available, then find the partner
        let partner = partner_of(&game, index);
        let wrong = (0..len).find(|&i| i != index && i != partner && !game.is_card_face_up(i));

        if let Some(wrong) = wrong {
            assert_eq!(game.handle_card_click(index), ClickOutcome::Flipped);
            assert_eq!(game.handle_card_click(wrong), ClickOutcome::Mismatched);
            assert_eq!(
                game.handle_card_click(partner),
                ClickOutcome::Ignored(IgnoreReason::Locked)
            );
            advance(&mut game, 1000);
            assert!(!game.state().locked);
        }

        game.handle_card_click(index);
        game.handle_card_click(partner);
        advance(&mut game, 250);
    }

    assert_eq!(game.phase(), Phase::Won);
    assert_eq!(game.state().score, 80);
    assert_eq!(game.state().matched.len(), len);

    let frozen = game.state().elapsed_seconds;
    assert!(frozen > 0);
    advance(&mut game, 10_000);
    assert_eq!(game.state().elapsed_seconds, frozen);

    let snapshot = game.snapshot();
    assert!(snapshot.won);
    assert!(!snapshot.timer_running);
    assert!(snapshot.cards.iter().all(|c| c.face_up && c.matched && !c.selectable));
}

#[test]
fn test_custom_config_scoring_and_delay() {
    let config = GameConfig {
        symbols: vec!["A".into(), "B".into()],
        match_points: 25,
        mismatch_delay_ms: 300,
        ..GameConfig::default()
    };
    let mut game = game_with(config, 8);
    assert_eq!(game.state().deck.len(), 4);

    let partner = partner_of(&game, 0);
    let wrong = (1..4).find(|&i| i != partner).unwrap();

    game.handle_card_click(0);
    game.handle_card_click(wrong);
    advance(&mut game, 299);
    assert!(game.state().locked);
    advance(&mut game, 1);
    assert!(!game.state().locked);

    game.handle_card_click(0);
    let pair_id = game.state().deck[0].pair_id;
    assert_eq!(
        game.handle_card_click(partner),
        ClickOutcome::Matched { pair_id }
    );
    assert_eq!(game.state().score, 25);
}

#[test]
fn test_reset_mid_mismatch_starts_clean_game() {
    let mut game = game_with(GameConfig::default(), 77);
    let partner = partner_of(&game, 0);
    let wrong = (1..16).find(|&i| i != partner).unwrap();

    game.handle_card_click(0);
    game.handle_card_click(wrong);
    advance(&mut game, 400);
    game.reset();

    // The old resolution must not unlock or clear anything in the new game
    let first = game.handle_card_click(4);
    assert_eq!(first, ClickOutcome::Flipped);
    advance(&mut game, 5000);
    assert_eq!(game.state().face_up, vec![4]);
    assert_eq!(game.state().elapsed_seconds, 5);
    assert_eq!(game.state().score, 0);
}

#[test]
fn test_formatted_time() {
    let mut game = game_with(GameConfig::default(), 1);
    game.handle_card_click(0);
    advance(&mut game, 125_000);
    assert_eq!(game.formatted_time(), "02:05");
}
