//! The game driven by real tokio timers, with the runtime clock paused.

use std::time::Duration;

use pairterm::{ClickOutcome, Fired, GameConfig, MemoryGame, MemoryTimer, Phase, TokioScheduler};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedReceiver;

type Game = MemoryGame<TokioScheduler<MemoryTimer>, StdRng>;

fn tokio_game(seed: u64) -> (Game, UnboundedReceiver<Fired<MemoryTimer>>) {
    let (scheduler, timers) = TokioScheduler::new();
    let mut game =
        MemoryGame::new(GameConfig::default(), StdRng::seed_from_u64(seed), scheduler).unwrap();
    game.initialize();
    (game, timers)
}

fn mismatch_for(game: &Game, index: usize) -> usize {
    let deck = &game.state().deck;
    (0..deck.len())
        .find(|i| deck[*i].pair_id != deck[index].pair_id)
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_clock_ticks_through_channel() {
    let (mut game, mut timers) = tokio_game(21);
    assert_eq!(game.handle_card_click(0), ClickOutcome::Flipped);

    for _ in 0..3 {
        let fired = timers.recv().await.expect("clock should tick");
        assert_eq!(fired.event, MemoryTimer::Tick);
        game.handle_timer(fired);
    }
    assert_eq!(game.state().elapsed_seconds, 3);
    assert_eq!(game.formatted_time(), "00:03");
}

#[tokio::test(start_paused = true)]
async fn test_mismatch_turns_back_after_delay() {
    let (mut game, mut timers) = tokio_game(22);
    let start = tokio::time::Instant::now();
    let other = mismatch_for(&game, 0);
    game.handle_card_click(0);
    assert_eq!(game.handle_card_click(other), ClickOutcome::Mismatched);

    while game.state().locked {
        let fired = timers.recv().await.expect("resolution should fire");
        game.handle_timer(fired);
    }
    assert!(game.state().face_up.is_empty());
    assert!(game.is_card_selectable(0));
    assert!(start.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_firings_queued_before_reset_are_dropped() {
    let (mut game, mut timers) = tokio_game(23);
    let other = mismatch_for(&game, 0);
    game.handle_card_click(0);
    game.handle_card_click(other);

    // Both the first tick and the resolution land in the channel unhandled
    tokio::time::sleep(Duration::from_millis(1500)).await;

    game.reset();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.handle_card_click(3), ClickOutcome::Flipped);

    let mut stale = 0;
    while let Ok(fired) = timers.try_recv() {
        stale += 1;
        game.handle_timer(fired);
    }
    assert_eq!(stale, 2);
    assert_eq!(game.state().face_up, vec![3]);
    assert!(!game.state().locked);
    assert!(game.state().timer_running);
    assert_eq!(game.state().elapsed_seconds, 0);

    // The fresh clock still runs after the stale firings are dropped
    let fired = timers.recv().await.expect("new clock should tick");
    game.handle_timer(fired);
    assert_eq!(game.state().elapsed_seconds, 1);
}
