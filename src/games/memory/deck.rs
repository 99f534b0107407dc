use rand::seq::SliceRandom;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

/// A single card. Immutable once dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub pair_id: u32,
    pub symbol: String,
}

pub type Deck = Vec<Card>;

/// Build two cards per symbol and shuffle them.
///
/// Ids are assigned 0..2K in construction order, so the two cards of
/// symbol `i` get ids `2i` and `2i + 1` and share `pair_id = i`. The
/// shuffle is a Fisher-Yates permutation drawn from `rng`.
pub fn generate_deck<S, R>(symbols: &[S], rng: &mut R) -> Deck
where
    S: AsRef<str>,
    R: RngCore + ?Sized,
{
    let mut next_id = 0u32;
    let mut deck: Deck = symbols
        .iter()
        .enumerate()
        .flat_map(|(index, symbol)| {
            let pair_id = index as u32;
            let symbol = symbol.as_ref();
            let first = Card {
                id: next_id,
                pair_id,
                symbol: symbol.to_string(),
            };
            let second = Card {
                id: next_id + 1,
                pair_id,
                symbol: symbol.to_string(),
            };
            next_id += 2;
            [first, second]
        })
        .collect();

    deck.shuffle(rng);
    debug_assert!(is_well_formed(&deck), "dealt a malformed deck");
    deck
}

/// Even length, unique ids, every pair id exactly twice.
pub fn is_well_formed(deck: &[Card]) -> bool {
    use std::collections::{HashMap, HashSet};

    if deck.len() % 2 != 0 {
        return false;
    }
    let ids: HashSet<u32> = deck.iter().map(|card| card.id).collect();
    if ids.len() != deck.len() {
        return false;
    }
    let mut pairs: HashMap<u32, usize> = HashMap::new();
    for card in deck {
        *pairs.entry(card.pair_id).or_default() += 1;
    }
    pairs.values().all(|&count| count == 2)
}
