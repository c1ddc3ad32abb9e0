//! Property tests for the fold decision and the safe discard selection.

mod common;

use proptest::prelude::*;

use common::*;
use mahjong_defence::defence::{Danger, DefenceConfig, DefenceHandler, DiscardCandidate};
use mahjong_defence::model::*;

fn tile_strategy() -> impl Strategy<Value = Tile> {
    (0..KINDS).prop_map(Tile::from_index)
}

fn hand_strategy(n: usize) -> impl Strategy<Value = Vec<Tile>> {
    prop::collection::vec(tile_strategy(), n)
}

fn safe_set_strategy() -> impl Strategy<Value = Vec<Tile>> {
    prop::collection::vec(tile_strategy(), 0..12)
}

// 手牌の種類ごとの打牌候補 (評価値は全て同じ)
fn candidates_from_hand(hand: &[Tile]) -> Vec<DiscardCandidate> {
    let mut res: Vec<DiscardCandidate> = vec![];
    for &t in hand {
        if !res.iter().any(|c| c.tile_to_discard == t) {
            res.push(DiscardCandidate::new(t, 1, vec![], 4, 0.0));
        }
    }
    res
}

proptest! {
    #[test]
    fn no_threats_never_folds(
        hand in hand_strategy(14),
        shanten in 0i32..5,
        waiting in prop::collection::vec(tile_strategy(), 0..4),
        cost in 0 as Point..50000,
        is_riichi in any::<bool>(),
    ) {
        let mut stg = Stage::new(0);
        stg.players[0].hand = hand.clone();
        stg.players[0].is_riichi = is_riichi;
        let c = DiscardCandidate::new(hand[0], shanten, waiting, 4, 0.0);
        let est = FixedEstimator::new(cost);

        let handler = DefenceHandler::default();
        prop_assert!(!handler.should_go_to_defence(&stg, 0, Some(&c), &est));
        prop_assert!(!handler.should_go_to_defence(&stg, 0, None, &est));
        prop_assert_eq!(est.calls.get(), 0);
    }

    #[test]
    fn tenpai_folds_below_threshold(
        hand in hand_strategy(14),
        waiting in prop::collection::vec(tile_strategy(), 1..4),
        cost in 0 as Point..40000,
        threshold in 1000 as Point..20000,
    ) {
        let mut stg = stage_with_threats(0, &[2]);
        stg.players[0].hand = hand.clone();
        let c = DiscardCandidate::new(hand[0], 0, waiting.clone(), 4, 0.0);
        let est = FixedEstimator::new(cost);

        let handler = DefenceHandler::new(DefenceConfig {
            fold_threshold: threshold,
            ..Default::default()
        });
        prop_assert_eq!(handler.should_go_to_defence(&stg, 0, Some(&c), &est), cost < threshold);
        prop_assert_eq!(est.calls.get(), waiting.len());
    }

    #[test]
    fn iishanten_with_dora_pushes(
        rest in hand_strategy(11),
        cost in 0 as Point..40000,
    ) {
        let mut stg = stage_with_threats(1, &[1, 3]);
        stg.on_dora(tile("m1")); // ドラ: m2
        stg.players[0].hand = [tiles("m222"), rest].concat();
        let c = DiscardCandidate::new(stg.players[0].hand[3], 1, tiles("m3"), 4, 0.0);
        let est = FixedEstimator::new(cost);

        let handler = DefenceHandler::default();
        prop_assert!(!handler.should_go_to_defence(&stg, 0, Some(&c), &est));
        prop_assert_eq!(est.calls.get(), 0);
    }

    #[test]
    fn safe_tiles_dominate(
        hand in hand_strategy(14),
        safe1 in safe_set_strategy(),
        safe2 in safe_set_strategy(),
        two_threats in any::<bool>(),
    ) {
        let seats: &[Seat] = if two_threats { &[1, 2] } else { &[1] };
        let mut stg = stage_with_threats(0, seats);
        stg.players[0].hand = hand.clone();
        for &t in &safe1 {
            stg.players[1].add_safe_tile(t);
        }
        for &t in &safe2 {
            stg.players[2].add_safe_tile(t);
        }
        let mut cands = candidates_from_hand(&hand);
        let overlap = cands.iter().any(|c| {
            stg.players[1].is_safe_tile(c.tile_to_discard)
                || (two_threats && stg.players[2].is_safe_tile(c.tile_to_discard))
        });

        let handler = DefenceHandler::default();
        let res = handler.find_safe_tile_to_discard(&stg, 0, &mut cands);
        if overlap {
            prop_assert!(res.is_some());
        }
        if let Some(c) = res {
            prop_assert_ne!(c.danger, Danger::Unknown);
        }
    }

    #[test]
    fn common_safe_tile_is_safe_against_every_threat(
        safe1 in safe_set_strategy(),
        safe2 in safe_set_strategy(),
    ) {
        // 手牌なし: 現物以外の推定は働かない
        let mut stg = stage_with_threats(1, &[1, 2]);
        for &t in &safe1 {
            stg.players[1].add_safe_tile(t);
        }
        for &t in &safe2 {
            stg.players[2].add_safe_tile(t);
        }
        let mut cands: Vec<DiscardCandidate> = (0..KINDS)
            .map(|i| DiscardCandidate::new(Tile::from_index(i), 1, vec![], 4, 0.0))
            .collect();

        let handler = DefenceHandler::new(DefenceConfig {
            kabe_fallback: false,
            ..Default::default()
        });
        let res = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).map(|c| c.tile_to_discard);

        let (p1, p2) = (&stg.players[1], &stg.players[2]);
        let has_common = p1.safe_tiles.iter().any(|&t| p2.is_safe_tile(t));
        if has_common {
            let t = res.unwrap();
            prop_assert!(p1.is_safe_tile(t) && p2.is_safe_tile(t));
        } else if !p1.safe_tiles.is_empty() {
            // 親の現物が先
            prop_assert!(p1.is_safe_tile(res.unwrap()));
        } else if !p2.safe_tiles.is_empty() {
            prop_assert!(p2.is_safe_tile(res.unwrap()));
        } else {
            prop_assert!(res.is_none());
        }
    }

    #[test]
    fn safe_tile_selection_is_idempotent(
        hand in hand_strategy(14),
        discards in hand_strategy(12),
        safe2 in safe_set_strategy(),
        suit in prop::option::of(0..TZ),
    ) {
        let mut stg = stage_with_threats(0, &[1, 2]);
        stg.players[0].hand = hand.clone();
        for &t in &discards {
            stg.on_discard(1, t, false);
        }
        for &t in &safe2 {
            stg.players[2].add_safe_tile(t);
        }
        stg.players[2].chosen_suit = suit;
        let mut cands = candidates_from_hand(&hand);

        let handler = DefenceHandler::default();
        let first = handler
            .find_safe_tile_to_discard(&stg, 0, &mut cands)
            .map(|c| (c.tile_to_discard, c.danger));
        let dangers: Vec<Danger> = cands.iter().map(|c| c.danger).collect();
        let second = handler
            .find_safe_tile_to_discard(&stg, 0, &mut cands)
            .map(|c| (c.tile_to_discard, c.danger));
        prop_assert_eq!(first, second);
        prop_assert_eq!(dangers, cands.iter().map(|c| c.danger).collect::<Vec<_>>());
    }
}
