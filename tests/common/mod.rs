#![allow(dead_code)]

use std::cell::Cell;

use mahjong_defence::defence::DiscardCandidate;
use mahjong_defence::hand::{EstimateError, HandCost, HandValueEstimator};
use mahjong_defence::model::*;
use mahjong_defence::util::common::tiles_from_string;

pub fn tiles(exp: &str) -> Vec<Tile> {
    tiles_from_string(exp).unwrap()
}

pub fn tile(exp: &str) -> Tile {
    tiles(exp)[0]
}

pub fn candidate(exp: &str, shanten: i32, waiting: &str, tiles_count: usize) -> DiscardCandidate {
    DiscardCandidate::new(tile(exp), shanten, tiles(waiting), tiles_count, 0.0)
}

// 手牌によらず固定の打点を返す見積もり. 呼び出し回数を記録する.
pub struct FixedEstimator {
    pub main: Option<Point>,
    pub calls: Cell<usize>,
}

impl FixedEstimator {
    pub fn new(main: Point) -> Self {
        Self {
            main: Some(main),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            main: None,
            calls: Cell::new(0),
        }
    }
}

impl HandValueEstimator for FixedEstimator {
    fn estimate_hand_value(&self, _winning_tile: Tile, _tiles: &[Tile]) -> Result<HandCost, EstimateError> {
        self.calls.set(self.calls.get() + 1);
        let main = self.main.ok_or(EstimateError::NoYaku)?;
        Ok(HandCost {
            main,
            additional: 0,
            fu: 30,
            fan: 1,
            yakuman: 0,
            yakus: vec![],
            title: String::new(),
        })
    }
}

// seatsの家を脅威とした局面 (自分は0番)
pub fn stage_with_threats(dealer: Seat, seats: &[Seat]) -> Stage {
    let mut stg = Stage::new(dealer);
    for &s in seats {
        stg.players[s].is_threatening = true;
    }
    stg
}
