//! 押し引きの判定と,降りる場合の安全牌の選択を行うモジュール

mod candidate;
mod config;
mod context;
mod handler;
mod strategy;
mod threat;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::*;

pub use self::{
    candidate::DiscardCandidate,
    config::DefenceConfig,
    context::DefenceContext,
    handler::DefenceHandler,
    strategy::Strategy,
    threat::get_threatening_players,
};

/// 打牌の危険度. 宣言順に安全.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Danger {
    Safe,       // 現物, 4枚見えの字牌など
    AlmostSafe, // 単騎待ちのみ残る
    Suji,       // 筋
    Kabe,       // 壁 (ノーチャンス)
    #[default]
    Unknown, // 未評価
}

impl fmt::Display for Danger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenceTile {
    pub tile: Tile,
    pub danger: Danger,
}

impl DefenceTile {
    pub fn new(tile: Tile, danger: Danger) -> Self {
        Self {
            tile: tile.to_normal(),
            danger,
        }
    }

    #[inline]
    pub fn safe(tile: Tile) -> Self {
        Self::new(tile, Danger::Safe)
    }
}

impl fmt::Display for DefenceTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tile, self.danger)
    }
}

#[test]
fn test_danger_order() {
    assert!(Danger::Safe < Danger::AlmostSafe);
    assert!(Danger::AlmostSafe < Danger::Suji);
    assert!(Danger::Suji < Danger::Kabe);
    assert!(Danger::Kabe < Danger::Unknown);
    assert_eq!(Danger::default(), Danger::Unknown);
    assert_eq!(DefenceTile::safe(Tile(TM, 0)).tile, Tile(TM, 5));
}
