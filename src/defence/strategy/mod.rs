mod impossible_wait;
mod kabe;
mod suji;

use super::*;

/// 安全牌の推定方法. いずれも自分の手牌にある牌のみを返す.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ImpossibleWait, // 字牌の見え方から待ちになり得ない牌
    Kabe,           // 場に見えている牌から順子で待てない牌
    Suji,           // 脅威となっている家の捨て牌の筋
}

impl Strategy {
    pub fn find_tiles_to_discard(self, ctx: &DefenceContext<'_>, threats: &[&Player]) -> Vec<DefenceTile> {
        match self {
            Self::ImpossibleWait => impossible_wait::find_tiles_to_discard(ctx, threats),
            Self::Kabe => kabe::find_tiles_to_discard(ctx, threats),
            Self::Suji => suji::find_tiles_to_discard(ctx, threats),
        }
    }
}

#[cfg(test)]
fn discard_all(stg: &mut Stage, seat: Seat, exp: &str) {
    for t in crate::util::common::tiles_from_string(exp).unwrap() {
        stg.on_discard(seat, t, false);
    }
}
