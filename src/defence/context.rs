use super::*;

/// 一回の判定の間だけ有効な自家の手牌の集計.
/// 判定の開始時に一度だけ作成し,各戦略に引き回す.
#[derive(Debug)]
pub struct DefenceContext<'a> {
    pub stg: &'a Stage,
    pub seat: Seat,
    pub hand_34: TileCounts,        // 鳴きを含む手牌
    pub closed_hand_34: TileCounts, // 鳴き以外の手牌
}

impl<'a> DefenceContext<'a> {
    pub fn new(stg: &'a Stage, seat: Seat) -> Self {
        let pl = &stg.players[seat];
        Self {
            stg,
            seat,
            hand_34: tiles_to_counts(&pl.tiles()),
            closed_hand_34: tiles_to_counts(pl.closed_hand()),
        }
    }

    // 手牌にある牌 (34種Index順)
    pub fn closed_hand_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.closed_hand_34
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n != 0)
            .map(|(i, _)| Tile::from_index(i))
    }

    // 場に見えている牌と自分の手牌を合わせた枚数
    pub fn visible_tiles(&self) -> TileCounts {
        let mut tc = self.stg.revealed_tiles();
        for (n, &h) in tc.iter_mut().zip(self.closed_hand_34.iter()) {
            *n += h;
        }
        tc
    }
}
