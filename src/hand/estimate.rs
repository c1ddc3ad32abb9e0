use serde::Serialize;
use thiserror::Error;

use super::point::*;
use super::win::*;
use crate::model::*;
use crate::util::common::count_dora;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("invalid number of tiles: {0}")]
    InvalidTileCount(usize),
    #[error("not a winning hand")]
    NotWinningHand,
    #[error("no yaku")]
    NoYaku,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandCost {
    pub main: Point,       // ロン和了時の点数
    pub additional: Point, // ツモ和了時の子の支払い
    pub fu: usize,
    pub fan: usize,
    pub yakuman: usize,
    pub yakus: Vec<(&'static str, usize)>,
    pub title: String,
}

// 聴牌形の手牌に和了牌を加えた場合の打点を見積もる
pub trait HandValueEstimator {
    // tiles: 鳴きを含む13枚 (槓子は4枚) の手牌
    fn estimate_hand_value(&self, winning_tile: Tile, tiles: &[Tile]) -> Result<HandCost, EstimateError>;
}

// 簡易打点見積もり
// 役の判定は手牌の枚数のみで可能なものに限り,符は固定で扱う
#[derive(Debug, Clone)]
pub struct HandEstimator<'a> {
    melds: &'a [Meld],
    doras: &'a [Tile],
    is_dealer: bool,
    prevalent_wind: Tnum,
    seat_wind: Tnum,
    assume_riichi: bool, // 門前の場合はリーチをかける前提で見積もる
}

impl<'a> HandEstimator<'a> {
    pub fn new(stg: &'a Stage, seat: Seat) -> Self {
        Self {
            melds: &stg.players[seat].melds,
            doras: &stg.doras,
            is_dealer: stg.is_dealer(seat),
            prevalent_wind: stg.get_prevalent_wind(),
            seat_wind: stg.get_seat_wind(seat),
            assume_riichi: false,
        }
    }

    pub fn assume_riichi(mut self, flag: bool) -> Self {
        self.assume_riichi = flag;
        self
    }

    fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.meld_type == MeldType::Ankan)
    }

    // 数牌の種類と字牌の有無から染め手の役を判定
    fn calc_flush(&self, counts: &TileCounts) -> Option<(&'static str, usize)> {
        let mut suits = [false; TYPE];
        for (i, &n) in counts.iter().enumerate() {
            if n != 0 {
                suits[Tile::from_index(i).0] = true;
            }
        }
        if suits[..TZ].iter().filter(|&&b| b).count() != 1 {
            return None;
        }
        let menzen = self.is_menzen();
        Some(if suits[TZ] {
            ("混一色", if menzen { 3 } else { 2 })
        } else {
            ("清一色", if menzen { 6 } else { 5 })
        })
    }
}

impl HandValueEstimator for HandEstimator<'_> {
    fn estimate_hand_value(&self, winning_tile: Tile, tiles: &[Tile]) -> Result<HandCost, EstimateError> {
        let mut all = tiles.to_vec();
        all.push(winning_tile);
        let counts = tiles_to_counts(&all);

        // 副露を除いた手牌
        let mut concealed = counts;
        let mut n_meld_tiles = 0;
        for m in self.melds {
            for t in &m.tiles {
                let i = t.to_index();
                if concealed[i] == 0 {
                    return Err(EstimateError::InvalidTileCount(all.len()));
                }
                concealed[i] -= 1;
                n_meld_tiles += 1;
            }
        }
        if all.len() - n_meld_tiles + 3 * self.melds.len() != 14 {
            return Err(EstimateError::InvalidTileCount(all.len()));
        }

        let menzen = self.is_menzen();
        let is_normal = is_normal_win(&concealed);
        let is_chiitoitsu = self.melds.is_empty() && !is_normal && is_chiitoitsu_win(&concealed);
        let is_kokushi = self.melds.is_empty() && is_kokushimusou_win(&concealed);
        if !is_normal && !is_chiitoitsu && !is_kokushi {
            return Err(EstimateError::NotWinningHand);
        }

        let mut yakus = vec![];
        let mut yakuman = 0;
        if is_kokushi {
            yakus.push(("国士無双", 1));
            yakuman = 1;
        } else {
            if menzen && self.assume_riichi {
                yakus.push(("立直", 1));
            }
            if all.iter().all(|t| t.is_simple()) {
                yakus.push(("断幺九", 1));
            }
            if is_chiitoitsu {
                yakus.push(("七対子", 2));
            }
            // 字牌は順子にならないため3枚以上あれば刻子
            for ni in DW..=DR {
                if counts[Tile(TZ, ni).to_index()] >= 3 {
                    yakus.push(("役牌", 1));
                }
            }
            if counts[Tile(TZ, self.seat_wind).to_index()] >= 3 {
                yakus.push(("自風牌", 1));
            }
            if counts[Tile(TZ, self.prevalent_wind).to_index()] >= 3 {
                yakus.push(("場風牌", 1));
            }
            if let Some(y) = self.calc_flush(&counts) {
                yakus.push(y);
            }
        }

        if yakus.is_empty() {
            return Err(EstimateError::NoYaku);
        }

        let mut fan = 0;
        if yakuman == 0 {
            fan = yakus.iter().map(|y| y.1).sum();
            let n_dora = count_dora(&counts, self.doras);
            let n_red_dora = all.iter().filter(|t| t.is_suit() && t.1 == 0).count();
            if n_dora != 0 {
                yakus.push(("ドラ", n_dora));
            }
            if n_red_dora != 0 {
                yakus.push(("赤ドラ", n_red_dora));
            }
            fan += n_dora + n_red_dora;
        }

        let fu = if is_chiitoitsu { 25 } else { 30 };
        let (points, title) = calc_points(self.is_dealer, fu, fan, yakuman);
        Ok(HandCost {
            main: points.0,
            additional: points.1,
            fu,
            fan,
            yakuman,
            yakus,
            title,
        })
    }
}

#[cfg(test)]
fn tiles(exp: &str) -> Vec<Tile> {
    crate::util::common::tiles_from_string(exp).unwrap()
}

#[test]
fn test_estimate_closed_hand() {
    let stg = Stage::new(1);
    let est = HandEstimator::new(&stg, 0);

    // 断幺九のみ
    let cost = est
        .estimate_hand_value(Tile(TS, 5), &tiles("m234567p345s6788"))
        .unwrap();
    assert_eq!(cost.fan, 1);
    assert_eq!(cost.main, 1000);

    // 役なし
    let err = est.estimate_hand_value(Tile(TS, 9), &tiles("m123567p345s7899"));
    assert_eq!(err, Err(EstimateError::NoYaku));

    // リーチ前提なら和了可能
    let cost = est
        .assume_riichi(true)
        .estimate_hand_value(Tile(TS, 9), &tiles("m123567p345s7899"))
        .unwrap();
    assert_eq!(cost.yakus, vec![("立直", 1)]);
}

#[test]
fn test_estimate_errors() {
    let stg = Stage::new(0);
    let est = HandEstimator::new(&stg, 0);
    assert_eq!(
        est.estimate_hand_value(Tile(TM, 1), &tiles("m123")),
        Err(EstimateError::InvalidTileCount(5))
    );
    assert_eq!(
        est.estimate_hand_value(Tile(TZ, 1), &tiles("m147p258s369z1234")),
        Err(EstimateError::NotWinningHand)
    );
}

#[test]
fn test_estimate_open_honitsu_dealer() {
    let mut stg = Stage::new(0);
    stg.doras = tiles("z6"); // ドラ: 中
    stg.players[0].melds.push(Meld {
        meld_type: MeldType::Pon,
        tiles: vec![Tile(TZ, DR); 3],
    });
    stg.players[0].hand = tiles("m12345677z11");
    let est = HandEstimator::new(&stg, 0);

    // 中 (役牌1) + 東 (自風,場風) + 混一色(副露2) + ドラ3
    let cost = est
        .estimate_hand_value(Tile(TZ, WE), &stg.players[0].tiles())
        .unwrap();
    assert_eq!(cost.fan, 1 + 2 + 2 + 3);
    assert_eq!(cost.main, 24000);
}
