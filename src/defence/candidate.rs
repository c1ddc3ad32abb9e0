use std::cmp::Ordering;

use super::*;
use crate::util::misc::vec_to_string;

/// 打牌候補. 向聴数,待ち,評価値は呼び出し側で計算済みのものを受け取り,
/// 危険度のみこのモジュールで書き込む.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscardCandidate {
    /// 打牌
    pub tile_to_discard: Tile,
    /// 打牌後の向聴数
    pub shanten: i32,
    /// 打牌後の有効牌 (聴牌の場合は和了牌)
    #[serde(default)]
    pub waiting: Vec<Tile>,
    /// 有効牌の残り枚数
    #[serde(default)]
    pub tiles_count: usize,
    #[serde(default)]
    pub valuation: f64,
    #[serde(default)]
    pub danger: Danger,
}

impl DiscardCandidate {
    pub fn new(tile_to_discard: Tile, shanten: i32, waiting: Vec<Tile>, tiles_count: usize, valuation: f64) -> Self {
        Self {
            tile_to_discard,
            shanten,
            waiting,
            tiles_count,
            valuation,
            danger: Danger::Unknown,
        }
    }

    // 危険度 -> 向聴数 -> 有効牌の枚数(多い順) -> 評価値 の順で比較
    pub fn cmp_for_defence(&self, other: &Self) -> Ordering {
        self.danger
            .cmp(&other.danger)
            .then(self.shanten.cmp(&other.shanten))
            .then(other.tiles_count.cmp(&self.tiles_count))
            .then(self.valuation.total_cmp(&other.valuation))
    }
}

impl fmt::Display for DiscardCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} danger: {}, shanten: {}, waiting: {}@{}, valuation: {:.03}",
            self.tile_to_discard,
            self.danger,
            self.shanten,
            vec_to_string(&self.waiting),
            self.tiles_count,
            self.valuation,
        )
    }
}

#[test]
fn test_cmp_for_defence() {
    let mut a = DiscardCandidate::new(Tile(TM, 1), 1, vec![], 10, 5.0);
    let mut b = DiscardCandidate::new(Tile(TM, 9), 0, vec![], 4, 1.0);

    // 危険度が同じなら向聴数の小さい方
    assert_eq!(a.cmp_for_defence(&b), Ordering::Greater);

    // 危険度が最優先
    a.danger = Danger::Suji;
    assert_eq!(a.cmp_for_defence(&b), Ordering::Less);

    // 有効牌の枚数は多い方が先
    b.danger = Danger::Suji;
    b.shanten = 1;
    assert_eq!(a.cmp_for_defence(&b), Ordering::Less);

    // 評価値は小さい方が先
    b.tiles_count = 10;
    assert_eq!(a.cmp_for_defence(&b), Ordering::Greater);
}
