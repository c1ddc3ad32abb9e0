use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub seat: Seat,             // 座席番号
    pub hand: Vec<Tile>,        // 手牌 (鳴き以外, ツモ牌を含む) 他家の場合は通常空
    pub melds: Vec<Meld>,       // 鳴き一覧
    pub discards: Vec<Discard>, // 捨て牌一覧
    pub is_riichi: bool,        // リーチ (ダブルリーチを含む)

    // 他家の評価
    pub is_threatening: bool,      // 脅威判定 (リーチ, 高打点の副露など外部で判定)
    pub safe_tiles: Vec<Tile>,     // この家に対する現物 (重複なし)
    pub chosen_suit: Option<Type>, // 染め手と推定される場合の牌種

    // 自家の前回評価 (13枚の状態で防御判定を行う場合に参照)
    pub shanten: i32,         // 向聴数
    pub win_tiles: Vec<Tile>, // 聴牌時の和了牌
}

impl Default for Player {
    fn default() -> Self {
        Self {
            seat: NO_SEAT,
            hand: vec![],
            melds: vec![],
            discards: vec![],
            is_riichi: false,
            is_threatening: false,
            safe_tiles: vec![],
            chosen_suit: None,
            shanten: 8,
            win_tiles: vec![],
        }
    }
}

impl Player {
    pub fn new(seat: Seat) -> Self {
        Self {
            seat,
            ..Default::default()
        }
    }

    // 鳴きを含む全ての牌
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = self.hand.clone();
        for m in &self.melds {
            tiles.extend(m.tiles.iter().copied());
        }
        tiles
    }

    #[inline]
    pub fn closed_hand(&self) -> &[Tile] {
        &self.hand
    }

    #[inline]
    pub fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.meld_type == MeldType::Ankan)
    }

    pub fn is_safe_tile(&self, tile: Tile) -> bool {
        self.safe_tiles.iter().any(|t| t.is_same_kind(&tile))
    }

    pub fn add_safe_tile(&mut self, tile: Tile) {
        let t = tile.to_normal();
        if !self.is_safe_tile(t) {
            self.safe_tiles.push(t);
        }
    }

    pub fn has_discarded(&self, tile: Tile) -> bool {
        self.discards.iter().any(|d| d.tile.is_same_kind(&tile))
    }
}

// 染め手の対象外の牌 (字牌と指定した牌種以外の数牌)
#[inline]
pub fn is_outside_suit(tile: Tile, suit: Type) -> bool {
    tile.is_suit() && tile.0 != suit
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hand = self.hand.clone();
        hand.sort();
        let suit = match self.chosen_suit {
            Some(ti) => ['m', 'p', 's', 'z'][ti].to_string(),
            None => "None".to_string(),
        };
        writeln!(
            f,
            "seat: {}, riichi: {}, threatening: {}, chosen_suit: {}",
            self.seat, self.is_riichi, self.is_threatening, suit,
        )?;
        writeln!(f, "hand: {}", vec_to_string(&hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        writeln!(f, "discards: {}", vec_to_string(&self.discards))?;
        write!(f, "safe_tiles: {}", vec_to_string(&self.safe_tiles))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discard {
    pub tile: Tile,
    #[serde(default)]
    pub drawn: bool, // ツモ切りフラグ
    #[serde(default)]
    pub is_riichi: bool, // リーチ宣言牌
    #[serde(default)]
    pub called: bool, // 鳴かれた牌 (枚数は鳴きの側で数える)
}

impl fmt::Display for Discard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tile)?;
        if self.is_riichi {
            write!(f, "*")?;
        }
        if self.called {
            write!(f, "^")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Kakan,
    Ankan,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", s.join("|"))
    }
}

#[test]
fn test_outside_suit() {
    assert!(is_outside_suit(Tile(TM, 3), TP));
    assert!(!is_outside_suit(Tile(TP, 3), TP));
    assert!(!is_outside_suit(Tile(TZ, WE), TP));
}

#[test]
fn test_player_tiles() {
    let mut pl = Player::new(0);
    pl.hand = vec![Tile(TM, 1), Tile(TM, 2)];
    pl.melds.push(Meld {
        meld_type: MeldType::Pon,
        tiles: vec![Tile(TZ, DW); 3],
    });
    assert_eq!(pl.tiles().len(), 5);
    assert_eq!(pl.closed_hand().len(), 2);
    assert!(!pl.is_menzen());

    pl.add_safe_tile(Tile(TS, 0));
    pl.add_safe_tile(Tile(TS, 5));
    assert_eq!(pl.safe_tiles, vec![Tile(TS, 5)]);
}
