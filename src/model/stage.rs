use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    pub round: usize,            // 場 (東:0, 南:1, 西:2, 北:3)
    pub dealer: Seat,            // 局 (0~3 = 親のseat)
    pub turn: Seat,              // ツモ番のプレイヤーの座席
    pub wall_count: usize,       // 牌山の残り枚数
    pub doras: Vec<Tile>,        // ドラ表示牌
    pub players: [Player; SEAT], // 各プレイヤー情報
}

impl Stage {
    pub fn new(dealer: Seat) -> Self {
        let mut stg = Self {
            dealer,
            turn: dealer,
            ..Default::default()
        };
        for s in 0..SEAT {
            stg.players[s].seat = s;
        }
        stg
    }

    #[inline]
    pub fn is_dealer(&self, seat: Seat) -> bool {
        seat == self.dealer
    }

    #[inline]
    pub fn get_prevalent_wind(&self) -> Tnum {
        self.round % SEAT + 1 // WE | WS | WW | WN
    }

    #[inline]
    pub fn get_seat_wind(&self, seat: Seat) -> Tnum {
        (seat + SEAT - self.dealer) % SEAT + 1 // WE | WS | WW | WN
    }

    // 自分以外のプレイヤー (座席順)
    pub fn enemy_players(&self, seat: Seat) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.seat != seat)
    }

    // 場に見えている牌の枚数 (捨て牌, 鳴き, ドラ表示牌)
    // 鳴かれた捨て牌は鳴きの側で数える
    pub fn revealed_tiles(&self) -> TileCounts {
        let mut tc = [0; KINDS];
        for p in &self.players {
            for d in p.discards.iter().filter(|d| !d.called) {
                tc[d.tile.to_index()] += 1;
            }
            for m in &p.melds {
                for t in &m.tiles {
                    tc[t.to_index()] += 1;
                }
            }
        }
        for d in &self.doras {
            tc[d.to_index()] += 1;
        }
        tc
    }

    // [Event]
    // 打牌: 打牌者自身とリーチ中の他家に対して現物を追加
    pub fn on_discard(&mut self, seat: Seat, tile: Tile, drawn: bool) {
        let pl = &mut self.players[seat];
        if let Some(i) = pl.hand.iter().position(|&t| t == tile) {
            pl.hand.remove(i);
        }
        pl.discards.push(Discard {
            tile,
            drawn,
            is_riichi: false,
            called: false,
        });

        for p in self.players.iter_mut() {
            if p.seat == seat || p.is_riichi {
                p.add_safe_tile(tile);
            }
        }
        self.turn = (seat + 1) % SEAT;
    }

    // リーチ宣言: 直前の打牌を宣言牌とし,脅威として扱う
    pub fn on_riichi(&mut self, seat: Seat) {
        let pl = &mut self.players[seat];
        pl.is_riichi = true;
        pl.is_threatening = true;
        if let Some(d) = pl.discards.last_mut() {
            d.is_riichi = true;
        }
    }

    // 鳴き: 鳴かれた牌は河に残したまま印を付け,手牌から鳴きに移す
    // 筋とフリテンの判定では鳴かれた牌も捨て牌として扱う
    pub fn on_meld(&mut self, seat: Seat, from: Seat, meld: Meld) {
        if from != seat {
            if let Some(d) = self.players[from].discards.last_mut() {
                d.called = true;
            }
        }
        let pl = &mut self.players[seat];
        for t in &meld.tiles {
            if let Some(i) = pl.hand.iter().position(|h| h == t) {
                pl.hand.remove(i);
            }
        }
        pl.melds.push(meld);
        self.turn = seat;
    }

    pub fn on_dora(&mut self, indicator: Tile) {
        self.doras.push(indicator);
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, dealer: {}, turn: {}, wall_count: {}, doras: {}",
            self.round,
            self.dealer,
            self.turn,
            self.wall_count,
            vec_to_string(&self.doras),
        )?;

        let boader = "-".to_string().repeat(80);
        write!(f, "{}", boader)?;
        for p in &self.players {
            writeln!(f)?;
            writeln!(f, "{}", p)?;
            write!(f, "{}", boader)?;
        }
        Ok(())
    }
}

#[test]
fn test_discard_marks_safe_tiles() {
    let mut stg = Stage::new(0);
    stg.on_discard(1, Tile(TM, 4), false);
    stg.on_riichi(1);
    stg.on_discard(2, Tile(TP, 0), true);

    let p1 = &stg.players[1];
    assert!(p1.is_threatening);
    assert!(p1.discards[0].is_riichi);
    assert!(p1.is_safe_tile(Tile(TM, 4)));
    assert!(p1.is_safe_tile(Tile(TP, 5)));
    assert!(!stg.players[3].is_safe_tile(Tile(TP, 5)));

    let rt = stg.revealed_tiles();
    assert_eq!(rt[Tile(TM, 4).to_index()], 1);
    assert_eq!(rt[Tile(TP, 5).to_index()], 1);
}

#[test]
fn test_meld_moves_discard() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = vec![Tile(TZ, DR), Tile(TZ, DR), Tile(TM, 1)];
    stg.on_discard(3, Tile(TZ, DR), false);
    stg.on_meld(
        0,
        3,
        Meld {
            meld_type: MeldType::Pon,
            tiles: vec![Tile(TZ, DR); 3],
        },
    );
    assert!(stg.players[3].discards[0].called);
    assert!(stg.players[3].has_discarded(Tile(TZ, DR)));
    assert_eq!(stg.players[0].hand, vec![Tile(TM, 1)]);
    // 鳴かれた牌は一度だけ数える
    assert_eq!(stg.revealed_tiles()[Tile(TZ, DR).to_index()], 3);
}

#[test]
fn test_called_discard_keeps_suji() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = vec![Tile(TM, 5), Tile(TM, 6)];
    stg.on_discard(1, Tile(TM, 4), false);
    stg.on_meld(
        0,
        1,
        Meld {
            meld_type: MeldType::Chi,
            tiles: vec![Tile(TM, 4), Tile(TM, 5), Tile(TM, 6)],
        },
    );
    let p1 = &stg.players[1];
    assert!(p1.has_discarded(Tile(TM, 4)));
    assert!(p1.is_safe_tile(Tile(TM, 4)));
    assert_eq!(stg.revealed_tiles()[Tile(TM, 4).to_index()], 1);
}
