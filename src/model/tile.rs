use serde::{de, ser};
use thiserror::Error;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileParseError {
    #[error("invalid tile symbol: '{0}'")]
    Symbol(String),
    #[error("invalid char: '{0}'")]
    Char(char),
    #[error("tile number before tile type")]
    MissingType,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)

impl Tile {
    pub fn from_symbol(s: &str) -> Result<Self, TileParseError> {
        let err = || TileParseError::Symbol(s.to_string());
        let mut chars = s.chars();
        let ti = match chars.next() {
            Some(c) => tile_type_from_char(c).ok_or_else(err)?,
            None => return Err(err()),
        };
        let ni = match chars.next().and_then(|c| c.to_digit(10)) {
            Some(n) => n as Tnum,
            None => return Err(err()),
        };
        if chars.next().is_some() || (ti == TZ && !(1..=DR).contains(&ni)) {
            return Err(err());
        }
        Ok(Self(ti, ni))
    }

    // 34種のIndexから牌を生成 (赤5は生成しない)
    #[inline]
    pub fn from_index(i: Index) -> Self {
        Self(i / 9, i % 9 + 1)
    }

    // 赤5を通常の5として扱った34種のIndex
    #[inline]
    pub fn to_index(self) -> Index {
        let t = self.to_normal();
        t.0 * 9 + t.1 - 1
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 中張牌
    #[inline]
    pub fn is_simple(&self) -> bool {
        !self.is_end()
    }

    // 赤5を考慮しない同一牌判定
    #[inline]
    pub fn is_same_kind(&self, other: &Tile) -> bool {
        self.to_normal() == other.to_normal()
    }
}

pub fn tile_type_from_char(c: char) -> Option<Type> {
    Some(match c {
        'm' => TM,
        'p' => TP,
        's' => TS,
        'z' => TZ,
        _ => return None,
    })
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は4.5に変換して比較
        let a = if self.1 == 0 { 4.5 } else { self.1 as f32 };
        let b = if other.1 == 0 { 4.5 } else { other.1 as f32 };
        a.total_cmp(&b)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileCounts]
// 34種の牌の枚数 (赤5は通常の5として数える)
pub type TileCounts = [usize; KINDS];

pub fn tiles_to_counts(tiles: &[Tile]) -> TileCounts {
    let mut tc = [0; KINDS];
    for t in tiles {
        tc[t.to_index()] += 1;
    }
    tc
}

#[test]
fn test_tile_index() {
    for i in 0..KINDS {
        assert_eq!(Tile::from_index(i).to_index(), i);
    }
    assert_eq!(Tile(TP, 0).to_index(), Tile(TP, 5).to_index());
    assert_eq!(Tile(TZ, DR).to_index(), KINDS - 1);
}

#[test]
fn test_tile_symbol() {
    assert_eq!(Tile::from_symbol("s0"), Ok(Tile(TS, 0)));
    assert_eq!(Tile::from_symbol("z7"), Ok(Tile(TZ, DR)));
    assert!(Tile::from_symbol("z8").is_err());
    assert!(Tile::from_symbol("x1").is_err());
    assert!(Tile::from_symbol("m12").is_err());

    let t: Tile = serde_json::from_str("\"p3\"").unwrap();
    assert_eq!(t, Tile(TP, 3));
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"p3\"");
}
