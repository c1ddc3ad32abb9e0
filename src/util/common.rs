use crate::model::*;

// "m123p406z77"のような文字列から牌のリストを生成
pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, TileParseError> {
    let mut tiles = vec![];
    let mut ti = None;
    for c in exp.chars() {
        match c {
            'm' | 'p' | 's' | 'z' => ti = tile_type_from_char(c),
            '0'..='9' => {
                let ti = ti.ok_or(TileParseError::MissingType)?;
                let ni = c as usize - '0' as usize;
                if ti == TZ && !(1..=DR).contains(&ni) {
                    return Err(TileParseError::Char(c));
                }
                tiles.push(Tile(ti, ni));
            }
            ' ' => {}
            _ => return Err(TileParseError::Char(c)),
        }
    }
    Ok(tiles)
}

// ドラ表示牌のリストを受け取ってドラ評価値のテーブルを返却
pub fn create_dora_table(doras: &[Tile]) -> TileCounts {
    let mut dt = [0; KINDS];
    for d in doras {
        let d = d.to_normal();
        let ni = if d.is_hornor() {
            match d.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match d.1 {
                9 => 1,
                _ => d.1 + 1,
            }
        };
        dt[Tile(d.0, ni).to_index()] += 1;
    }
    dt
}

// ドラ表示牌によるドラの数を勘定
pub fn count_dora(counts: &TileCounts, doras: &[Tile]) -> usize {
    let dt = create_dora_table(doras);
    counts.iter().zip(dt.iter()).map(|(n, d)| n * d).sum()
}

#[test]
fn test_tiles_from_string() {
    let tiles = tiles_from_string("m406z77").unwrap();
    assert_eq!(tiles, vec![Tile(TM, 4), Tile(TM, 0), Tile(TM, 6), Tile(TZ, 7), Tile(TZ, 7)]);
    assert_eq!(tiles_from_string("12m"), Err(TileParseError::MissingType));
    assert_eq!(tiles_from_string("z8"), Err(TileParseError::Char('8')));
    assert_eq!(tiles_from_string("m1x"), Err(TileParseError::Char('x')));
}

#[test]
fn test_count_dora() {
    let hand = tiles_from_string("m9m1m1p0z55z11").unwrap();
    let counts = tiles_to_counts(&hand);
    // m9 -> m1, p4 -> p5, z7 -> z5, z4 -> z1
    let doras = tiles_from_string("m9p4z7z4").unwrap();
    assert_eq!(count_dora(&counts, &doras), 2 + 1 + 2 + 2);
    assert_eq!(count_dora(&counts, &[]), 0);
}
