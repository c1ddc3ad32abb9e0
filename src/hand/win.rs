use crate::model::*;

// [完成形判定 (面子, 雀頭)]
// 34種の枚数テーブルを牌種ごとの行に分割して判定する

fn row(counts: &TileCounts, ti: Type) -> &[usize] {
    if ti == TZ {
        &counts[HONOR_OFFSET..]
    } else {
        &counts[ti * 9..ti * 9 + 9]
    }
}

// 面子のみで構成されているかの判定
pub fn is_sets(tr: &[usize], ti: Type) -> bool {
    if ti == TZ {
        return tr.iter().all(|&n| n % 3 == 0);
    }

    let (mut n0, mut n1, mut n2);
    n0 = tr[0];
    n1 = tr[1];
    for i in 0..7 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if n1 < n || n2 < n {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 牌種が完成面子+雀頭のみで構成されている場合,雀頭のIndex(牌種内)のリストを返す.
pub fn calc_pair_candidate(tr: &[usize], ti: Type) -> Vec<Index> {
    // 面子の和は3で割り切れるので余りの値によって数牌の雀頭候補を絞り込める
    let candidates: Vec<Index> = if ti == TZ {
        (0..tr.len()).collect()
    } else {
        let sum: usize = tr.iter().enumerate().map(|(i, n)| (i + 1) * n).sum();
        let mod3 = sum % 3;
        (1..4).map(|i| 3 * i - mod3 - 1).collect()
    };

    let mut tr = tr.to_vec();
    let mut res = vec![];
    for i in candidates {
        if tr[i] < 2 {
            continue;
        }
        tr[i] -= 2;
        if is_sets(&tr, ti) {
            res.push(i);
        }
        tr[i] += 2;
    }
    res
}

// 通常形 (面子 + 雀頭)
// 副露がある場合は副露を除いた手牌の枚数のみで判定する
pub fn is_normal_win(counts: &TileCounts) -> bool {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = row(counts, ti).iter().sum::<usize>() % 3;
    }
    if mods.iter().any(|&m| m == 1) || mods.iter().filter(|&&m| m == 2).count() != 1 {
        return false;
    }

    (0..TYPE).all(|ti| {
        let tr = row(counts, ti);
        if mods[ti] == 2 {
            !calc_pair_candidate(tr, ti).is_empty()
        } else {
            is_sets(tr, ti)
        }
    })
}

// 七対子
pub fn is_chiitoitsu_win(counts: &TileCounts) -> bool {
    counts.iter().filter(|&&n| n == 2).count() == 7
}

// 国士無双
pub fn is_kokushimusou_win(counts: &TileCounts) -> bool {
    let mut n_end = 0;
    for (i, &n) in counts.iter().enumerate() {
        let t = Tile::from_index(i);
        if t.is_end() {
            if n == 0 {
                return false;
            }
            n_end += n;
        } else if n != 0 {
            return false;
        }
    }
    n_end == 14
}

// 和了牌のリスト (通常形のみ)
// 聴牌していない場合は空のリストを返却
pub fn calc_tiles_to_normal_win(counts: &TileCounts) -> Vec<Tile> {
    let mut counts = *counts;
    let mut res = vec![];
    for i in 0..KINDS {
        if counts[i] >= TILE {
            continue;
        }
        counts[i] += 1;
        if is_normal_win(&counts) {
            res.push(Tile::from_index(i));
        }
        counts[i] -= 1;
    }
    res
}

#[cfg(test)]
fn counts_of(exp: &str) -> TileCounts {
    tiles_to_counts(&crate::util::common::tiles_from_string(exp).unwrap())
}

#[test]
fn test_normal_win() {
    assert!(is_normal_win(&counts_of("m123456789p11z777")));
    assert!(is_normal_win(&counts_of("m11122233344455")));
    assert!(!is_normal_win(&counts_of("m123456789p12z777")));
    assert!(!is_normal_win(&counts_of("m1133557799p11z1")));
    // 副露を除いた手牌
    assert!(is_normal_win(&counts_of("m234s55")));
}

#[test]
fn test_chiitoitsu_kokushi() {
    assert!(is_chiitoitsu_win(&counts_of("m1133557799p11z11")));
    assert!(!is_chiitoitsu_win(&counts_of("m1111557799p11z11")));
    assert!(is_kokushimusou_win(&counts_of("m19p19s19z12345677")));
    assert!(!is_kokushimusou_win(&counts_of("m19p19s19z1234566")));
}

#[test]
fn test_tiles_to_normal_win() {
    let waits = calc_tiles_to_normal_win(&counts_of("m123456789p23z77"));
    assert_eq!(waits, vec![Tile(TP, 1), Tile(TP, 4)]);
    assert!(calc_tiles_to_normal_win(&counts_of("m147p258s369z1234")).is_empty());
}
