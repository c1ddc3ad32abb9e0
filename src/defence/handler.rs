use log::debug;

use super::*;
use crate::hand::HandValueEstimator;
use crate::util::common::count_dora;
use crate::util::misc::vec_to_string;

/// 押し引きの判定と安全牌の選択
/// 判定ごとに手牌の集計を作り直すため,状態は設定のみを保持する
#[derive(Debug, Clone, Default)]
pub struct DefenceHandler {
    config: DefenceConfig,
}

impl DefenceHandler {
    pub fn new(config: DefenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DefenceConfig {
        &self.config
    }

    // 降りるべきかどうかを判定
    // candidate: ツモ後(14枚)の場合は打牌候補. 13枚の場合はNoneで前回の評価を参照する.
    pub fn should_go_to_defence(
        &self,
        stg: &Stage,
        seat: Seat,
        candidate: Option<&DiscardCandidate>,
        estimator: &dyn HandValueEstimator,
    ) -> bool {
        let pl = &stg.players[seat];
        let (shanten, waiting) = match candidate {
            Some(c) => (c.shanten, c.waiting.as_slice()),
            None => (pl.shanten, pl.win_tiles.as_slice()),
        };

        // リーチ中は降りられない
        if pl.is_riichi {
            return false;
        }

        let ctx = DefenceContext::new(stg, seat);
        let threats = get_threatening_players(stg, seat);
        if threats.is_empty() {
            return false;
        }

        if shanten == 1 {
            // ドラの多い一向聴は押す
            let n_dora = count_dora(&ctx.hand_34, &stg.doras);
            if n_dora >= self.config.push_dora_count {
                debug!("push: shanten 1 with {} dora", n_dora);
                return false;
            }
        }

        if shanten != 0 {
            return true;
        }

        // 聴牌: 待ちごとに打点を見積もる
        let mut costs = vec![];
        for &wt in waiting {
            let mut tiles = pl.tiles();
            if let Some(c) = candidate {
                remove_closed_tile(&mut tiles, pl.closed_hand().len(), c.tile_to_discard);
            }
            match estimator.estimate_hand_value(wt, &tiles) {
                Ok(cost) => costs.push(cost.main),
                Err(e) => debug!("skip wait {}: {}", wt, e),
            }
        }

        // 役なしの副露手など
        match costs.iter().max() {
            Some(&max_cost) => {
                debug!("tenpai max cost: {}", max_cost);
                max_cost < self.config.fold_threshold
            }
            None => true,
        }
    }

    // 降りる場合の打牌を選択
    // 安全牌が見つからない場合はNoneを返却し,打牌の選択は呼び出し側に任せる
    pub fn find_safe_tile_to_discard<'c>(
        &self,
        stg: &Stage,
        seat: Seat,
        candidates: &'c mut [DiscardCandidate],
    ) -> Option<&'c DiscardCandidate> {
        for c in candidates.iter_mut() {
            c.danger = Danger::Unknown;
        }
        let i = self.select_safe_tile(stg, seat, candidates)?;
        Some(&candidates[i])
    }

    fn select_safe_tile(&self, stg: &Stage, seat: Seat, candidates: &mut [DiscardCandidate]) -> Option<Index> {
        let ctx = DefenceContext::new(stg, seat);
        let threats = get_threatening_players(stg, seat);
        if threats.is_empty() {
            return None;
        }
        debug!(
            "threats: {}",
            vec_to_string(&threats.iter().map(|p| p.seat).collect::<Vec<_>>())
        );

        // 場況から待ちになり得ない牌
        let safe_tiles = Strategy::ImpossibleWait.find_tiles_to_discard(&ctx, &threats);

        // 全員に対する共通安全牌
        if threats.len() > 1 {
            let mut common_safe_tiles = common_safe_tiles(&threats);
            for p in &threats {
                if let Some(suit) = p.chosen_suit {
                    common_safe_tiles.extend(mark_safe_tiles_against_honitsu(&ctx, suit));
                }
            }

            // 染め手の家に対して筋は参考にならない
            let not_honitsu: Vec<&Player> = threats
                .iter()
                .filter(|p| p.chosen_suit.is_none())
                .copied()
                .collect();
            let common_suji_tiles = Strategy::Suji.find_tiles_to_discard(&ctx, &not_honitsu);

            // 共通の現物がなくても場況からの安全牌は残す
            let validated = merge_safe_tiles(common_safe_tiles, &safe_tiles);
            if let Some(i) = find_tile_to_discard(&validated, candidates) {
                debug!("common safe tile: {}", candidates[i]);
                return Some(i);
            }

            if !common_suji_tiles.is_empty() {
                if let Some(i) = find_tile_to_discard(&common_suji_tiles, candidates) {
                    debug!("common suji tile: {}", candidates[i]);
                    return Some(i);
                }
            }
        }

        // 危険な家から順に安全牌を探す
        for p in &threats {
            let player_safe_tiles: Vec<DefenceTile> =
                p.safe_tiles.iter().map(|&t| DefenceTile::safe(t)).collect();
            let mut validated = merge_safe_tiles(player_safe_tiles, &safe_tiles);
            if p.chosen_suit.is_none() {
                validated.extend(Strategy::Suji.find_tiles_to_discard(&ctx, &[*p]));
            }

            if let Some(i) = find_tile_to_discard(&validated, candidates) {
                debug!("safe tile against {}: {}", p.seat, candidates[i]);
                return Some(i);
            }

            if let Some(suit) = p.chosen_suit {
                let against_honitsu = mark_safe_tiles_against_honitsu(&ctx, suit);
                if let Some(i) = find_tile_to_discard(&against_honitsu, candidates) {
                    debug!("safe tile against honitsu {}: {}", p.seat, candidates[i]);
                    return Some(i);
                }
            }
        }

        if self.config.kabe_fallback {
            let kabe_tiles = Strategy::Kabe.find_tiles_to_discard(&ctx, &threats);
            if let Some(i) = find_tile_to_discard(&kabe_tiles, candidates) {
                debug!("kabe tile: {}", candidates[i]);
                return Some(i);
            }
        }

        debug!("no safe tile");
        None
    }
}

// 全ての脅威に対する現物の積集合
fn common_safe_tiles(threats: &[&Player]) -> Vec<DefenceTile> {
    let Some((first, rest)) = threats.split_first() else {
        return vec![];
    };
    first
        .safe_tiles
        .iter()
        .filter(|&&t| rest.iter().all(|p| p.is_safe_tile(t)))
        .map(|&t| DefenceTile::safe(t))
        .collect()
}

// 染め手の対象外となる手牌の数牌
fn mark_safe_tiles_against_honitsu(ctx: &DefenceContext<'_>, suit: Type) -> Vec<DefenceTile> {
    ctx.closed_hand_tiles()
        .filter(|&t| is_outside_suit(t, suit))
        .map(DefenceTile::safe)
        .collect()
}

// 場況からの安全牌のうち,まだ含まれていない牌を追加
fn merge_safe_tiles(mut tiles: Vec<DefenceTile>, base_safe_tiles: &[DefenceTile]) -> Vec<DefenceTile> {
    for st in base_safe_tiles {
        if !tiles.iter().any(|t| t.tile.is_same_kind(&st.tile)) {
            tiles.push(*st);
        }
    }
    tiles
}

// 打牌候補に危険度を書き込む. 一致する候補が一つもなければfalse.
// 同じ牌に複数の評価がある場合は最も安全な評価を残す.
fn mark_tiles_safety(safe_tiles: &[DefenceTile], candidates: &mut [DiscardCandidate]) -> bool {
    let mut was_safe_tiles = false;
    for st in safe_tiles {
        for c in candidates.iter_mut() {
            if c.tile_to_discard.is_same_kind(&st.tile) {
                was_safe_tiles = true;
                c.danger = c.danger.min(st.danger);
            }
        }
    }
    was_safe_tiles
}

// 最も安全で効率の良い打牌候補のIndex
fn find_tile_to_discard(safe_tiles: &[DefenceTile], candidates: &mut [DiscardCandidate]) -> Option<Index> {
    if !mark_tiles_safety(safe_tiles, candidates) {
        return None;
    }
    candidates
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp_for_defence(b.1))
        .map(|(i, _)| i)
}

// 鳴き以外の手牌から打牌を取り除く (赤5は同じ牌を優先)
fn remove_closed_tile(tiles: &mut Vec<Tile>, n_closed: usize, tile: Tile) {
    let closed = &tiles[..n_closed];
    let pos = closed
        .iter()
        .position(|&t| t == tile)
        .or_else(|| closed.iter().position(|t| t.is_same_kind(&tile)));
    if let Some(i) = pos {
        tiles.remove(i);
    }
}

#[cfg(test)]
fn tiles(exp: &str) -> Vec<Tile> {
    crate::util::common::tiles_from_string(exp).unwrap()
}

#[test]
fn test_common_safe_tiles() {
    let mut p1 = Player::new(1);
    let mut p2 = Player::new(2);
    p1.safe_tiles = tiles("m159z1");
    p2.safe_tiles = tiles("m59s3");
    let res: Vec<Tile> = common_safe_tiles(&[&p1, &p2]).iter().map(|d| d.tile).collect();
    assert_eq!(res, tiles("m59"));
    assert!(common_safe_tiles(&[]).is_empty());
}

#[test]
fn test_merge_safe_tiles() {
    let base = vec![
        DefenceTile::new(Tile(TZ, 1), Danger::AlmostSafe),
        DefenceTile::new(Tile(TZ, 2), Danger::Safe),
    ];
    let merged = merge_safe_tiles(vec![DefenceTile::safe(Tile(TZ, 1))], &base);
    assert_eq!(
        merged,
        vec![DefenceTile::safe(Tile(TZ, 1)), DefenceTile::safe(Tile(TZ, 2))]
    );
}

#[test]
fn test_mark_keeps_safest() {
    let mut cands = vec![DiscardCandidate::new(Tile(TM, 0), 1, vec![], 0, 0.0)];
    let safe_tiles = vec![
        DefenceTile::safe(Tile(TM, 5)),
        DefenceTile::new(Tile(TM, 5), Danger::Suji),
    ];
    assert!(mark_tiles_safety(&safe_tiles, &mut cands));
    assert_eq!(cands[0].danger, Danger::Safe);
    assert!(!mark_tiles_safety(&[DefenceTile::safe(Tile(TP, 1))], &mut cands));
}

#[test]
fn test_remove_closed_tile() {
    let mut t = tiles("m50p5z777");
    remove_closed_tile(&mut t, 3, Tile(TM, 0));
    assert_eq!(t, tiles("m5p5z777"));
    remove_closed_tile(&mut t, 2, Tile(TZ, 7));
    assert_eq!(t, tiles("m5p5z777"));
}
