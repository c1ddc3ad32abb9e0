use super::*;

// 数字(1~9)ごとに,全て捨てられていれば筋となる牌の数字
const SUJI_PARTNERS: [&[Tnum]; 9] = [&[4], &[5], &[6], &[1, 7], &[2, 8], &[3, 9], &[4], &[5], &[6]];

pub fn is_suji(pl: &Player, tile: Tile) -> bool {
    if !tile.is_suit() {
        return false;
    }
    let t = tile.to_normal();
    SUJI_PARTNERS[t.1 - 1]
        .iter()
        .all(|&ni| pl.has_discarded(Tile(t.0, ni)))
}

// 全ての家に対して筋となっている牌
pub fn find_tiles_to_discard(ctx: &DefenceContext<'_>, threats: &[&Player]) -> Vec<DefenceTile> {
    if threats.is_empty() {
        return vec![];
    }
    ctx.closed_hand_tiles()
        .filter(|&t| threats.iter().all(|p| is_suji(p, t)))
        .map(|t| DefenceTile::new(t, Danger::Suji))
        .collect()
}

#[test]
fn test_is_suji() {
    let mut stg = Stage::new(0);
    super::discard_all(&mut stg, 1, "m4p1z1");
    let pl = &stg.players[1];
    assert!(is_suji(pl, Tile(TM, 1)));
    assert!(is_suji(pl, Tile(TM, 7)));
    assert!(!is_suji(pl, Tile(TM, 4)));
    // 中筋は両側が必要
    assert!(!is_suji(pl, Tile(TP, 4)));
    assert!(!is_suji(pl, Tile(TZ, 4)));
}

#[test]
fn test_suji_common_to_all_threats() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = crate::util::common::tiles_from_string("m17p0s9").unwrap();
    super::discard_all(&mut stg, 1, "m4p2p8s6");
    super::discard_all(&mut stg, 2, "m4s6");
    let ctx = DefenceContext::new(&stg, 0);
    let p1 = &stg.players[1];
    let p2 = &stg.players[2];

    let tiles: Vec<Tile> = Strategy::Suji
        .find_tiles_to_discard(&ctx, &[p1])
        .iter()
        .map(|d| d.tile)
        .collect();
    assert_eq!(tiles, vec![Tile(TM, 1), Tile(TM, 7), Tile(TP, 5), Tile(TS, 9)]);

    let tiles: Vec<Tile> = Strategy::Suji
        .find_tiles_to_discard(&ctx, &[p1, p2])
        .iter()
        .map(|d| d.tile)
        .collect();
    assert_eq!(tiles, vec![Tile(TM, 1), Tile(TM, 7), Tile(TS, 9)]);

    assert!(Strategy::Suji.find_tiles_to_discard(&ctx, &[]).is_empty());
}
