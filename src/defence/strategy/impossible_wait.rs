use super::*;

// 全て見えている字牌は誰の待ちにもならない. 残り1枚の場合は単騎待ちのみ.
pub fn find_tiles_to_discard(ctx: &DefenceContext<'_>, _threats: &[&Player]) -> Vec<DefenceTile> {
    let visible = ctx.visible_tiles();
    let mut res = vec![];
    for t in ctx.closed_hand_tiles().filter(|t| t.is_hornor()) {
        match TILE.saturating_sub(visible[t.to_index()]) {
            0 => res.push(DefenceTile::new(t, Danger::Safe)),
            1 => res.push(DefenceTile::new(t, Danger::AlmostSafe)),
            _ => {}
        }
    }
    res
}

#[test]
fn test_impossible_wait_honors() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = crate::util::common::tiles_from_string("m123z567").unwrap();
    super::discard_all(&mut stg, 1, "z555z66m1");
    let ctx = DefenceContext::new(&stg, 0);

    let res = Strategy::ImpossibleWait.find_tiles_to_discard(&ctx, &[]);
    assert_eq!(
        res,
        vec![
            DefenceTile::new(Tile(TZ, DW), Danger::Safe),
            DefenceTile::new(Tile(TZ, DG), Danger::AlmostSafe),
        ]
    );
}
