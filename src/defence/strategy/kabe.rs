use super::*;

// 牌を待ちとする両面,嵌張,辺張の搭子
fn waiting_shapes(ni: Tnum) -> Vec<(Tnum, Tnum)> {
    let mut res = vec![];
    if ni + 2 <= 9 {
        res.push((ni + 1, ni + 2));
    }
    if ni >= 3 {
        res.push((ni - 2, ni - 1));
    }
    if ni >= 2 && ni + 1 <= 9 {
        res.push((ni - 1, ni + 1));
    }
    res
}

// 順子で待つための搭子が全て壁で塞がれている数牌
pub fn find_tiles_to_discard(ctx: &DefenceContext<'_>, _threats: &[&Player]) -> Vec<DefenceTile> {
    let visible = ctx.visible_tiles();
    let is_kabe = |ti: Type, ni: Tnum| visible[Tile(ti, ni).to_index()] >= TILE;
    ctx.closed_hand_tiles()
        .filter(|t| t.is_suit())
        .filter(|t| {
            waiting_shapes(t.1)
                .iter()
                .all(|&(a, b)| is_kabe(t.0, a) || is_kabe(t.0, b))
        })
        .map(|t| DefenceTile::new(t, Danger::Kabe))
        .collect()
}

#[test]
fn test_waiting_shapes() {
    assert_eq!(waiting_shapes(1), vec![(2, 3)]);
    assert_eq!(waiting_shapes(5), vec![(6, 7), (3, 4), (4, 6)]);
    assert_eq!(waiting_shapes(9), vec![(7, 8)]);
}

#[test]
fn test_kabe() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = crate::util::common::tiles_from_string("m1233p3").unwrap();
    super::discard_all(&mut stg, 1, "m22p22");
    super::discard_all(&mut stg, 2, "m2p4444");
    let ctx = DefenceContext::new(&stg, 0);

    // m2が4枚見え: m1は壁. m3は(m4,m5)が残る
    // p4が4枚見え: p3は(p1,p2),(p2,p4),(p4,p5)のうち(p1,p2)が残る
    let res = Strategy::Kabe.find_tiles_to_discard(&ctx, &[]);
    assert_eq!(res, vec![DefenceTile::new(Tile(TM, 1), Danger::Kabe)]);
}
