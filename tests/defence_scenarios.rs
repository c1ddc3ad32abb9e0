mod common;

use common::*;
use mahjong_defence::defence::*;
use mahjong_defence::hand::HandEstimator;
use mahjong_defence::model::*;

#[test]
fn test_shared_safe_tile_against_two_threats() {
    // 親(2)と子(1)が共にm6を現物としている
    let mut stg = stage_with_threats(2, &[1, 2]);
    stg.players[0].hand = tiles("m236p1s9");
    for t in tiles("m6p1") {
        stg.players[1].add_safe_tile(t);
    }
    for t in tiles("m6s9") {
        stg.players[2].add_safe_tile(t);
    }
    let mut cands = vec![
        candidate("p1", 0, "m14", 10),
        candidate("s9", 0, "m14", 10),
        candidate("m6", 1, "", 0),
    ];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, Tile::from_index(5));
    assert_eq!(c.danger, Danger::Safe);
    assert_eq!(cands[0].danger, Danger::Unknown);
}

#[test]
fn test_single_threat_prefers_own_safe_tiles_of_dealer() {
    let mut stg = stage_with_threats(2, &[1, 2]);
    stg.players[0].hand = tiles("m236p1s9");
    stg.players[1].add_safe_tile(tile("p1"));
    stg.players[2].add_safe_tile(tile("s9"));
    let mut cands = vec![candidate("p1", 0, "m14", 10), candidate("s9", 1, "", 0)];

    // 共通の現物がないので親の現物を優先
    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("s9"));
}

#[test]
fn test_honitsu_fallthrough() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m123p5s7");
    stg.players[1].chosen_suit = Some(TM);
    stg.players[1].add_safe_tile(tile("z1"));
    let mut cands = vec![
        candidate("m1", 0, "m4", 8),
        candidate("p5", 1, "", 4),
        candidate("s7", 1, "", 8),
    ];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("s7"));
    assert_eq!(c.danger, Danger::Safe);
    assert_eq!(cands[0].danger, Danger::Unknown);
    assert_eq!(cands[1].danger, Danger::Safe);
}

#[test]
fn test_suji_is_ignored_against_honitsu() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m1p5");
    stg.players[1].chosen_suit = Some(TM);
    stg.on_discard(1, tile("m4"), false); // m1の筋
    let mut cands = vec![candidate("m1", 1, "", 8), candidate("p5", 1, "", 4)];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("p5"));
}

#[test]
fn test_suji_against_single_threat() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m1p5");
    stg.on_discard(1, tile("m4"), false);
    let mut cands = vec![candidate("m1", 1, "", 4), candidate("p5", 1, "", 8)];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("m1"));
    assert_eq!(c.danger, Danger::Suji);
}

#[test]
fn test_kabe_fallback() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m1p58s5");
    for t in tiles("m2222") {
        stg.on_discard(2, t, false);
    }
    let mut cands = vec![
        candidate("m1", 1, "", 0),
        candidate("p5", 1, "", 8),
        candidate("p8", 1, "", 8),
        candidate("s5", 1, "", 8),
    ];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("m1"));
    assert_eq!(c.danger, Danger::Kabe);

    let handler = DefenceHandler::new(DefenceConfig {
        kabe_fallback: false,
        ..Default::default()
    });
    assert!(handler.find_safe_tile_to_discard(&stg, 0, &mut cands).is_none());
}

#[test]
fn test_zero_threats_short_circuit() {
    let mut stg = Stage::new(0);
    stg.players[0].hand = tiles("m123p5s7z11");
    stg.on_discard(1, tile("m1"), false);
    let mut cands = vec![candidate("m1", 0, "z1", 2), candidate("p5", 0, "z1", 2)];
    cands[0].danger = Danger::Safe;
    let est = FixedEstimator::new(1000);

    let handler = DefenceHandler::default();
    assert!(!handler.should_go_to_defence(&stg, 0, Some(&cands[0].clone()), &est));
    assert!(handler.find_safe_tile_to_discard(&stg, 0, &mut cands).is_none());
    assert_eq!(est.calls.get(), 0);
    assert!(cands.iter().all(|c| c.danger == Danger::Unknown));
}

#[test]
fn test_riichi_never_folds() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m147p258s369z1234");
    stg.players[0].is_riichi = true;
    stg.players[0].shanten = 4;
    let est = FixedEstimator::new(1000);

    let handler = DefenceHandler::default();
    assert!(!handler.should_go_to_defence(&stg, 0, None, &est));
    assert_eq!(est.calls.get(), 0);
}

#[test]
fn test_not_tenpai_folds() {
    let mut stg = stage_with_threats(0, &[3]);
    stg.players[0].hand = tiles("m147p258s369z1234");
    stg.players[0].shanten = 2;
    let est = FixedEstimator::new(1000);

    let handler = DefenceHandler::default();
    assert!(handler.should_go_to_defence(&stg, 0, None, &est));
}

#[test]
fn test_memoized_waiting_is_used_without_candidate() {
    let mut stg = stage_with_threats(0, &[3]);
    stg.players[0].hand = tiles("m234567p345s6788");
    stg.players[0].shanten = 0;
    stg.players[0].win_tiles = tiles("s58");
    let est = FixedEstimator::new(8000);

    let handler = DefenceHandler::default();
    assert!(!handler.should_go_to_defence(&stg, 0, None, &est));
    assert_eq!(est.calls.get(), 2);
}

#[test]
fn test_failed_estimates_fold() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[0].hand = tiles("m234567p345s6788z1");
    let c = candidate("z1", 0, "s58", 6);
    let est = FixedEstimator::failing();

    let handler = DefenceHandler::default();
    assert!(handler.should_go_to_defence(&stg, 0, Some(&c), &est));
    assert_eq!(est.calls.get(), 2);
}

#[test]
fn test_cheap_tenpai_folds_with_hand_estimator() {
    // 子: 立直,断幺九 30符2翻 = 2000
    let mut stg = stage_with_threats(1, &[1]);
    stg.players[0].hand = tiles("m234567p345s6788z1");
    let c = candidate("z1", 0, "s58", 6);
    let est = HandEstimator::new(&stg, 0).assume_riichi(true);

    let handler = DefenceHandler::default();
    assert!(handler.should_go_to_defence(&stg, 0, Some(&c), &est));
}

#[test]
fn test_expensive_tenpai_pushes_with_hand_estimator() {
    // 門前清一色: 跳満以上
    let mut stg = stage_with_threats(1, &[1]);
    stg.players[0].hand = tiles("m1112345678999z1");
    let c = candidate("z1", 0, "m123456789", 20);
    let est = HandEstimator::new(&stg, 0).assume_riichi(true);

    let handler = DefenceHandler::default();
    assert!(!handler.should_go_to_defence(&stg, 0, Some(&c), &est));
}

#[test]
fn test_open_hand_without_yaku_folds() {
    let mut stg = stage_with_threats(1, &[1]);
    stg.players[0].hand = tiles("m234p4569s78z11");
    stg.players[0].melds.push(Meld {
        meld_type: MeldType::Pon,
        tiles: tiles("m999"),
    });
    let c = candidate("p9", 0, "s69", 8);
    let est = HandEstimator::new(&stg, 0);

    let handler = DefenceHandler::default();
    assert!(handler.should_go_to_defence(&stg, 0, Some(&c), &est));
}

#[test]
fn test_all_visible_honor_against_two_threats_without_common_safe_tile() {
    // 両者ともm4を捨てているが,共通の現物はない
    let mut stg = stage_with_threats(0, &[1, 2]);
    for s in [1, 2] {
        stg.players[s].discards.push(Discard {
            tile: tile("m4"),
            drawn: false,
            is_riichi: false,
            called: false,
        });
    }
    for t in tiles("z111") {
        stg.on_discard(3, t, false);
    }
    stg.players[0].hand = tiles("m1z1");
    let mut cands = vec![candidate("m1", 1, "", 8), candidate("z1", 1, "", 0)];

    // m1は共通の筋だが,4枚見えの東が優先
    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("z1"));
    assert_eq!(c.danger, Danger::Safe);
}

#[test]
fn test_almost_safe_honor_against_single_threat() {
    let mut stg = stage_with_threats(0, &[1]);
    stg.players[1].add_safe_tile(tile("m9"));
    for t in tiles("z22") {
        stg.on_discard(3, t, false);
    }
    stg.players[0].hand = tiles("m1z2");
    let mut cands = vec![candidate("m1", 1, "", 8), candidate("z2", 1, "", 0)];

    let handler = DefenceHandler::default();
    let c = handler.find_safe_tile_to_discard(&stg, 0, &mut cands).unwrap();
    assert_eq!(c.tile_to_discard, tile("z2"));
    assert_eq!(c.danger, Danger::AlmostSafe);
    assert_eq!(cands[0].danger, Danger::Unknown);
}
