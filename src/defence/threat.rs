use super::*;

// 脅威となっている他家を危険な順に返却
// 親の脅威は打点が高いため先頭に並べ,それ以外は座席順を維持する
pub fn get_threatening_players(stg: &Stage, seat: Seat) -> Vec<&Player> {
    let mut res: Vec<&Player> = stg.enemy_players(seat).filter(|p| p.is_threatening).collect();
    res.sort_by_key(|p| !stg.is_dealer(p.seat));
    res
}

#[test]
fn test_threatening_players_order() {
    let mut stg = Stage::new(3);
    stg.players[1].is_threatening = true;
    stg.players[2].is_threatening = true;
    stg.players[3].is_threatening = true;
    let seats: Vec<Seat> = get_threatening_players(&stg, 0).iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![3, 1, 2]);

    // 自分自身は含まない
    stg.players[0].is_threatening = true;
    let seats: Vec<Seat> = get_threatening_players(&stg, 2).iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![3, 0, 1]);
}

#[test]
fn test_no_threat() {
    let stg = Stage::new(0);
    assert!(get_threatening_players(&stg, 0).is_empty());
}
