use crate::model::Point;

// (ロン, ツモ時の子の支払い, ツモ時の親の支払い)
pub type Points = (Point, Point, Point);

fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

fn calc_base_point(fu: usize, fan: usize, yakuman: usize) -> Point {
    (if yakuman == 0 {
        let base = fu * 2_usize.pow(fan as u32 + 2);
        if base >= 2000 || fan >= 5 {
            match fan {
                0..=5 => 2000,   // 満貫
                6..=7 => 3000,   // 跳満
                8..=10 => 4000,  // 倍満
                11..=12 => 6000, // 三倍満
                _ => 8000,       // 四倍満 (数え役満)
            }
        } else {
            base
        }
    } else {
        8000 * yakuman
    }) as Point
}

pub fn get_score_title(base_point: Point, yakuman: usize) -> String {
    match yakuman {
        0 => match base_point {
            2000 => "満貫",
            3000 => "跳満",
            4000 => "倍満",
            6000 => "三倍満",
            8000 => "数え役満",
            _ => "",
        },
        1 => "役満",
        2 => "二倍役満",
        _ => "N倍役満",
    }
    .to_string()
}

// 和了時の支払い (ロン, ツモ和了の子, ツモ和了の親) と称号を返却
pub fn calc_points(is_dealer: bool, fu: usize, fan: usize, yakuman: usize) -> (Points, String) {
    let base = calc_base_point(fu, fan, yakuman);
    let title = get_score_title(base, yakuman);
    if is_dealer {
        ((ceil(base * 6), ceil(base * 2), 0), title)
    } else {
        ((ceil(base * 4), ceil(base), ceil(base * 2)), title)
    }
}

#[test]
fn test_points() {
    assert_eq!(calc_points(false, 30, 1, 0).0, (1000, 300, 500));
    assert_eq!(calc_points(false, 30, 3, 0).0, (3900, 1000, 2000));
    assert_eq!(calc_points(true, 30, 3, 0).0, (5800, 2000, 0));
    assert_eq!(calc_points(false, 30, 4, 0).0 .0, 7700);
    assert_eq!(calc_points(false, 25, 2, 0).0 .0, 1600);

    let (points, title) = calc_points(false, 30, 5, 0);
    assert_eq!(points.0, 8000);
    assert_eq!(title, "満貫");
    assert_eq!(calc_points(true, 30, 0, 1).0 .0, 48000);
}
