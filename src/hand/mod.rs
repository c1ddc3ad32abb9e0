// 手牌の和了判定と打点見積もりを行うモジュール
mod estimate;
mod point;
mod win;

pub use self::{
    estimate::{EstimateError, HandCost, HandEstimator, HandValueEstimator},
    point::{calc_points, get_score_title, Points},
    win::{calc_tiles_to_normal_win, is_chiitoitsu_win, is_kokushimusou_win, is_normal_win},
};
