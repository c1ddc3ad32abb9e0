use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use log::{debug, info};
use serde::Deserialize;

use mahjong_defence::defence::*;
use mahjong_defence::hand::HandEstimator;
use mahjong_defence::model::*;
use mahjong_defence::util::misc::vec_to_string;

// 押し引き判定の設定値を上書きするオプション
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// 聴牌時に押す最低打点
    #[arg(long)]
    pub fold_threshold: Option<Point>,
    /// 一向聴で押すドラの枚数
    #[arg(long)]
    pub push_dora: Option<usize>,
    /// 壁による安全牌の判定を行わない
    #[arg(long)]
    pub no_kabe: bool,
}

impl ConfigArgs {
    pub fn apply(&self, mut config: DefenceConfig) -> DefenceConfig {
        if let Some(v) = self.fold_threshold {
            config.fold_threshold = v;
        }
        if let Some(v) = self.push_dora {
            config.push_dora_count = v;
        }
        if self.no_kabe {
            config.kabe_fallback = false;
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct DefenceArgs {
    /// 局面のJSONファイル
    pub file: PathBuf,
    #[command(flatten)]
    pub config: ConfigArgs,
}

// 局面ファイルの形式
// candidates: 打牌候補 (先頭を本来の打牌とする). 空の場合は前回の評価(shanten, win_tiles)で判定
#[derive(Debug, Deserialize)]
struct Scenario {
    stage: Stage,
    seat: Seat,
    #[serde(default)]
    candidates: Vec<DiscardCandidate>,
    #[serde(default)]
    config: DefenceConfig,
}

// 座席は配列の位置で決まるため,ファイル中のseatは使わずに振り直す
fn load_scenario(text: &str) -> Result<Scenario> {
    let mut scn: Scenario = serde_json::from_str(text)?;
    if scn.seat >= SEAT {
        bail!("invalid seat: {}", scn.seat);
    }
    for (s, p) in scn.stage.players.iter_mut().enumerate() {
        p.seat = s;
    }
    Ok(scn)
}

// [App]
#[derive(Debug)]
pub struct DefenceApp {
    args: DefenceArgs,
}

impl DefenceApp {
    pub fn new(args: DefenceArgs) -> Self {
        Self { args }
    }

    pub fn run(self) -> Result<()> {
        let path = &self.args.file;
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let mut scn = load_scenario(&text).with_context(|| format!("invalid scenario: {}", path.display()))?;

        let handler = DefenceHandler::new(self.args.config.apply(scn.config.clone()));
        info!("config: {:?}", handler.config());
        debug!("stage:\n{}", scn.stage);

        let stg = &scn.stage;
        let seat = scn.seat;
        let threats: Vec<Seat> = get_threatening_players(stg, seat).iter().map(|p| p.seat).collect();
        println!("threats: {}", vec_to_string(&threats));

        let estimator = HandEstimator::new(stg, seat).assume_riichi(stg.players[seat].is_menzen());
        let fold = handler.should_go_to_defence(stg, seat, scn.candidates.first(), &estimator);
        println!("defence: {}", fold);
        if !fold {
            return Ok(());
        }

        match handler.find_safe_tile_to_discard(stg, seat, &mut scn.candidates) {
            Some(c) => println!("discard: {}", c),
            None => println!("discard: no safe tile"),
        }
        Ok(())
    }
}

#[test]
fn test_load_scenario_renumbers_seats() {
    let text = r#"{
        "stage": {
            "dealer": 2,
            "players": [
                {"hand": ["m1", "z1"]},
                {"is_threatening": true},
                {"is_threatening": true},
                {}
            ]
        },
        "seat": 0
    }"#;
    let scn = load_scenario(text).unwrap();
    for (s, p) in scn.stage.players.iter().enumerate() {
        assert_eq!(p.seat, s);
    }
    let threats: Vec<Seat> = get_threatening_players(&scn.stage, 0).iter().map(|p| p.seat).collect();
    assert_eq!(threats, vec![2, 1]);
    assert!(scn.stage.enemy_players(0).all(|p| p.seat != 0));

    assert!(load_scenario(r#"{"stage": {}, "seat": 4}"#).is_err());
}
