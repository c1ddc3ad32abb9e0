use std::cmp::Ordering;

use anyhow::{ensure, Result};
use clap::Args;
use log::{debug, info};
use rand::prelude::*;

use super::defence::ConfigArgs;
use mahjong_defence::defence::*;
use mahjong_defence::hand::{calc_tiles_to_normal_win, HandEstimator};
use mahjong_defence::model::*;
use mahjong_defence::util::misc::unixtime_now;

const AGENT: Seat = 0;
const DEAD_WALL: usize = 14;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// 乱数シード (0の場合は現在時刻)
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,
    /// 対局数
    #[arg(short = 'g', long, default_value_t = 1000)]
    pub n_game: u32,
    /// 他家が毎巡リーチを宣言する確率
    #[arg(long, default_value_t = 0.05)]
    pub riichi_rate: f64,
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Default)]
struct Stats {
    n_game: u32,
    n_threatened: u32, // 脅威のある局面で手番が来た
    n_fold: u32,
    n_found: u32,   // 安全牌が見つかった
    n_deal_in: u32, // 選んだ牌が実際の待ちだった
}

impl Stats {
    fn print(&self) {
        let rate = |n: u32, d: u32| if d == 0 { 0.0 } else { n as f64 / d as f64 };
        println!("games: {}, threatened: {}", self.n_game, self.n_threatened);
        println!("fold: {} ({:.3})", self.n_fold, rate(self.n_fold, self.n_threatened));
        println!("found: {} ({:.3})", self.n_found, rate(self.n_found, self.n_fold));
        println!("deal-in: {} ({:.3})", self.n_deal_in, rate(self.n_deal_in, self.n_found));
    }
}

// [App]
#[derive(Debug)]
pub struct SimulateApp {
    args: SimulateArgs,
    handler: DefenceHandler,
}

impl SimulateApp {
    pub fn new(mut args: SimulateArgs) -> Self {
        if args.seed == 0 {
            args.seed = unixtime_now();
            info!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                args.seed
            );
        }
        let handler = DefenceHandler::new(args.config.apply(DefenceConfig::default()));
        Self { args, handler }
    }

    pub fn run(self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.args.riichi_rate),
            "riichi rate must be in [0, 1]: {}",
            self.args.riichi_rate
        );
        println!("seed: {}", self.args.seed);

        let mut rng = StdRng::seed_from_u64(self.args.seed);
        let mut stats = Stats::default();
        let start = std::time::Instant::now();
        for _ in 0..self.args.n_game {
            self.run_game(&mut rng, &mut stats);
            stats.n_game += 1;
        }
        stats.print();
        println!(
            "total elapsed time: {:8.3}sec",
            start.elapsed().as_nanos() as f32 / 1000000000.0
        );
        Ok(())
    }

    // 他家はランダムに打牌し,脅威がある状態で自分の手番が来たら判定する
    fn run_game(&self, rng: &mut StdRng, stats: &mut Stats) {
        let mut wall = create_wall(rng);
        let mut stg = Stage::new(rng.gen_range(0..SEAT));
        for s in 0..SEAT {
            stg.players[s].hand = wall.split_off(wall.len() - 13);
        }
        if let Some(t) = wall.pop() {
            stg.on_dora(t);
        }
        stg.wall_count = wall.len().saturating_sub(DEAD_WALL);

        let mut seat = stg.dealer;
        while stg.wall_count > 0 {
            let Some(t) = wall.pop() else {
                break;
            };
            stg.wall_count -= 1;
            stg.players[seat].hand.push(t);

            if seat == AGENT && !get_threatening_players(&stg, AGENT).is_empty() {
                self.evaluate(&stg, stats);
                return;
            }

            let pl = &stg.players[seat];
            let discard = if pl.is_riichi {
                t
            } else {
                pl.hand[rng.gen_range(0..pl.hand.len())]
            };
            stg.on_discard(seat, discard, discard == t);
            if seat != AGENT && !stg.players[seat].is_riichi && rng.gen_bool(self.args.riichi_rate) {
                stg.on_riichi(seat);
            }
            seat = (seat + 1) % SEAT;
        }
        debug!("exhaustive draw");
    }

    fn evaluate(&self, stg: &Stage, stats: &mut Stats) {
        stats.n_threatened += 1;
        let mut cands = create_candidates(stg, AGENT);
        let best = cands.iter().min_by(|a, b| cmp_for_offence(a, b)).cloned();
        let estimator = HandEstimator::new(stg, AGENT).assume_riichi(stg.players[AGENT].is_menzen());
        if !self.handler.should_go_to_defence(stg, AGENT, best.as_ref(), &estimator) {
            return;
        }
        stats.n_fold += 1;

        let Some(c) = self.handler.find_safe_tile_to_discard(stg, AGENT, &mut cands) else {
            return;
        };
        stats.n_found += 1;
        let tile = c.tile_to_discard;
        if get_threatening_players(stg, AGENT).iter().any(|p| is_deal_in(p, tile)) {
            debug!("deal in: {}", tile);
            stats.n_deal_in += 1;
        }
    }
}

// 136枚 (各色の5のうち1枚は赤5)
fn create_wall(rng: &mut StdRng) -> Vec<Tile> {
    let mut wall = vec![];
    for i in 0..KINDS {
        let t = Tile::from_index(i);
        for n in 0..TILE {
            if t.is_suit() && t.1 == 5 && n == 0 {
                wall.push(Tile(t.0, 0));
            } else {
                wall.push(t);
            }
        }
    }
    wall.shuffle(rng);
    wall
}

// 打牌ごとの候補. 向聴数は聴牌(0)とそれ以外(1)のみ区別する
fn create_candidates(stg: &Stage, seat: Seat) -> Vec<DiscardCandidate> {
    let pl = &stg.players[seat];
    let visible = DefenceContext::new(stg, seat).visible_tiles();
    let mut res: Vec<DiscardCandidate> = vec![];
    for (i, &t) in pl.hand.iter().enumerate() {
        if res.iter().any(|c| c.tile_to_discard == t) {
            continue;
        }
        let mut hand = pl.hand.clone();
        hand.remove(i);
        let counts = tiles_to_counts(&hand);
        let waiting = calc_tiles_to_normal_win(&counts);
        let shanten = if waiting.is_empty() { 1 } else { 0 };
        let tiles_count = waiting
            .iter()
            .map(|w| TILE.saturating_sub(visible[w.to_index()]))
            .sum();
        let valuation = calc_connectivity(&counts, t) as f64;
        res.push(DiscardCandidate::new(t, shanten, waiting, tiles_count, valuation));
    }
    res
}

// 周辺(±2)の牌の枚数. 孤立牌ほど小さい
fn calc_connectivity(counts: &TileCounts, tile: Tile) -> usize {
    let i = tile.to_index();
    if tile.is_hornor() {
        return counts[i];
    }
    let base = tile.0 * 9;
    let ni = i - base;
    (ni.saturating_sub(2)..=(ni + 2).min(8))
        .map(|n| counts[base + n])
        .sum()
}

fn cmp_for_offence(a: &DiscardCandidate, b: &DiscardCandidate) -> Ordering {
    a.shanten
        .cmp(&b.shanten)
        .then(b.tiles_count.cmp(&a.tiles_count))
        .then(a.valuation.total_cmp(&b.valuation))
}

// フリテンでない待ちに打牌が含まれるか
fn is_deal_in(pl: &Player, tile: Tile) -> bool {
    if pl.is_safe_tile(tile) {
        return false;
    }
    let waits = calc_tiles_to_normal_win(&tiles_to_counts(pl.closed_hand()));
    waits.iter().any(|w| w.is_same_kind(&tile))
}

#[test]
fn test_create_wall() {
    let mut rng = StdRng::seed_from_u64(1);
    let wall = create_wall(&mut rng);
    assert_eq!(wall.len(), 136);
    assert_eq!(wall.iter().filter(|t| t.is_suit() && t.1 == 0).count(), 3);
    assert_eq!(tiles_to_counts(&wall), [TILE; KINDS]);
}

#[test]
fn test_calc_connectivity() {
    let counts = tiles_to_counts(&[Tile(TM, 1), Tile(TM, 3), Tile(TP, 1), Tile(TZ, 1), Tile(TZ, 1)]);
    assert_eq!(calc_connectivity(&counts, Tile(TM, 1)), 2);
    assert_eq!(calc_connectivity(&counts, Tile(TP, 1)), 1);
    assert_eq!(calc_connectivity(&counts, Tile(TZ, 1)), 2);
}
