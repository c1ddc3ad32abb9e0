#![warn(rust_2018_idioms)]

mod app;

use clap::{Parser, Subcommand};
use log::{error, LevelFilter};

use mahjong_defence::util;

#[derive(Parser)]
#[command(version, about = "mahjong defence decision engine")]
struct Cli {
    /// デバッグログを出力
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// シナリオファイルの局面に対して押し引きと安全牌を判定
    #[command(alias = "D")]
    Defence(app::DefenceArgs),
    /// ランダムな局面で押し引きの統計を取る
    #[command(alias = "S")]
    Simulate(app::SimulateArgs),
}

fn main() {
    let cli = Cli::parse();
    util::log::init(if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let res = match cli.mode {
        Mode::Defence(args) => app::DefenceApp::new(args).run(),
        Mode::Simulate(args) => app::SimulateApp::new(args).run(),
    };
    if let Err(e) = res {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
