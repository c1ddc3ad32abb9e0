// mainから直接呼び出すアプリケーションの動作モード(D, S)のモジュール

mod defence;
mod simulate;

pub use defence::{DefenceApp, DefenceArgs};
pub use simulate::{SimulateApp, SimulateArgs};
