// 麻雀のデータモデル
mod define;
mod player;
mod stage;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use player::*;
pub use stage::*;
pub use tile::*;
