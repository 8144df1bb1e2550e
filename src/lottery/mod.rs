//! 威力彩 スクレイパーモジュール
//!
//! 台湾彩券トップページから最新の威力彩 開獎番号を取得する

mod extractor;
mod parser;
mod types;

pub use extractor::{DrawExtractor, DrawOutcome};
pub use parser::{DrawSelectors, BALLS_PER_DRAW};
pub use types::{
    DataSource, DrawNumber, DrawNumbers, LotteryResult, SAMPLE_NOTE, SAMPLE_REGULAR_NUMBERS,
    SAMPLE_SPECIAL_NUMBER,
};
