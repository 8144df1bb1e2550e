//! 威力彩 関連の型定義

use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

/// 取得失敗時に表示するサンプル番号
pub const SAMPLE_REGULAR_NUMBERS: [&str; 6] = ["03", "08", "15", "22", "27", "34"];
pub const SAMPLE_SPECIAL_NUMBER: &str = "18";
pub const SAMPLE_NOTE: &str = "⚠️ 無法連線至官網，顯示測試資料";

/// データ取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// 官網から取得
    Live,
    /// サンプルデータ
    Sample,
}

/// 2桁ゼロ埋め済みの番号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawNumber(String);

impl DrawNumber {
    /// 球のテキストを番号に変換（前後空白除去 + 2桁ゼロ埋め）
    pub fn parse(raw: &str) -> Result<Self, ScraperError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= 2
            && trimmed.bytes().all(|b| b.is_ascii_digit());

        if !valid {
            return Err(ScraperError::InvalidNumber(trimmed.to_string()));
        }

        Ok(Self(format!("{:0>2}", trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ページから抽出した1回分の開獎番号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawNumbers {
    /// 第1区（ページ上の順序のまま）
    pub regular: [DrawNumber; 6],
    /// 第2区
    pub special: DrawNumber,
}

/// 表示層に渡す開獎結果
///
/// `live` / `sample` 以外からは生成できない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotteryResult {
    success: bool,
    regular_numbers: Vec<String>,
    special_number: String,
    source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl LotteryResult {
    pub fn live(draw: DrawNumbers) -> Self {
        Self {
            success: true,
            regular_numbers: draw
                .regular
                .into_iter()
                .map(DrawNumber::into_string)
                .collect(),
            special_number: draw.special.into_string(),
            source: DataSource::Live,
            note: None,
        }
    }

    pub fn sample() -> Self {
        Self {
            success: true,
            regular_numbers: SAMPLE_REGULAR_NUMBERS
                .iter()
                .map(|n| n.to_string())
                .collect(),
            special_number: SAMPLE_SPECIAL_NUMBER.to_string(),
            source: DataSource::Sample,
            note: Some(SAMPLE_NOTE.to_string()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// 第1区（6個、ページ上の順序）
    pub fn regular_numbers(&self) -> &[String] {
        &self.regular_numbers
    }

    /// 第2区
    pub fn special_number(&self) -> &str {
        &self.special_number
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    /// サンプルデータ時のみ
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }
}
