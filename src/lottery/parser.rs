//! レンダリング済みHTMLから開獎番号を抽出する

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::ScraperError;

use super::types::{DrawNumber, DrawNumbers};

/// 1回の開獎に含まれる番号数（第1区6個 + 第2区1個）
pub const BALLS_PER_DRAW: usize = 7;

/// 解析済みセレクタ
#[derive(Debug, Clone)]
pub struct DrawSelectors {
    group: Selector,
    ball: Selector,
    group_index: usize,
}

impl DrawSelectors {
    pub fn new(group: &str, ball: &str, group_index: usize) -> Result<Self, ScraperError> {
        Ok(Self {
            group: parse_selector(group)?,
            ball: parse_selector(ball)?,
            group_index,
        })
    }

    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.group_selector,
            &config.ball_selector,
            config.group_index,
        )
    }

    /// HTMLを解析して対象ブロックの番号を取り出す
    pub fn parse_draw(&self, html: &str) -> Result<DrawNumbers, ScraperError> {
        let document = Html::parse_document(html);

        let groups: Vec<_> = document.select(&self.group).collect();
        debug!("Found {} result groups", groups.len());

        let group = groups
            .get(self.group_index)
            .ok_or(ScraperError::GroupNotFound {
                expected: self.group_index + 1,
                found: groups.len(),
            })?;

        let balls: Vec<String> = group
            .select(&self.ball)
            .map(|el| el.text().collect::<String>())
            .collect();
        debug!("Found {} balls in group {}", balls.len(), self.group_index);

        if balls.len() < BALLS_PER_DRAW {
            return Err(ScraperError::InsufficientBalls { found: balls.len() });
        }

        let parsed = balls[..BALLS_PER_DRAW]
            .iter()
            .map(|text| DrawNumber::parse(text))
            .collect::<Result<Vec<_>, _>>()?;

        let [r1, r2, r3, r4, r5, r6, special]: [DrawNumber; BALLS_PER_DRAW] = parsed
            .try_into()
            .map_err(|_| ScraperError::InsufficientBalls { found: balls.len() })?;

        Ok(DrawNumbers {
            regular: [r1, r2, r3, r4, r5, r6],
            special,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector(format!("{}: {}", selector, e)))
}
