//! 開獎結果ページのHTML

use chrono::{DateTime, FixedOffset, Utc};

use crate::lottery::{DataSource, LotteryResult};

const TAIPEI_OFFSET_SECS: i32 = 8 * 3600;

/// 台湾時間 (UTC+8)
pub fn taipei_now(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(TAIPEI_OFFSET_SECS) {
        Some(offset) => now.with_timezone(&offset),
        None => now.fixed_offset(),
    }
}

/// 結果ページを描画
///
/// 番号は2桁の数字、note は固定文言のみなのでエスケープ不要。
pub fn render_page(result: &LotteryResult, fetched_at: DateTime<FixedOffset>) -> String {
    let regular: String = result
        .regular_numbers()
        .iter()
        .map(|n| format!("<span class=\"ball\">{}</span>", n))
        .collect();

    let source_label = match result.source() {
        DataSource::Live => "官網即時資料",
        DataSource::Sample => "測試資料",
    };

    let note = result
        .note()
        .map(|n| format!("<p class=\"note\">{}</p>", n))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
    <meta charset="utf-8">
    <title>威力彩開獎號碼</title>
    <style>
        body {{ font-family: sans-serif; text-align: center; margin-top: 3em; }}
        .ball {{ display: inline-block; width: 2.5em; height: 2.5em; line-height: 2.5em;
                 margin: 0.2em; border-radius: 50%; background: #f5c542; font-weight: bold; }}
        .special {{ background: #e0483e; color: #fff; }}
        .note {{ color: #b35c00; }}
        .meta {{ color: #777; font-size: 0.9em; }}
    </style>
</head>
<body>
    <h1>威力彩開獎號碼</h1>
    {note}
    <section>
        <h2>第一區</h2>
        <div class="regular">{regular}</div>
        <h2>第二區</h2>
        <div><span class="ball special">{special}</span></div>
    </section>
    <p class="meta source-{source}">{source_label}・更新時間 {fetched_at}</p>
    <p><a href="/refresh">重新整理</a></p>
</body>
</html>
"#,
        note = note,
        regular = regular,
        special = result.special_number(),
        source = source_tag(result.source()),
        source_label = source_label,
        fetched_at = fetched_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn source_tag(source: DataSource) -> &'static str {
    match source {
        DataSource::Live => "live",
        DataSource::Sample => "sample",
    }
}
