use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ScraperError;

/// 台湾彩券トップページ
pub const DEFAULT_SOURCE_URL: &str = "https://www.taiwanlottery.com/";
/// 各ゲームの開獎番号ブロック
pub const DEFAULT_GROUP_SELECTOR: &str = "div.result-balls";
/// ブロック内の番号球
pub const DEFAULT_BALL_SELECTOR: &str = "div.ball";
/// 威力彩はトップページの2番目のブロック
pub const DEFAULT_GROUP_INDEX: usize = 1;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub source_url: String,
    pub group_selector: String,
    pub ball_selector: String,
    pub group_index: usize,
    /// ページ遷移後、JavaScriptの描画を待つ時間
    pub settle_delay: Duration,
    /// レンダリング全体のタイムアウト
    pub timeout: Duration,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    /// 実行ファイル未指定時にChromiumをダウンロードするか
    pub fetch_browser: bool,
    pub browser_cache_dir: PathBuf,
    /// 同時に起動できるブラウザ数
    pub max_sessions: usize,
    pub debug: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            group_selector: DEFAULT_GROUP_SELECTOR.to_string(),
            ball_selector: DEFAULT_BALL_SELECTOR.to_string(),
            group_index: DEFAULT_GROUP_INDEX,
            settle_delay: Duration::from_secs(2),
            timeout: Duration::from_secs(60),
            headless: true,
            chrome_executable: None,
            fetch_browser: false,
            browser_cache_dir: PathBuf::from("./.chromium"),
            max_sessions: 2,
            debug: false,
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数（.envも含む）から設定を読み込む
    pub fn from_env() -> Result<Self, ScraperError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Some(url) = env_string("LOTTERY_SOURCE_URL") {
            config.source_url = url;
        }
        if let Some(selector) = env_string("LOTTERY_GROUP_SELECTOR") {
            config.group_selector = selector;
        }
        if let Some(selector) = env_string("LOTTERY_BALL_SELECTOR") {
            config.ball_selector = selector;
        }
        if let Some(index) = env_parse::<usize>("LOTTERY_GROUP_INDEX")? {
            config.group_index = index;
        }
        if let Some(ms) = env_parse::<u64>("LOTTERY_SETTLE_DELAY_MS")? {
            config.settle_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = env_parse::<u64>("LOTTERY_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(headless) = env_parse::<bool>("LOTTERY_HEADLESS")? {
            config.headless = headless;
        }
        if let Some(debug) = env_parse::<bool>("LOTTERY_DEBUG")? {
            config.debug = debug;
        }
        if let Some(max) = env_parse::<usize>("LOTTERY_MAX_SESSIONS")? {
            if max == 0 {
                return Err(ScraperError::Config(
                    "LOTTERY_MAX_SESSIONS は1以上を指定してください".into(),
                ));
            }
            config.max_sessions = max;
        }
        if let Some(fetch) = env_parse::<bool>("LOTTERY_FETCH_BROWSER")? {
            config.fetch_browser = fetch;
        }
        if let Some(dir) = env_string("LOTTERY_BROWSER_CACHE") {
            config.browser_cache_dir = PathBuf::from(dir);
        }
        config.chrome_executable = env_string("CHROME_PATH")
            .or_else(|| env_string("CHROMIUM_PATH"))
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_selectors(mut self, group: impl Into<String>, ball: impl Into<String>) -> Self {
        self.group_selector = group.into();
        self.ball_selector = ball.into();
        self
    }

    pub fn with_group_index(mut self, index: usize) -> Self {
        self.group_index = index;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max.max(1);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// HTTPサーバー設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ScraperError> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Some(host) = env_string("HOST") {
            config.host = host;
        }
        if let Some(port) = env_parse::<u16>("PORT")? {
            config.port = port;
        }
        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ScraperError> {
    match env_string(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ScraperError::Config(format!("{} の値が不正です: {}", key, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScraperConfig::default();

        assert_eq!(config.source_url, "https://www.taiwanlottery.com/");
        assert_eq!(config.group_selector, "div.result-balls");
        assert_eq!(config.ball_selector, "div.ball");
        assert_eq!(config.group_index, 1);
        assert_eq!(config.settle_delay, Duration::from_secs(2));
        assert!(config.headless);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_source_url("http://localhost:8080/")
            .with_selectors("section.draw", "span.num")
            .with_group_index(0)
            .with_settle_delay(Duration::from_millis(250))
            .with_timeout(Duration::from_secs(5))
            .with_headless(false)
            .with_chrome_executable("/usr/bin/chromium")
            .with_max_sessions(0)
            .with_debug(true);

        assert_eq!(config.source_url, "http://localhost:8080/");
        assert_eq!(config.group_selector, "section.draw");
        assert_eq!(config.ball_selector, "span.num");
        assert_eq!(config.group_index, 0);
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.headless);
        assert_eq!(
            config.chrome_executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
        assert_eq!(config.max_sessions, 1);
        assert!(config.debug);
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        env::set_var("LOTTERY_TEST_BOGUS_NUMBER", "two");
        let parsed = env_parse::<u64>("LOTTERY_TEST_BOGUS_NUMBER");
        env::remove_var("LOTTERY_TEST_BOGUS_NUMBER");

        assert!(matches!(parsed, Err(ScraperError::Config(_))));
    }

    #[test]
    fn test_env_parse_missing_and_blank() {
        env::set_var("LOTTERY_TEST_BLANK", "   ");
        assert!(env_parse::<u64>("LOTTERY_TEST_BLANK").unwrap().is_none());
        env::remove_var("LOTTERY_TEST_BLANK");

        assert!(env_parse::<u64>("LOTTERY_TEST_NEVER_SET").unwrap().is_none());
    }

    #[test]
    fn test_server_config_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:5000");
    }
}
