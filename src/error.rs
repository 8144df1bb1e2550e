use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("レンダリングエラー: {0}")]
    Render(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("開獎ブロックが見つかりません（{expected}個必要、{found}個のみ）")]
    GroupNotFound { expected: usize, found: usize },

    #[error("番号数が不足しています（7個必要、{found}個のみ）")]
    InsufficientBalls { found: usize },

    #[error("不正な番号: {0:?}")]
    InvalidNumber(String),

    #[error("セレクタエラー: {0}")]
    Selector(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),
}
