/// イベント処理のログ出力先
///
/// ハンドラーからログ出力先を抽象化し、
/// 異なる実装を可能にする（tracingへの出力、テスト用モック）。
use thiserror::Error;
use tracing::{error, info};

/// ログ出力操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LogError {
    /// ログレコードの書き込みに失敗
    #[error("Log write error: {0}")]
    Write(String),
}

/// ログ出力用トレイト
///
/// 複数の呼び出しから同時に使われても安全である必要がある。
pub trait EventLogger: Send + Sync {
    /// 情報レベルのレコードを出力
    fn info(&self, message: &str) -> Result<(), LogError>;

    /// エラーレベルのレコードを出力
    fn error(&self, message: &str) -> Result<(), LogError>;
}

/// tracingマクロへ転送するログ出力実装
///
/// 出力形式やレベルによるフィルタリングは`init_logging`で設定した
/// サブスクライバーに委ねる。書き込みは失敗しない。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLogger;

impl EventLogger for TracingEventLogger {
    fn info(&self, message: &str) -> Result<(), LogError> {
        info!("{message}");
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), LogError> {
        error!("{message}");
        Ok(())
    }
}
