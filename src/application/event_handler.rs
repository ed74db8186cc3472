/// イベントハンドラー
///
/// 受信したイベントをログ出力し、`key1`フィールドが存在すればその値も出力して
/// 固定の成功メッセージを返却する。
/// 処理中の障害はすべてエラーログに記録したうえで呼び出し元へ伝播する。
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::{SerializedEvent, SUCCESS_MESSAGE, WATCHED_KEY};
use crate::infrastructure::{EventLogger, LogError};

/// 呼び出しコンテキスト
///
/// ハンドラーは内容を参照しない。ローカル実行時は`None`。
pub type InvocationContext<'a> = Option<&'a lambda_runtime::Context>;

/// イベント処理のエラー型
///
/// 元の障害を`source()`として保持し、表示メッセージにもその説明を含める。
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// イベントのJSONシリアライズに失敗
    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    /// ログレコードの書き込みに失敗
    #[error("Failed to write log record: {0}")]
    Logging(#[from] LogError),
}

/// イベントを処理するハンドラー
///
/// 状態を持たないため、構築後は複数の呼び出しから共有できる。
#[derive(Debug, Clone)]
pub struct EventHandler<L>
where
    L: EventLogger,
{
    /// ログ出力先
    logger: L,
}

impl<L> EventHandler<L>
where
    L: EventLogger,
{
    /// 新しいEventHandlerを作成
    pub const fn new(logger: L) -> Self {
        Self { logger }
    }

    /// ログ出力先への参照を取得
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// イベントを処理
    ///
    /// # 処理フロー
    /// 1. イベントをJSONにシリアライズしてログ出力
    /// 2. 処理開始をログ出力
    /// 3. `key1`が存在すればその値をログ出力
    /// 4. 成功メッセージを返却
    ///
    /// いずれかの段階で失敗した場合は`Error occurred: ...`をエラーログに出力し、
    /// 元の障害を`ProcessingError`として返す。
    ///
    /// # 引数
    /// * `event` - シリアライズ可能なイベントペイロード
    /// * `_context` - 呼び出しコンテキスト（未使用）
    pub fn handle<E>(
        &self,
        event: &E,
        _context: InvocationContext<'_>,
    ) -> Result<&'static str, ProcessingError>
    where
        E: Serialize + ?Sized,
    {
        self.process(event).inspect_err(|err| {
            // エラーログの出力失敗で元の障害を上書きしない
            if let Err(log_err) = self.logger.error(&format!("Error occurred: {err}")) {
                warn!(error = %log_err, original_error = %err, "エラーログの出力に失敗");
            }
        })
    }

    fn process<E>(&self, event: &E) -> Result<&'static str, ProcessingError>
    where
        E: Serialize + ?Sized,
    {
        let serialized = SerializedEvent::from_payload(event)?;
        self.logger
            .info(&format!("Received event: {}", serialized.as_json()))?;

        self.logger.info("Processing event...")?;

        if let Some(value) = serialized.watched_value() {
            self.logger
                .info(&format!("Event contains {WATCHED_KEY} with value: {value}"))?;
        }

        Ok(SUCCESS_MESSAGE)
    }
}
