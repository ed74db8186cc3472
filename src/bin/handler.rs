/// イベント処理Lambda関数
///
/// 受信したイベントをログ出力し、固定の成功メッセージを返却する。
/// 処理に失敗した場合はエラーをLambdaランタイムへ返し、
/// リトライやDLQへの送信はホストランタイム側の設定に委ねる。
///
/// # 環境変数
/// - LOG_LEVEL: ログレベル（デフォルト: info）
/// - LOG_FORMAT: json / pretty（デフォルト: json）
/// - RUST_LOG: 設定されている場合はLOG_LEVELより優先
use lambda_runtime::{service_fn, Error, LambdaEvent};
use message_logger::application::EventHandler;
use message_logger::infrastructure::{init_logging, LoggingConfig, TracingEventLogger};
use serde_json::Value;
use tracing::info_span;

/// EventHandlerの静的インスタンス
///
/// 状態を持たないため、warm start時も同じインスタンスを再利用する。
static HANDLER: EventHandler<TracingEventLogger> = EventHandler::new(TracingEventLogger);

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging(&LoggingConfig::from_env());

    // Lambda関数を初期化して実行
    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
async fn handler(event: LambdaEvent<Value>) -> Result<String, Error> {
    let span = info_span!("invocation", request_id = %event.context.request_id);
    let message = span.in_scope(|| HANDLER.handle(&event.payload, Some(&event.context)))?;
    Ok(message.to_string())
}
