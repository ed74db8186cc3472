/// ローカル動作確認用のイベント送信
///
/// サンプルイベント`{"key1": "value1"}`をコンテキストなしでハンドラーに渡す。
/// 処理に失敗した場合は非ゼロの終了コードで終了する。
///
/// # ローカル実行
/// ```bash
/// # サンプルイベントで実行
/// cargo run --bin simulate
///
/// # イベントを指定
/// cargo run --bin simulate -- --event '{"key1": 42, "other": true}'
///
/// # 人間が読みやすい形式で出力
/// cargo run --bin simulate -- --log-format pretty
/// ```
use clap::Parser;
use lambda_runtime::Error;
use message_logger::application::EventHandler;
use message_logger::infrastructure::{
    init_logging, LogFormat, LogLevel, LoggingConfig, TracingEventLogger,
};
use serde_json::{json, Value};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "サンプルイベントでハンドラーをローカル実行")]
struct CliArgs {
    /// 送信するイベント（JSON形式）
    /// 省略時は{"key1": "value1"}
    #[arg(long, short = 'e')]
    event: Option<String>,

    /// ログレベル（環境変数LOG_LEVELより優先される）
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// ログ出力形式（環境変数LOG_FORMATより優先される）
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl CliArgs {
    /// 環境変数の設定に引数のオーバーライドを適用
    fn logging_config(&self, base: LoggingConfig) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.unwrap_or(base.level),
            format: self.log_format.unwrap_or(base.format),
        }
    }

    /// 送信するイベントを構築
    fn event(&self) -> Result<Value, serde_json::Error> {
        match &self.event {
            Some(raw) => serde_json::from_str(raw),
            None => Ok(sample_event()),
        }
    }
}

/// 動作確認用のサンプルイベント
fn sample_event() -> Value {
    json!({"key1": "value1"})
}

fn main() -> Result<(), Error> {
    let args = CliArgs::parse();

    init_logging(&args.logging_config(LoggingConfig::from_env()));

    let event = args.event()?;
    let handler = EventHandler::new(TracingEventLogger);
    handler.handle(&event, None)?;
    Ok(())
}
