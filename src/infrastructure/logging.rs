/// ログ基盤モジュール
///
/// Lambda環境向けの構造化ログ設定を提供する。
/// tracingクレートを使用し、JSON形式での出力をサポートする。
///
/// ログ設定はプロセス起動時に一度だけ`LoggingConfig`として構築され、
/// 以降は読み取り専用で`init_logging`に渡される。
use std::fmt;
use std::str::FromStr;
use std::sync::Once;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 環境変数名: ログレベル
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// 環境変数名: ログ出力形式
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// ログレベルのパースエラー
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid log level: {0}")]
pub struct LogLevelParseError(pub String);

/// ログ出力形式のパースエラー
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid log format: {0}")]
pub struct LogFormatParseError(pub String);

/// ログレベル
///
/// デフォルトはinfo（debug以下のレコードは抑制される）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// EnvFilterのディレクティブとして使える文字列を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogLevelParseError;

    /// 大文字小文字を区別せずにパースする
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LogLevelParseError(value.to_string())),
        }
    }
}

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON形式（Lambda/CloudWatch向け）
    #[default]
    Json,
    /// 人間が読みやすい形式（ローカル実行向け）
    Pretty,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Pretty => f.write_str("pretty"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(LogFormatParseError(value.to_string())),
        }
    }
}

/// ログ設定
///
/// プロセスごとに一度だけ初期化される不変データ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    /// 出力するログの最小レベル
    pub level: LogLevel,
    /// ログ出力形式
    pub format: LogFormat,
}

impl LoggingConfig {
    /// 明示的な値でLoggingConfigを作成
    pub fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }

    /// 環境変数から設定を読み込み
    ///
    /// 環境変数が未設定、またはパースエラーの場合はデフォルト値を使用する。
    /// この時点ではサブスクライバーが未初期化のため、パースエラーはログ出力しない。
    ///
    /// # 環境変数
    /// - LOG_LEVEL: trace / debug / info / warn / error（デフォルト: info）
    /// - LOG_FORMAT: json / pretty（デフォルト: json）
    pub fn from_env() -> Self {
        Self {
            level: parse_env(ENV_LOG_LEVEL),
            format: parse_env(ENV_LOG_FORMAT),
        }
    }

    /// 設定されたレベルからEnvFilterを構築
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.level.as_str())
    }
}

/// 環境変数から値を読み込む
///
/// 未設定またはパースエラーの場合はデフォルト値を返す。
fn parse_env<T>(key: &str) -> T
where
    T: FromStr + Default,
{
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 環境変数`RUST_LOG`が設定されていればそれを優先し、
/// そうでなければ`config.level`でフィルタリングを行う。
///
/// この関数は複数回呼び出しても安全で、最初の呼び出しのみ初期化を実行する。
///
/// # 使用例
/// ```ignore
/// use message_logger::infrastructure::{init_logging, LoggingConfig};
///
/// init_logging(&LoggingConfig::from_env());
/// tracing::info!("Lambda function started");
/// ```
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.env_filter());

        match config.format {
            LogFormat::Json => {
                // JSON形式のログレイヤー（Lambda/CloudWatch向け）
                let json_layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .flatten_event(true)
                    .with_current_span(false);

                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(json_layer)
                    .try_init();
            }
            LogFormat::Pretty => {
                let fmt_layer = tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .compact();

                let _ = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .try_init();
            }
        }
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
///
/// # 注意
/// この関数はテスト専用であり、本番環境では`init_logging`を使用すること。
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}
