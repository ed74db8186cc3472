// インフラストラクチャ層モジュール
pub mod event_logger;
pub mod logging;

// 再エクスポート
pub use event_logger::{EventLogger, LogError, TracingEventLogger};
pub use logging::{
    init_logging, LogFormat, LogFormatParseError, LogLevel, LogLevelParseError, LoggingConfig,
};
