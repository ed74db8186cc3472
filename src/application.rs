// アプリケーション層モジュール
pub mod event_handler;

// 再エクスポート
pub use event_handler::{EventHandler, InvocationContext, ProcessingError};
