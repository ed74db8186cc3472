// ドメイン層モジュール
pub mod event;

// 再エクスポート
pub use event::{Event, SerializedEvent, SUCCESS_MESSAGE, WATCHED_KEY};
