//! TracingEventLoggerを使ったEventHandlerの結合テスト
//!
//! tracingのイベントをキャプチャするレイヤーを差し込み、
//! 実際に出力されるログレコードのレベルと件数を検証する。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use message_logger::application::{EventHandler, ProcessingError};
use message_logger::domain::SUCCESS_MESSAGE;
use message_logger::infrastructure::{LogFormat, LogLevel, LoggingConfig, TracingEventLogger};
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ========================================
// テストヘルパー
// ========================================

type Records = Arc<Mutex<Vec<(Level, String)>>>;

/// 受信したイベントのレベルとメッセージを記録するレイヤー
struct CaptureLayer {
    records: Records,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.records
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.message));
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// キャプチャ用サブスクライバーの下でクロージャを実行し、記録されたレコードを返す
fn capture<T>(config: LoggingConfig, f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    let records = Records::default();
    let subscriber = tracing_subscriber::registry()
        .with(config.env_filter())
        .with(CaptureLayer {
            records: records.clone(),
        });

    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = records.lock().unwrap().clone();
    (result, captured)
}

fn messages_at(records: &[(Level, String)], level: Level) -> Vec<String> {
    records
        .iter()
        .filter(|(record_level, _)| *record_level == level)
        .map(|(_, message)| message.clone())
        .collect()
}

/// シリアライズ時に必ずエラーを返す値
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("cannot serialize socket handle"))
    }
}

// ========================================
// シナリオテスト
// ========================================

/// key1を含むイベントは3件の情報レコードを出力する
#[test]
fn test_event_with_key1() {
    let handler = EventHandler::new(TracingEventLogger);

    let (result, records) = capture(LoggingConfig::default(), || {
        handler.handle(&json!({"key1": "value1"}), None)
    });

    assert_eq!(result.unwrap(), SUCCESS_MESSAGE);

    let infos = messages_at(&records, Level::INFO);
    assert_eq!(infos.len(), 3);
    assert!(infos[2].contains("key1 with value: value1"));
    assert!(messages_at(&records, Level::ERROR).is_empty());
}

/// 空のイベントはkey1に言及しない
#[test]
fn test_empty_event() {
    let handler = EventHandler::new(TracingEventLogger);

    let (result, records) = capture(LoggingConfig::default(), || handler.handle(&json!({}), None));

    assert_eq!(result.unwrap(), "Event processed successfully");
    assert_eq!(messages_at(&records, Level::INFO).len(), 2);
    assert!(records.iter().all(|(_, message)| !message.contains("key1")));
}

/// シリアライズできないイベントはエラーレコード1件を出力して失敗する
#[test]
fn test_unserializable_event() {
    let handler = EventHandler::new(TracingEventLogger);
    let mut event = BTreeMap::new();
    event.insert("key1", Unserializable);

    let (result, records) = capture(LoggingConfig::default(), || handler.handle(&event, None));

    let err = result.unwrap_err();
    assert!(matches!(err, ProcessingError::Serialization(_)));

    assert!(messages_at(&records, Level::INFO).is_empty());
    let errors = messages_at(&records, Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("cannot serialize socket handle"));
}

/// 同じ入力に対して常に同じ結果とレコードを出力する
#[test]
fn test_repeated_invocations_are_independent() {
    let handler = EventHandler::new(TracingEventLogger);
    let event = json!({"key1": "value1", "key2": [1, 2, 3]});

    let (first, first_records) =
        capture(LoggingConfig::default(), || handler.handle(&event, None).unwrap());
    let (second, second_records) =
        capture(LoggingConfig::default(), || handler.handle(&event, None).unwrap());

    assert_eq!(first, second);
    assert_eq!(first_records, second_records);
}

// ========================================
// ログレベル設定
// ========================================

/// デフォルトのinfoレベルではdebugレコードは抑制される
#[test]
fn test_default_level_suppresses_debug() {
    let (_, records) = capture(LoggingConfig::default(), || {
        tracing::debug!("debug record");
        tracing::info!("info record");
    });

    assert_eq!(records, vec![(Level::INFO, "info record".to_string())]);
}

/// errorレベルに設定すると情報レコードは出力されない
#[test]
fn test_error_level_keeps_only_errors() {
    let handler = EventHandler::new(TracingEventLogger);
    let config = LoggingConfig::new(LogLevel::Error, LogFormat::Json);

    let (result, records) = capture(config, || handler.handle(&json!({"key1": "value1"}), None));

    assert_eq!(result.unwrap(), SUCCESS_MESSAGE);
    assert!(records.is_empty());
}
