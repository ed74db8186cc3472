// イベントモデル
//
// ホストランタイムから受け取るイベントペイロードと、
// ログ出力用にシリアライズ済みのイベント表現を提供するドメイン層コンポーネント。

use serde::Serialize;
use serde_json::{Map, Value};

/// 処理成功時に返却する固定メッセージ
pub const SUCCESS_MESSAGE: &str = "Event processed successfully";

/// 存在する場合に値をログ出力するフィールド名
pub const WATCHED_KEY: &str = "key1";

/// 文字列キーから任意の値へのマッピングとしてのイベント
///
/// 必須フィールドは存在しない。呼び出し元が構築し、ハンドラーは所有も永続化もしない。
pub type Event = Map<String, Value>;

/// JSONにシリアライズ済みのイベント
///
/// シリアライズに成功したイベントのみが構築できるため、
/// このインスタンスを保持している時点でログ出力用のテキストは確定している。
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedEvent {
    /// JSON値としてのイベント
    value: Value,
    /// ログ出力用のJSONテキスト
    text: String,
}

impl SerializedEvent {
    /// 任意のシリアライズ可能なペイロードからSerializedEventを作成
    ///
    /// # 戻り値
    /// * `Ok(SerializedEvent)` - シリアライズ成功
    /// * `Err(serde_json::Error)` - 文字列以外のマップキーや、
    ///   `Serialize`実装がエラーを返す値を含む場合
    pub fn from_payload<E>(payload: &E) -> Result<Self, serde_json::Error>
    where
        E: Serialize + ?Sized,
    {
        let value = serde_json::to_value(payload)?;
        let text = serde_json::to_string(&value)?;
        Ok(Self { value, text })
    }

    /// ログ出力用のJSONテキストを取得
    pub fn as_json(&self) -> &str {
        &self.text
    }

    /// JSON値としてのイベントを取得
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// トップレベルのフィールドを取得
    ///
    /// イベントがJSONオブジェクトでない場合、またはキーが存在しない場合は`None`。
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.value.as_object().and_then(|object| object.get(key))
    }

    /// 監視対象フィールド（`key1`）の値をテキスト化して取得
    pub fn watched_value(&self) -> Option<String> {
        self.field(WATCHED_KEY).map(render_value)
    }
}

/// ログ出力用に値をテキスト化する
///
/// 文字列はJSONのクォートを外してそのまま出力し、それ以外はJSONテキストで出力する。
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
