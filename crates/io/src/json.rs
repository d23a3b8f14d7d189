// JSON script decoding
//
// Wire format: an array of objects, each with `text`, optional `type`
// ("technical" | "music", anything else is dialogue) and optional
// `person` / `speaker` for dialogue.

use serde::Deserialize;
use serde_json::Value;

use scriptview_core::{Script, ScriptLine};

use crate::LoadError;

/// One record as it appears on the wire. All fields are optional; the
/// variant is decided in [`RawLine::into_line`].
#[derive(Debug, Default, Deserialize)]
struct RawLine {
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    person: Option<Value>,
    #[serde(default)]
    speaker: Option<Value>,
}

impl RawLine {
    fn into_line(self) -> ScriptLine {
        let text = value_text(self.text).unwrap_or_default();
        match self.kind.as_ref().and_then(Value::as_str) {
            Some("technical") => ScriptLine::Technical { text },
            Some("music") => ScriptLine::Music { text },
            _ => ScriptLine::Dialogue {
                speaker: value_text(self.person).or_else(|| value_text(self.speaker)),
                text,
            },
        }
    }
}

/// Strings pass through; numbers and booleans are rendered; null is absent.
fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Decode a script document.
pub fn decode(bytes: &[u8]) -> Result<Script, LoadError> {
    // Static file servers occasionally hand back a UTF-8 BOM
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let doc: Value = serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;
    let records = match doc {
        Value::Array(records) => records,
        other => {
            return Err(LoadError::Parse(format!(
                "expected a JSON array of lines, found {}",
                json_type_name(&other)
            )))
        }
    };

    let mut lines = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            return Err(LoadError::Parse(format!(
                "line {}: expected an object, found {}",
                i,
                json_type_name(&record)
            )));
        }
        let raw = RawLine::deserialize(record)
            .map_err(|e| LoadError::Parse(format!("line {}: {}", i, e)))?;
        lines.push(raw.into_line());
    }

    Ok(Script::new(lines))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
