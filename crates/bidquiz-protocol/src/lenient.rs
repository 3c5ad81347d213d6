//! Forgiving field readers for inbound payloads.
//!
//! Browser clients are loose about JSON types: a room code may arrive as a
//! number, a player id as a string. These readers coerce what they can and
//! map the rest to `None`, so one badly typed field never costs the whole
//! frame.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{PlayerId, Question, RoomCode};

/// Renders a value as text. Strings are kept verbatim; `null` is absent;
/// anything else becomes its JSON form.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// Strings and numbers become codes; anything else is absent.
pub(crate) fn room_code<'de, D>(deserializer: D) -> Result<Option<RoomCode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(RoomCode::new(&s)),
        Value::Number(n) => Some(RoomCode::new(&n.to_string())),
        _ => None,
    })
}

/// Non-negative integers, or strings holding one.
pub(crate) fn player_id<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().map(PlayerId),
        Value::String(s) => s.trim().parse::<u64>().ok().map(PlayerId),
        _ => None,
    })
}

/// Truthiness: `false`, `0`, `""` and `null` are false; `null` is
/// reported as absent.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

/// A question list. Bare strings count as question text; entries that are
/// neither strings nor question objects are skipped. A non-list is absent.
pub(crate) fn questions<'de, D>(deserializer: D) -> Result<Option<Vec<Question>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(Question::new(text)),
                Value::Object(_) => serde_json::from_value(item).ok(),
                _ => None,
            })
            .collect(),
    ))
}
