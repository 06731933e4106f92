//! Profile status snapshots and the videos they carry.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::progress;

/// Server-reported snapshot of processing progress.
///
/// Only `total_videos` and `videos_processed` drive polling; the remaining
/// fields are descriptive and kept for display. Unknown fields are preserved
/// in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatus {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_videos: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub videos_processed: u64,
    #[serde(
        default,
        deserialize_with = "lenient_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub matched_campaigns: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub applications: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
    #[serde(
        rename = "videosNeededFor90",
        default,
        deserialize_with = "lenient_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub videos_needed_for_90: Option<u64>,
    #[serde(
        default,
        deserialize_with = "lenient_videos",
        skip_serializing_if = "Option::is_none"
    )]
    pub videos: Option<Vec<Video>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileStatus {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        progress::is_complete(self.total_videos, self.videos_processed)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        progress::progress_percent(self.total_videos, self.videos_processed)
    }

    /// Videos carried by this snapshot, or an empty slice when the backend
    /// omitted the list.
    #[must_use]
    pub fn videos(&self) -> &[Video] {
        self.videos.as_deref().unwrap_or_default()
    }
}

/// One creator video as returned by the videos and profile endpoints.
///
/// Every field decodes leniently: an off-type value reads as absent instead
/// of failing the surrounding profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "thumbnailUrl",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Raw embedding entries. Only non-empty-array-ness is interpreted.
    #[serde(default, deserialize_with = "lenient_array", skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Video {
    #[must_use]
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .unwrap_or("Untitled video")
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(self.thumbnail_url.as_deref()).or_else(|| non_empty(self.thumbnail.as_deref()))
    }

    #[must_use]
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|e| !e.is_empty())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Coerces a JSON value into a non-negative count.
///
/// Accepts integers, floats (floored), and numeric strings. Negative values
/// clamp to zero; anything else reads as absent.
fn coerce_count(value: &Value) -> Option<u64> {
    let as_float = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(u);
            }
            n.as_f64()?
        }
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    if !as_float.is_finite() || as_float <= 0.0 {
        return Some(0);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let floored = as_float.floor() as u64;
    Some(floored)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value).unwrap_or(0))
}

fn lenient_optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}

/// Numbers and numeric strings; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

/// Strings as-is, numbers rendered in decimal; anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(items)),
        _ => Ok(None),
    }
}

/// A non-array list reads as absent; entries that are not objects are
/// dropped.
fn lenient_videos<'de, D>(deserializer: D) -> Result<Option<Vec<Video>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let videos = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    Ok(Some(videos))
}
