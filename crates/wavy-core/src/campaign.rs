//! Campaign records and the payload for creating one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fit::CreatorMatch;

/// A brand campaign as listed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Backends have returned both numeric and string ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<CreatorMatch>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    /// Renders the id for display and lookup: strings as-is, numbers in
    /// decimal, absent as `None`.
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    #[must_use]
    pub fn creators(&self) -> &[CreatorMatch] {
        self.creators.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechComplexity {
    Complex,
    Simple,
}

impl SpeechComplexity {
    /// Numeric flag the backend expects.
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            SpeechComplexity::Complex => 1,
            SpeechComplexity::Simple => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalPattern {
    Consistent,
    Variant,
}

impl EmotionalPattern {
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            EmotionalPattern::Consistent => 1,
            EmotionalPattern::Variant => 0,
        }
    }
}

/// How the backend should match creators to a new campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftMatching {
    Automatic,
    Manual {
        speech: SpeechComplexity,
        emotion: EmotionalPattern,
    },
}

impl SoftMatching {
    #[must_use]
    pub fn is_automatic(self) -> bool {
        matches!(self, SoftMatching::Automatic)
    }
}

/// Input for `POST /campaigns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub soft_matching: SoftMatching,
}

#[derive(Serialize)]
struct NewCampaignBody<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_complexity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotional_pattern: Option<u8>,
}

impl NewCampaign {
    /// JSON request body. Soft-matching flags are only sent in manual mode.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let (speech_complexity, emotional_pattern) = match self.soft_matching {
            SoftMatching::Automatic => (None, None),
            SoftMatching::Manual { speech, emotion } => (Some(speech.flag()), Some(emotion.flag())),
        };
        let body = NewCampaignBody {
            name: &self.name,
            description: &self.description,
            speech_complexity,
            emotional_pattern,
        };
        serde_json::to_value(body).unwrap_or(Value::Null)
    }

    /// Value of the `automatic-softmatching` request header.
    #[must_use]
    pub fn soft_matching_header(&self) -> &'static str {
        if self.soft_matching.is_automatic() {
            "true"
        } else {
            "false"
        }
    }
}
