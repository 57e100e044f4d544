use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// What a fetch returns: parsed JSON, or the body verbatim when it isn't JSON.
///
/// Paginated lists come back as `Json(Value::Array)` holding every record.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Json(_) => None,
        }
    }

    /// JSON as-is; text becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self {
            Payload::Json(v) => v,
            Payload::Text(s) => Value::String(s),
        }
    }

    /// Records of a list response. A single object becomes a one-element list.
    pub fn into_records(self) -> Vec<Value> {
        match self.into_json() {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        }
    }

    /// Deserialize the JSON payload into `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_json())?)
    }
}

/// Subtitle file formats the API can render or accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Dfxp,
    Json,
    Sbv,
    Srt,
    Ssa,
    Txt,
    Vtt,
}

impl SubtitleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dfxp => "dfxp",
            Self::Json => "json",
            Self::Sbv => "sbv",
            Self::Srt => "srt",
            Self::Ssa => "ssa",
            Self::Txt => "txt",
            Self::Vtt => "vtt",
        }
    }

    /// Guess from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "dfxp" | "xml" => Some(Self::Dfxp),
            "json" => Some(Self::Json),
            "sbv" => Some(Self::Sbv),
            "srt" => Some(Self::Srt),
            "ssa" => Some(Self::Ssa),
            "txt" => Some(Self::Txt),
            "vtt" => Some(Self::Vtt),
            _ => None,
        }
    }
}

/// Team task types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    Subtitle,
    Translate,
    Review,
    Approve,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subtitle => "Subtitle",
            Self::Translate => "Translate",
            Self::Review => "Review",
            Self::Approve => "Approve",
        }
    }
}

/// POST /videos/ body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVideo {
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_audio_language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// PUT /videos/{id}/ body. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_audio_language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// POST /videos/{id}/urls/ body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewVideoUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<bool>,
}

/// POST /videos/{id}/languages/ body (and PUT, without `language_code`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewLanguage {
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary_audio_language: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles_complete: Option<bool>,
}

/// PUT /videos/{id}/languages/{lang}/ body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LanguageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary_audio_language: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles_complete: Option<bool>,
}

/// POST .../subtitles/ body.
#[derive(Debug, Clone, Serialize)]
pub struct SubtitleUpload {
    pub subtitles: String,
    pub sub_format: SubtitleFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow action to perform after saving, e.g. `"publish"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl SubtitleUpload {
    pub fn new(subtitles: impl Into<String>, sub_format: SubtitleFormat) -> Self {
        Self {
            subtitles: subtitles.into(),
            sub_format,
            title: None,
            description: None,
            action: None,
        }
    }
}

/// POST /teams/{slug}/tasks/ body.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub video_id: String,
    pub language: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// PUT /teams/{slug}/tasks/{id}/ body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_back: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    /// `"Approved"` or `"Rejected"` for review and approve tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<String>,
}

/// POST /teams/{slug}/members/ body.
#[derive(Debug, Clone, Serialize)]
pub struct NewMember {
    pub user: String,
    /// `"contributor"`, `"manager"`, `"admin"` or `"owner"`.
    pub role: String,
}

/// POST /message/ body. Exactly one of `user` or `team` should be set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Message {
    pub subject: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}
