use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    STATUS_NOT_DEPLOYED, STATUS_NOT_FINE_TUNED, STATUS_NOT_GENERATED, STATUS_NOT_UPLOADED, STATUS_SUCCESS,
    STATUS_UNKNOWN_STAGE,
};

/// Pipeline stage a task is currently in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Created,
    ExtractContent,
    GenerateSample,
    FineTune,
    Deploy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Created => "created",
            Stage::ExtractContent => "extract_content",
            Stage::GenerateSample => "generate_sample",
            Stage::FineTune => "fine_tune",
            Stage::Deploy => "deploy",
            Stage::Unknown => "unknown",
        }
    }

    /// Human readable label for the detail page.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Created => "Created",
            Stage::ExtractContent => "Extract content",
            Stage::GenerateSample => "Generate samples",
            Stage::FineTune => "Fine-tune",
            Stage::Deploy => "Deploy",
            Stage::Unknown => "Unknown",
        }
    }
}

/// Status block reported for a single stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FineTuneInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub lora_name: Option<String>,
    #[serde(default)]
    pub base_model: Option<String>,
}

/// A fine-tuning task as returned by `GET /api/tasks` and `GET /api/tasks/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: Stage,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub documents_info: Option<StageInfo>,
    #[serde(default)]
    pub samples_info: Option<StageInfo>,
    #[serde(default)]
    pub fine_tune_info: Option<FineTuneInfo>,
    #[serde(default)]
    pub deployment_info: Option<StageInfo>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Task {
    /// Status of the current stage, or a placeholder when the stage has not
    /// reported one yet.
    pub fn status_label(&self) -> &str {
        match self.stage {
            Stage::ExtractContent => {
                non_empty(self.documents_info.as_ref().and_then(|i| i.status.as_ref())).unwrap_or(STATUS_NOT_UPLOADED)
            }
            Stage::GenerateSample => {
                non_empty(self.samples_info.as_ref().and_then(|i| i.status.as_ref())).unwrap_or(STATUS_NOT_GENERATED)
            }
            Stage::FineTune => non_empty(self.fine_tune_info.as_ref().and_then(|i| i.status.as_ref()))
                .unwrap_or(STATUS_NOT_FINE_TUNED),
            Stage::Deploy => non_empty(self.deployment_info.as_ref().and_then(|i| i.status.as_ref()))
                .unwrap_or(STATUS_NOT_DEPLOYED),
            Stage::Created => STATUS_SUCCESS,
            Stage::Unknown => STATUS_UNKNOWN_STAGE,
        }
    }

    /// Progress of the current stage in percent, clamped to `0..=100`.
    pub fn progress(&self) -> f64 {
        let raw = match self.stage {
            Stage::ExtractContent => self.documents_info.as_ref().and_then(|i| i.progress),
            Stage::GenerateSample => self.samples_info.as_ref().and_then(|i| i.progress),
            Stage::FineTune => self.fine_tune_info.as_ref().and_then(|i| i.progress),
            Stage::Deploy => self.deployment_info.as_ref().and_then(|i| i.progress),
            Stage::Created | Stage::Unknown => None,
        };
        raw.filter(|p| p.is_finite()).unwrap_or(0.0).clamp(0.0, 100.0)
    }

    /// Only the document and sample stages report meaningful progress.
    pub fn shows_progress(&self) -> bool {
        matches!(self.stage, Stage::ExtractContent | Stage::GenerateSample)
    }

    fn succeeded(&self) -> bool {
        self.status_label() == STATUS_SUCCESS
    }

    pub fn can_start_fine_tune(&self) -> bool {
        self.stage == Stage::GenerateSample && self.succeeded()
    }

    /// Deploy is offered once fine-tuning succeeded, and again when a
    /// deployment has not (yet) succeeded.
    pub fn can_deploy(&self) -> bool {
        match self.stage {
            Stage::FineTune => self.succeeded(),
            Stage::Deploy => !self.succeeded(),
            _ => false,
        }
    }

    /// Whether the task has a live deployment the playground can chat with.
    pub fn is_deployed(&self) -> bool {
        self.deployment_info.as_ref().and_then(|i| i.status.as_deref()) == Some(STATUS_SUCCESS)
    }

    pub fn lora_name(&self) -> Option<&str> {
        non_empty(self.fine_tune_info.as_ref().and_then(|i| i.lora_name.as_ref()))
    }

    pub fn base_model(&self) -> Option<&str> {
        non_empty(self.fine_tune_info.as_ref().and_then(|i| i.base_model.as_ref()))
    }
}

/// An uploaded source document (`GET /api/tasks/{id}/documents`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
}

/// Name of a base model fine-tunes can start from (`GET /api/base-models`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseModel(pub String);

impl BaseModel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids are strings in most payloads but some endpoints send integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Int(n) => n.to_string(),
    })
}
