use std::fmt;

use serde::{Deserialize, Serialize};

use crate::providers::ProviderId;

/// Content type a generation provider can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
    Video,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Text, Modality::Image, Modality::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Video => "video",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-controlled state for one provider: its API key and on/off switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub provider: ProviderId,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ApiConfig {
    pub fn new(provider: ProviderId, api_key: impl Into<String>, is_active: bool) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            is_active,
            updated_at: None,
        }
    }

    pub fn unconfigured(provider: ProviderId) -> Self {
        Self::new(provider, String::new(), false)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

pub fn normalize_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
