use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a generation backend. Slugs outside the catalog are
/// kept as `Unknown` so stored records for retired providers survive a reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderId {
    OpenAi,
    DeepSeek,
    Anthropic,
    Mistral,
    Xai,
    Cohere,
    Gemini,
    Stability,
    Veo,
    Runway,
    Luma,
    Unknown(String),
}

impl ProviderId {
    pub fn parse(value: &str) -> Self {
        let slug = value.trim().to_ascii_lowercase();
        match slug.as_str() {
            "openai" => ProviderId::OpenAi,
            "deepseek" => ProviderId::DeepSeek,
            "anthropic" => ProviderId::Anthropic,
            "mistral" => ProviderId::Mistral,
            "xai" => ProviderId::Xai,
            "cohere" => ProviderId::Cohere,
            "gemini" => ProviderId::Gemini,
            "stability" => ProviderId::Stability,
            "veo" => ProviderId::Veo,
            "runway" => ProviderId::Runway,
            "luma" => ProviderId::Luma,
            _ => ProviderId::Unknown(slug),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Mistral => "mistral",
            ProviderId::Xai => "xai",
            ProviderId::Cohere => "cohere",
            ProviderId::Gemini => "gemini",
            ProviderId::Stability => "stability",
            ProviderId::Veo => "veo",
            ProviderId::Runway => "runway",
            ProviderId::Luma => "luma",
            ProviderId::Unknown(slug) => slug,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProviderId::Unknown(_))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProviderId {
    fn from(value: &str) -> Self {
        ProviderId::parse(value)
    }
}

impl From<String> for ProviderId {
    fn from(value: String) -> Self {
        ProviderId::parse(&value)
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        value.as_str().to_string()
    }
}
