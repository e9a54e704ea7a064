use crate::models::Modality;

use super::contract::{text_provider_contract, ProviderContract};

pub const OPENAI: ProviderContract = ProviderContract {
    slug: "openai",
    name: "OpenAI",
    capabilities: &[Modality::Text, Modality::Image],
    category: Modality::Text,
    key_url: "https://platform.openai.com/api-keys",
    description: "GPT-4o, GPT-3.5 Turbo",
};

pub const DEEPSEEK: ProviderContract = text_provider_contract(
    "deepseek",
    "DeepSeek",
    "https://platform.deepseek.com/api_keys",
    "DeepSeek V3, Coder",
);

pub const ANTHROPIC: ProviderContract = text_provider_contract(
    "anthropic",
    "Claude (Anthropic)",
    "https://console.anthropic.com/settings/keys",
    "Claude 3.5 Sonnet, Opus",
);

pub const MISTRAL: ProviderContract = text_provider_contract(
    "mistral",
    "Mistral AI",
    "https://console.mistral.ai/api-keys/",
    "Mistral Large, Small, Le Chat",
);

pub const XAI: ProviderContract = text_provider_contract(
    "xai",
    "xAI (Grok)",
    "https://console.x.ai/",
    "Grok-1, Grok-2",
);

pub const COHERE: ProviderContract = text_provider_contract(
    "cohere",
    "Cohere",
    "https://dashboard.cohere.com/api-keys",
    "Command R, Command R+",
);
