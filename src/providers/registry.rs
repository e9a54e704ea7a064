use crate::models::Modality;

use super::contract::ProviderContract;
use super::descriptor::ProviderDescriptor;
use super::id::ProviderId;
use super::{image, text, video};

// Declaration order is the canonical display and default-selection order.
const PROVIDERS: [ProviderContract; 11] = [
    text::OPENAI,
    text::DEEPSEEK,
    text::ANTHROPIC,
    text::MISTRAL,
    text::XAI,
    text::COHERE,
    image::GEMINI,
    image::STABILITY,
    video::VEO,
    video::RUNWAY,
    video::LUMA,
];

pub fn all_provider_contracts() -> &'static [ProviderContract] {
    &PROVIDERS
}

pub fn all_provider_descriptors() -> Vec<ProviderDescriptor> {
    PROVIDERS.iter().map(ProviderContract::descriptor).collect()
}

pub fn find_provider_contract(provider: &ProviderId) -> Option<&'static ProviderContract> {
    PROVIDERS
        .iter()
        .find(|contract| contract.slug == provider.as_str())
}

/// Position in the canonical order. Unknown providers share the last rank.
pub fn canonical_rank(provider: &ProviderId) -> usize {
    PROVIDERS
        .iter()
        .position(|contract| contract.slug == provider.as_str())
        .unwrap_or(PROVIDERS.len())
}

pub fn capabilities_of(provider: &ProviderId) -> &'static [Modality] {
    find_provider_contract(provider)
        .map(|contract| contract.capabilities)
        .unwrap_or(&[])
}

pub fn providers_in_category(category: Modality) -> Vec<&'static ProviderContract> {
    PROVIDERS
        .iter()
        .filter(|contract| contract.category == category)
        .collect()
}

pub fn display_label(provider: &ProviderId) -> String {
    if let Some(contract) = find_provider_contract(provider) {
        return contract.name.to_string();
    }

    let slug = provider.as_str();
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
