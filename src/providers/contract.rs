use crate::models::Modality;

use super::descriptor::ProviderDescriptor;
use super::id::ProviderId;

#[derive(Debug, Clone, Copy)]
pub struct ProviderContract {
    pub slug: &'static str,
    pub name: &'static str,
    pub capabilities: &'static [Modality],
    pub category: Modality,
    pub key_url: &'static str,
    pub description: &'static str,
}

impl ProviderContract {
    pub fn id(&self) -> ProviderId {
        ProviderId::parse(self.slug)
    }

    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.slug,
            name: self.name,
            capabilities: self.capabilities.to_vec(),
            category: self.category,
            key_url: self.key_url,
            description: self.description,
        }
    }

    pub fn supports(&self, modality: Modality) -> bool {
        self.capabilities.contains(&modality)
    }
}

pub const TEXT_ONLY: &[Modality] = &[Modality::Text];
pub const IMAGE_ONLY: &[Modality] = &[Modality::Image];
pub const VIDEO_ONLY: &[Modality] = &[Modality::Video];

pub const fn text_provider_contract(
    slug: &'static str,
    name: &'static str,
    key_url: &'static str,
    description: &'static str,
) -> ProviderContract {
    ProviderContract {
        slug,
        name,
        capabilities: TEXT_ONLY,
        category: Modality::Text,
        key_url,
        description,
    }
}
