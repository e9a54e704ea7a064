use crate::models::Modality;

use super::contract::{ProviderContract, VIDEO_ONLY};

pub const VEO: ProviderContract = ProviderContract {
    slug: "veo",
    name: "Google Veo",
    capabilities: VIDEO_ONLY,
    category: Modality::Video,
    key_url: "https://aistudio.google.com/app/apikey",
    description: "Veo 3.1 Video Generation",
};

pub const RUNWAY: ProviderContract = ProviderContract {
    slug: "runway",
    name: "RunwayML",
    capabilities: VIDEO_ONLY,
    category: Modality::Video,
    key_url: "https://app.runwayml.com/account/api-keys",
    description: "Gen-3 Alpha, Gen-2",
};

pub const LUMA: ProviderContract = ProviderContract {
    slug: "luma",
    name: "Luma Dream Machine",
    capabilities: VIDEO_ONLY,
    category: Modality::Video,
    key_url: "https://lumalabs.ai/dream-machine/api",
    description: "Dream Machine Video Generation",
};
