use crate::models::Modality;

use super::contract::{ProviderContract, IMAGE_ONLY};

// Listed with the image providers, but Gemini also serves text and video.
pub const GEMINI: ProviderContract = ProviderContract {
    slug: "gemini",
    name: "Google Gemini",
    capabilities: &[Modality::Text, Modality::Image, Modality::Video],
    category: Modality::Image,
    key_url: "https://aistudio.google.com/app/apikey",
    description: "Gemini 2.5 Flash (Image Gen)",
};

pub const STABILITY: ProviderContract = ProviderContract {
    slug: "stability",
    name: "Stability AI",
    capabilities: IMAGE_ONLY,
    category: Modality::Image,
    key_url: "https://platform.stability.ai/account/keys",
    description: "Stable Diffusion 3, SDXL",
};
