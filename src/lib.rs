mod config_store;
mod desk;
mod error;
mod models;
mod providers;
mod secrets;
pub mod spintax;
mod utils;

pub use config_store::{
    default_store_path, ApiConfigStore, ConfigRepository, JsonFileRepository, MemoryRepository,
};
pub use desk::{DeskContext, GenerationDesk, GenerationRequest};
pub use error::{Error, Result};
pub use models::{ApiConfig, Modality};
pub use providers::{
    all_provider_contracts, all_provider_descriptors, canonical_rank, capabilities_of,
    display_label, eligible_providers, find_provider_contract, is_eligible, providers_in_category,
    reconcile_selection, resolve_credential, ProviderContract, ProviderDescriptor, ProviderId,
    SelectionContext,
};
pub use secrets::{open_api_key, seal_api_key, MasterKey, SealedSecret};
pub use spintax::{expand, expand_with, RandomSource, RngSource};
