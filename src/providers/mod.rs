mod contract;
mod descriptor;
mod id;
mod image;
mod registry;
mod resolver;
mod text;
mod video;

pub use contract::ProviderContract;
pub use descriptor::ProviderDescriptor;
pub use id::ProviderId;
pub use registry::{
    all_provider_contracts, all_provider_descriptors, canonical_rank, capabilities_of,
    display_label, find_provider_contract, providers_in_category,
};
pub use resolver::{
    eligible_providers, is_eligible, reconcile_selection, resolve_credential, SelectionContext,
};
