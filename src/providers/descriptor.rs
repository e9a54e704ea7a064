use serde::Serialize;

use crate::models::Modality;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub capabilities: Vec<Modality>,
    pub category: Modality,
    pub key_url: &'static str,
    pub description: &'static str,
}
