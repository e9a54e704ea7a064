use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{normalize_string, ApiConfig};
use crate::providers::{all_provider_contracts, canonical_rank, find_provider_contract, ProviderId};
use crate::secrets::{open_api_key, seal_api_key, MasterKey, SealedSecret};
use crate::utils::now_rfc3339;

const STORE_DIR_NAME: &str = "autosocial";
const STORE_FILE_NAME: &str = "api_configs.json";
const STORE_SCHEMA_VERSION: u32 = 1;

/// Where provider configs live between sessions.
pub trait ConfigRepository {
    fn load(&self) -> Result<Vec<ApiConfig>>;
    fn save(&self, configs: &[ApiConfig]) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    configs: Mutex<Vec<ApiConfig>>,
}

impl MemoryRepository {
    pub fn new(configs: Vec<ApiConfig>) -> Self {
        Self {
            configs: Mutex::new(configs),
        }
    }

    pub fn snapshot(&self) -> Result<Vec<ApiConfig>> {
        self.configs
            .lock()
            .map(|configs| configs.clone())
            .map_err(|_| Error::Store("memory repository mutex poisoned".to_string()))
    }
}

impl ConfigRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<ApiConfig>> {
        self.snapshot()
    }

    fn save(&self, configs: &[ApiConfig]) -> Result<()> {
        let mut stored = self
            .configs
            .lock()
            .map_err(|_| Error::Store("memory repository mutex poisoned".to_string()))?;
        *stored = configs.to_vec();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredApiConfig {
    provider: ProviderId,
    #[serde(default)]
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<SealedSecret>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigStoreFile {
    schema_version: u32,
    providers: Vec<StoredApiConfig>,
}

/// Versioned JSON file with every API key sealed under the master key.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    master_key: MasterKey,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>, master_key: MasterKey) -> Self {
        Self {
            path: path.into(),
            master_key,
        }
    }

    pub fn at_default_location(master_key: MasterKey) -> Result<Self> {
        Ok(Self::new(default_store_path()?, master_key))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, contents: &str) -> Result<Vec<ApiConfig>> {
        let store_file = serde_json::from_str::<ConfigStoreFile>(contents)?;
        if store_file.schema_version != STORE_SCHEMA_VERSION {
            return Err(Error::Store(format!(
                "unsupported api config schema version: {}",
                store_file.schema_version
            )));
        }

        store_file
            .providers
            .into_iter()
            .map(|stored| -> Result<ApiConfig> {
                let api_key = match &stored.api_key {
                    Some(sealed) => open_api_key(&self.master_key, &stored.provider, sealed)?,
                    None => String::new(),
                };
                Ok(ApiConfig {
                    provider: stored.provider,
                    api_key,
                    is_active: stored.is_active,
                    updated_at: stored.updated_at,
                })
            })
            .collect()
    }
}

impl ConfigRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<ApiConfig>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => self.parse(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, configs: &[ApiConfig]) -> Result<()> {
        let providers = configs
            .iter()
            .map(|config| -> Result<StoredApiConfig> {
                let api_key = if config.has_api_key() {
                    Some(seal_api_key(&self.master_key, &config.provider, &config.api_key)?)
                } else {
                    None
                };
                Ok(StoredApiConfig {
                    provider: config.provider.clone(),
                    is_active: config.is_active,
                    api_key,
                    updated_at: config.updated_at.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let payload = ConfigStoreFile {
            schema_version: STORE_SCHEMA_VERSION,
            providers,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(&payload)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

pub fn default_store_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Store("platform data directory is unavailable".to_string()))?;
    Ok(data_dir.join(STORE_DIR_NAME).join(STORE_FILE_NAME))
}

/// The user's API keys and on/off switches, one record per provider.
#[derive(Debug)]
pub struct ApiConfigStore<R> {
    repository: R,
    state: Mutex<Vec<ApiConfig>>,
}

impl<R: ConfigRepository> ApiConfigStore<R> {
    pub fn load(repository: R) -> Result<Self> {
        let loaded = repository.load()?;
        let configs = with_catalog_defaults(loaded);
        log::info!("loaded {} provider configs", configs.len());
        Ok(Self {
            repository,
            state: Mutex::new(configs),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn list_configs(&self) -> Result<Vec<ApiConfig>> {
        Ok(self.lock_state()?.clone())
    }

    pub fn get_config(&self, provider: &ProviderId) -> Result<Option<ApiConfig>> {
        let state = self.lock_state()?;
        Ok(state
            .iter()
            .find(|config| &config.provider == provider)
            .cloned())
    }

    /// Stores a trimmed key; a blank key clears it.
    pub fn set_api_key(&self, provider: &ProviderId, api_key: &str) -> Result<ApiConfig> {
        let api_key = normalize_string(api_key).unwrap_or_default();
        self.update(provider, |config| config.api_key = api_key)
    }

    pub fn clear_api_key(&self, provider: &ProviderId) -> Result<ApiConfig> {
        self.update(provider, |config| config.api_key.clear())
    }

    pub fn set_active(&self, provider: &ProviderId, is_active: bool) -> Result<ApiConfig> {
        self.update(provider, |config| config.is_active = is_active)
    }

    pub fn toggle_active(&self, provider: &ProviderId) -> Result<ApiConfig> {
        self.update(provider, |config| config.is_active = !config.is_active)
    }

    fn update(
        &self,
        provider: &ProviderId,
        apply: impl FnOnce(&mut ApiConfig),
    ) -> Result<ApiConfig> {
        if find_provider_contract(provider).is_none() {
            return Err(Error::ProviderNotFound(provider.to_string()));
        }

        let mut state = self.lock_state()?;
        let index = state
            .iter()
            .position(|config| &config.provider == provider)
            .ok_or_else(|| Error::ProviderNotFound(provider.to_string()))?;

        let mut next = state.clone();
        apply(&mut next[index]);
        next[index].updated_at = Some(now_rfc3339());
        self.repository.save(&next)?;

        let updated = next[index].clone();
        log::info!(
            "updated provider config {} (active: {}, key set: {})",
            updated.provider,
            updated.is_active,
            updated.has_api_key()
        );
        *state = next;
        Ok(updated)
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, Vec<ApiConfig>>> {
        self.state
            .lock()
            .map_err(|_| Error::Store("api config store mutex poisoned".to_string()))
    }
}

// Every catalog provider gets a record; unknown records are kept and sorted last.
fn with_catalog_defaults(loaded: Vec<ApiConfig>) -> Vec<ApiConfig> {
    let mut configs: Vec<ApiConfig> = Vec::with_capacity(loaded.len());
    for config in loaded {
        if configs.iter().any(|existing| existing.provider == config.provider) {
            log::warn!("ignoring duplicate config for provider {}", config.provider);
            continue;
        }
        configs.push(config);
    }

    for contract in all_provider_contracts() {
        let provider = contract.id();
        if !configs.iter().any(|config| config.provider == provider) {
            configs.push(ApiConfig::unconfigured(provider));
        }
    }

    configs.sort_by_key(|config| canonical_rank(&config.provider));
    configs
}
