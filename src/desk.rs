use std::fmt;

use crate::config_store::{ApiConfigStore, ConfigRepository};
use crate::error::{Error, Result};
use crate::models::{normalize_string, ApiConfig, Modality};
use crate::providers::{eligible_providers, resolve_credential, ProviderId, SelectionContext};
use crate::spintax::{self, RandomSource};

/// Screen whose provider choice is being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeskContext {
    Replies,
    Poster,
}

/// Everything a generation endpoint needs for one call.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub provider: ProviderId,
    pub modality: Modality,
    pub credential: String,
    pub prompt: String,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("provider", &self.provider)
            .field("modality", &self.modality)
            .field("credential", &"<redacted>")
            .field("prompt", &self.prompt)
            .finish()
    }
}

pub struct GenerationDesk<R> {
    store: ApiConfigStore<R>,
    replies: SelectionContext,
    poster: SelectionContext,
}

impl<R: ConfigRepository> GenerationDesk<R> {
    pub fn new(store: ApiConfigStore<R>) -> Result<Self> {
        let mut desk = Self {
            store,
            replies: SelectionContext::new("replies", Modality::Text),
            poster: SelectionContext::new("poster", Modality::Text),
        };
        desk.refresh()?;
        Ok(desk)
    }

    // The store stays private: every mutation must go through the desk so both
    // selections are reconciled afterwards.
    pub fn list_configs(&self) -> Result<Vec<ApiConfig>> {
        self.store.list_configs()
    }

    pub fn get_config(&self, provider: &ProviderId) -> Result<Option<ApiConfig>> {
        self.store.get_config(provider)
    }

    pub fn context(&self, which: DeskContext) -> &SelectionContext {
        match which {
            DeskContext::Replies => &self.replies,
            DeskContext::Poster => &self.poster,
        }
    }

    pub fn selected_provider(&self, which: DeskContext) -> Option<&ProviderId> {
        self.context(which).selected()
    }

    pub fn available_providers(&self, which: DeskContext) -> Result<Vec<ApiConfig>> {
        let configs = self.store.list_configs()?;
        Ok(eligible_providers(&configs, self.context(which).modality())
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn select_provider(&mut self, which: DeskContext, provider: &ProviderId) -> Result<()> {
        let configs = self.store.list_configs()?;
        self.context_mut(which).select(provider, &configs)
    }

    /// Replies always generate text; only the poster switches modality.
    pub fn set_poster_modality(&mut self, modality: Modality) -> Result<Option<ProviderId>> {
        let configs = self.store.list_configs()?;
        Ok(self.poster.set_modality(modality, &configs).cloned())
    }

    pub fn set_api_key(&mut self, provider: &ProviderId, api_key: &str) -> Result<ApiConfig> {
        let updated = self.store.set_api_key(provider, api_key)?;
        self.refresh()?;
        Ok(updated)
    }

    pub fn clear_api_key(&mut self, provider: &ProviderId) -> Result<ApiConfig> {
        let updated = self.store.clear_api_key(provider)?;
        self.refresh()?;
        Ok(updated)
    }

    pub fn set_active(&mut self, provider: &ProviderId, is_active: bool) -> Result<ApiConfig> {
        let updated = self.store.set_active(provider, is_active)?;
        self.refresh()?;
        Ok(updated)
    }

    pub fn toggle_active(&mut self, provider: &ProviderId) -> Result<ApiConfig> {
        let updated = self.store.toggle_active(provider)?;
        self.refresh()?;
        Ok(updated)
    }

    pub fn prepare_request(&self, which: DeskContext, prompt: &str) -> Result<GenerationRequest> {
        let prompt = normalize_string(prompt)
            .ok_or_else(|| Error::Validation("prompt cannot be empty".to_string()))?;
        let configs = self.store.list_configs()?;
        let context = self.context(which);
        let (provider, credential) = resolve_credential(&configs, context)?;
        log::info!(
            "prepared {} request for {} via {}",
            context.modality(),
            context.name(),
            provider
        );
        Ok(GenerationRequest {
            provider,
            modality: context.modality(),
            credential: credential.to_string(),
            prompt,
        })
    }

    pub fn preview_reply(&self, template: &str) -> String {
        spintax::expand(template)
    }

    pub fn preview_reply_with<S: RandomSource + ?Sized>(
        &self,
        template: &str,
        source: &mut S,
    ) -> String {
        spintax::expand_with(template, source)
    }

    fn context_mut(&mut self, which: DeskContext) -> &mut SelectionContext {
        match which {
            DeskContext::Replies => &mut self.replies,
            DeskContext::Poster => &mut self.poster,
        }
    }

    fn refresh(&mut self) -> Result<()> {
        let configs = self.store.list_configs()?;
        self.replies.refresh(&configs);
        self.poster.refresh(&configs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_store::MemoryRepository;

    struct First;

    impl RandomSource for First {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn desk_with(configs: Vec<ApiConfig>) -> GenerationDesk<MemoryRepository> {
        let store =
            ApiConfigStore::load(MemoryRepository::new(configs)).expect("store should load");
        GenerationDesk::new(store).expect("desk should build")
    }

    #[test]
    fn empty_desk_has_no_selection() {
        let desk = desk_with(Vec::new());
        assert_eq!(desk.selected_provider(DeskContext::Replies), None);
        assert_eq!(desk.selected_provider(DeskContext::Poster), None);
        assert!(desk
            .available_providers(DeskContext::Replies)
            .expect("list should work")
            .is_empty());

        let err = desk
            .prepare_request(DeskContext::Replies, "write a caption")
            .expect_err("no provider should fail");
        assert!(matches!(err, Error::NoEligibleProvider(Modality::Text)));
    }

    #[test]
    fn configuring_a_provider_selects_it_everywhere() {
        let mut desk = desk_with(Vec::new());
        desk.set_api_key(&ProviderId::Gemini, "AIza-key")
            .expect("key should be set");
        assert_eq!(desk.selected_provider(DeskContext::Replies), None);

        desk.toggle_active(&ProviderId::Gemini)
            .expect("toggle should work");
        assert_eq!(
            desk.selected_provider(DeskContext::Replies),
            Some(&ProviderId::Gemini)
        );
        assert_eq!(
            desk.selected_provider(DeskContext::Poster),
            Some(&ProviderId::Gemini)
        );
    }

    #[test]
    fn poster_modality_filters_and_migrates_selection() {
        let mut desk = desk_with(vec![
            ApiConfig::new(ProviderId::OpenAi, "sk", true),
            ApiConfig::new(ProviderId::Runway, "rw", true),
        ]);
        assert_eq!(
            desk.selected_provider(DeskContext::Poster),
            Some(&ProviderId::OpenAi)
        );

        let selected = desk
            .set_poster_modality(Modality::Video)
            .expect("modality should change");
        assert_eq!(selected, Some(ProviderId::Runway));
        assert_eq!(
            desk.selected_provider(DeskContext::Replies),
            Some(&ProviderId::OpenAi)
        );

        let request = desk
            .prepare_request(DeskContext::Poster, "  sunset over the bay  ")
            .expect("request should be prepared");
        assert_eq!(request.provider, ProviderId::Runway);
        assert_eq!(request.modality, Modality::Video);
        assert_eq!(request.credential, "rw");
        assert_eq!(request.prompt, "sunset over the bay");
        assert!(format!("{request:?}").contains("<redacted>"));
    }

    #[test]
    fn user_choice_survives_until_provider_is_switched_off() {
        let mut desk = desk_with(vec![
            ApiConfig::new(ProviderId::DeepSeek, "ds", true),
            ApiConfig::new(ProviderId::Cohere, "co", true),
        ]);
        desk.select_provider(DeskContext::Replies, &ProviderId::Cohere)
            .expect("cohere should be selectable");

        desk.set_api_key(&ProviderId::Mistral, "mk")
            .expect("key should be set");
        assert_eq!(
            desk.selected_provider(DeskContext::Replies),
            Some(&ProviderId::Cohere)
        );

        desk.set_active(&ProviderId::Cohere, false)
            .expect("set active should work");
        assert_eq!(
            desk.selected_provider(DeskContext::Replies),
            Some(&ProviderId::DeepSeek)
        );
    }

    fn assert_selection_is_eligible(desk: &GenerationDesk<MemoryRepository>, which: DeskContext) {
        let available = desk
            .available_providers(which)
            .expect("list should work");
        match desk.selected_provider(which) {
            Some(selected) => {
                assert!(
                    available.iter().any(|config| &config.provider == selected),
                    "{selected} is selected but not eligible"
                );
                let request = desk
                    .prepare_request(which, "caption")
                    .expect("request should be prepared");
                assert_eq!(&request.provider, selected);
            }
            None => assert!(available.is_empty()),
        }
    }

    #[test]
    fn every_desk_mutation_keeps_selection_eligible() {
        let mut desk = desk_with(vec![
            ApiConfig::new(ProviderId::OpenAi, "sk", true),
            ApiConfig::new(ProviderId::Cohere, "co", true),
            ApiConfig::new(ProviderId::Stability, "st", true),
        ]);
        desk.set_poster_modality(Modality::Image)
            .expect("modality should change");
        assert_eq!(
            desk.selected_provider(DeskContext::Poster),
            Some(&ProviderId::OpenAi)
        );

        desk.set_active(&ProviderId::OpenAi, false)
            .expect("set active should work");
        assert_eq!(
            desk.selected_provider(DeskContext::Replies),
            Some(&ProviderId::Cohere)
        );
        assert_eq!(
            desk.selected_provider(DeskContext::Poster),
            Some(&ProviderId::Stability)
        );
        assert_selection_is_eligible(&desk, DeskContext::Replies);
        assert_selection_is_eligible(&desk, DeskContext::Poster);

        desk.clear_api_key(&ProviderId::Cohere)
            .expect("key should be cleared");
        assert_eq!(desk.selected_provider(DeskContext::Replies), None);
        assert_selection_is_eligible(&desk, DeskContext::Replies);

        desk.toggle_active(&ProviderId::Stability)
            .expect("toggle should work");
        assert_eq!(desk.selected_provider(DeskContext::Poster), None);
        assert_selection_is_eligible(&desk, DeskContext::Poster);

        let cohere = desk
            .get_config(&ProviderId::Cohere)
            .expect("get should work")
            .expect("cohere should exist");
        assert!(!cohere.has_api_key());
        assert_eq!(desk.list_configs().expect("list should work").len(), 11);
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let desk = desk_with(vec![ApiConfig::new(ProviderId::OpenAi, "sk", true)]);
        let err = desk
            .prepare_request(DeskContext::Replies, "   ")
            .expect_err("blank prompt should fail");
        assert!(err.to_string().contains("prompt cannot be empty"));
    }

    #[test]
    fn reply_preview_expands_template() {
        let desk = desk_with(Vec::new());
        assert_eq!(
            desk.preview_reply_with(spintax::DEFAULT_REPLY_TEMPLATE, &mut First),
            "Hi there! Thanks for contacting us. We will get back to you shortly."
        );
        assert_eq!(desk.preview_reply("{only}"), "only");
    }
}
