use crate::error::{Error, Result};
use crate::models::{ApiConfig, Modality};

use super::id::ProviderId;
use super::registry::{canonical_rank, capabilities_of};

/// Active, keyed, and able to produce `modality`.
pub fn is_eligible(config: &ApiConfig, modality: Modality) -> bool {
    config.is_active
        && config.has_api_key()
        && capabilities_of(&config.provider).contains(&modality)
}

/// Eligible configs in canonical provider order, whatever order `configs` is in.
pub fn eligible_providers(configs: &[ApiConfig], modality: Modality) -> Vec<&ApiConfig> {
    let mut eligible: Vec<&ApiConfig> = configs
        .iter()
        .filter(|config| is_eligible(config, modality))
        .collect();
    eligible.sort_by_key(|config| canonical_rank(&config.provider));
    eligible
}

/// Keeps a still-eligible choice, otherwise falls back to the first eligible
/// provider, or to nothing when none is eligible.
pub fn reconcile_selection(
    current: Option<&ProviderId>,
    eligible: &[&ApiConfig],
) -> Option<ProviderId> {
    let first = eligible.first()?;
    match current {
        Some(current) if eligible.iter().any(|config| &config.provider == current) => {
            Some(current.clone())
        }
        _ => Some(first.provider.clone()),
    }
}

/// Provider choice for one screen (reply generation, poster, ...). Always
/// points at an eligible provider for its modality after `refresh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionContext {
    name: &'static str,
    modality: Modality,
    selected: Option<ProviderId>,
}

impl SelectionContext {
    pub fn new(name: &'static str, modality: Modality) -> Self {
        Self {
            name,
            modality,
            selected: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn selected(&self) -> Option<&ProviderId> {
        self.selected.as_ref()
    }

    pub fn refresh(&mut self, configs: &[ApiConfig]) -> Option<&ProviderId> {
        let eligible = eligible_providers(configs, self.modality);
        let next = reconcile_selection(self.selected.as_ref(), &eligible);
        if next != self.selected {
            log::debug!(
                "{} selection for {}: {:?} -> {:?}",
                self.name,
                self.modality,
                self.selected.as_ref().map(ProviderId::as_str),
                next.as_ref().map(ProviderId::as_str)
            );
            self.selected = next;
        }
        self.selected.as_ref()
    }

    pub fn set_modality(
        &mut self,
        modality: Modality,
        configs: &[ApiConfig],
    ) -> Option<&ProviderId> {
        self.modality = modality;
        self.refresh(configs)
    }

    pub fn select(&mut self, provider: &ProviderId, configs: &[ApiConfig]) -> Result<()> {
        let eligible = configs
            .iter()
            .any(|config| &config.provider == provider && is_eligible(config, self.modality));
        if !eligible {
            return Err(Error::Validation(format!(
                "provider '{}' is not available for {}",
                provider, self.modality
            )));
        }

        log::debug!("{} selection set to {}", self.name, provider);
        self.selected = Some(provider.clone());
        Ok(())
    }
}

/// Provider and key to hand to a generation endpoint for `context`.
pub fn resolve_credential<'a>(
    configs: &'a [ApiConfig],
    context: &SelectionContext,
) -> Result<(ProviderId, &'a str)> {
    let eligible = eligible_providers(configs, context.modality());
    let provider = reconcile_selection(context.selected(), &eligible)
        .ok_or(Error::NoEligibleProvider(context.modality()))?;
    let config = eligible
        .iter()
        .copied()
        .find(|config| config.provider == provider)
        .ok_or(Error::NoEligibleProvider(context.modality()))?;
    Ok((provider, config.api_key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Vec<ApiConfig> {
        vec![
            ApiConfig::new(ProviderId::Anthropic, "k", true),
            ApiConfig::new(ProviderId::OpenAi, "k", true),
        ]
    }

    fn ids(eligible: &[&ApiConfig]) -> Vec<ProviderId> {
        eligible.iter().map(|config| config.provider.clone()).collect()
    }

    #[test]
    fn text_providers_follow_canonical_order() {
        let configs = registry();
        let eligible = eligible_providers(&configs, Modality::Text);
        assert_eq!(ids(&eligible), vec![ProviderId::OpenAi, ProviderId::Anthropic]);
    }

    #[test]
    fn image_keeps_only_capable_providers() {
        let configs = registry();
        let eligible = eligible_providers(&configs, Modality::Image);
        assert_eq!(ids(&eligible), vec![ProviderId::OpenAi]);
    }

    #[test]
    fn video_has_nothing_and_selection_clears() {
        let configs = registry();
        let eligible = eligible_providers(&configs, Modality::Video);
        assert!(eligible.is_empty());
        assert_eq!(reconcile_selection(Some(&ProviderId::OpenAi), &eligible), None);
        assert_eq!(reconcile_selection(None, &eligible), None);
    }

    #[test]
    fn eligibility_requires_key_flag_and_capability() {
        assert!(is_eligible(&ApiConfig::new(ProviderId::Gemini, "k", true), Modality::Video));
        assert!(!is_eligible(&ApiConfig::new(ProviderId::Gemini, "", true), Modality::Text));
        assert!(!is_eligible(&ApiConfig::new(ProviderId::Gemini, "k", false), Modality::Text));
        assert!(!is_eligible(&ApiConfig::new(ProviderId::Stability, "k", true), Modality::Text));
        assert!(!is_eligible(
            &ApiConfig::new(ProviderId::Unknown("acme".to_string()), "k", true),
            Modality::Text
        ));
    }

    #[test]
    fn reconcile_keeps_valid_choice_and_falls_back_otherwise() {
        let configs = registry();
        let eligible = eligible_providers(&configs, Modality::Text);

        assert_eq!(
            reconcile_selection(Some(&ProviderId::Anthropic), &eligible),
            Some(ProviderId::Anthropic)
        );
        assert_eq!(
            reconcile_selection(Some(&ProviderId::Luma), &eligible),
            Some(ProviderId::OpenAi)
        );
        assert_eq!(reconcile_selection(None, &eligible), Some(ProviderId::OpenAi));

        let again = reconcile_selection(Some(&ProviderId::Anthropic), &eligible);
        assert_eq!(reconcile_selection(again.as_ref(), &eligible), again);
    }

    #[test]
    fn deactivating_selected_provider_moves_to_next_eligible() {
        let mut configs = vec![
            ApiConfig::new(ProviderId::OpenAi, "k", true),
            ApiConfig::new(ProviderId::Mistral, "k", true),
            ApiConfig::new(ProviderId::Cohere, "k", true),
        ];
        let mut context = SelectionContext::new("replies", Modality::Text);
        assert_eq!(context.selected(), None);

        context.refresh(&configs);
        context
            .select(&ProviderId::Mistral, &configs)
            .expect("mistral should be selectable");

        configs[1].is_active = false;
        assert_eq!(context.refresh(&configs), Some(&ProviderId::OpenAi));

        configs[0].api_key.clear();
        assert_eq!(context.refresh(&configs), Some(&ProviderId::Cohere));

        configs[2].is_active = false;
        assert_eq!(context.refresh(&configs), None);
    }

    #[test]
    fn modality_change_migrates_selection() {
        let configs = vec![
            ApiConfig::new(ProviderId::Anthropic, "k", true),
            ApiConfig::new(ProviderId::Stability, "k", true),
            ApiConfig::new(ProviderId::Gemini, "k", true),
        ];
        let mut context = SelectionContext::new("poster", Modality::Text);
        context.refresh(&configs);
        context
            .select(&ProviderId::Anthropic, &configs)
            .expect("anthropic should be selectable");

        assert_eq!(
            context.set_modality(Modality::Image, &configs),
            Some(&ProviderId::Gemini)
        );
        assert_eq!(
            context.set_modality(Modality::Video, &configs),
            Some(&ProviderId::Gemini)
        );
    }

    #[test]
    fn select_rejects_ineligible_provider_without_mutation() {
        let configs = registry();
        let mut context = SelectionContext::new("replies", Modality::Text);
        context.refresh(&configs);

        let err = context
            .select(&ProviderId::Stability, &configs)
            .expect_err("stability cannot write text");
        assert!(err.to_string().contains("'stability' is not available for text"));
        assert_eq!(context.selected(), Some(&ProviderId::OpenAi));
    }

    #[test]
    fn resolve_credential_reports_missing_provider() {
        let configs = vec![ApiConfig::new(ProviderId::OpenAi, "sk-live", true)];
        let context = SelectionContext::new("poster", Modality::Video);
        let err = resolve_credential(&configs, &context).expect_err("nothing serves video");
        assert!(matches!(err, Error::NoEligibleProvider(Modality::Video)));

        let context = SelectionContext::new("replies", Modality::Text);
        let (provider, key) =
            resolve_credential(&configs, &context).expect("openai should be resolved");
        assert_eq!(provider, ProviderId::OpenAi);
        assert_eq!(key, "sk-live");
    }

    #[test]
    fn stale_selection_resolves_like_a_refresh() {
        let mut configs = vec![
            ApiConfig::new(ProviderId::OpenAi, "sk", true),
            ApiConfig::new(ProviderId::Mistral, "mk", true),
        ];
        let mut context = SelectionContext::new("replies", Modality::Text);
        context.refresh(&configs);
        context
            .select(&ProviderId::Mistral, &configs)
            .expect("mistral should be selectable");

        configs[1].is_active = false;
        assert_eq!(context.selected(), Some(&ProviderId::Mistral));
        let (provider, key) =
            resolve_credential(&configs, &context).expect("openai should take over");
        assert_eq!(provider, ProviderId::OpenAi);
        assert_eq!(key, "sk");
        assert_eq!(context.refresh(&configs), Some(&provider));
    }
}
