//! Coach Application Service (Use Case)
//!
//! One method per coaching flow. Each composes cache, context, prompt
//! construction and the completion provider:
//!
//! - routine: cache check, prompt, complete, cache write + context merge
//! - nutrition: cache check (raw body), enrich from last routine, prompt,
//!   complete, cache write + context merge
//! - follow-up: prompt, complete
//! - chat: read context, prompt, complete, merge chat turn

use std::sync::Arc;

use health_coach::{
    fingerprint, prompt_builder, CallerIdentity, ChatRequest, CompletionProvider,
    CompletionResult, ContextStore, DomainError, FollowUpRequest, NutritionRequest, RequestKind,
    RoutineRequest, UserContext,
};

use super::ResponseCache;
use crate::config::PersistencePolicy;

/// Application service for the coaching flows
pub struct CoachService {
    cache: ResponseCache,
    contexts: Arc<dyn ContextStore>,
    completions: Arc<dyn CompletionProvider>,
    policy: PersistencePolicy,
}

impl CoachService {
    pub fn new(
        cache: ResponseCache,
        contexts: Arc<dyn ContextStore>,
        completions: Arc<dyn CompletionProvider>,
        policy: PersistencePolicy,
    ) -> Self {
        Self {
            cache,
            contexts,
            completions,
            policy,
        }
    }

    /// Daily routine plan
    pub async fn routine(
        &self,
        identity: &CallerIdentity,
        request: &RoutineRequest,
    ) -> Result<CompletionResult, DomainError> {
        request.validate()?;

        let key = fingerprint(request)?;
        if let Some(cached) = self.cache.lookup(&key).await {
            tracing::info!(kind = %RequestKind::Routine, "Serving cached completion");
            return Ok(cached);
        }

        let prompt = prompt_builder::routine_prompt(request);
        let result = self.completions.complete(&prompt).await?;

        self.settle(
            RequestKind::Routine,
            "cache write",
            self.cache.store(&key, &result).await,
        )?;
        self.settle(
            RequestKind::Routine,
            "context merge",
            self.contexts.merge_routine(identity, request).await,
        )?;

        Ok(result)
    }

    /// Nutrition plan, enriched with the caller's last routine
    pub async fn nutrition(
        &self,
        identity: &CallerIdentity,
        request: &NutritionRequest,
    ) -> Result<CompletionResult, DomainError> {
        request.validate()?;

        // Keyed on the body as received; enrichment comes later.
        let key = fingerprint(request)?;
        if let Some(cached) = self.cache.lookup(&key).await {
            tracing::info!(kind = %RequestKind::Nutrition, "Serving cached completion");
            return Ok(cached);
        }

        let enriched = match self.load_context(identity).await {
            Some(context) => match context.routine() {
                Some(routine) => {
                    tracing::debug!("Enriching nutrition request from last routine");
                    request.enriched_with(routine)
                }
                None => request.clone(),
            },
            None => request.clone(),
        };

        let prompt = prompt_builder::nutrition_prompt(&enriched);
        let result = self.completions.complete(&prompt).await?;

        self.settle(
            RequestKind::Nutrition,
            "cache write",
            self.cache.store(&key, &result).await,
        )?;
        self.settle(
            RequestKind::Nutrition,
            "context merge",
            self.contexts.merge_nutrition(identity, request).await,
        )?;

        Ok(result)
    }

    /// Question about an earlier plan. Never cached, nothing persisted.
    pub async fn follow_up(
        &self,
        request: &FollowUpRequest,
    ) -> Result<CompletionResult, DomainError> {
        let prompt = prompt_builder::follow_up_prompt(request);
        self.completions.complete(&prompt).await
    }

    /// Free-form chat. Never cached.
    pub async fn chat(
        &self,
        identity: &CallerIdentity,
        request: &ChatRequest,
    ) -> Result<CompletionResult, DomainError> {
        request.validate()?;

        let context = self.load_context(identity).await;
        let prompt = prompt_builder::chat_prompt(request, context.as_ref());
        let result = self.completions.complete(&prompt).await?;

        self.settle(
            RequestKind::Chat,
            "context merge",
            self.contexts
                .merge_chat_turn(identity, &request.message, &result.output)
                .await,
        )?;

        Ok(result)
    }

    /// Context reads fail open like cache reads.
    async fn load_context(&self, identity: &CallerIdentity) -> Option<UserContext> {
        match self.contexts.get(identity).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Context read failed, continuing without context");
                None
            }
        }
    }

    /// Apply the persistence policy to a post-completion write.
    fn settle(
        &self,
        kind: RequestKind,
        step: &str,
        outcome: Result<(), DomainError>,
    ) -> Result<(), DomainError> {
        match (outcome, self.policy) {
            (Ok(()), _) => Ok(()),
            (Err(e), PersistencePolicy::Strict) => {
                tracing::error!(kind = %kind, step, error = %e, "Persistence failed");
                Err(e)
            }
            (Err(e), PersistencePolicy::BestEffort) => {
                tracing::warn!(
                    kind = %kind,
                    step,
                    error = %e,
                    "Persistence failed, returning completion anyway"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryCacheStore, MemoryContextStore, ScriptedCompletions};
    use chrono::Duration;
    use health_coach::{BodyComposition, CACHE_TTL_SECS};
    use std::sync::atomic::Ordering;

    struct Harness {
        cache: Arc<MemoryCacheStore>,
        contexts: Arc<MemoryContextStore>,
        completions: Arc<ScriptedCompletions>,
        service: CoachService,
    }

    fn harness_with(completions: ScriptedCompletions, policy: PersistencePolicy) -> Harness {
        let cache = Arc::new(MemoryCacheStore::default());
        let contexts = Arc::new(MemoryContextStore::default());
        let completions = Arc::new(completions);
        let service = CoachService::new(
            ResponseCache::new(cache.clone(), Duration::seconds(CACHE_TTL_SECS)),
            contexts.clone(),
            completions.clone(),
            policy,
        );
        Harness {
            cache,
            contexts,
            completions,
            service,
        }
    }

    fn harness() -> Harness {
        harness_with(
            ScriptedCompletions::replying("Here is your plan."),
            PersistencePolicy::BestEffort,
        )
    }

    fn routine() -> RoutineRequest {
        RoutineRequest {
            peak_mode: "Focus".to_string(),
            sleep_chronotype: "Lion".to_string(),
            nature_of_commutes: "Cycling".to_string(),
            nature_of_traveling: "Monthly".to_string(),
            easiness_of_regimen: 6,
            observation_level: 8,
            challenges: vec!["sleep".to_string()],
        }
    }

    fn nutrition() -> NutritionRequest {
        NutritionRequest {
            current_body_composition: BodyComposition::default(),
            target_goal: "Maintain".to_string(),
            activity_level: "High".to_string(),
            daily_step_count: 12000,
            resting_metabolic_rate: 1800,
            macronutrient_preferences: "Balanced".to_string(),
            intermittent_fasting: true,
            num_meals_per_day: 2,
            eating_window: "12pm-8pm".to_string(),
            protein_source_preference: "Plant".to_string(),
            carb_tolerance: "High".to_string(),
            fat_preference: "Nuts".to_string(),
            food_sensitivities: vec![],
            cultural_dietary_category: "None".to_string(),
            cooking_ability: "Basic".to_string(),
            meal_prep_frequency: "Daily".to_string(),
            eating_out_frequency: "Rarely".to_string(),
            kitchen_access: "Full".to_string(),
            existing_supplements: vec![],
            willingness_to_supplement: false,
            water_intake_target: "2.5L".to_string(),
            caffeine_consumption: "None".to_string(),
            electrolyte_needs: "Low".to_string(),
            peak_mode: None,
            challenges: None,
        }
    }

    fn chat(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            user_id: None,
            conversation_history: vec![],
        }
    }

    #[tokio::test]
    async fn test_routine_second_call_is_served_from_cache() {
        let h = harness();
        let alice = CallerIdentity::new("alice");
        let bob = CallerIdentity::new("bob");

        let first = h.service.routine(&alice, &routine()).await.unwrap();
        let second = h.service.routine(&bob, &routine()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.completions.calls(), 1);
        assert_eq!(h.cache.writes(), 1);
        // Only the caller who triggered the completion gets a context write.
        assert!(h.contexts.snapshot("alice").await.unwrap().routine().is_some());
        assert!(h.contexts.snapshot("bob").await.is_none());
    }

    #[tokio::test]
    async fn test_routine_rejects_out_of_range_scale() {
        let h = harness();
        let mut request = routine();
        request.observation_level = 11;

        let err = h
            .service
            .routine(&CallerIdentity::anonymous(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(h.completions.calls(), 0);
    }

    #[tokio::test]
    async fn test_nutrition_is_enriched_from_last_routine() {
        let h = harness();
        let x = CallerIdentity::new("x");
        h.service.routine(&x, &routine()).await.unwrap();

        h.service.nutrition(&x, &nutrition()).await.unwrap();

        let prompt = h.completions.last_prompt().unwrap();
        assert!(prompt.contains("Focus"));
        assert!(prompt.contains("sleep"));

        let context = h.contexts.snapshot("x").await.unwrap();
        assert!(context.routine().is_some());
        assert!(context.nutrition().is_some());
    }

    #[tokio::test]
    async fn test_stored_routine_overrides_request_peak_mode_and_challenges() {
        let h = harness();
        let x = CallerIdentity::new("x");
        h.service.routine(&x, &routine()).await.unwrap();

        let mut request = nutrition();
        request.peak_mode = Some("Physique".to_string());
        request.challenges = Some(vec!["travel".to_string()]);
        h.service.nutrition(&x, &request).await.unwrap();

        let prompt = h.completions.last_prompt().unwrap();
        assert!(prompt.contains("Peak Mode: Focus"));
        assert!(prompt.contains("sleep"));
        assert!(!prompt.contains("travel"));
        assert!(!prompt.contains("Peak Mode: Physique"));

        let raw_key = fingerprint(&request).unwrap();
        let enriched_key = fingerprint(&request.enriched_with(&routine())).unwrap();
        assert_ne!(raw_key, enriched_key);
        let keys = h.cache.keys().await;
        assert!(keys.contains(&raw_key));
        assert!(!keys.contains(&enriched_key));
    }

    #[tokio::test]
    async fn test_nutrition_cache_key_ignores_enrichment() {
        let h = harness();
        let x = CallerIdentity::new("x");
        let y = CallerIdentity::new("y");
        h.service.routine(&x, &routine()).await.unwrap();

        h.service.nutrition(&x, &nutrition()).await.unwrap();
        h.service.nutrition(&y, &nutrition()).await.unwrap();

        // routine + first nutrition; y is served the cached nutrition plan
        assert_eq!(h.completions.calls(), 2);
        let expected = fingerprint(&nutrition()).unwrap();
        assert!(h.cache.keys().await.contains(&expected));
    }

    #[tokio::test]
    async fn test_nutrition_without_context_uses_defaults() {
        let h = harness();
        h.service
            .nutrition(&CallerIdentity::anonymous(), &nutrition())
            .await
            .unwrap();

        let prompt = h.completions.last_prompt().unwrap();
        assert!(prompt.contains("Physique"));
    }

    #[tokio::test]
    async fn test_chat_never_touches_cache() {
        let h = harness();
        let id = CallerIdentity::new("carol");

        h.service.chat(&id, &chat("How do I sleep better?")).await.unwrap();
        h.service.chat(&id, &chat("How do I sleep better?")).await.unwrap();

        assert_eq!(h.completions.calls(), 2);
        assert_eq!(h.cache.len().await, 0);

        let last = h.contexts.snapshot("carol").await.unwrap().last_chat.unwrap();
        assert_eq!(last.message, "How do I sleep better?");
        assert_eq!(last.response, "Here is your plan.");
    }

    #[tokio::test]
    async fn test_chat_turn_keeps_sibling_fields() {
        let h = harness();
        let id = CallerIdentity::new("dana");
        h.service.routine(&id, &routine()).await.unwrap();

        h.service.chat(&id, &chat("Any tips?")).await.unwrap();

        let context = h.contexts.snapshot("dana").await.unwrap();
        assert!(context.routine().is_some());
        assert!(context.last_chat.is_some());
        assert!(h.completions.last_prompt().unwrap().contains("Focus"));
    }

    #[tokio::test]
    async fn test_chat_survives_context_read_failure() {
        let h = harness();
        h.contexts.fail_reads.store(true, Ordering::SeqCst);

        let result = h
            .service
            .chat(&CallerIdentity::anonymous(), &chat("Hello"))
            .await
            .unwrap();
        assert_eq!(result.output, "Here is your plan.");
    }

    #[tokio::test]
    async fn test_follow_up_persists_nothing() {
        let h = harness();
        let request: FollowUpRequest = serde_json::from_value(serde_json::json!({
            "original_request_type": "nutrition",
            "original_request_data": {"target_goal": "Cut"},
            "follow_up_question": "Can I eat late?"
        }))
        .unwrap();

        h.service.follow_up(&request).await.unwrap();
        h.service.follow_up(&request).await.unwrap();

        assert_eq!(h.completions.calls(), 2);
        assert_eq!(h.cache.len().await, 0);
        assert!(h.completions.last_prompt().unwrap().contains("Can I eat late?"));
    }

    #[tokio::test]
    async fn test_completion_errors_propagate() {
        let h = harness_with(
            ScriptedCompletions::failing(DomainError::Upstream {
                status: 429,
                body: "rate limited".to_string(),
            }),
            PersistencePolicy::BestEffort,
        );

        let err = h
            .service
            .routine(&CallerIdentity::anonymous(), &routine())
            .await
            .unwrap_err();

        assert_eq!(err.http_status(), 429);
        assert_eq!(h.cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_best_effort_returns_completion_when_writes_fail() {
        let h = harness();
        h.cache.fail_writes.store(true, Ordering::SeqCst);
        h.contexts.fail_writes.store(true, Ordering::SeqCst);

        let result = h
            .service
            .routine(&CallerIdentity::anonymous(), &routine())
            .await
            .unwrap();
        assert_eq!(result.output, "Here is your plan.");
    }

    #[tokio::test]
    async fn test_strict_policy_fails_when_writes_fail() {
        let h = harness_with(
            ScriptedCompletions::replying("Here is your plan."),
            PersistencePolicy::Strict,
        );
        h.cache.fail_writes.store(true, Ordering::SeqCst);

        let err = h
            .service
            .routine(&CallerIdentity::anonymous(), &routine())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Repository(_)));
        assert_eq!(err.http_status(), 500);
        assert_eq!(h.completions.calls(), 1);
    }
}
