//! In-memory port implementations for tests
//!
//! Each store can be told to fail reads or writes so persistence
//! failure paths can be exercised without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use health_coach::{
    CacheEntry, CacheStore, CallerIdentity, ChatTurn, CompletionProvider, CompletionResult,
    ContextStore, DomainError, NutritionRequest, RoutineRequest, Stamped, UserContext,
};

fn injected(what: &str) -> DomainError {
    DomainError::Repository(format!("injected {what} failure"))
}

#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryCacheStore {
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    pub async fn insert(&self, key: &str, entry: CacheEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("cache read"));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("cache write"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .await
            .insert(key.to_string(), entry.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryContextStore {
    contexts: RwLock<HashMap<String, UserContext>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryContextStore {
    pub async fn snapshot(&self, identity: &str) -> Option<UserContext> {
        self.contexts.read().await.get(identity).cloned()
    }

    async fn update<F>(&self, identity: &CallerIdentity, apply: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut UserContext) + Send,
    {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("context write"));
        }
        let mut contexts = self.contexts.write().await;
        apply(contexts.entry(identity.as_str().to_string()).or_default());
        Ok(())
    }
}

#[async_trait]
impl ContextStore for MemoryContextStore {
    async fn get(&self, identity: &CallerIdentity) -> Result<Option<UserContext>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("context read"));
        }
        Ok(self.contexts.read().await.get(identity.as_str()).cloned())
    }

    async fn merge_routine(
        &self,
        identity: &CallerIdentity,
        request: &RoutineRequest,
    ) -> Result<(), DomainError> {
        let stamped = Stamped::now(request.clone());
        self.update(identity, |ctx| ctx.last_routine_request = Some(stamped))
            .await
    }

    async fn merge_nutrition(
        &self,
        identity: &CallerIdentity,
        request: &NutritionRequest,
    ) -> Result<(), DomainError> {
        let stamped = Stamped::now(request.clone());
        self.update(identity, |ctx| ctx.last_nutrition_request = Some(stamped))
            .await
    }

    async fn merge_chat_turn(
        &self,
        identity: &CallerIdentity,
        message: &str,
        response: &str,
    ) -> Result<(), DomainError> {
        let turn = ChatTurn::now(message, response);
        self.update(identity, |ctx| ctx.last_chat = Some(turn)).await
    }
}

/// Completion provider that echoes a canned answer and records prompts
pub struct ScriptedCompletions {
    reply: Result<String, DomainError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletions {
    pub fn replying(output: &str) -> Self {
        Self {
            reply: Ok(output.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletions {
    async fn complete(&self, prompt: &str) -> Result<CompletionResult, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(output) => Ok(CompletionResult::new(output.clone(), "scripted-model")),
            Err(e) => Err(e.clone()),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }
}
