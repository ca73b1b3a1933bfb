// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Completion data cache, keyed by calendar date and workout id
//!
//! Entries live for the whole session; nothing expires. The planner passes a
//! cache in explicitly so the nutrition core stays free of shared state.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::CompletionData;

/// A cached completion record
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCompletion {
    pub workout_id: String,
    pub data: CompletionData,
    /// Set once the record's adjustment has been folded into a day target
    pub applied: bool,
}

/// Storage for fetched completion data
#[async_trait]
pub trait CompletionCache: Send + Sync {
    async fn get(&self, date: NaiveDate, workout_id: &str) -> Option<CachedCompletion>;

    async fn store(&self, date: NaiveDate, workout_id: &str, data: CompletionData);

    /// All records for a date, ordered by workout id
    async fn get_by_date(&self, date: NaiveDate) -> Vec<CachedCompletion>;

    /// Returns false when no record exists for the key
    async fn mark_applied(&self, date: NaiveDate, workout_id: &str) -> bool;
}

/// Process-local cache
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompletionCache {
    store: Arc<RwLock<HashMap<(NaiveDate, String), CachedCompletion>>>,
}

impl InMemoryCompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CompletionCache for InMemoryCompletionCache {
    async fn get(&self, date: NaiveDate, workout_id: &str) -> Option<CachedCompletion> {
        self.store
            .read()
            .await
            .get(&(date, workout_id.to_string()))
            .cloned()
    }

    async fn store(&self, date: NaiveDate, workout_id: &str, data: CompletionData) {
        let entry = CachedCompletion {
            workout_id: workout_id.to_string(),
            data,
            applied: false,
        };
        self.store
            .write()
            .await
            .insert((date, workout_id.to_string()), entry);
    }

    async fn get_by_date(&self, date: NaiveDate) -> Vec<CachedCompletion> {
        let store = self.store.read().await;
        let mut entries: Vec<CachedCompletion> = store
            .iter()
            .filter(|((entry_date, _), _)| *entry_date == date)
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by(|a, b| a.workout_id.cmp(&b.workout_id));
        entries
    }

    async fn mark_applied(&self, date: NaiveDate, workout_id: &str) -> bool {
        match self.store.write().await.get_mut(&(date, workout_id.to_string())) {
            Some(entry) => {
                entry.applied = true;
                true
            }
            None => false,
        }
    }
}
