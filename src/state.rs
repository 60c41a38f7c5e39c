use std::sync::Arc;

use crate::application::services::{RateLimiter, ShortenService};
use crate::domain::store::KeyValueStore;
use crate::infrastructure::persistence::{KvLinkRepository, KvQuotaRepository};

pub type AppShortenService = ShortenService<KvLinkRepository, KvQuotaRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<AppShortenService>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Wires repositories and services on top of one key-value backend.
    pub fn new(store: Arc<dyn KeyValueStore>, base_url: impl Into<String>, daily_limit: u64) -> Self {
        let links = Arc::new(KvLinkRepository::new(store.clone()));
        let quotas = Arc::new(KvQuotaRepository::new(store.clone()));
        let rate_limiter = RateLimiter::new(quotas, daily_limit);

        Self {
            shorten_service: Arc::new(ShortenService::new(links, rate_limiter, base_url)),
            store,
        }
    }
}
