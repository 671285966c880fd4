//! REST API layer
//!
//! Thin HTTP surface over the domain services. DTOs and mappers keep
//! serde out of the contract layer; errors map to RFC-9457 problem
//! documents.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod routes;

use crate::config::Config;
use crate::domain::{
    repository::{ConfigStore, SearchLogStore},
    resources::{
        appointment::AppointmentService, catalog::CatalogServiceApi, clinic::ClinicService,
        consultant::ConsultantService, review::ReviewService,
    },
    ConfigService, HotSearchService, ModeResolver,
};
use crate::infra::{CachedStore, FileSource, MemoryConfigStore, MemoryResourceStore, MemorySearchLog};
use std::sync::Arc;

/// Shared application state wired behind the router.
pub struct AppState {
    pub config: Config,
    pub modes: Arc<ModeResolver>,
    pub configs: Arc<ConfigService>,
    pub hot_searches: Arc<HotSearchService>,
    pub search_logs: Arc<dyn SearchLogStore>,
    pub clinics: Arc<ClinicService>,
    pub consultants: Arc<ConsultantService>,
    pub catalog: Arc<CatalogServiceApi>,
    pub appointments: Arc<AppointmentService>,
    pub reviews: Arc<ReviewService>,
}

impl AppState {
    /// Wire all services over the given config backend. Resource and
    /// search-log storage is in-memory.
    pub fn build(config: Config, config_store: Arc<dyn ConfigStore>) -> Arc<Self> {
        let modes = Arc::new(ModeResolver::new(
            config_store.clone(),
            config.app_mode.clone(),
        ));
        let configs = Arc::new(ConfigService::new(
            config_store,
            modes.clone(),
            config.max_payload_bytes,
        ));

        let search_logs: Arc<dyn SearchLogStore> = Arc::new(MemorySearchLog::new());
        let hot_searches = Arc::new(HotSearchService::new(
            configs.clone(),
            search_logs.clone(),
            config.hot_search_candidates,
        ));

        let clinic_store = Arc::new(MemoryResourceStore::new());
        let clinics = Arc::new(ClinicService::new(clinic_store.clone()));
        let consultants = Arc::new(ConsultantService::new(Arc::new(MemoryResourceStore::new())));
        let catalog = Arc::new(CatalogServiceApi::new(Arc::new(MemoryResourceStore::new())));
        let appointments = Arc::new(AppointmentService::new(
            Arc::new(MemoryResourceStore::new()),
            clinic_store,
        ));
        let reviews = Arc::new(ReviewService::new(
            Arc::new(MemoryResourceStore::new()),
            clinics.clone(),
        ));

        Arc::new(Self {
            config,
            modes,
            configs,
            hot_searches,
            search_logs,
            clinics,
            consultants,
            catalog,
            appointments,
            reviews,
        })
    }

    /// Pick the config backend from `config.data_file`: a cached file
    /// source when set, plain memory otherwise.
    pub fn from_config(config: Config) -> Arc<Self> {
        let store: Arc<dyn ConfigStore> = match &config.data_file {
            Some(path) => Arc::new(CachedStore::new(
                FileSource::new(path.clone()),
                config.cache_ttl,
                config.fetch_timeout,
            )),
            None => Arc::new(MemoryConfigStore::new()),
        };
        Self::build(config, store)
    }

    /// Fully in-memory state, mainly for tests and embedding.
    pub fn in_memory(config: Config) -> Arc<Self> {
        Self::build(config, Arc::new(MemoryConfigStore::new()))
    }
}
