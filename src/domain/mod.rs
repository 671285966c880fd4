//! Domain layer - business logic and services

pub mod defaults;
pub mod hot_search;
pub mod mode;
pub mod repository;
pub mod resolver;
pub mod resources;
pub mod validation;

pub use hot_search::HotSearchService;
pub use mode::ModeResolver;
pub use repository::{ConfigStore, DurableSource, ResourceStore, SearchLogStore};
pub use resolver::ConfigService;
