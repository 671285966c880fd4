//! API layer

pub mod rest;

pub use rest::AppState;
