//! Service Layer

pub mod sort_service;

pub use sort_service::SortService;
