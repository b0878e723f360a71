//! UI configuration services: page tabs and table display configs

pub mod providers;
pub mod repository;
pub mod sanitizer;
pub mod table_config;
pub mod tabs;

pub use providers::{
    DbTableConfigProvider, LayeredTableConfigProvider, ProviderError, StaticTableConfigProvider,
    TableConfigProvider,
};
pub use sanitizer::{DefaultJsonSanitizer, JsonSanitizer};
pub use table_config::TableConfigValidator;
pub use tabs::{EntityRef, TabConfigRegistry, TabResolver};
