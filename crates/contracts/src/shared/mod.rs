pub mod table_config;
pub mod table_settings;
pub mod tabs;
