pub mod capability_link;
pub mod repository;
pub mod service;
