pub mod a001_company;
pub mod a002_capability;
pub mod common;
