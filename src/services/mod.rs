pub mod export_service;

pub use export_service::*;
