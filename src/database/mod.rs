pub mod catalog_repo;
pub mod models;
