pub mod app;
pub mod catalog;
pub mod config;
pub mod images;
pub mod search;
pub mod session;
