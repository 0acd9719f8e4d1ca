pub mod app_service;
