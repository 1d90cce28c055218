pub mod reload_service;
