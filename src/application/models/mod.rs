pub mod account;
pub mod credentials;
pub mod provider;
pub mod reconnected;
pub mod service;
