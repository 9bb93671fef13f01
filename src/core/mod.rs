pub mod credentials;
pub mod error;
pub mod models;
pub mod notifications;
pub mod response;
pub mod settings;
