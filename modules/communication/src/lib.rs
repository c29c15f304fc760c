pub mod config;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use endpoints::configure;
pub use error::Error;
