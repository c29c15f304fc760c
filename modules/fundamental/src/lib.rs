pub mod account;
pub mod agreement;
pub mod common;
pub mod endpoints;
pub mod error;
pub mod openapi;
pub mod party;
pub mod software;

pub use endpoints::configure;
pub use error::Error;
pub use openapi::openapi;
