pub mod auth;
pub mod authenticator;
pub mod authorizer;
pub mod password;
