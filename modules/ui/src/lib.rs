//! Server rendered pages for managing the records in a browser.

mod agreement;
mod dashboard;
mod error;
mod form;
mod html;
mod party;
mod software;
mod user;

pub mod endpoints;

pub use endpoints::configure;

#[cfg(test)]
mod test;
