pub mod account;
pub mod address;
pub mod licensee;
pub mod licensor;
pub mod sms;
pub mod software;
pub mod software_license_agreement;
pub mod status;
