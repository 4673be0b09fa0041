pub mod envelope;
pub mod service;
pub mod transfer;
