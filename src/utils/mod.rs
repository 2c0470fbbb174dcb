pub mod error;
pub mod logger;
pub mod serialize;
pub mod validation;
