pub mod config;
pub mod criteria;
pub mod error;

#[cfg(feature = "python")]
pub mod python;
