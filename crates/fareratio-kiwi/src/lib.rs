pub mod client;
pub mod error;
pub mod types;

pub use client::KiwiClient;
pub use error::KiwiError;
