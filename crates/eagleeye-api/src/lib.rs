// eagleeye-api: Async Rust client for the EagleEye fleet-monitoring REST API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::EagleEyeClient;
pub use error::Error;
