pub mod client;
pub mod session;
pub mod types;

pub use client::RubrikClient;
pub use session::{RequestParams, RubrikSession};
