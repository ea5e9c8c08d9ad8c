pub mod avnu;
pub mod client;
pub mod types;


pub use avnu::AvnuRelayClient;
pub use client::{GaslessRequest, RelayClient};
