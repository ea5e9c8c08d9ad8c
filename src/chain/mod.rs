pub mod call;
pub mod client;
pub mod rpc;

#[cfg(test)]
mod tests;

pub use call::ContractCall;
pub use client::ChainClient;
pub use rpc::RpcChainClient;
