//! Serialization codecs for the protocol binding

pub mod jsonrpc;

pub use jsonrpc::{JsonRpcCodec, JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
