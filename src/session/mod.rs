//! Session bootstrap and the scoped tool-server connection

pub mod bootstrap;
pub mod connection;

pub use bootstrap::{ModelAdapterConfig, ServerConnectionDescriptor, SessionBootstrapper};
pub use connection::{ConnectError, McpConnection};
