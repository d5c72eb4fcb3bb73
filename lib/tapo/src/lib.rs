mod client;
mod devices;

pub use client::{Client, Error, HandshakeError, Session};
pub use devices::ChildDevice;
