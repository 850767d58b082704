//! HTTP surface: REST handlers, router wiring, and the in-memory store.

pub mod rest;
pub mod server;
pub mod store;

pub use server::ApiServer;
pub use store::MarketingStore;
