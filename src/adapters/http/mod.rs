//! HTTP adapters - clients for the portal backend's REST API.

mod portal_client;

pub use portal_client::HttpPortalClient;
