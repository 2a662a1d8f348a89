//! Test doubles shared by the integration tests.

pub mod mock_client_loader;

#[allow(unused_imports)]
pub use mock_client_loader::MockClientLoader;
