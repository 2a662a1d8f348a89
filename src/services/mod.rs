//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and the search engine. They provide a clean boundary between the
//! MCP handlers and the data access layer.

mod directory_service;

pub use directory_service::{DirectoryService, DirectoryServiceImpl};
