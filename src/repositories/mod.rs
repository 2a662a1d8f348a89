mod csv_directory_repository;
mod in_memory_directory;
mod timeout_loader;
mod traits;

pub use csv_directory_repository::CsvDirectoryRepository;
pub use in_memory_directory::InMemoryDirectory;
pub use timeout_loader::TimeoutLoader;
pub use traits::{ClientLoader, CompanyRepository};
