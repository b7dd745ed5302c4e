pub mod membership_index;
pub mod paper_repository;
pub mod service_directory;
