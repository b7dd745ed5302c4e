pub mod membership_index_memory;
pub mod paper_repository_memory;

pub use membership_index_memory::InMemoryMembershipIndex;
pub use paper_repository_memory::InMemoryPaperRepository;
