pub mod directory;
pub mod memory;
pub mod seed;
