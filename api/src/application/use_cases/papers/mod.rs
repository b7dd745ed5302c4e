pub mod add_paper;
pub mod list_accessible;
