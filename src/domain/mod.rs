pub mod error;

// Column summary module
pub mod summary;
