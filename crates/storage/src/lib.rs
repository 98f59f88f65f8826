pub mod fs;
pub mod repository;
