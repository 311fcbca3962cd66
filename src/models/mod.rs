pub mod review;
pub mod summary;
