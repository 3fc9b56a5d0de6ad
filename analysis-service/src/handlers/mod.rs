pub mod analysis;
pub mod app;
pub mod reports;
