pub mod chapters;
pub mod config;
pub mod devices;
pub mod record;
pub mod segments;
