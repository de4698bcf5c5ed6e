pub mod create;
pub mod docker;
pub mod version;
pub mod welcome;
