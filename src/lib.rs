// Library exports for integration tests and external use

pub mod app_data;
pub mod cli;
pub mod config;
pub mod errors;
pub mod providers;
pub mod services;
pub mod stores;
pub mod types;

#[cfg(test)]
pub(crate) mod test;

pub use app_data::AppData;
pub use errors::InternalError;
