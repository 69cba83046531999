pub mod batch;
pub mod config;
pub mod error;
pub mod keygen;
pub mod prompt;
pub mod store;
