pub mod config;
pub mod error;
pub mod types;

pub use error::{GpassError, GpassResult};
pub use types::Entry;
