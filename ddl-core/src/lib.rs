pub mod config;
pub mod constants;
pub mod ddl;
pub mod error;
pub mod report;

pub use error::{DocError, Result};
