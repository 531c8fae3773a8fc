pub mod config;
pub mod error;
pub mod logging;
pub mod slack;
pub mod users;

pub use error::{Result, SlackUtilsError};
