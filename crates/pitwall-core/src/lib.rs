pub mod config;
pub mod error;
pub mod types;

pub use config::PitwallConfig;
pub use error::{PitwallError, Result};
pub use types::{Lang, RemindBefore};
