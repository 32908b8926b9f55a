pub mod config;
pub mod database;
pub mod errors;
pub mod queries;
pub mod report;
pub mod session;

pub use errors::{ConfigError, QueryError};
pub use session::{with_session, QuerySession};
