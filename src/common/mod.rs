mod comparison;
mod config;
mod error;
mod http;
mod models;
#[cfg(test)]
pub(crate) mod testing;

pub use comparison::*;
pub(crate) use config::*;
pub use error::*;
pub(crate) use http::{execute, read_body};
pub use http::agent;
pub use models::*;
