mod config;
mod resolver;

pub use config::*;
pub use resolver::*;
