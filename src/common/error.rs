use snafu::prelude::*;

use super::RecordKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Transport,
    },
    #[snafu(display("{method} {url} returned HTTP {status}"))]
    StatusError {
        url: String,
        method: String,
        status: u16,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("{message}: {source}"))]
    DecodeError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("Invalid {kind} discovery service URL {url:?}: {source}"))]
    ServiceUrlError {
        kind: RecordKind,
        url: String,
        source: url::ParseError,
    },
    #[snafu(display("Invalid extraction pattern {pattern:?}: {source}"))]
    PatternError {
        pattern: String,
        source: regex::Error,
    },
    #[snafu(display("Failed to extract an address with {pattern:?}: {message}"))]
    ExtractError { pattern: String, message: String },
    #[snafu(display("{candidate:?} is not a valid {kind} record address: {source}"))]
    AddressError {
        kind: RecordKind,
        candidate: String,
        source: std::net::AddrParseError,
    },
    #[snafu(display("Unrecognized record type {kind}"))]
    UnsupportedKindError { kind: String },
    #[snafu(display("{prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Failed to load configuration from {path}: {source}"))]
    LoadError {
        path: String,
        source: ::config::ConfigError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
