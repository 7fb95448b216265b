use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use super::{Error, UnsupportedKindSnafu};

pub const RECORD_KIND_A: &str = "A";
pub const RECORD_KIND_AAAA: &str = "AAAA";

/// Record types this crate knows how to keep up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Aaaa,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::A, RecordKind::Aaaa];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => RECORD_KIND_A,
            RecordKind::Aaaa => RECORD_KIND_AAAA,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(RECORD_KIND_A) {
            Ok(RecordKind::A)
        } else if s.eq_ignore_ascii_case(RECORD_KIND_AAAA) {
            Ok(RecordKind::Aaaa)
        } else {
            UnsupportedKindSnafu { kind: s }.fail()
        }
    }
}

/// A DNS record as held by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub content: String,
}

impl Record {
    /// The record type, if it is one we manage.
    pub fn record_kind(&self) -> Option<RecordKind> {
        self.kind.parse().ok()
    }

    /// DNS names compare case-insensitively and the root dot is optional.
    pub fn has_name(&self, domain: &str) -> bool {
        let strip = |name: &str| name.strip_suffix('.').unwrap_or(name).to_owned();
        strip(&self.name).eq_ignore_ascii_case(&strip(domain))
    }
}

/// Where the zone's records live.
pub trait Provider {
    fn list_records(&self) -> super::Result<Vec<Record>>;
    fn update_record(&self, record: &Record, content: &str) -> super::Result<()>;
}

/// Finds the current public address for a record type.
pub trait Resolver {
    fn resolve(&self, kind: RecordKind, source: &crate::discovery::Config)
        -> super::Result<IpAddr>;
}
