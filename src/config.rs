use std::fmt;
use std::path::Path;

use ::config::{Environment, File, FileStoredFormat, Format, Map, Source, Value, ValueKind};
use ini::{Ini, ParseOption};
use regex::Regex;
use snafu::{ensure, ResultExt};

use crate::common::{
    key_file_or_string, ExtractSnafu, LoadSnafu, PatternSnafu, RecordKind, Result,
    ServiceUrlSnafu,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Environment variables named `CFDDNS_<SECTION>__<KEY>` override the file.
pub const ENV_PREFIX: &str = "CFDDNS";

const MAIN_SECTION: &str = "main";

/// Settings for one reconciliation pass. Re-read from disk before every pass.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub main: MainConfig,
    pub a: Option<crate::discovery::Config>,
    pub aaaa: Option<crate::discovery::Config>,
}

#[derive(Clone, serde::Deserialize)]
pub struct MainConfig {
    /// Bearer token, or `@/path/to/file` holding it.
    pub key: String,
    pub zone_id: String,
    pub domain: String,
    #[serde(default, deserialize_with = "yes_flag")]
    pub force_update: bool,
    #[serde(default = "default_api_url")]
    pub api_url: url::Url,
}

impl fmt::Debug for MainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainConfig")
            .field("key", &"<redacted>")
            .field("zone_id", &self.zone_id)
            .field("domain", &self.domain)
            .field("force_update", &self.force_update)
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl MainConfig {
    /// The bearer token, read from its key file if needed.
    pub fn api_key(&self) -> Result<String> {
        key_file_or_string(&self.key, "main.key")
    }
}

fn default_api_url() -> url::Url {
    url::Url::parse(DEFAULT_API_URL).expect("default API URL is valid")
}

/// Only a literal "yes" turns a flag on.
fn yes_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <String as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.trim().eq_ignore_ascii_case("yes"))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        Self::from_source(&name, File::new(&name, IniFormat).required(true))
    }

    pub(crate) fn from_source<S>(origin: &str, source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = ::config::Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context(LoadSnafu { path: origin })?;

        let sections = settings.collect().context(LoadSnafu { path: origin })?;
        for (name, value) in sections {
            if name == MAIN_SECTION || value.into_table().is_err() {
                continue;
            }
            if let Err(err) = name.parse::<RecordKind>() {
                tracing::warn!(section = name.as_str(), "{err}, ignoring section");
            }
        }

        settings
            .try_deserialize()
            .context(LoadSnafu { path: origin })
    }

    /// Check what a pass needs before it makes any request: a readable key,
    /// then a valid service URL and an extraction pattern with a capture
    /// group per section.
    pub fn validate(&self) -> Result<()> {
        self.main.api_key()?;
        for (kind, source) in self.configured_kinds() {
            url::Url::parse(&source.service).context(ServiceUrlSnafu {
                kind,
                url: source.service.as_str(),
            })?;
            let pattern = source.ip_extract.as_str();
            let regex = Regex::new(pattern).context(PatternSnafu { pattern })?;
            ensure!(
                regex.captures_len() > 1,
                ExtractSnafu {
                    pattern,
                    message: "pattern has no capture group",
                }
            );
        }
        Ok(())
    }

    pub fn discovery(&self, kind: RecordKind) -> Option<&crate::discovery::Config> {
        match kind {
            RecordKind::A => self.a.as_ref(),
            RecordKind::Aaaa => self.aaaa.as_ref(),
        }
    }

    /// Record types that have a discovery section, in A, AAAA order.
    pub fn configured_kinds(
        &self,
    ) -> impl Iterator<Item = (RecordKind, &crate::discovery::Config)> + '_ {
        RecordKind::ALL
            .into_iter()
            .filter_map(|kind| self.discovery(kind).map(|cfg| (kind, cfg)))
    }
}

/// INI without quote or escape processing, so extraction patterns such as
/// `(\d+\.\d+\.\d+\.\d+)` are kept verbatim. Section and key names are
/// lower-cased to line up with environment overrides.
#[derive(Debug, Clone, Copy)]
pub struct IniFormat;

impl Format for IniFormat {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> std::result::Result<Map<String, Value>, Box<dyn std::error::Error + Send + Sync>> {
        let ini = Ini::load_from_str_opt(
            text,
            ParseOption {
                enabled_quote: false,
                enabled_escape: false,
                ..ParseOption::default()
            },
        )?;

        let mut root = Map::new();
        for (section, properties) in ini.iter() {
            let mut table = Map::new();
            for (key, value) in properties.iter() {
                table.insert(key.to_lowercase(), Value::new(uri, value.to_owned()));
            }
            match section {
                Some(section) => {
                    root.insert(
                        section.to_lowercase(),
                        Value::new(uri, ValueKind::Table(table)),
                    );
                }
                None => root.extend(table),
            }
        }

        Ok(root)
    }
}

impl FileStoredFormat for IniFormat {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["ini"]
    }
}
