/// Where to discover the public address for one record type.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    /// Parsed when the address is resolved, so a bad URL only affects
    /// its own record type.
    pub service: String,
    /// Regular expression whose first capture group is the address.
    pub ip_extract: String,
}
