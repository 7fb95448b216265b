use std::net::IpAddr;

/// What to do with a record given the freshly resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Unchanged,
    Update,
    /// Content already matches but force_update is set.
    ForcedUpdate,
}

impl Decision {
    pub fn needs_write(&self) -> bool {
        !matches!(self, Decision::Unchanged)
    }
}

/// Compare the provider's current content with the resolved address.
///
/// Content is compared as an address, so differing textual forms of the
/// same IPv6 address are equal. Content that does not parse always differs.
pub fn decide(current: &str, resolved: &IpAddr, force: bool) -> Decision {
    let matches = current
        .trim()
        .parse::<IpAddr>()
        .is_ok_and(|current| &current == resolved);

    match (matches, force) {
        (false, _) => Decision::Update,
        (true, false) => Decision::Unchanged,
        (true, true) => Decision::ForcedUpdate,
    }
}
