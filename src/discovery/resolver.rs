use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use regex::Regex;
use snafu::{OptionExt, ResultExt};

use crate::common::{
    execute, read_body, AddressSnafu, ExtractSnafu, PatternSnafu, RecordKind, Resolver, Result,
    ServiceUrlSnafu,
};

/// Asks an HTTP discovery service for the caller's public address.
pub struct HttpResolver {
    agent: ureq::Agent,
}

impl HttpResolver {
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Resolver for HttpResolver {
    fn resolve(&self, kind: RecordKind, source: &super::Config) -> Result<IpAddr> {
        let service = url::Url::parse(&source.service).context(ServiceUrlSnafu {
            kind,
            url: source.service.as_str(),
        })?;
        let resp = execute(self.agent.get(service.as_str()), None)?;
        let body = read_body(resp)?;

        tracing::debug!(
            kind = kind.as_str(),
            service = service.as_str(),
            body = body.as_str(),
            "Discovery service response"
        );

        extract_address(kind, &body, &source.ip_extract)
    }
}

/// Pull the first capture group of `pattern` out of `body` and parse it as
/// an address of the family `kind` holds.
pub fn extract_address(kind: RecordKind, body: &str, pattern: &str) -> Result<IpAddr> {
    let regex = Regex::new(pattern).context(PatternSnafu { pattern })?;

    let captures = regex.captures(body).context(ExtractSnafu {
        pattern,
        message: "pattern did not match the response",
    })?;
    let candidate = captures
        .get(1)
        .context(ExtractSnafu {
            pattern,
            message: "pattern has no first capture group",
        })?
        .as_str();

    match kind {
        RecordKind::A => candidate.parse::<Ipv4Addr>().map(IpAddr::V4),
        RecordKind::Aaaa => candidate.parse::<Ipv6Addr>().map(IpAddr::V6),
    }
    .context(AddressSnafu { kind, candidate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::OneShotServer;
    use crate::common::{self, Error};

    fn source(service: &str, ip_extract: &str) -> crate::discovery::Config {
        crate::discovery::Config {
            service: service.into(),
            ip_extract: ip_extract.into(),
        }
    }

    const V4_PATTERN: &str = r"(\d+\.\d+\.\d+\.\d+)";
    const V6_PATTERN: &str = r"([0-9a-fA-F:]+)";

    #[test]
    fn extracts_ipv4() {
        let tests = [
            ("5.6.7.8", "5.6.7.8"),
            ("5.6.7.8\n", "5.6.7.8"),
            ("Current IP Address: 203.0.113.42</body>", "203.0.113.42"),
            ("{\"ip\":\"198.51.100.7\"}", "198.51.100.7"),
        ];

        for (body, expected) in tests {
            let addr = extract_address(RecordKind::A, body, V4_PATTERN).unwrap();
            assert!(addr.is_ipv4());
            assert_eq!(addr.to_string(), expected);
        }
    }

    #[test]
    fn extracts_ipv6() {
        let addr = extract_address(RecordKind::Aaaa, "2001:db8::42\n", V6_PATTERN).unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.to_string(), "2001:db8::42");

        let addr =
            extract_address(RecordKind::Aaaa, "ip=2606:4700:4700::1111", r"ip=(\S+)").unwrap();
        assert_eq!(addr.to_string(), "2606:4700:4700::1111");
    }

    #[test]
    fn unmatched_body_is_an_extract_error() {
        let err = extract_address(RecordKind::A, "no address here", V4_PATTERN).unwrap_err();
        assert!(matches!(err, Error::ExtractError { .. }));
    }

    #[test]
    fn pattern_without_group_is_an_extract_error() {
        let err = extract_address(RecordKind::A, "1.2.3.4", r"\d+\.\d+\.\d+\.\d+").unwrap_err();
        assert!(matches!(err, Error::ExtractError { .. }));
    }

    #[test]
    fn malformed_pattern_is_a_pattern_error() {
        let err = extract_address(RecordKind::A, "1.2.3.4", r"(\d+").unwrap_err();
        assert!(matches!(err, Error::PatternError { .. }));
    }

    #[test]
    fn wrong_family_is_an_address_error() {
        let err = extract_address(RecordKind::A, "2001:db8::1", V6_PATTERN).unwrap_err();
        assert!(matches!(err, Error::AddressError { kind: RecordKind::A, .. }));

        let err = extract_address(RecordKind::Aaaa, "1.2.3.4", V4_PATTERN).unwrap_err();
        assert!(matches!(err, Error::AddressError { kind: RecordKind::Aaaa, .. }));
    }

    #[test]
    fn out_of_range_octets_are_rejected() {
        let err = extract_address(RecordKind::A, "999.1.1.1", V4_PATTERN).unwrap_err();
        assert!(matches!(err, Error::AddressError { .. }));
    }

    #[test]
    fn capture_is_used_verbatim() {
        let err = extract_address(RecordKind::A, " 5.6.7.8 ", r"(.+)").unwrap_err();
        assert!(matches!(err, Error::AddressError { .. }));
    }

    #[test]
    fn resolves_from_discovery_service() {
        let server = OneShotServer::serve(200, "5.6.7.8\n");
        let resolver = HttpResolver::new(common::agent());

        let addr = resolver
            .resolve(RecordKind::A, &source(&server.url("/ip"), V4_PATTERN))
            .unwrap();
        let req = server.request();

        assert_eq!(req.request_line, "GET /ip HTTP/1.1");
        assert_eq!(addr.to_string(), "5.6.7.8");
    }

    #[test]
    fn server_error_is_a_status_error() {
        let server = OneShotServer::serve(500, "oops");
        let resolver = HttpResolver::new(common::agent());

        let err = resolver
            .resolve(RecordKind::A, &source(&server.url("/ip"), V4_PATTERN))
            .unwrap_err();
        server.request();

        assert!(matches!(err, Error::StatusError { status: 500, .. }));
    }

    #[test]
    fn bad_service_url_is_scoped_to_its_kind() {
        let resolver = HttpResolver::new(common::agent());

        let err = resolver
            .resolve(RecordKind::Aaaa, &source("api6.ipify.org", V6_PATTERN))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::ServiceUrlError {
                kind: RecordKind::Aaaa,
                ..
            }
        ));
    }
}
