use snafu::ResultExt;

use super::{DecodeSnafu, RequestSnafu, Result, StatusSnafu};

pub(crate) const USER_AGENT: &str = concat!("cfddns-rs/", env!("CARGO_PKG_VERSION"));

/// The agent shared by every request in the process.
pub fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new().user_agent(USER_AGENT).build()
}

/// Send a request, splitting failures into transport errors and
/// non-success statuses.
pub(crate) fn execute(req: ureq::Request, body: Option<&serde_json::Value>) -> Result<ureq::Response> {
    let method = req.method().to_owned();
    let url = req.url().to_owned();
    tracing::debug!(method = method.as_str(), url = url.as_str(), "Sending request");

    let result = match body {
        Some(body) => req.send_json(body),
        None => req.call(),
    };

    match result {
        Ok(resp) => Ok(resp),
        Err(ureq::Error::Status(status, resp)) => {
            tracing::trace!(
                method = method.as_str(),
                url = url.as_str(),
                status,
                body = resp.into_string().unwrap_or_default().as_str(),
                "Error response body"
            );
            StatusSnafu { url, method, status }.fail()
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(transport).context(RequestSnafu { url, method })
        }
    }
}

/// Read a response body as text.
pub(crate) fn read_body(resp: ureq::Response) -> Result<String> {
    let url = resp.get_url().to_owned();
    resp.into_string()
        .boxed_local()
        .context(DecodeSnafu {
            message: format!("Failed to read response body from {url}"),
        })
}
