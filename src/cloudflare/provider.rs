use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::common::{
    self, execute, read_body, DecodeSnafu, Record, ResponseSnafu, Result,
};
use crate::MainConfig;

use super::models::{APIError, DNSRecord, PaginatedResponse, WriteResponse};

pub const PROVIDER_NAME: &str = "Cloudflare";

const RECORDS_PER_PAGE: usize = 1000;

fn process_errors(success: bool, errors: Vec<APIError>) -> Result<()> {
    if !success || !errors.is_empty() {
        let mut err_msg: String = String::new();
        for err in errors {
            err_msg.push_str(&format!("{} {}; ", err.code, err.message));
        }
        return ResponseSnafu {
            message: format!("Request unsuccessful: {err_msg}"),
        }
        .fail();
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(resp: ureq::Response) -> Result<T> {
    let url = resp.get_url().to_owned();
    let body = read_body(resp)?;

    tracing::trace!(
        provider = PROVIDER_NAME,
        url = url.as_str(),
        body = body.as_str(),
        "Response body"
    );

    serde_json::from_str(&body)
        .boxed_local()
        .context(DecodeSnafu {
            message: format!("Failed to deserialize response from {url}"),
        })
}

/// Client for the records of a single Cloudflare zone.
pub struct Cloudflare {
    agent: ureq::Agent,
    api_key: String,
    records_url: String,
}

impl Cloudflare {
    pub fn new(agent: ureq::Agent, config: &MainConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        let base = config.api_url.as_str().trim_end_matches('/');

        Ok(Self {
            agent,
            api_key,
            records_url: format!("{base}/zones/{}/dns_records", config.zone_id),
        })
    }

    fn with_headers(&self, req: ureq::Request) -> ureq::Request {
        req.set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json; charset=utf8")
    }

    fn api_get_paginated<T: DeserializeOwned>(&self, url: &str, per_page: usize) -> Result<Vec<T>> {
        let mut page = 1;
        let mut items: Vec<T> = Vec::new();
        loop {
            let req = self
                .with_headers(self.agent.get(url))
                .query("page", &page.to_string())
                .query("per_page", &per_page.to_string());
            let mut resp: PaginatedResponse<T> = decode(execute(req, None)?)?;

            process_errors(resp.success, resp.errors)?;

            items.append(&mut resp.result);

            if let Some(info) = resp.result_info {
                if info.has_more() {
                    page += 1;
                    continue;
                }
            }

            return Ok(items);
        }
    }

    fn api_patch(&self, url: &str, body: serde_json::Value) -> Result<()> {
        let req = self.with_headers(self.agent.request("PATCH", url));
        let resp: WriteResponse = decode(execute(req, Some(&body))?)?;

        process_errors(resp.success, resp.errors)
    }
}

impl common::Provider for Cloudflare {
    fn list_records(&self) -> Result<Vec<Record>> {
        let records: Vec<DNSRecord> = self.api_get_paginated(&self.records_url, RECORDS_PER_PAGE)?;

        tracing::debug!(
            provider = PROVIDER_NAME,
            records = records.len(),
            "Read completed",
        );

        Ok(records.into_iter().map(Record::from).collect())
    }

    fn update_record(&self, record: &Record, content: &str) -> Result<()> {
        self.api_patch(
            &format!("{}/{}", self.records_url, record.id),
            serde_json::json!({ "content": content }),
        )?;

        tracing::debug!(
            provider = PROVIDER_NAME,
            kind = record.kind.as_str(),
            name = record.name.as_str(),
            record_id = record.id.as_str(),
            "Updated record",
        );

        Ok(())
    }
}
