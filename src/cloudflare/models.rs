use crate::common::Record;

#[derive(serde::Deserialize)]
pub(super) struct APIError {
    pub code: usize,
    pub message: String,
}

#[derive(serde::Deserialize)]
pub(super) struct PaginatedResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,
    #[serde(default)]
    pub errors: Vec<APIError>,
    pub result_info: Option<ResultInfo>,
}

#[derive(serde::Deserialize)]
pub(super) struct WriteResponse {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<APIError>,
}

#[derive(serde::Deserialize)]
pub(super) struct ResultInfo {
    pub count: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_count: Option<usize>,
}

impl ResultInfo {
    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        match self.total_count {
            Some(total) => self.page * self.per_page < total,
            // Older responses only report the size of this page.
            None => self.count >= self.per_page && self.count > 0,
        }
    }
}

#[derive(serde::Deserialize)]
pub(super) struct DNSRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl From<DNSRecord> for Record {
    fn from(value: DNSRecord) -> Self {
        Record {
            id: value.id,
            kind: value.kind,
            name: value.name,
            content: value.content,
        }
    }
}
