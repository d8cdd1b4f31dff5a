//! JSON envelopes shared by every endpoint

use crate::pagination::PageRequest;
use actix_web::{http::StatusCode, HttpResponse};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Success envelope: `{statusCode, data, message, success}`
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    pub fn success(status: StatusCode, data: T) -> Self {
        Self::new(status, data, "Success")
    }

    /// Render with the HTTP status mirroring `statusCode`
    pub fn respond(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

/// Stand-in for an empty `data` object
pub fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Failure envelope: `{statusCode, message, success:false, errors}`
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            success: false,
            errors,
        }
    }
}

/// One page of results plus paging metadata.
///
/// Serialized with a per-resource label, e.g. `videos` / `totalVideos`.
#[derive(Debug)]
pub struct Paginated<T> {
    label: &'static str,
    total_label: &'static str,
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> Paginated<T> {
    pub fn new(
        label: &'static str,
        total_label: &'static str,
        items: Vec<T>,
        total: i64,
        request: PageRequest,
    ) -> Self {
        Self {
            label,
            total_label,
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }

    pub fn videos(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self::new("videos", "totalVideos", items, total, request)
    }

    pub fn comments(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self::new("comments", "totalComments", items, total, request)
    }

    pub fn total_pages(&self) -> i64 {
        let pages = (self.total + self.limit - 1) / self.limit.max(1);
        pages.max(1)
    }

    /// 1-based position of the first item on this page
    pub fn paging_counter(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit).saturating_add(1)
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }
}

impl<T: Serialize> Serialize for Paginated<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_prev = self.has_prev_page();
        let has_next = self.has_next_page();

        let mut map = serializer.serialize_map(Some(10))?;
        map.serialize_entry(self.label, &self.items)?;
        map.serialize_entry(self.total_label, &self.total)?;
        map.serialize_entry("limit", &self.limit)?;
        map.serialize_entry("currentPage", &self.page)?;
        map.serialize_entry("totalPages", &self.total_pages())?;
        map.serialize_entry("pagingCounter", &self.paging_counter())?;
        map.serialize_entry("hasPrevPage", &has_prev)?;
        map.serialize_entry("hasNextPage", &has_next)?;
        map.serialize_entry("prevPage", &has_prev.then(|| self.page - 1))?;
        map.serialize_entry("nextPage", &has_next.then(|| self.page + 1))?;
        map.end()
    }
}
