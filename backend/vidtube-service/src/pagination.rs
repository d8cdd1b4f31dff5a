//! Page/limit parsing for list endpoints

use crate::error::AppError;
use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `?page&limit` query. Kept as strings so bad input is a 400 with our
/// message rather than an extractor failure.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        let page = parse_positive("page", page)?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive("limit", limit)?
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl TryFrom<&PageQuery> for PageRequest {
    type Error = AppError;

    fn try_from(query: &PageQuery) -> Result<Self, Self::Error> {
        PageRequest::parse(query.page.as_deref(), query.limit.as_deref())
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<i64>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(AppError::BadRequest(format!(
            "Invalid {} value, expected a positive integer",
            name
        ))),
    }
}

/// `sortType` values: `1`/`asc` and `-1`/`desc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") => Ok(Self::default()),
            Some("1") | Some("asc") => Ok(Self::Asc),
            Some("-1") | Some("desc") => Ok(Self::Desc),
            Some(_) => Err(AppError::BadRequest(
                "Invalid sortType, expected 1, -1, asc or desc".to_string(),
            )),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PageRequest::parse(None, None).unwrap(), PageRequest::default());
        assert_eq!(
            PageRequest::parse(Some(""), Some(" ")).unwrap(),
            PageRequest::default()
        );
    }

    #[test]
    fn test_explicit_values_and_offset() {
        let req = PageRequest::parse(Some("3"), Some("5")).unwrap();
        assert_eq!(req, PageRequest { page: 3, limit: 5 });
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn test_limit_capped() {
        let req = PageRequest::parse(None, Some("5000")).unwrap();
        assert_eq!(req.limit, MAX_LIMIT);
    }

    #[test]
    fn test_rejects_non_positive_and_garbage() {
        for bad in ["0", "-2", "abc", "1.5"] {
            assert!(matches!(
                PageRequest::parse(Some(bad), None),
                Err(AppError::BadRequest(_))
            ));
            assert!(matches!(
                PageRequest::parse(None, Some(bad)),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::parse(None).unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("-1")).unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("DESC")).unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("1")).unwrap(), SortDirection::Asc);
        assert!(SortDirection::parse(Some("sideways")).is_err());
    }
}
