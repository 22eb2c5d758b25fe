//! Listing parameters and their validation.

use std::fmt;
use std::str::FromStr;

use crate::domain::Post;
use crate::error::DomainError;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Fields a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Title,
        SortField::Content,
        SortField::Author,
        SortField::Date,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Content => "content",
            SortField::Author => "author",
            SortField::Date => "date",
        }
    }

    /// Raw comparison key. Missing values are stored as "".
    pub fn key(self, post: &Post) -> &str {
        match self {
            SortField::Title => &post.title,
            SortField::Content => &post.content,
            SortField::Author => &post.author,
            SortField::Date => &post.date,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let allowed = SortField::ALL
                    .iter()
                    .map(|f| format!("'{f}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                DomainError::InvalidParameter {
                    field: "sort",
                    message: format!("Invalid sort field. Must be one of {allowed}."),
                }
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(DomainError::InvalidParameter {
                field: "direction",
                message: "Invalid direction. Must be 'asc' or 'desc'.".to_string(),
            }),
        }
    }
}

/// Validated listing controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub sort: Option<SortField>,
    pub direction: Direction,
    pub page: usize,
    pub limit: usize,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            sort: None,
            direction: Direction::Asc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListParams {
    /// Validate raw query-string values. Empty strings count as absent.
    pub fn parse(
        sort: Option<&str>,
        direction: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, DomainError> {
        let sort = present(sort).map(str::parse::<SortField>).transpose()?;
        let direction = present(direction)
            .map(str::parse::<Direction>)
            .transpose()?
            .unwrap_or_default();
        let page = positive("page", page, DEFAULT_PAGE)?;
        let limit = positive("limit", limit, DEFAULT_LIMIT)?;

        Ok(Self {
            sort,
            direction,
            page,
            limit,
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn positive(field: &'static str, raw: Option<&str>, default: usize) -> Result<usize, DomainError> {
    let Some(raw) = present(raw) else {
        return Ok(default);
    };

    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(DomainError::InvalidParameter {
            field,
            message: format!("Invalid {field}. Must be a positive integer."),
        }),
    }
}
