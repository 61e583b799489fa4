//! Page requests and paged results for post listings.

use serde::Serialize;

use crate::config::PaginationConfig;

/// Column a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Content,
}

impl SortField {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            _ => None,
        }
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "p.id",
            Self::Title => "p.title",
            Self::Content => "p.content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering of a listing; ties are always broken by post id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    /// Parse `property[,asc|desc]`. Unknown properties fall back to the
    /// default ordering, unknown directions to ascending.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut parts = s.split(',');
        let Some(field) = parts.next().and_then(SortField::parse) else {
            return Self::default();
        };
        let direction = match parts.next().map(|d| d.trim().to_lowercase()) {
            Some(d) if d == "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { field, direction }
    }

    /// SQL `ORDER BY` body built only from fixed column names.
    #[must_use]
    pub fn order_by_clause(self) -> String {
        match self.field {
            SortField::Id => format!("p.id {}", self.direction.keyword()),
            field => format!("{} {}, p.id ASC", field.column(), self.direction.keyword()),
        }
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Sort::default(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Build a request from raw query values, falling back to the configured
    /// defaults for anything missing or unparsable.
    #[must_use]
    pub fn from_params(
        page: Option<&str>,
        size: Option<&str>,
        sort: Option<&str>,
        config: &PaginationConfig,
    ) -> Self {
        let page = page.and_then(|p| p.trim().parse::<u32>().ok()).unwrap_or(0);
        let size = size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        let sort = sort.map(Sort::parse).unwrap_or_default();
        Self { page, size, sort }
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page).saturating_mul(i64::from(self.size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, PaginationConfig::default().default_page_size)
    }
}

/// One page of results plus the total number of matching elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    #[must_use]
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }
}
