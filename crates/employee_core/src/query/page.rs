//! Page envelope returned by listing queries.

use crate::model::search::{SortDirection, SortField};
use serde::{Deserialize, Serialize};

/// Sort metadata echoed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortMeta {
    pub property: String,
    pub direction: SortDirection,
}

/// Paging metadata for the request a page answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u64,
    pub page_size: u64,
    pub offset: u64,
    pub sort: SortMeta,
}

impl Pageable {
    pub fn new(
        page_number: u64,
        page_size: u64,
        field: SortField,
        direction: SortDirection,
    ) -> Self {
        Self {
            page_number,
            page_size,
            offset: page_number.saturating_mul(page_size),
            sort: SortMeta {
                property: field.property().to_string(),
                direction,
            },
        }
    }
}

/// One page of results plus the total number of matching rows.
///
/// `total_elements` comes from a separate count, so under concurrent writes
/// it may not line up exactly with `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: Pageable, total_elements: u64) -> Self {
        let total_pages = if pageable.page_size == 0 {
            0
        } else {
            total_elements.div_ceil(pageable.page_size)
        };
        let number_of_elements = content.len();
        let first = pageable.page_number == 0;
        let last = pageable.page_number.saturating_add(1) >= total_pages;
        let empty = content.is_empty();

        Self {
            content,
            pageable,
            total_elements,
            total_pages,
            number_of_elements,
            first,
            last,
            empty,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.content
    }

    pub fn into_items(self) -> Vec<T> {
        self.content
    }

    pub fn page_number(&self) -> u64 {
        self.pageable.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.pageable.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_elements
    }
}
