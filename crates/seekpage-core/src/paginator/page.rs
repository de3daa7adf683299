use std::fmt;

use serde::Serialize;

use crate::token::PageToken;

/// One page of records with the tokens around it.
///
/// A page knows where it came from and where to go next, but never its
/// absolute position: keyset pages have no page number or record index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    /// Records of this page, in ordering order.
    pub records: Vec<R>,
    /// Token this page was fetched with.
    pub token: PageToken,
    /// Token of the following page, `Absent` on the last page.
    pub next_token: PageToken,
    /// Token of the preceding page.
    ///
    /// `Boundary` when the preceding page is the first one, `Absent` when
    /// this is the first page.
    pub prev_token: PageToken,
}

impl<R> Page<R> {
    /// Creates a page.
    pub fn new(
        records: Vec<R>,
        token: PageToken,
        next_token: PageToken,
        prev_token: PageToken,
    ) -> Self {
        Self {
            records,
            token,
            next_token,
            prev_token,
        }
    }

    /// Returns whether a following page exists.
    pub fn has_next(&self) -> bool {
        self.next_token.is_present()
    }

    /// Returns whether a preceding page exists.
    pub fn has_previous(&self) -> bool {
        self.prev_token.is_present()
    }

    /// Returns whether a page exists on either side of this one.
    pub fn has_other_pages(&self) -> bool {
        self.has_next() || self.has_previous()
    }

    /// Token of the following page.
    pub fn next_page_number(&self) -> &PageToken {
        &self.next_token
    }

    /// Token of the preceding page.
    pub fn previous_page_number(&self) -> &PageToken {
        &self.prev_token
    }

    /// Always `None`: keyset pages carry no absolute record index.
    pub fn start_index(&self) -> Option<usize> {
        None
    }

    /// Always `None`: keyset pages carry no absolute record index.
    pub fn end_index(&self) -> Option<usize> {
        None
    }

    /// Returns the number of records on the page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records of the page.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Consumes the page, returning its records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    /// Maps the records to a different type, keeping the tokens.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(R) -> U,
    {
        Page {
            records: self.records.into_iter().map(f).collect(),
            token: self.token,
            next_token: self.next_token,
            prev_token: self.prev_token,
        }
    }
}

impl<R> IntoIterator for Page<R> {
    type IntoIter = std::vec::IntoIter<R>;
    type Item = R;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Page<R> {
    type IntoIter = std::slice::Iter<'a, R>;
    type Item = &'a R;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<R> fmt::Display for Page<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Page ({}, {}, {})>",
            self.prev_token, self.token, self.next_token
        )
    }
}
