//! Page range parsing
//!
//! A range spec is a comma-separated list where each token is either a single
//! 1-based page number (`"5"`) or an inclusive span (`"2-4"`). Order and
//! duplicates are significant: `"3,1,1"` selects page 3, then page 1 twice.

use crate::error::ToolboxError;
use std::num::IntErrorKind;
use std::str::FromStr;

/// One comma-separated token of a range spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageToken {
    Single(u64),
    /// Inclusive span. `start > end` is accepted and selects nothing.
    Span { start: u64, end: u64 },
}

/// Parsed, not yet bounds-checked page selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRangeSpec {
    tokens: Vec<PageToken>,
}

impl PageRangeSpec {
    /// Parse a range string like `"2-4, 1"`.
    ///
    /// Every token must be a page number or a `start-end` pair; empty tokens,
    /// signs other than a leading `+`, and non-numeric text are rejected.
    pub fn parse(input: &str) -> Result<Self, ToolboxError> {
        let mut tokens = Vec::new();

        for part in input.split(',') {
            let part = part.trim();

            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page_number(start)
                    .ok_or_else(|| ToolboxError::InvalidRangeSyntax(invalid_token(part)))?;
                let end = parse_page_number(end)
                    .ok_or_else(|| ToolboxError::InvalidRangeSyntax(invalid_token(part)))?;
                tokens.push(PageToken::Span { start, end });
            } else {
                let page = parse_page_number(part)
                    .ok_or_else(|| ToolboxError::InvalidRangeSyntax(invalid_token(part)))?;
                tokens.push(PageToken::Single(page));
            }
        }

        Ok(Self { tokens })
    }

    /// Expand to 1-based page numbers that exist in a document of
    /// `total_pages` pages. Out-of-range numbers are dropped silently.
    ///
    /// Spans are clipped to the document before expansion, so a token like
    /// `"1-4000000000"` costs at most `total_pages` entries.
    pub fn resolve(&self, total_pages: u32) -> Vec<u32> {
        let last = u64::from(total_pages);
        let mut pages = Vec::new();

        for token in &self.tokens {
            match *token {
                PageToken::Single(page) => {
                    if (1..=last).contains(&page) {
                        pages.push(page as u32);
                    }
                }
                PageToken::Span { start, end } => {
                    let lo = start.max(1);
                    let hi = end.min(last);
                    if lo <= hi {
                        pages.extend((lo..=hi).map(|p| p as u32));
                    }
                }
            }
        }

        pages
    }
}

impl FromStr for PageRangeSpec {
    type Err = ToolboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid_token(token: &str) -> String {
    if token.is_empty() {
        "empty entry in page list".to_string()
    } else {
        format!("'{}' is not a page number or a start-end range", token)
    }
}

/// Numbers too large for u64 saturate; they can never be in range anyway.
fn parse_page_number(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}
