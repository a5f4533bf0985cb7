use crate::error::ToolError;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeToken {
    Single(i64),
    Span { start: i64, end: i64 },
}

impl RangeToken {
    /// Parse a single token like "5" or "1-3". Returns `None` for anything
    /// that isn't a number or a hyphenated pair of numbers.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Some((start, end)) = s.split_once('-') {
            let start = start.trim().parse::<i64>().ok()?;
            let end = end.trim().parse::<i64>().ok()?;
            Some(RangeToken::Span { start, end })
        } else {
            s.parse::<i64>().ok().map(RangeToken::Single)
        }
    }

    /// Insert the zero-based indices this token covers, clamped to the document.
    fn collect_into(&self, total_pages: u32, out: &mut BTreeSet<u32>) {
        let total = i64::from(total_pages);
        let (start, end) = match *self {
            RangeToken::Single(p) => (p, p),
            RangeToken::Span { start, end } => (start.max(1), end.min(total)),
        };

        if start < 1 || end > total || start > end {
            return;
        }

        // Both bounds are within 1..=total_pages here.
        for page in start..=end {
            out.insert((page - 1) as u32);
        }
    }
}

/// The zero-based page indices chosen for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    indices: BTreeSet<u32>,
}

impl PageSelection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    /// Indices in ascending order, the order pages are copied out.
    pub fn ascending(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    /// Every page of a document, used by tools that work on whole documents.
    pub fn all(total_pages: u32) -> Self {
        PageSelection {
            indices: (0..total_pages).collect(),
        }
    }

    pub fn single(index: u32) -> Self {
        PageSelection {
            indices: BTreeSet::from([index]),
        }
    }
}

/// Resolve a comma-separated expression like "1-3, 5, 8" against a document
/// with `total_pages` pages.
///
/// Malformed or out-of-range tokens are dropped; only an entirely empty
/// selection is an error.
pub fn select_pages(expression: &str, total_pages: u32) -> Result<PageSelection, ToolError> {
    let mut indices = BTreeSet::new();

    for part in expression.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match RangeToken::parse(part) {
            Some(token) => token.collect_into(total_pages, &mut indices),
            None => debug!(token = part, "ignoring malformed page token"),
        }
    }

    if indices.is_empty() {
        return Err(ToolError::InvalidSelection {
            expression: expression.to_string(),
            total_pages,
        });
    }

    debug!(expression, total_pages, selected = indices.len(), "resolved page selection");
    Ok(PageSelection { indices })
}

/// Like [`select_pages`], but no expression means every page.
pub fn select_or_all(
    expression: Option<&str>,
    total_pages: u32,
) -> Result<PageSelection, ToolError> {
    match expression {
        Some(expression) => select_pages(expression, total_pages),
        None => Ok(PageSelection::all(total_pages)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(expr: &str, total: u32) -> Vec<u32> {
        select_pages(expr, total).unwrap().ascending().collect()
    }

    fn is_invalid(expr: &str, total: u32) -> bool {
        matches!(
            select_pages(expr, total),
            Err(ToolError::InvalidSelection { .. })
        )
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(RangeToken::parse("5"), Some(RangeToken::Single(5)));
        assert_eq!(RangeToken::parse(" 7 "), Some(RangeToken::Single(7)));
    }

    #[test]
    fn test_parse_span() {
        assert_eq!(
            RangeToken::parse("1 - 3"),
            Some(RangeToken::Span { start: 1, end: 3 })
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(RangeToken::parse("abc"), None);
        assert_eq!(RangeToken::parse("-5"), None);
        assert_eq!(RangeToken::parse("5-"), None);
        assert_eq!(RangeToken::parse("1-2-3"), None);
        assert_eq!(RangeToken::parse(""), None);
    }

    #[test]
    fn test_empty_expression() {
        for total in [0, 1, 10] {
            assert!(is_invalid("", total));
            assert!(is_invalid("   ", total));
            assert!(is_invalid(" , ,", total));
        }
    }

    #[test]
    fn test_mixed_expression() {
        assert_eq!(selected("1-3,5,8", 10), vec![0, 1, 2, 4, 7]);
    }

    #[test]
    fn test_range_clamped_to_document() {
        assert_eq!(selected("3-100", 5), vec![2, 3, 4]);
        assert_eq!(selected("0-2", 5), vec![0, 1]);
    }

    #[test]
    fn test_out_of_range_single() {
        assert!(is_invalid("9", 5));
        assert!(is_invalid("0", 5));
    }

    #[test]
    fn test_reversed_range() {
        assert!(is_invalid("4-2", 5));
        assert_eq!(selected("4-2, 1", 5), vec![0]);
    }

    #[test]
    fn test_zero_page_document() {
        assert!(is_invalid("1", 0));
        assert!(is_invalid("1-5", 0));
    }

    #[test]
    fn test_malformed_tokens_ignored() {
        assert_eq!(selected("x, 2, 3-y, 4", 5), vec![1, 3]);
        assert!(is_invalid("a,b,c", 5));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(selected("3,1-3,3", 5), vec![0, 1, 2]);
    }

    #[test]
    fn test_order_is_ascending_regardless_of_input() {
        assert_eq!(selected("5, 1, 3", 5), vec![0, 2, 4]);
    }

    #[test]
    fn test_huge_numbers() {
        assert_eq!(selected("4-99999999999", 5), vec![3, 4]);
        assert!(is_invalid("99999999999999999999999", 5));
    }

    #[test]
    fn test_select_or_all() {
        let all = select_or_all(None, 3).unwrap();
        assert_eq!(all.ascending().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(select_or_all(Some("2"), 3).unwrap(), PageSelection::single(1));
        assert!(select_or_all(Some(""), 3).is_err());
    }

    #[test]
    fn test_idempotent() {
        let a = select_pages("2-4, 1", 6).unwrap();
        let b = select_pages("2-4, 1", 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_carries_input() {
        match select_pages("9", 5) {
            Err(ToolError::InvalidSelection {
                expression,
                total_pages,
            }) => {
                assert_eq!(expression, "9");
                assert_eq!(total_pages, 5);
            }
            other => panic!("expected InvalidSelection, got {:?}", other),
        }
    }
}
