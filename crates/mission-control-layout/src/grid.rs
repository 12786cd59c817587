//! Counting columns in a `grid-template-columns` value.
//!
//! Computed styles normally resolve to a plain list of lengths
//! (`"300px 300px 300px"`), but authored values such as
//! `repeat(3, minmax(0, 1fr))` and named lines are handled too.

use std::sync::OnceLock;

use regex::Regex;

fn line_names() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("valid line-name pattern"))
}

fn repeat_call() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^repeat\(\s*([^,\s]+)\s*,\s*(.+)\)$").expect("valid repeat pattern")
    })
}

/// Number of columns described by a `grid-template-columns` value.
///
/// `none` (no explicit grid) and empty values count as a single column.
/// `repeat(auto-fill, ..)` and `repeat(auto-fit, ..)` count their track list
/// once, since the real count depends on the container width.
#[must_use]
pub fn column_count(template: &str) -> usize {
    let cleaned = line_names().replace_all(template, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("none") {
        return 1;
    }
    count_tracks(cleaned).max(1)
}

fn count_tracks(list: &str) -> usize {
    split_top_level(list)
        .into_iter()
        .map(|token| match repeat_call().captures(token) {
            Some(caps) => {
                let inner = count_tracks(&caps[2]).max(1);
                caps[1]
                    .parse::<usize>()
                    .map_or(inner, |n| n.saturating_mul(inner))
            }
            None => 1,
        })
        .fold(0, usize::saturating_add)
}

/// Split on whitespace that is not inside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, c) in list.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&list[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&list[s..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_lengths() {
        assert_eq!(column_count("343px"), 1);
        assert_eq!(column_count("300px 300px 300px"), 3);
        assert_eq!(column_count("  200px   1fr  "), 2);
    }

    #[test]
    fn test_none_is_single_column() {
        assert_eq!(column_count("none"), 1);
        assert_eq!(column_count(""), 1);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(column_count("repeat(3, 1fr)"), 3);
        assert_eq!(column_count("repeat(2, 100px 1fr)"), 4);
        assert_eq!(column_count("200px repeat(2, 1fr)"), 3);
    }

    #[test]
    fn test_minmax_is_one_track() {
        assert_eq!(column_count("minmax(0, 1fr) minmax(0, 1fr)"), 2);
        assert_eq!(column_count("repeat(4, minmax(120px, 1fr))"), 4);
    }

    #[test]
    fn test_auto_fill_counts_once() {
        assert_eq!(column_count("repeat(auto-fill, minmax(250px, 1fr))"), 1);
    }

    #[test]
    fn test_line_names_ignored() {
        assert_eq!(column_count("[start] 1fr [middle] 1fr [end]"), 2);
    }

    #[test]
    fn test_huge_repeat_saturates() {
        let max = usize::MAX;
        assert_eq!(column_count(&format!("repeat({max}, 1fr 1fr)")), usize::MAX);
        assert_eq!(
            column_count(&format!("repeat({max}, 1fr) repeat({max}, 1fr)")),
            usize::MAX
        );
    }
}
