//! Turns free-form suggestion text into ordered display rows.
//!
//! The generation provider promises nothing about its output shape, so
//! every line must land somewhere: an ordered chain of matchers is tried in
//! sequence and the final fallback always succeeds. Parsing never fails and
//! is safe to repeat on the same input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// One display row parsed from a line of suggestion text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceItem {
    pub label: Option<String>,
    pub text: String,
}

/// `**Label**: text` — the emphasis form the provider is instructed to use.
static EMPHASIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*\s*:\s*(.+)$").expect("valid regex"));

/// `Label: text` — the plain form it falls back to anyway.
static PLAIN_LABELED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:]+?)\s*:\s*(.+)$").expect("valid regex"));

type Matcher = fn(&str) -> Option<AdviceItem>;

/// Tried in order; first match wins.
const MATCHERS: [Matcher; 2] = [match_emphasized, match_plain_labeled];

/// Parse raw suggestion text into ordered rows.
///
/// Lines are trimmed, blanks dropped, and a leading `-` or `*` bullet
/// (followed by whitespace) stripped. A line matching no labeled pattern
/// becomes an unlabeled row rather than being dropped, so item order always
/// equals input line order.
#[must_use]
pub fn parse(raw: &str) -> Vec<AdviceItem> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_bullet)
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> AdviceItem {
    for matcher in MATCHERS {
        if let Some(item) = matcher(line) {
            return item;
        }
    }
    AdviceItem {
        label: None,
        text: line.to_owned(),
    }
}

fn match_emphasized(line: &str) -> Option<AdviceItem> {
    EMPHASIZED.captures(line).map(|captures| AdviceItem {
        label: Some(captures[1].trim().to_owned()),
        text: captures[2].trim().to_owned(),
    })
}

fn match_plain_labeled(line: &str) -> Option<AdviceItem> {
    PLAIN_LABELED.captures(line).map(|captures| AdviceItem {
        label: Some(captures[1].trim().to_owned()),
        text: captures[2].trim().to_owned(),
    })
}

/// Strip one leading bullet marker: `-` or `*` followed by whitespace.
///
/// `**Label**` survives because its second character is `*`, not
/// whitespace.
fn strip_bullet(line: &str) -> &str {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*'), Some(second)) if second.is_whitespace() => chars.as_str().trim_start(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(label: &str, text: &str) -> AdviceItem {
        AdviceItem {
            label: Some(label.to_owned()),
            text: text.to_owned(),
        }
    }

    fn unlabeled(text: &str) -> AdviceItem {
        AdviceItem {
            label: None,
            text: text.to_owned(),
        }
    }

    #[test]
    fn emphasized_labels_are_extracted() {
        let items = parse("**Base Layer**: thermal shirt\n**Accessories**: wool hat");
        assert_eq!(
            items,
            vec![
                labeled("Base Layer", "thermal shirt"),
                labeled("Accessories", "wool hat"),
            ]
        );
    }

    #[test]
    fn plain_labels_are_extracted() {
        let items = parse("Outer Layer: windbreaker");
        assert_eq!(items, vec![labeled("Outer Layer", "windbreaker")]);
    }

    #[test]
    fn unmatched_lines_degrade_to_unlabeled_text() {
        let items = parse("Dress warmly today");
        assert_eq!(items, vec![unlabeled("Dress warmly today")]);
    }

    #[test]
    fn bullets_are_stripped_before_matching() {
        let items = parse("- **Base Layer**: cotton tee\n* Mid Layer: hoodie\n- plain advice");
        assert_eq!(
            items,
            vec![
                labeled("Base Layer", "cotton tee"),
                labeled("Mid Layer", "hoodie"),
                unlabeled("plain advice"),
            ]
        );
    }

    #[test]
    fn double_star_without_following_space_is_not_a_bullet() {
        let items = parse("**Accessories**: scarf");
        assert_eq!(items, vec![labeled("Accessories", "scarf")]);
    }

    #[test]
    fn blank_lines_collapse() {
        let items = parse("\n\n  \nBase Layer: tee\n\n\nAccessories: cap\n");
        assert_eq!(
            items,
            vec![labeled("Base Layer", "tee"), labeled("Accessories", "cap")]
        );
    }

    #[test]
    fn order_follows_source_lines() {
        let items = parse("Accessories: cap\nBase Layer: tee");
        assert_eq!(
            items,
            vec![labeled("Accessories", "cap"), labeled("Base Layer", "tee")]
        );
    }

    #[test]
    fn hostile_input_never_panics_or_drops_lines() {
        let input = "::::\n** **:\n- *\n:::trailing";
        let items = parse(input);
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn empty_input_parses_to_no_items() {
        assert!(parse("").is_empty());
        assert!(parse("\n \n").is_empty());
    }

    #[test]
    fn reparsing_reconstructed_labeled_output_is_stable() {
        let first = parse("**Base Layer**: thermal shirt\nMid Layer: fleece");
        let reconstructed = first
            .iter()
            .map(|item| {
                format!(
                    "{}: {}",
                    item.label.as_deref().unwrap_or_default(),
                    item.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let second = parse(&reconstructed);
        assert_eq!(first, second);
    }
}
