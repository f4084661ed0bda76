//! Property-based tests for the scanner
//!
//! Inputs are generated as well-formed class strings (variant chains, nested groups,
//! important markers) plus arbitrary noise for the properties that must hold on any
//! input.

use classlex::{ScanOptions, ScanResult, Scanner, Token};
use proptest::prelude::*;

fn class_word() -> impl Strategy<Value = String> {
    "([a-z]{1,4}:){0,2}[a-z][a-z0-9-]{0,5}!?"
}

fn class_expr() -> impl Strategy<Value = String> {
    class_word().prop_recursive(3, 24, 4, |inner| {
        ("([a-z]{1,4}:){0,2}", prop::collection::vec(inner, 0..4))
            .prop_map(|(head, items)| format!("{}({})", head, items.join(" ")))
    })
}

fn class_string() -> impl Strategy<Value = String> {
    prop::collection::vec(class_expr(), 0..6).prop_map(|exprs| exprs.join(" "))
}

fn noise() -> impl Strategy<Value = String> {
    "[a-c:() !\t]{0,24}"
}

fn twin() -> Scanner {
    Scanner::new(ScanOptions::twin()).unwrap()
}

fn all_tokens(result: &ScanResult) -> Vec<&Token> {
    result
        .classes
        .iter()
        .flat_map(|class| class.variants.iter().chain(std::iter::once(&class.token)))
        .collect()
}

/// Mark every byte explained by the scan: spans, separators, brackets, markers.
fn coverage(text: &str, result: &ScanResult, separator: &str) -> Vec<bool> {
    let mut covered: Vec<bool> = text.bytes().map(|b| b.is_ascii_whitespace()).collect();
    let mut mark = |range: std::ops::Range<usize>| {
        for flag in &mut covered[range] {
            *flag = true;
        }
    };
    let group_variants = result.groups.iter().flat_map(|group| group.variants.iter());
    let class_variants = result.classes.iter().flat_map(|class| class.variants.iter());
    for variant in group_variants.chain(class_variants) {
        mark(variant.start..variant.end + separator.len());
    }
    for class in &result.classes {
        let end = class.token.end + usize::from(class.important);
        mark(class.token.start..end);
    }
    for group in &result.groups {
        mark(group.open..group.open + 1);
        if let Some(close) = group.close {
            mark(close..close + 1);
        }
    }
    covered
}

proptest! {
    #[test]
    fn scanning_is_pure(text in class_string(), cursor in 0usize..80) {
        let scanner = twin();
        prop_assert_eq!(scanner.scan_all(&text, Some(cursor)), scanner.scan_all(&text, Some(cursor)));
    }

    #[test]
    fn lazy_scan_matches_greedy_selection(text in class_string(), cursor in 0usize..80) {
        let greedy = twin();
        let lazy = greedy.with_query(false, false);
        let full = greedy.scan_all(&text, Some(cursor));
        let partial = lazy.scan_all(&text, Some(cursor));
        prop_assert_eq!(&partial.selection, &full.selection);
        prop_assert!(full.classes.starts_with(&partial.classes));
    }

    #[test]
    fn lazy_hover_matches_greedy_hover_on_groups(text in class_string(), cursor in 0usize..80) {
        let greedy = twin().with_query(true, true);
        let lazy = greedy.with_query(true, false);
        let full = greedy.scan_all(&text, Some(cursor));
        let partial = lazy.scan_all(&text, Some(cursor));
        prop_assert_eq!(&partial.selection, &full.selection);
        prop_assert!(full.classes.starts_with(&partial.classes));
    }

    #[test]
    fn in_group_ignores_unterminated_groups(text in class_string(), cut in 0usize..80, cursor in 0usize..80) {
        let mut end = cut.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let text = &text[..end];
        let result = twin().scan_all(text, Some(cursor));
        let inside = result.groups.iter().any(|group| {
            group
                .close
                .is_some_and(|close| group.open < cursor && cursor <= close)
        });
        prop_assert_eq!(result.selection.in_group, inside);
    }

    #[test]
    fn lazy_hover_matches_greedy_hover(text in noise(), cursor in 0usize..30) {
        let greedy = twin().with_query(true, true);
        let lazy = greedy.with_query(true, false);
        prop_assert_eq!(
            lazy.scan_all(&text, Some(cursor)).selection,
            greedy.scan_all(&text, Some(cursor)).selection
        );
    }

    #[test]
    fn token_text_matches_source(text in class_string()) {
        let result = twin().scan_all(&text, None);
        for token in all_tokens(&result) {
            prop_assert_eq!(&text[token.span()], token.text.as_str());
        }
    }

    #[test]
    fn classes_are_ordered(text in class_string()) {
        let result = twin().scan_all(&text, None);
        for pair in result.classes.windows(2) {
            prop_assert!(pair[0].token.end <= pair[1].token.start);
        }
        for class in &result.classes {
            let spans: Vec<_> = class.variants.iter().chain(std::iter::once(&class.token)).collect();
            for pair in spans.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn every_byte_is_accounted_for(text in class_string()) {
        let result = twin().scan_all(&text, None);
        let covered = coverage(&text, &result, ":");
        prop_assert!(covered.iter().all(|flag| *flag), "uncovered bytes in {:?}", text);
    }

    #[test]
    fn variant_chain_rebuilds_word(words in prop::collection::vec(class_word(), 1..6)) {
        let text = words.join(" ");
        let scanner = Scanner::new(ScanOptions::new()).unwrap();
        let result = scanner.scan_all(&text, None);
        prop_assert_eq!(result.classes.len(), words.len());
        for (class, word) in result.classes.iter().zip(&words) {
            let rebuilt = if class.variants.is_empty() {
                class.token.text.clone()
            } else {
                format!("{}:{}", class.variant_chain(":"), class.token.text)
            };
            prop_assert_eq!(&rebuilt, word);
        }
    }

    #[test]
    fn hover_selection_contains_cursor(text in class_string(), cursor in 0usize..80) {
        let scanner = Scanner::new(ScanOptions::new().brackets(true).hover(true)).unwrap();
        let result = scanner.scan_all(&text, Some(cursor));
        if let Some(selected) = result.selection.selected {
            prop_assert!(selected.contains(cursor));
        }
    }

    #[test]
    fn edit_selection_touches_cursor(text in class_string(), cursor in 0usize..80) {
        let scanner = Scanner::new(ScanOptions::new().brackets(true)).unwrap();
        let result = scanner.scan_all(&text, Some(cursor));
        if let Some(selected) = result.selection.selected {
            prop_assert!(selected.start <= cursor && cursor <= selected.end);
        }
    }

    #[test]
    fn in_group_matches_group_spans(text in class_string(), cursor in 0usize..80) {
        let result = twin().scan_all(&text, Some(cursor));
        let inside = result.groups.iter().any(|group| {
            group
                .close
                .is_some_and(|close| group.open < cursor && cursor <= close)
        });
        prop_assert_eq!(result.selection.in_group, inside);
    }

    #[test]
    fn any_input_terminates(text in "\\PC{0,40}", cursor in 0usize..50) {
        let result = twin().scan_all(&text, Some(cursor));
        for token in all_tokens(&result) {
            prop_assert!(token.end <= text.len());
        }
    }
}
