//! Preview text decoding
//!
//! The tracer renders heap objects as host-language repr strings, e.g.
//! `[1, 2, 3]`, `{'a': 1}`, `{1, 2}`. This module decodes those strings
//! into display tokens with a small delimiter scan that is:
//!
//! - nesting-aware: commas inside nested brackets do not split,
//! - quote-aware: single- and double-quoted tokens are recognized and the
//!   quoting convention is stripped per token,
//! - escape-aware: backslash escapes inside quoted tokens are honored.
//!
//! Every parser returns `None` on malformed input (unbalanced brackets,
//! unterminated quotes, a mapping entry without `:`); the caller falls back
//! to an opaque single-token rendering.

/// Parse a bracketed, comma-separated sequence preview into ordered tokens.
///
/// `"[1, 2, 3]"` → `["1", "2", "3"]`; `"[]"` → `[]`. Tuples use the same
/// shape with parentheses, which the tracer normalizes before sending.
pub(crate) fn parse_sequence(preview: &str) -> Option<Vec<String>> {
    let trimmed = preview.trim();
    let body = strip_brackets(trimmed, '[', ']')
        .or_else(|| strip_brackets(trimmed, '(', ')'))?;
    parse_elements(body)
}

/// Parse a braced mapping preview into ordered (key, value) pairs.
///
/// `"{'a': 1, 'b': 2}"` → `[("a", "1"), ("b", "2")]`; `"{}"` → `[]`.
pub(crate) fn parse_mapping(preview: &str) -> Option<Vec<(String, String)>> {
    let body = strip_brackets(preview.trim(), '{', '}')?;
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut pairs = Vec::new();
    for entry in split_top_level(body, ',')? {
        let halves = split_top_level(entry, ':')?;
        let [key, value] = halves.as_slice() else {
            return None;
        };
        pairs.push((clean_token(key), clean_token(value)));
    }
    Some(pairs)
}

/// Parse a braced set preview into element tokens.
///
/// `"{1, 2}"` → `["1", "2"]`; the empty-set repr `"set()"` → `[]`.
pub(crate) fn parse_set(preview: &str) -> Option<Vec<String>> {
    let trimmed = preview.trim();
    if trimmed == "set()" || trimmed == "frozenset()" {
        return Some(Vec::new());
    }
    parse_elements(strip_brackets(trimmed, '{', '}')?)
}

fn parse_elements(body: &str) -> Option<Vec<String>> {
    if body.trim().is_empty() {
        return Some(Vec::new());
    }
    let parts = split_top_level(body, ',')?;
    Some(parts.iter().map(|part| clean_token(part)).collect())
}

/// Strip one enclosing bracket pair, or `None` if the text is not enclosed.
fn strip_brackets(text: &str, open: char, close: char) -> Option<&str> {
    text.strip_prefix(open)?.strip_suffix(close)
}

/// Split `body` on `sep` at nesting depth zero, outside quoted tokens.
///
/// Returns `None` on unbalanced brackets or an unterminated quote, which
/// signals a malformed preview to the caller.
fn split_top_level(body: &str, sep: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0usize;

    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.checked_sub(1)?,
            c if c == sep && depth == 0 => {
                parts.push(&body[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if quote.is_some() || depth != 0 {
        return None;
    }
    parts.push(&body[start..]);
    Some(parts)
}

/// Trim a raw element and normalize the quoting convention: a token wrapped
/// in matching single or double quotes loses the quotes.
fn clean_token(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 {
            if let Some(inner) = trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return inner.to_owned();
            }
        }
    }
    trimmed.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_of_numbers() {
        assert_eq!(
            parse_sequence("[1, 2, 3]"),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(parse_sequence("[]"), Some(vec![]));
    }

    #[test]
    fn tuple_shape_is_accepted() {
        assert_eq!(
            parse_sequence("(1, 2)"),
            Some(vec!["1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn quoted_tokens_lose_their_quotes() {
        assert_eq!(
            parse_sequence("['a', \"b\"]"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn nested_brackets_stay_inside_one_token() {
        assert_eq!(
            parse_sequence("[1, [2, 3], 4]"),
            Some(vec!["1".to_string(), "[2, 3]".to_string(), "4".to_string()])
        );
    }

    #[test]
    fn commas_inside_quotes_do_not_split() {
        assert_eq!(
            parse_sequence("['a, b', 'c']"),
            Some(vec!["a, b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn unterminated_sequence_is_malformed() {
        assert_eq!(parse_sequence("[1, 2"), None);
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        assert_eq!(parse_sequence("['a, 2]"), None);
    }

    #[test]
    fn mapping_pairs_in_order() {
        assert_eq!(
            parse_mapping("{'a': 1, 'b': 2}"),
            Some(vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ])
        );
    }

    #[test]
    fn empty_mapping() {
        assert_eq!(parse_mapping("{}"), Some(vec![]));
    }

    #[test]
    fn mapping_with_nested_value() {
        assert_eq!(
            parse_mapping("{'xs': [1, 2], 'n': 3}"),
            Some(vec![
                ("xs".to_string(), "[1, 2]".to_string()),
                ("n".to_string(), "3".to_string()),
            ])
        );
    }

    #[test]
    fn mapping_key_containing_colon() {
        assert_eq!(
            parse_mapping("{'a:b': 1}"),
            Some(vec![("a:b".to_string(), "1".to_string())])
        );
    }

    #[test]
    fn mapping_entry_without_colon_is_malformed() {
        assert_eq!(parse_mapping("{'a'}"), None);
    }

    #[test]
    fn set_tokens() {
        assert_eq!(
            parse_set("{1, 2, 3}"),
            Some(vec!["1".to_string(), "2".to_string(), "3".to_string()])
        );
    }

    #[test]
    fn empty_set_repr() {
        assert_eq!(parse_set("set()"), Some(vec![]));
        assert_eq!(parse_set("frozenset()"), Some(vec![]));
    }

    #[test]
    fn double_quoted_set_tokens() {
        assert_eq!(
            parse_set("{\"x\", \"y\"}"),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }
}
