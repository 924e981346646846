//! Input sanitization for untrusted string fields.
//!
//! Every inbound string field passes through [`clean`] before it is stored:
//! surrounding whitespace is trimmed, markup tags are stripped, and the
//! characters meaningful to HTML output are escaped. The result is safe to
//! echo back in any JSON/HTML context.
//!
//! `clean` is idempotent: running it over already-cleaned text is a no-op.
//! The `&` escape is entity-aware for exactly that reason.

/// Entities that a previous [`clean`] pass may have produced. An `&` that
/// starts one of these is left alone instead of being re-escaped.
const KNOWN_ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"];

/// Normalize one untrusted string: trim, strip tags, escape HTML-significant
/// characters.
pub fn clean(input: &str) -> String {
    let stripped = strip_tags(input.trim());
    escape(stripped.trim())
}

/// Remove `<...>` tag runs. An unterminated `<` swallows the rest of the
/// string, matching how the original markup stripper behaved.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => out.push(ch),
        }
    }
    out
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '&' => {
                if let Some(entity) = KNOWN_ENTITIES.iter().find(|e| rest.starts_with(**e)) {
                    out.push_str(entity);
                    rest = &rest[entity.len()..];
                    continue;
                }
                out.push_str("&amp;");
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean("  Alice  "), "Alice");
    }

    #[test]
    fn strips_markup_tags() {
        assert_eq!(clean("<b>Alice</b>"), "Alice");
        assert_eq!(clean("a <script>x</script> b"), "a x b");
    }

    #[test]
    fn unterminated_tag_swallows_rest() {
        assert_eq!(clean("Alice <b"), "Alice");
    }

    #[test]
    fn escapes_html_significant_characters() {
        assert_eq!(clean("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(clean("O'Brien"), "O&#39;Brien");
        assert_eq!(clean(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn stray_closing_bracket_is_escaped() {
        assert_eq!(clean("a > b"), "a &gt; b");
    }

    #[test]
    fn already_clean_text_is_unchanged() {
        let once = clean("Tom & Jerry <i>again</i>");
        assert_eq!(clean(&once), once);
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(s in ".*") {
            let once = clean(&s);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_never_leaves_raw_markup(s in ".*") {
            let once = clean(&s);
            prop_assert!(!once.contains('<'));
        }
    }
}
