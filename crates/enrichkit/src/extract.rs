//! Streaming HTML-to-text extraction
//!
//! Walks the markup as a flat stream of tags and text. No DOM is built and
//! tag nesting is not validated, which keeps the pass allocation-light and
//! tolerant of the malformed HTML real article pages serve.

/// Tags whose content is never article text.
const SUPPRESS_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "noscript",
];

/// Block-level tags that terminate a line of text.
const BREAK_TAGS: &[&str] = &["p", "br", "div", "h1", "h2", "h3", "h4", "li"];

/// Extract readable plain text from an HTML document or fragment.
///
/// When the input contains an `<article>` element, only the first such
/// region is processed. Content inside [`SUPPRESS_TAGS`] is dropped, closing
/// [`BREAK_TAGS`] become newlines, and whitespace is collapsed. Pathological
/// input yields an empty string, never an error.
pub fn extract_readable_text(html: &str) -> String {
    let fragment = article_region(html).unwrap_or(html);

    let mut output = String::new();
    let mut suppressed = false;
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '<' {
            let mut tag = String::new();
            while let Some(&next) = chars.peek() {
                if next == '>' {
                    chars.next();
                    break;
                }
                tag.push(chars.next().unwrap());
            }

            let tag_lower = tag.to_ascii_lowercase();
            let is_closing = tag_lower.starts_with('/');
            let name = if is_closing {
                tag_lower[1..].split_whitespace().next().unwrap_or("")
            } else {
                tag_lower.split_whitespace().next().unwrap_or("")
            };
            let name = name.trim_end_matches('/');

            // Single flag, not a depth counter: closing any suppress tag
            // clears suppression even when such tags are nested.
            if SUPPRESS_TAGS.contains(&name) {
                suppressed = !is_closing;
            }

            // Line breaks are emitted regardless of the suppression flag.
            if BREAK_TAGS.contains(&name) && (is_closing || name == "br") {
                output.push('\n');
            }
        } else if !suppressed {
            output.push(c);
        }
    }

    collapse_whitespace(&output)
}

/// Locate the body of the first `<article>` element, case-insensitively.
fn article_region(html: &str) -> Option<&str> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<article")?;
    let body_start = lower[open..].find('>').map(|i| open + i + 1)?;
    let close = lower[body_start..].find("</article").map(|i| body_start + i)?;
    Some(&html[body_start..close])
}

/// Collapse runs of spaces/tabs to one space, runs of three or more
/// newlines to exactly two, and trim the result.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space_run = false;
    let mut newlines = 0;

    for c in raw.chars() {
        match c {
            ' ' | '\t' => {
                if !in_space_run {
                    out.push(' ');
                    in_space_run = true;
                }
                newlines = 0;
            }
            '\n' => {
                newlines += 1;
                in_space_run = false;
                if newlines <= 2 {
                    out.push('\n');
                }
            }
            _ => {
                in_space_run = false;
                newlines = 0;
                out.push(c);
            }
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_script_stripped() {
        let html =
            "<article><p>Hello</p><script>ignored</script><p>World</p></article>";
        let text = extract_readable_text(html);
        assert!(text.contains("Hello"));
        assert!(text.contains("World"));
        assert!(!text.contains("ignored"));
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn test_restricts_to_first_article_region() {
        let html = "<nav>Menu</nav>Outside<article><p>Inside</p></article>Trailing";
        let text = extract_readable_text(html);
        assert_eq!(text, "Inside");
    }

    #[test]
    fn test_whole_input_without_article() {
        let html = "<div>One</div><p>Two</p>";
        assert_eq!(extract_readable_text(html), "One\nTwo");
    }

    #[test]
    fn test_article_tag_case_insensitive() {
        let html = "skip<ARTICLE><p>Body</p></ARTICLE>";
        assert_eq!(extract_readable_text(html), "Body");
    }

    #[test]
    fn test_all_suppress_tags() {
        for tag in super::SUPPRESS_TAGS {
            let html = format!("<p>keep</p><{tag}>drop</{tag}><p>also</p>");
            let text = extract_readable_text(&html);
            assert!(text.contains("keep"), "{tag}");
            assert!(text.contains("also"), "{tag}");
            assert!(!text.contains("drop"), "{tag}");
        }
    }

    #[test]
    fn test_break_on_closing_block_tags() {
        let html = "<h1>Title</h1><div>Section</div><li>Item</li>";
        assert_eq!(extract_readable_text(html), "Title\nSection\nItem");
    }

    #[test]
    fn test_br_breaks_without_closing_tag() {
        let html = "first<br>second<br/>third";
        assert_eq!(extract_readable_text(html), "first\nsecond\nthird");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let html = "<p>a  \t b</p>\n\n\n\n<p>c</p>";
        assert_eq!(extract_readable_text(html), "a b\n\nc");
    }

    #[test]
    fn test_nested_suppress_tags_clear_on_first_close() {
        // The single suppression flag clears as soon as any suppress tag
        // closes, so text between an inner close and the outer close leaks.
        let html = "<style>hidden1<script>hidden2</script>leaked</style><p>end</p>";
        let text = extract_readable_text(html);
        assert!(text.contains("leaked"));
        assert!(text.contains("end"));
        assert!(!text.contains("hidden1"));
        assert!(!text.contains("hidden2"));
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        assert_eq!(extract_readable_text("<p>unclosed"), "unclosed");
        assert_eq!(extract_readable_text("<"), "");
        assert_eq!(extract_readable_text("<p"), "");
        assert_eq!(extract_readable_text(""), "");
    }

    #[test]
    fn test_attributes_ignored() {
        let html = r#"<div class="hero" data-x="1">Text</div>"#;
        assert_eq!(extract_readable_text(html), "Text");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b  "), "a b");
        assert_eq!(collapse_whitespace("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_whitespace("a \n b"), "a \n b");
        assert_eq!(collapse_whitespace("\n\nx\n\n"), "x");
    }
}
