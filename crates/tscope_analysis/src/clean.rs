//! HTML stripping and whitespace normalization for fetched text.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

/// Elements whose text never counts as visible content.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "iframe"];

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x1F\x7F]").unwrap();
}

/// Visible text of an HTML document, text nodes trimmed and joined by single spaces.
pub fn clean_html(raw_html: &str) -> String {
    let document = Html::parse_document(raw_html);

    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| HIDDEN_TAGS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse whitespace runs and drop control characters.
pub fn normalize_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    CONTROL_CHARS.replace_all(&collapsed, "").trim().to_string()
}

pub fn clean_article_text(html: &str) -> String {
    normalize_text(&clean_html(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_drops_hidden_elements() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style><script>var x = 1;</script></head>
              <body>
                <h1>Headline</h1>
                <noscript>Enable JavaScript</noscript>
                <p>First   paragraph.</p>
                <iframe src="https://ads.example.com">ad</iframe>
                <p>Second &amp; last.</p>
              </body>
            </html>
        "#;
        assert_eq!(clean_html(html), "Headline First   paragraph. Second & last.");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  a\n\n b\t c  "), "a b c");
        assert_eq!(normalize_text("bell\u{7}ring\u{7f}"), "bellring");
    }

    #[test]
    fn test_clean_article_text_plain_input() {
        assert_eq!(clean_article_text("Just   some text"), "Just some text");
        assert_eq!(clean_article_text(""), "");
    }

    #[test]
    fn test_clean_html_tolerates_broken_markup() {
        let text = clean_article_text("<div><p>Unclosed <b>bold<p>Next");
        assert_eq!(text, "Unclosed bold Next");
    }
}
