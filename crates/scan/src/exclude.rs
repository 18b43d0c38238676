// ABOUTME: Exclusion filter separating boilerplate markup from narrative content.
// ABOUTME: Matches structural tags and hyphen-split class keyword parts, case-insensitively.

use scraper::ElementRef;

/// Structural and non-content tags whose subtrees are never classified,
/// claimed, or spoken.
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "link", "meta", "style", "noscript", "br", "hr", "source", "param", "track",
    "input", "nav", "footer", "button", "header", "time", "form",
];

/// Class-name parts that flag an element as boilerplate (bylines, dates,
/// print/mobile chrome) rather than readable prose.
pub const EXCLUDED_KEYWORDS: &[&str] =
    &["mobile", "name", "date", "print", "time", "tinytime", "author"];

/// Whether `tag` is in the excluded tag set. Tag names from the parser are
/// already lowercase, but the comparison stays case-insensitive for callers
/// handing in raw strings.
pub fn is_excluded_tag(tag: &str) -> bool {
    EXCLUDED_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
}

/// Whether a single class attribute value matches the excluded keyword set,
/// either as a whole or through any of its hyphen-separated parts.
fn class_has_excluded_keyword(class: &str) -> bool {
    class
        .split('-')
        .any(|part| EXCLUDED_KEYWORDS.iter().any(|kw| part.eq_ignore_ascii_case(kw)))
}

/// The exclusion predicate gating classification, content claiming, and
/// text extraction. Evaluated fresh per node; it is cheap and class lists
/// vary across elements.
pub fn is_excluded(element: &ElementRef) -> bool {
    if is_excluded_tag(element.value().name()) {
        return true;
    }
    element.value().classes().any(class_has_excluded_keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn excluded_tags_match() {
        let doc = Html::parse_document("<body><nav>menu</nav><p>text</p></body>");
        assert!(is_excluded(&first(&doc, "nav")));
        assert!(!is_excluded(&first(&doc, "p")));
    }

    #[test]
    fn excluded_keyword_standalone_class() {
        let doc = Html::parse_document(r#"<body><span class="date">today</span></body>"#);
        assert!(is_excluded(&first(&doc, "span")));
    }

    #[test]
    fn excluded_keyword_in_hyphen_part() {
        let doc = Html::parse_document(r#"<body><div class="post-date">today</div></body>"#);
        assert!(is_excluded(&first(&doc, "div")));
    }

    #[test]
    fn keyword_must_match_whole_part() {
        // "dateline" contains "date" as a substring but not as a hyphen part
        let doc = Html::parse_document(r#"<body><div class="dateline">x</div></body>"#);
        assert!(!is_excluded(&first(&doc, "div")));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let doc = Html::parse_document(r#"<body><div class="Print-btn">x</div></body>"#);
        assert!(is_excluded(&first(&doc, "div")));
    }

    #[test]
    fn plain_content_classes_pass() {
        let doc = Html::parse_document(r#"<body><div class="article-body">x</div></body>"#);
        assert!(!is_excluded(&first(&doc, "div")));
    }
}
