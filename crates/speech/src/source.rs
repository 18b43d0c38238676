// ABOUTME: Bridges scanned regions to the player: extraction at speak time.
// ABOUTME: DocumentRegion borrows the parsed document and resolves text on demand.

use scraper::Html;

use readaloud_scan::Region;

use crate::control::TextSource;

/// A TextSource backed by a claimed region of a live document. Extraction
/// runs when the player asks, against whatever the region owns.
pub struct DocumentRegion<'doc> {
    doc: &'doc Html,
    region: Region,
}

impl<'doc> DocumentRegion<'doc> {
    pub fn new(doc: &'doc Html, region: Region) -> Self {
        Self { doc, region }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }
}

impl TextSource for DocumentRegion<'_> {
    fn title_text(&self) -> String {
        self.region.title_text(self.doc)
    }

    fn content_text(&self) -> Option<String> {
        self.region.content_text(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readaloud_scan::Scanner;

    #[test]
    fn region_source_extracts_on_demand() {
        let doc = Html::parse_document(
            r#"<body><h2 class="title">Intro</h2><p>Hello &amp; welcome.</p></body>"#,
        );
        let result = Scanner::builder().build().scan(&doc);
        let source = DocumentRegion::new(&doc, result.regions()[0]);

        assert_eq!(source.title_text(), "Intro");
        assert_eq!(source.content_text().unwrap(), "Hello & welcome.");
    }
}
