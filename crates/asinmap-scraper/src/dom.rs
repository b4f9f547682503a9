//! Thin capability wrapper over the HTML parser.
//!
//! The matching pipeline only ever needs four things from a document:
//! find-all, find-first, attribute access, and concatenated inner text
//! (plus raw script contents). Everything else the parser offers stays
//! behind this boundary so the pipeline never touches concrete node types.

use scraper::{ElementRef, Html, Selector};

/// A parsed remote page. Dropped at the end of the owning row's processing
/// scope; nothing retains parsed documents across rows.
pub struct Page {
    html: Html,
}

/// An element handle borrowed from a [`Page`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl Page {
    /// Parses a document. An empty or garbage body parses to a page on
    /// which every lookup misses, which is how fetch failures degrade to
    /// "no match" downstream.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    #[must_use]
    pub fn find_all(&self, css: &str) -> Vec<Node<'_>> {
        self.html
            .select(&selector(css))
            .map(|element| Node { element })
            .collect()
    }

    #[must_use]
    pub fn find_first(&self, css: &str) -> Option<Node<'_>> {
        self.html
            .select(&selector(css))
            .next()
            .map(|element| Node { element })
    }

    /// The text contents of every inline `<script>` block, in document
    /// order.
    #[must_use]
    pub fn script_contents(&self) -> Vec<String> {
        self.find_all("script")
            .into_iter()
            .map(|node| node.text())
            .collect()
    }
}

impl Node<'_> {
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Concatenated descendant text with markup stripped and entities
    /// already decoded by the parser.
    #[must_use]
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    #[must_use]
    pub fn find_first(&self, css: &str) -> Option<Node<'_>> {
        self.element
            .select(&selector(css))
            .next()
            .map(|element| Node { element })
    }
}

/// All selectors in this crate are static strings, so a parse failure is a
/// programming error.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}
