//! Body markup normalization
//!
//! One pass over the article HTML produces both the plain text used by the
//! text-based criteria and an [`Outline`] of the structural elements used by
//! the markup-based ones. Noise containers (scripts, navigation, forms,
//! modals) are skipped entirely.

use scraper::{ElementRef, Html, Node};

/// Containers that never contribute text or structure
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "header", "footer", "nav", "aside", "form",
];

/// Elements whose boundaries separate words in the derived text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "caption", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main", "ol", "p",
    "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// What a text block in the outline came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
    Term,
}

/// A text-bearing element, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    /// Whether the block reads as a question
    pub fn is_question(&self) -> bool {
        self.text.trim_end().ends_with('?')
    }
}

/// A `ul`/`ol` element and its number of direct `li` children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListInfo {
    pub items: usize,
}

/// A `table` element and its number of rows holding `td` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    pub data_rows: usize,
}

/// Structural summary of an article body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub blocks: Vec<Block>,
    pub lists: Vec<ListInfo>,
    pub tables: Vec<TableInfo>,
    /// Raw `href` values of all anchors
    pub links: Vec<String>,
    /// A JSON-LD block declaring a FAQPage
    pub has_faq_schema: bool,
}

impl Outline {
    /// Heading levels and texts, in document order
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks
            .iter()
            .filter_map(|b| b.heading_level().map(|level| (level, b.text.as_str())))
    }

    /// Non-empty paragraph texts, in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph && !b.text.is_empty())
            .map(|b| b.text.as_str())
    }
}

/// Result of normalizing one body
#[derive(Debug, Clone, Default)]
pub struct ParsedBody {
    pub text: String,
    pub outline: Outline,
}

/// Parse body markup into plain text and outline
pub fn parse_body(html: &str) -> ParsedBody {
    if html.trim().is_empty() {
        return ParsedBody::default();
    }

    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    let mut raw = String::new();
    collect_text(root, &mut raw);

    let mut outline = Outline::default();
    walk(root, &mut outline);

    ParsedBody {
        text: collapse_whitespace(&raw),
        outline,
    }
}

/// Plain text of an HTML snippet (entities decoded, whitespace collapsed).
///
/// Safe for strings that contain no markup at all.
pub fn html_to_text(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return collapse_whitespace(html);
    }
    let fragment = Html::parse_fragment(html);
    let mut raw = String::new();
    collect_text(fragment.root_element(), &mut raw);
    collapse_whitespace(&raw)
}

/// Visible text of an element subtree, whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    collapse_whitespace(&raw)
}

/// Collapse every whitespace run to a single space and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_noise(element: ElementRef<'_>) -> bool {
    let el = element.value();
    NOISE_TAGS.contains(&el.name())
        || el
            .attr("aria-modal")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Pending work of the text traversal
enum Step<'a> {
    Children(ElementRef<'a>),
    Text(&'a str),
    Space,
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let mut stack = vec![Step::Children(element)];
    while let Some(step) = stack.pop() {
        let parent = match step {
            Step::Text(text) => {
                out.push_str(text);
                continue;
            }
            Step::Space => {
                out.push(' ');
                continue;
            }
            Step::Children(parent) => parent,
        };

        for child in parent.children().rev() {
            match child.value() {
                Node::Text(text) => stack.push(Step::Text(text)),
                Node::Element(_) => {
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if is_noise(child_el) {
                        continue;
                    }
                    let block = BLOCK_TAGS.contains(&child_el.value().name());
                    if block {
                        stack.push(Step::Space);
                    }
                    stack.push(Step::Children(child_el));
                    if block {
                        stack.push(Step::Space);
                    }
                }
                _ => {}
            }
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Pre-order walk below `root`, filling the outline
fn walk(root: ElementRef<'_>, outline: &mut Outline) {
    let mut stack: Vec<ElementRef<'_>> = root
        .children()
        .rev()
        .filter_map(ElementRef::wrap)
        .collect();

    while let Some(element) = stack.pop() {
        let el = element.value();
        let name = el.name();

        if name == "script" {
            let is_json_ld = el
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("application/ld+json"));
            if is_json_ld && element.text().any(|t| t.contains("FAQPage")) {
                outline.has_faq_schema = true;
            }
            continue;
        }
        if is_noise(element) {
            continue;
        }

        if let Some(level) = heading_level(name) {
            push_block(outline, BlockKind::Heading(level), element);
        }

        match name {
            "p" => push_block(outline, BlockKind::Paragraph, element),
            "li" => push_block(outline, BlockKind::ListItem, element),
            "dt" => push_block(outline, BlockKind::Term, element),
            "ul" | "ol" => {
                let items = element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|c| c.value().name() == "li")
                    .count();
                outline.lists.push(ListInfo { items });
            }
            "table" => outline.tables.push(TableInfo {
                data_rows: count_data_rows(element),
            }),
            "a" => {
                if let Some(href) = el.attr("href") {
                    let href = href.trim();
                    if !href.is_empty() {
                        outline.links.push(href.to_string());
                    }
                }
            }
            _ => {}
        }

        stack.extend(element.children().rev().filter_map(ElementRef::wrap));
    }
}

fn push_block(outline: &mut Outline, kind: BlockKind, element: ElementRef<'_>) {
    outline.blocks.push(Block {
        kind,
        text: element_text(element),
    });
}

/// Rows of this table (not of nested tables) that hold at least one `td`
fn count_data_rows(table: ElementRef<'_>) -> usize {
    let mut rows = 0;
    let mut stack = vec![table];
    while let Some(element) = stack.pop() {
        for child in element.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "table" => {}
                "tr" => {
                    let has_td = child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .any(|cell| cell.value().name() == "td");
                    if has_td {
                        rows += 1;
                    }
                }
                _ => stack.push(child),
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let parsed = parse_body("   ");
        assert!(parsed.text.is_empty());
        assert_eq!(parsed.outline, Outline::default());
    }

    #[test]
    fn test_text_skips_noise_and_separates_blocks() {
        let parsed = parse_body(
            "<nav>Menu Home</nav><h2>Title</h2><p>First<br>line with <a href=\"/x\">link</a>.</p>\
             <script>var x = 1;</script><footer>Copyright</footer><p>Second</p>",
        );
        assert_eq!(parsed.text, "Title First line with link. Second");
        assert!(!parsed.text.contains('<'));
    }

    #[test]
    fn test_entities_are_decoded() {
        let parsed = parse_body("<p>Salt &amp; pepper&nbsp;mix</p>");
        assert_eq!(parsed.text, "Salt & pepper mix");
    }

    #[test]
    fn test_aria_modal_removed() {
        let parsed = parse_body("<div aria-modal=\"true\"><p>Accept cookies</p></div><p>Body</p>");
        assert_eq!(parsed.text, "Body");
        assert_eq!(parsed.outline.paragraphs().count(), 1);
    }

    #[test]
    fn test_outline_structure() {
        let parsed = parse_body(
            r#"<h2>One</h2><h3>Two?</h3>
            <ul><li>a</li><li>b <ol><li>nested</li></ol></li></ul>
            <table><thead><tr><th>k</th></tr></thead><tbody><tr><td>v</td></tr><tr><td>w</td></tr></tbody></table>
            <dl><dt>Term?</dt><dd>Def</dd></dl>
            <a href=" https://example.org/ ">ext</a><a>no href</a>"#,
        );
        let outline = parsed.outline;

        let headings: Vec<_> = outline.headings().collect();
        assert_eq!(headings, vec![(2, "One"), (3, "Two?")]);
        assert_eq!(
            outline.lists,
            vec![ListInfo { items: 2 }, ListInfo { items: 1 }]
        );
        assert_eq!(outline.tables, vec![TableInfo { data_rows: 2 }]);
        assert_eq!(outline.links, vec!["https://example.org/".to_string()]);
        assert!(outline
            .blocks
            .iter()
            .any(|b| b.kind == BlockKind::Term && b.is_question()));
    }

    #[test]
    fn test_faq_schema_detected() {
        let parsed = parse_body(
            r#"<script type="application/ld+json">{"@type":"FAQPage"}</script><p>Body</p>"#,
        );
        assert!(parsed.outline.has_faq_schema);
        assert_eq!(parsed.text, "Body");
    }

    #[test]
    fn test_deeply_nested_markup_on_small_stack() {
        let depth = 20_000;
        let html = format!(
            "{}<p>deep</p>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let parsed = std::thread::Builder::new()
            .stack_size(512 * 1024)
            .spawn(move || parse_body(&html))
            .expect("spawn parser thread")
            .join()
            .expect("parser thread finished");
        assert_eq!(parsed.text, "deep");
        assert_eq!(parsed.outline.paragraphs().collect::<Vec<_>>(), vec!["deep"]);
    }

    #[test]
    fn test_html_to_text_plain_passthrough() {
        assert_eq!(html_to_text("  plain   title "), "plain title");
        assert_eq!(html_to_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(html_to_text("<em>Rich</em> title"), "Rich title");
    }
}
