//! Article extraction from fetched HTML pages

use crate::models::Article;
use crate::parsers::element_text;
use scraper::{ElementRef, Html, Selector};

/// Containers tried in order for the main content
const CONTENT_SELECTORS: &[&str] = &["article", "main", "body"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// First element matching `css` inside `scope` that has visible text
fn first_with_text<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    scope
        .select(&selector(css))
        .find(|el| !element_text(*el).is_empty())
}

/// Build an article from a full HTML document fetched from `url`.
///
/// - content: first non-empty `article`, then `main`, then `body`, else the
///   whole document
/// - title: first `h1` in the content, then any `h1`, then `<title>`, then
///   the URL itself
/// - meta description: `meta[name=description]`
pub fn extract_page(url: &str, html: &str) -> Article {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let content = CONTENT_SELECTORS
        .iter()
        .find_map(|css| first_with_text(root, css));
    let content_html = content.map(|el| el.html()).unwrap_or_else(|| root.html());

    let title = content
        .and_then(|el| first_with_text(el, "h1"))
        .or_else(|| first_with_text(root, "h1"))
        .or_else(|| first_with_text(root, "title"))
        .map(element_text)
        .unwrap_or_else(|| url.to_string());

    let meta = root
        .select(&selector("meta[name=\"description\"]"))
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Article::new(url, title, content_html, meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Site | Creatine</title>
    <meta name="description" content="  All about creatine dosing.  ">
</head>
<body>
    <header><h1>Site name</h1><nav>Home Blog</nav></header>
    <article>
        <h1>Creatine dosing</h1>
        <p>Creatine is a compound.</p>
        <h2>Dose</h2>
    </article>
    <footer>Copyright</footer>
</body>
</html>"#;

    #[test]
    fn test_extracts_article_content() {
        let article = extract_page("https://blog.example.com/creatine", PAGE);
        assert_eq!(article.title(), "Creatine dosing");
        assert_eq!(article.meta_description(), Some("All about creatine dosing."));
        assert_eq!(article.body_text(), "Creatine dosing Creatine is a compound. Dose");
        assert!(article.body_html().starts_with("<article>"));
    }

    #[test]
    fn test_falls_back_to_main_then_body() {
        let main = extract_page(
            "https://x.example/",
            "<html><body><main><p>Main text</p></main><p>Outside</p></body></html>",
        );
        assert_eq!(main.body_text(), "Main text");

        let body = extract_page("https://x.example/", "<html><body><p>Only body</p></body></html>");
        assert_eq!(body.body_text(), "Only body");
    }

    #[test]
    fn test_empty_article_is_skipped_for_main() {
        let article = extract_page(
            "https://x.example/",
            "<html><body><article> </article><main><p>Real</p></main></body></html>",
        );
        assert_eq!(article.body_text(), "Real");
    }

    #[test]
    fn test_title_fallbacks() {
        let global_h1 = extract_page(
            "https://x.example/",
            "<html><body><div><h1>Outer</h1></div><article><p>x</p></article></body></html>",
        );
        assert_eq!(global_h1.title(), "Outer");

        let title_tag = extract_page(
            "https://x.example/",
            "<html><head><title> Page title </title></head><body><p>x</p></body></html>",
        );
        assert_eq!(title_tag.title(), "Page title");

        let bare = extract_page("https://x.example/bare", "<p>x</p>");
        assert_eq!(bare.title(), "https://x.example/bare");
        assert_eq!(bare.meta_description(), None);
    }
}
