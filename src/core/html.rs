// src/core/html.rs
// Selector helpers over a parsed document.
// Every lookup names its selector and index so a layout change is reported
// as exactly which element went missing.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::clean_text;
use crate::error::ParseError;

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

pub fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector(css))
}

/// The `index`-th match of `css` under `scope` (document order).
pub fn nth<'a>(scope: ElementRef<'a>, css: &'static str, index: usize) -> Result<ElementRef<'a>, ParseError> {
    let sel = selector(css)?;
    scope
        .select(&sel)
        .nth(index)
        .ok_or(ParseError::ElementNotFound { selector: css, index })
}

pub fn nth_text(scope: ElementRef<'_>, css: &'static str, index: usize) -> Result<String, ParseError> {
    nth(scope, css, index).map(text_of)
}

/// Text of the first match, `None` when nothing matches.
pub fn first_text(scope: ElementRef<'_>, css: &'static str) -> Result<Option<String>, ParseError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next().map(text_of))
}

/// Attribute of the first match, `None` when nothing matches or the attribute is missing.
pub fn first_attr(scope: ElementRef<'_>, css: &'static str, attr: &str) -> Result<Option<String>, ParseError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next().and_then(|el| el.value().attr(attr)).map(String::from))
}

pub fn text_of(el: ElementRef<'_>) -> String {
    clean_text(el.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><head><link rel="canonical" href="https://example.com/x"></head>
        <body>
          <div class="card"><b> One </b></div>
          <div class="card extra">Two</div>
          <div class="card">
             Three
          </div>
        </body></html>
    "#;

    #[test]
    fn class_attribute_matches_exactly() {
        let doc = parse_document(DOC);
        let root = doc.root_element();
        assert_eq!(nth_text(root, r#"div[class="card"]"#, 0).unwrap(), "One");
        assert_eq!(nth_text(root, r#"div[class="card"]"#, 1).unwrap(), "Three");
        assert_eq!(
            nth_text(root, r#"div[class="card"]"#, 2),
            Err(ParseError::ElementNotFound { selector: r#"div[class="card"]"#, index: 2 })
        );
    }

    #[test]
    fn optional_lookups() {
        let doc = parse_document(DOC);
        let root = doc.root_element();
        assert_eq!(
            first_attr(root, r#"link[rel~="canonical"]"#, "href").unwrap().as_deref(),
            Some("https://example.com/x")
        );
        assert_eq!(first_attr(root, r#"link[rel~="canonical"]"#, "title").unwrap(), None);
        assert_eq!(first_text(root, "h1").unwrap(), None);
    }

    #[test]
    fn bad_selector_is_reported() {
        assert_eq!(selector("div[").err(), Some(ParseError::InvalidSelector("div[")));
    }
}
