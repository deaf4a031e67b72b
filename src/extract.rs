use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

/// Elements whose text is never part of the readable page.
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements that start a new line. Everything else is inline and joins
/// the surrounding text.
const BLOCK_ELEMENTS: [&str; 33] = [
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Readable text of a saved HTML page, for pasting into the text field
/// when the service cannot fetch the URL itself.
pub fn extract_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body = document
        .select(&BODY_SELECTOR)
        .next()
        .ok_or_else(|| AppError::ParseError("No <body> tag found in the HTML".to_string()))?;

    let mut raw = String::with_capacity(html.len() / 2);
    collect_text(body, &mut raw);

    let formatted = format_text(&raw);
    if formatted.is_empty() {
        return Err(AppError::ParseError("The page body contains no text".to_string()));
    }
    Ok(formatted)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            // Source line breaks inside a text node are layout, not content.
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if SKIPPED_ELEMENTS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push('\n');
        }
        collect_text(child, out);
        if block {
            out.push('\n');
        }
    }
}

/// Collapse whitespace runs within each line and drop the blank lines.
pub fn format_text(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());

    for line in raw.lines() {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(first);
        for word in words {
            result.push(' ');
            result.push_str(word);
        }
    }

    result
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;
