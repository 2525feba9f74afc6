//! # Rendering
//!
//! Everything the CLI prints goes through here. Decoration (bold title, rule,
//! dimmed style line) is only applied when stdout is a terminal; piped output
//! is the bare content so `hashpad show | ...` round-trips cleanly.

use console::{style, Term};
use hashpadapp::document::DocumentState;
use serde::Serialize;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const MIN_RULE_WIDTH: usize = 3;
const RULE_CHAR: &str = "─";

/// JSON shape printed by `decode --json`.
#[derive(Debug, Serialize)]
pub struct DecodedView<'a> {
    pub content: &'a str,
    pub style: &'a str,
    pub docid: Option<&'a str>,
    pub title: String,
}

pub fn print_address(address: &str) {
    println!("{}", address);
}

pub fn print_opened(title: &str, address: &str) {
    println!("{} {}", style("Opened").green(), style(title).bold());
    println!("{}", address);
}

pub fn print_exported(path: &Path) {
    println!("Exported to {}", path.display());
}

pub fn print_document(title: &str, content: &str, doc_style: Option<&str>) {
    if Term::stdout().is_term() {
        print!("{}", document_view(title, content, doc_style));
    } else {
        print!("{}", content);
        if let Some(doc_style) = doc_style {
            println!();
            println!("{}", doc_style);
        }
    }
}

/// Decorated document for terminal display.
pub fn document_view(title: &str, content: &str, doc_style: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style(title).bold()));
    out.push_str(&format!("{}\n", style(rule(title)).dim()));
    out.push_str(content);
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    if let Some(doc_style) = doc_style {
        out.push_str(&format!("{}\n", style(rule(title)).dim()));
        let shown = if doc_style.is_empty() { "(no style)" } else { doc_style };
        out.push_str(&format!("{}\n", style(shown).dim()));
    }
    out
}

/// Horizontal rule as wide as `title` renders.
fn rule(title: &str) -> String {
    RULE_CHAR.repeat(title.width().max(MIN_RULE_WIDTH))
}

pub fn decoded_json(state: &DocumentState, docid: &str) -> serde_json::Result<String> {
    let view = DecodedView {
        content: &state.content,
        style: &state.style,
        docid: (!docid.is_empty()).then_some(docid),
        title: state.title(""),
    };
    serde_json::to_string_pretty(&view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_matches_display_width() {
        assert_eq!(rule("Hello"), "─────");
        assert_eq!(rule("日本"), "────");
        assert_eq!(rule(""), "───");
    }

    #[test]
    fn test_document_view_layout() {
        console::set_colors_enabled(false);
        let view = document_view("Plan", "# Plan\nstep", None);
        assert_eq!(view, "Plan\n────\n# Plan\nstep\n");
    }

    #[test]
    fn test_document_view_with_style() {
        console::set_colors_enabled(false);
        let view = document_view("Untitled", "text\n", Some(""));
        assert!(view.ends_with("(no style)\n"));
        let view = document_view("Untitled", "text\n", Some("color:red"));
        assert!(view.ends_with("color:red\n"));
    }

    #[test]
    fn test_decoded_json() {
        let state = DocumentState::new("# Hi\nthere", "color:red");
        let json = decoded_json(&state, "0123456789abcdef").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["content"], "# Hi\nthere");
        assert_eq!(value["style"], "color:red");
        assert_eq!(value["docid"], "0123456789abcdef");
        assert_eq!(value["title"], "Hi");

        let json = decoded_json(&DocumentState::new("plain", ""), "").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["docid"].is_null());
        assert_eq!(value["title"], "");
    }
}
