//! Report documents.
//!
//! Both backends write as sections and rows are appended. A table is a scoped
//! writer: `finish()` writes its closing markup, and dropping an unfinished
//! table or unclosed document finalizes it on a best-effort basis.

pub mod html;
pub mod text;

pub use html::{HtmlDocument, HtmlTable};
pub use text::{column_widths, TextDocument, TextTable};

use std::fs;
use std::io;
use std::path::Path;

/// One renderable table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Link { text: String, href: String },
    Group { items: Vec<Cell>, tag: Option<&'static str> },
}

impl Cell {
    pub fn item(text: impl Into<String>, link: Option<String>) -> Self {
        match link {
            Some(href) => Cell::Link {
                text: text.into(),
                href,
            },
            None => Cell::Text(text.into()),
        }
    }

    pub fn group(items: Vec<Cell>, tag: Option<&'static str>) -> Self {
        Cell::Group { items, tag }
    }

    pub fn render_html(&self, out: &mut String) {
        match self {
            Cell::Text(text) => out.push_str(&escape_html(text)),
            Cell::Link { text, href } => {
                out.push_str("<a href=\"");
                out.push_str(&escape_html(href));
                out.push_str("\">");
                out.push_str(&escape_html(text));
                out.push_str("</a>");
            }
            Cell::Group { items, tag } => {
                if let Some(tag) = tag {
                    out.push_str(&format!("<{tag}>"));
                }
                for item in items {
                    item.render_html(out);
                }
                if let Some(tag) = tag {
                    out.push_str(&format!("</{tag}>"));
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn create_file(path: &Path) -> io::Result<io::BufWriter<fs::File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(io::BufWriter::new(fs::File::create(path)?))
}
