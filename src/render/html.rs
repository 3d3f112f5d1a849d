use super::{create_file, escape_html, Cell};
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct HtmlDocument {
    out: BufWriter<File>,
    path: PathBuf,
    closed: bool,
}

impl HtmlDocument {
    /// Writes the document head, embedding `css` as given.
    pub fn open(path: &Path, name: &str, css: &str) -> Result<Self> {
        let mut out = create_file(path)?;
        let title = escape_html(name);
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{title}</title>")?;
        write!(out, "{css}")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        if !name.is_empty() {
            writeln!(out, "<h2>{title}</h2>")?;
        }
        Ok(Self {
            out,
            path: path.to_path_buf(),
            closed: false,
        })
    }

    pub fn section(&mut self, label: &str) -> Result<()> {
        writeln!(self.out, "<h3>{}</h3>", escape_html(label))?;
        Ok(())
    }

    pub fn table(&mut self, class: &str) -> Result<HtmlTable<'_>> {
        writeln!(self.out, "<table class=\"{}\">", escape_html(class))?;
        Ok(HtmlTable {
            out: &mut self.out,
            finished: false,
        })
    }

    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        finalize(&mut self.out)
    }
}

impl Drop for HtmlDocument {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = finalize(&mut self.out) {
                warn!(path = %self.path.display(), error = %e, "Failed to finalize document");
            }
        }
    }
}

fn finalize(out: &mut BufWriter<File>) -> Result<()> {
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    out.flush()?;
    Ok(())
}

pub struct HtmlTable<'a> {
    out: &'a mut BufWriter<File>,
    finished: bool,
}

impl HtmlTable<'_> {
    /// Writes one `<tr>`; `classes` are applied per column when given.
    pub fn row(&mut self, cells: &[Cell], classes: Option<&[&str]>) -> Result<()> {
        let mut line = String::from("<tr>");
        for (index, cell) in cells.iter().enumerate() {
            match classes.and_then(|c| c.get(index)) {
                Some(class) => line.push_str(&format!("<td class=\"{}\">", escape_html(class))),
                None => line.push_str("<td>"),
            }
            cell.render_html(&mut line);
            line.push_str("</td>");
        }
        line.push_str("</tr>");
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        writeln!(self.out, "</table>")?;
        Ok(())
    }
}

impl Drop for HtmlTable<'_> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = writeln!(self.out, "</table>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_wrapped_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.html");

        let mut doc = HtmlDocument::open(&path, "proj", "<style></style>\n").unwrap();
        doc.section("a..b").unwrap();
        let mut table = doc.table("hoverTable").unwrap();
        table
            .row(
                &[
                    Cell::from("abc"),
                    Cell::item("me@x", Some("mailto:me@x".to_string())),
                    Cell::from("you@x"),
                    Cell::from("Fix <tag>"),
                ],
                Some(&["sha1", "email", "email", "title"]),
            )
            .unwrap();
        table.finish().unwrap();
        doc.close().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>proj</title>\n\
             <style></style>\n</head>\n<body>\n<h2>proj</h2>\n\
             <h3>a..b</h3>\n<table class=\"hoverTable\">\n\
             <tr><td class=\"sha1\">abc</td><td class=\"email\"><a href=\"mailto:me@x\">me@x</a></td>\
             <td class=\"email\">you@x</td><td class=\"title\">Fix &lt;tag&gt;</td></tr>\n\
             </table>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn row_without_classes_uses_bare_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.html");

        let mut doc = HtmlDocument::open(&path, "", "").unwrap();
        let mut table = doc.table("t").unwrap();
        table.row(&[Cell::from("a"), Cell::from("b")], None).unwrap();
        table.finish().unwrap();
        doc.close().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<tr><td>a</td><td>b</td></tr>\n"));
        assert!(!content.contains("<h2>"));
    }

    #[test]
    fn dropped_writers_still_close_markup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.html");

        {
            let mut doc = HtmlDocument::open(&path, "", "").unwrap();
            doc.section("HEAD").unwrap();
            let _table = doc.table("hoverTable").unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("<h3>HEAD</h3>\n<table class=\"hoverTable\">\n</table>\n</body>\n</html>\n"));
    }
}
