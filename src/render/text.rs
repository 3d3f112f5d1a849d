use super::create_file;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const COLUMN_GAP: &str = "  ";

/// Widest value of each column, in chars. Must see every row of a section
/// before the first one is written.
pub fn column_widths<'a, I>(rows: I) -> [usize; 4]
where
    I: IntoIterator<Item = [&'a str; 4]>,
{
    let mut widths = [0usize; 4];
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }
    widths
}

pub struct TextDocument {
    out: BufWriter<File>,
    sections: usize,
}

impl TextDocument {
    pub fn open(path: &Path, name: &str) -> Result<Self> {
        let mut out = create_file(path)?;
        if !name.is_empty() {
            writeln!(out, "{name}")?;
            writeln!(out, "{}", "=".repeat(name.chars().count()))?;
            writeln!(out)?;
        }
        Ok(Self { out, sections: 0 })
    }

    pub fn section(&mut self, label: &str) -> Result<()> {
        if self.sections > 0 {
            writeln!(self.out)?;
        }
        self.sections += 1;
        writeln!(self.out, "{label}")?;
        writeln!(self.out, "{}", "-".repeat(label.chars().count()))?;
        Ok(())
    }

    pub fn table(&mut self, widths: [usize; 4]) -> TextTable<'_> {
        TextTable {
            out: &mut self.out,
            widths,
        }
    }

    pub fn close(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub struct TextTable<'a> {
    out: &'a mut BufWriter<File>,
    widths: [usize; 4],
}

impl TextTable<'_> {
    /// Pads every column up to the last non-empty one, which is written
    /// as is, so a line never ends in padding.
    pub fn row(&mut self, columns: [&str; 4]) -> Result<()> {
        let last = columns.iter().rposition(|v| !v.is_empty()).unwrap_or(0);
        let line = columns
            .iter()
            .zip(self.widths)
            .take(last + 1)
            .enumerate()
            .map(|(index, (value, width))| {
                if index == last {
                    value.to_string()
                } else {
                    format!("{value:<width$}")
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Text tables carry no closing markup; this only flushes.
    pub fn finish(self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
