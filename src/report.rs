use crate::error::Result;
use crate::git::{CommitLogExtractor, RevisionResolver, VcsQuery};
use crate::model::{
    CommitRecord, RangeLog, ReportFormat, ReviewServer, COLUMN_CLASSES, HTML_CSS, REPORT_FILES,
    SHA1_QUERY_PREFIX, TABLE_CLASS,
};
use crate::pattern::Pattern;
use crate::render::{column_widths, Cell, HtmlDocument, TextDocument};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output: PathBuf,
    /// Project name, shown as document title and used in gitiles links.
    pub name: String,
    pub format: ReportFormat,
    pub patterns: Vec<String>,
    pub server: Option<ReviewServer>,
    pub gitiles: bool,
    pub progress: bool,
}

impl ReportOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            name: String::new(),
            format: ReportFormat::default(),
            patterns: Vec::new(),
            server: None,
            gitiles: false,
            progress: false,
        }
    }
}

pub struct ReportGenerator<'a, Q: VcsQuery + ?Sized> {
    vcs: &'a Q,
    options: &'a ReportOptions,
}

impl<'a, Q: VcsQuery + ?Sized> ReportGenerator<'a, Q> {
    pub fn new(vcs: &'a Q, options: &'a ReportOptions) -> Self {
        Self { vcs, options }
    }

    /// Resolves `args`, writes every requested document and returns all
    /// extracted records in report order.
    pub fn generate<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<CommitRecord>> {
        let pattern = Pattern::build(self.options.patterns.as_slice());
        for expression in pattern.expressions() {
            debug!(%expression, "Filter expression");
        }
        let range = RevisionResolver::new(self.vcs).resolve_range(args)?;
        debug!(?range, "Resolved revision range");

        fs::create_dir_all(&self.options.output)?;
        let mut documents = Documents::open(self.options, !pattern.is_empty())?;

        let links = HtmlLinks::new(self.options);
        let extractor = CommitLogExtractor::new(self.vcs);
        let pb = self.progress();

        let records = with_spinner(&pb, |pb| {
            let mut records = Vec::new();
            for spec in range.specs() {
                let label = spec.label();
                pb.set_message(format!("Extracting {label}"));

                let log = RangeLog {
                    label,
                    records: extractor.extract_spec(&spec),
                };
                documents.render(&log, &pattern, &links)?;
                records.extend(log.records);
                pb.inc(1);
            }
            Ok(records)
        })?;

        documents.close()?;
        info!(commits = records.len(), "Report written to {}", self.options.output.display());
        Ok(records)
    }

    fn progress(&self) -> ProgressBar {
        if !self.options.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb
    }
}

/// Runs `f` under `pb` and clears the spinner whether or not `f` fails.
fn with_spinner<T>(pb: &ProgressBar, f: impl FnOnce(&ProgressBar) -> Result<T>) -> Result<T> {
    let result = f(pb);
    pb.finish_and_clear();
    result
}

/// The open documents of one run.
struct Documents {
    text: Option<TextDocument>,
    text_filtered: Option<TextDocument>,
    html: Option<HtmlDocument>,
    html_filtered: Option<HtmlDocument>,
}

impl Documents {
    fn open(options: &ReportOptions, filtered: bool) -> Result<Self> {
        let path = |file: &str| options.output.join(file);
        let name = options.name.as_str();

        let mut documents = Documents {
            text: None,
            text_filtered: None,
            html: None,
            html_filtered: None,
        };

        if options.format.wants_text() {
            documents.text = Some(TextDocument::open(&path(REPORT_FILES.report_text), name)?);
            if filtered {
                documents.text_filtered =
                    Some(TextDocument::open(&path(REPORT_FILES.filter_text), name)?);
            }
        }

        if options.format.wants_html() {
            documents.html = Some(HtmlDocument::open(
                &path(REPORT_FILES.report_html),
                name,
                HTML_CSS,
            )?);
            if filtered {
                documents.html_filtered = Some(HtmlDocument::open(
                    &path(REPORT_FILES.filter_html),
                    name,
                    HTML_CSS,
                )?);
            }
        }

        Ok(documents)
    }

    fn render(&mut self, log: &RangeLog, pattern: &Pattern, links: &HtmlLinks) -> Result<()> {
        let selected: Vec<&CommitRecord> = log
            .records
            .iter()
            .filter(|r| pattern.matches_record(r))
            .collect();
        let all: Vec<&CommitRecord> = log.records.iter().collect();

        if let Some(doc) = self.text.as_mut() {
            write_text_section(doc, &log.label, &all)?;
        }
        if let Some(doc) = self.text_filtered.as_mut() {
            write_text_section(doc, &log.label, &selected)?;
        }
        if let Some(doc) = self.html.as_mut() {
            write_html_section(doc, &log.label, &all, links)?;
        }
        if let Some(doc) = self.html_filtered.as_mut() {
            write_html_section(doc, &log.label, &selected, links)?;
        }
        Ok(())
    }

    /// Filtered documents are closed before their full counterparts.
    fn close(self) -> Result<()> {
        let Documents {
            text,
            text_filtered,
            html,
            html_filtered,
        } = self;

        if let Some(doc) = text_filtered {
            doc.close()?;
        }
        if let Some(doc) = html_filtered {
            doc.close()?;
        }
        if let Some(doc) = text {
            doc.close()?;
        }
        if let Some(doc) = html {
            doc.close()?;
        }
        Ok(())
    }
}

fn write_text_section(doc: &mut TextDocument, label: &str, records: &[&CommitRecord]) -> Result<()> {
    let widths = column_widths(records.iter().map(|r| r.columns()));

    doc.section(label)?;
    let mut table = doc.table(widths);
    for record in records {
        table.row(record.columns())?;
    }
    table.finish()
}

fn write_html_section(
    doc: &mut HtmlDocument,
    label: &str,
    records: &[&CommitRecord],
    links: &HtmlLinks,
) -> Result<()> {
    doc.section(label)?;
    let mut table = doc.table(TABLE_CLASS)?;
    for record in records {
        let cells = [
            links.sha1(&record.sha1),
            links.email(&record.author_email),
            links.email(&record.committer_email),
            Cell::from(record.subject.as_str()),
        ];
        table.row(&cells, Some(&COLUMN_CLASSES))?;
    }
    table.finish()
}

/// Hyperlinking rules for HTML cells.
struct HtmlLinks<'a> {
    server: Option<&'a ReviewServer>,
    /// Project for gitiles links, only when gitiles is enabled.
    gitiles_project: Option<&'a str>,
}

impl<'a> HtmlLinks<'a> {
    fn new(options: &'a ReportOptions) -> Self {
        let gitiles_project = Some(options.name.as_str())
            .filter(|name| options.gitiles && !name.is_empty());
        Self {
            server: options.server.as_ref(),
            gitiles_project,
        }
    }

    fn sha1(&self, sha1: &str) -> Cell {
        let Some(server) = self.server else {
            return Cell::from(sha1);
        };

        let query = server.query_url(sha1);
        match self.gitiles_project {
            Some(project) => {
                let split = sha1
                    .char_indices()
                    .nth(SHA1_QUERY_PREFIX)
                    .map_or(sha1.len(), |(index, _)| index);
                let (head, tail) = sha1.split_at(split);
                Cell::group(
                    vec![
                        Cell::item(head, Some(query)),
                        Cell::item(tail, Some(server.gitiles_url(project, sha1))),
                    ],
                    Some("pre"),
                )
            }
            None => Cell::group(vec![Cell::item(sha1, Some(query))], Some("pre")),
        }
    }

    fn email(&self, email: &str) -> Cell {
        Cell::item(email, Some(format!("mailto:{email}")))
    }
}
