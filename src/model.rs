use clap::ValueEnum;
use std::fmt;

/// Fixed file names written below the output directory.
#[derive(Debug, Clone, Copy)]
pub struct ReportFiles {
    pub report_text: &'static str,
    pub report_html: &'static str,
    pub filter_text: &'static str,
    pub filter_html: &'static str,
}

pub const REPORT_FILES: ReportFiles = ReportFiles {
    report_text: "report.txt",
    report_html: "report.html",
    filter_text: "filter.txt",
    filter_html: "filter.html",
};

pub const HTML_CSS: &str = concat!(
    "<style type=\"text/css\">\n",
    "  pre,code{font-family:courier;}\n",
    "  h5 {font-family: \"Roboto\", Sans-Serif;}\n",
    "  .hoverTable{font-family: verdana,arial,sans-serif;",
    "width:1200px;border-collapse:collapse;font-size:11px;",
    "text-align:left;}\n",
    "  .hoverTable td{padding:3px;}\n",
    "  .hoverTable tr{background: #b8d1f3;}\n",
    "  .hoverTable tr:nth-child(odd){background: #dae5f4;}\n",
    "  .hoverTable tr:nth-child(even){background: #ffffff;}\n",
    "  .hoverTable tr:hover {background-color: #bbbbbb;}\n",
    "  .sha1 {width:350px}\n",
    "  .email {width:200px}\n",
    "  .title {width:450px}\n",
    "</style>\n",
);

pub const TABLE_CLASS: &str = "hoverTable";

pub const COLUMN_CLASSES: [&str; 4] = ["sha1", "email", "email", "title"];

/// Length of the sha1 prefix linked to the review query view.
pub const SHA1_QUERY_PREFIX: usize = 20;

/// A reference as the user spelled it, together with its resolved hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub name: String,
    pub sha1: String,
}

impl Revision {
    pub fn new(name: impl Into<String>, sha1: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha1: sha1.into(),
        }
    }

    /// A root commit found by walking history has no other spelling than its hash.
    pub fn from_sha1(sha1: impl Into<String>) -> Self {
        let sha1 = sha1.into();
        Self {
            name: sha1.clone(),
            sha1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    pub begin_refs: Vec<Revision>,
    pub end_ref: Revision,
    /// Whether the begin reference came from the caller rather than a root walk.
    pub explicit_begin: bool,
}

impl RevisionRange {
    /// Traversal specs in walk order, one per begin reference.
    ///
    /// A single implicit range covers everything reachable from the end,
    /// root commit included.
    pub fn specs(&self) -> Vec<RangeSpec> {
        if !self.explicit_begin && self.begin_refs.len() == 1 {
            return vec![RangeSpec::Reachable(self.end_ref.clone())];
        }
        self.begin_refs
            .iter()
            .map(|begin| RangeSpec::Between {
                begin: begin.clone(),
                end: self.end_ref.clone(),
            })
            .collect()
    }
}

/// One traversal expression handed to the query surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSpec {
    /// `end`: every commit reachable from `end`.
    Reachable(Revision),
    /// `begin..end`: reachable from `end` but not from `begin`.
    Between { begin: Revision, end: Revision },
    /// `sha1^!`: exactly one commit.
    Single(String),
}

impl RangeSpec {
    /// Section label built from the user spellings.
    pub fn label(&self) -> String {
        match self {
            RangeSpec::Reachable(end) => end.name.clone(),
            RangeSpec::Between { begin, end } => format!("{}..{}", begin.name, end.name),
            RangeSpec::Single(sha1) => sha1.clone(),
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Reachable(end) => write!(f, "{}", end.sha1),
            RangeSpec::Between { begin, end } => write!(f, "{}..{}", begin.sha1, end.sha1),
            RangeSpec::Single(sha1) => write!(f, "{sha1}^!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha1: String,
    pub author_email: String,
    pub committer_email: String,
    pub subject: String,
}

impl CommitRecord {
    pub fn columns(&self) -> [&str; 4] {
        [
            &self.sha1,
            &self.author_email,
            &self.committer_email,
            &self.subject,
        ]
    }
}

/// Commits of one range, labelled for its report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeLog {
    pub label: String,
    pub records: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
    All,
}

impl ReportFormat {
    pub fn wants_text(self) -> bool {
        matches!(self, ReportFormat::Text | ReportFormat::All)
    }

    pub fn wants_html(self) -> bool {
        matches!(self, ReportFormat::Html | ReportFormat::All)
    }
}

/// Review server location parsed from `--remote`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewServer {
    pub base: String,
    pub project: Option<String>,
}

impl ReviewServer {
    /// Splits a URL path off as the project name, keeping `scheme://host[:port]` as base.
    pub fn parse(remote: &str) -> crate::error::Result<Self> {
        let url = url::Url::parse(remote).map_err(|e| {
            crate::error::ReportError::Config(format!("Invalid remote '{remote}': {e}"))
        })?;

        let project = url.path().trim_matches('/');
        if project.is_empty() {
            return Ok(Self {
                base: remote.trim_end_matches('/').to_string(),
                project: None,
            });
        }

        let mut base = format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""));
        if let Some(port) = url.port() {
            base.push_str(&format!(":{port}"));
        }

        Ok(Self {
            base,
            project: Some(project.to_string()),
        })
    }

    pub fn query_url(&self, sha1: &str) -> String {
        format!("{}#/q/{}", self.base, sha1)
    }

    pub fn gitiles_url(&self, project: &str, sha1: &str) -> String {
        format!("{}/plugins/gitiles/{}/+/{}^!", self.base, project, sha1)
    }
}
