use crate::error::ReportError;
use crate::git::GitRepo;
use crate::model::{ReportFormat, ReviewServer};
use crate::report::{ReportGenerator, ReportOptions};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "git-diff-report")]
#[command(about = "Generate report of the git commits between two SHA-1s")]
#[command(
    long_about = "Lists the commits between two SHA-1s. With a single SHA-1 the scope is \
                  every root commit up to it; with none, HEAD is used. Commits matching a \
                  pattern (committer email by default, or author/subject/sha1 by field) \
                  are also written to a separate filtered report.\n\n\
                  HTML reports can link each commit to a Gerrit server and its gitiles plugin."
)]
#[command(version)]
pub struct Cli {
    #[arg(help = "Revisions: [BEGIN] END, at most two are used")]
    pub revisions: Vec<String>,

    #[arg(short, long, help = "Set the remote server location, e.g. https://review.example.com/project")]
    pub remote: Option<String>,

    #[arg(short, long, help = "Set the output directory")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Enable gitiles links within the SHA-1")]
    pub gitiles: bool,

    #[arg(long, value_enum, ignore_case = true, default_value_t, help = "Set the report format")]
    pub format: ReportFormat,

    #[arg(
        short,
        long = "pattern",
        help = "Filter commits by FIELD:VALUE or a committer email fragment (repeatable)"
    )]
    pub patterns: Vec<String>,

    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Project name, overriding the one taken from --remote")]
    pub name: Option<String>,

    #[arg(long, help = "Hide the progress spinner")]
    pub no_progress: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let options = self.options()?;

        if self.revisions.len() > 2 {
            eprintln!(
                "{} ignoring extra revisions: {}",
                style("warning:").yellow().bold(),
                self.revisions[2..].join(" ")
            );
        }

        let repo = GitRepo::open(self.repo.as_ref()).context("Failed to open git repository")?;
        debug!(path = %repo.path().display(), "Opened repository");
        let records = ReportGenerator::new(&repo, &options)
            .generate(self.revisions.as_slice())
            .context("Failed to generate report")?;

        println!(
            "{} commits reported in {}",
            style(records.len()).cyan(),
            style(options.output.display()).dim()
        );
        Ok(())
    }

    /// Validates the options before anything touches the repository or disk.
    pub fn options(&self) -> Result<ReportOptions> {
        let output = self
            .output
            .clone()
            .ok_or_else(|| ReportError::Config("output is not set".to_string()))?;

        let server = self
            .remote
            .as_deref()
            .map(ReviewServer::parse)
            .transpose()?;

        let name = self
            .name
            .clone()
            .or_else(|| server.as_ref().and_then(|s| s.project.clone()))
            .unwrap_or_default();

        Ok(ReportOptions {
            output,
            name,
            format: self.format,
            patterns: self.patterns.clone(),
            server,
            gitiles: self.gitiles,
            progress: !self.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("git-diff-report").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn missing_output_is_a_config_error() {
        let err = parse(&["HEAD"]).options().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::Config(_))
        ));
    }

    #[test]
    fn remote_path_becomes_project_name() {
        let options = parse(&[
            "--output",
            "out",
            "--remote",
            "https://review.example.com/myproj",
            "--gitiles",
            "--format",
            "ALL",
            "-p",
            "alice@x.com",
            "--pattern",
            "email:bob@",
        ])
        .options()
        .unwrap();

        assert_eq!(options.name, "myproj");
        assert_eq!(options.server.unwrap().base, "https://review.example.com");
        assert!(options.gitiles);
        assert_eq!(options.format, ReportFormat::All);
        assert_eq!(options.patterns, vec!["alice@x.com", "email:bob@"]);
    }

    #[test]
    fn name_overrides_remote_project() {
        let options = parse(&[
            "-o",
            "out",
            "-r",
            "https://review.example.com/myproj",
            "--name",
            "other",
        ])
        .options()
        .unwrap();
        assert_eq!(options.name, "other");
    }

    #[test]
    fn defaults_to_text_without_remote() {
        let cli = parse(&["-o", "out", "v1", "v2"]);
        assert_eq!(cli.revisions, vec!["v1", "v2"]);
        let options = cli.options().unwrap();
        assert_eq!(options.format, ReportFormat::Text);
        assert!(options.server.is_none());
        assert!(options.name.is_empty());
        assert!(options.progress);
    }
}
