use super::query::{LogField, VcsQuery};
use crate::error::{ReportError, Result};
use crate::model::{CommitRecord, RangeSpec};
use gix::{discover, ObjectId, Repository};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits of `range`, newest first by commit time.
    fn range_ids(&self, range: &RangeSpec) -> Result<Vec<ObjectId>> {
        match range {
            RangeSpec::Single(sha1) => Ok(vec![parse_oid(sha1)?]),
            RangeSpec::Reachable(end) => self.walk(parse_oid(&end.sha1)?, &HashSet::new()),
            RangeSpec::Between { begin, end } => {
                let hidden: HashSet<ObjectId> = self
                    .walk(parse_oid(&begin.sha1)?, &HashSet::new())?
                    .into_iter()
                    .collect();
                self.walk(parse_oid(&end.sha1)?, &hidden)
            }
        }
    }

    fn walk(&self, tip: ObjectId, hidden: &HashSet<ObjectId>) -> Result<Vec<ObjectId>> {
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: Vec<ObjectId> = vec![tip];
        let mut found: Vec<(i64, ObjectId)> = Vec::new();

        while let Some(commit_id) = stack.pop() {
            if hidden.contains(&commit_id) || !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            found.push((commit.time()?.seconds, commit_id));

            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            stack.extend(parents.into_iter().rev());
        }

        // stable, so equal timestamps keep walk order
        found.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(found.into_iter().map(|(_, id)| id).collect())
    }

    fn field(&self, commit_id: ObjectId, field: LogField) -> Result<String> {
        let record = self.record(commit_id)?;
        Ok(match field {
            LogField::Sha1 => record.sha1,
            LogField::AuthorEmail => record.author_email,
            LogField::CommitterEmail => record.committer_email,
            LogField::Subject => record.subject,
        })
    }

    fn record(&self, commit_id: ObjectId) -> Result<CommitRecord> {
        let commit = self.repo.find_commit(commit_id)?;
        Ok(CommitRecord {
            sha1: commit_id.to_string(),
            author_email: commit.author()?.email.to_string(),
            committer_email: commit.committer()?.email.to_string(),
            subject: commit.message()?.title.to_string().trim().to_string(),
        })
    }
}

impl VcsQuery for GitRepo {
    fn resolve_revision(&self, spec: &str) -> Result<String> {
        let id = self
            .repo
            .rev_parse_single(spec)
            .map_err(|e| ReportError::Revision(format!("{spec}: {e}")))?;

        let commit = id
            .object()?
            .peel_to_commit()
            .map_err(|_| ReportError::Revision(format!("Not a commit: {spec}")))?;

        Ok(commit.id.to_string())
    }

    fn list_root_ancestors(&self, sha1: &str) -> Result<Vec<String>> {
        let mut roots = Vec::new();
        for commit_id in self.walk(parse_oid(sha1)?, &HashSet::new())? {
            if self.repo.find_commit(commit_id)?.parent_ids().next().is_none() {
                roots.push(commit_id.to_string());
            }
        }
        debug!(tip = sha1, roots = roots.len(), "Listed root ancestors");
        Ok(roots)
    }

    fn log_field_query(&self, field: LogField, range: &RangeSpec) -> Result<Vec<String>> {
        debug!(placeholder = field.format_spec(), range = %range, "Log field query");
        self.range_ids(range)?
            .into_iter()
            .map(|commit_id| self.field(commit_id, field))
            .collect()
    }

    fn default_remote(&self) -> Option<String> {
        self.repo
            .remote_default_name(gix::remote::Direction::Fetch)
            .map(|name| name.to_string())
    }

    /// Reads every record of the range from one walk.
    fn extract_records(&self, range: &RangeSpec) -> Result<Vec<CommitRecord>> {
        debug!(range = %range, "Batch extraction");
        self.range_ids(range)?
            .into_iter()
            .map(|commit_id| self.record(commit_id))
            .collect()
    }
}

fn parse_oid(sha1: &str) -> Result<ObjectId> {
    ObjectId::from_hex(sha1.as_bytes())
        .map_err(|e| ReportError::Revision(format!("Invalid commit ID {sha1}: {e}")))
}
