//! In-memory history used by unit tests.

use super::query::{LogField, VcsQuery};
use crate::error::{ReportError, Result};
use crate::model::RangeSpec;
use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
pub struct FakeCommit {
    pub parents: Vec<String>,
    pub author_email: String,
    pub committer_email: String,
    pub subject: String,
    pub time: i64,
}

#[derive(Debug, Default)]
pub struct FakeVcs {
    pub commits: BTreeMap<String, FakeCommit>,
    pub refs: BTreeMap<String, String>,
    pub remote: Option<String>,
    /// Ranges whose hash listing fails.
    pub failing: HashSet<String>,
    queries: Cell<usize>,
}

impl FakeVcs {
    /// A single chain `ids[0] <- ids[1] <- ...` with `HEAD` at the last id.
    pub fn linear(ids: &[&str]) -> Self {
        let mut vcs = FakeVcs::default();
        let mut parent: Option<&str> = None;
        for &id in ids {
            vcs.add(id, parent.into_iter().collect::<Vec<_>>().as_slice());
            parent = Some(id);
        }
        if let Some(head) = parent {
            vcs.refs.insert("HEAD".to_string(), head.to_string());
        }
        vcs
    }

    pub fn add(&mut self, id: &str, parents: &[&str]) {
        let time = self.commits.len() as i64;
        self.commits.insert(
            id.to_string(),
            FakeCommit {
                parents: parents.iter().map(|p| p.to_string()).collect(),
                author_email: format!("author-{id}@example.com"),
                committer_email: format!("committer-{id}@example.com"),
                subject: format!("subject {id}"),
                time,
            },
        );
    }

    pub fn with_committer(mut self, id: &str, email: &str) -> Self {
        if let Some(commit) = self.commits.get_mut(id) {
            commit.committer_email = email.to_string();
        }
        self
    }

    pub fn with_subject(mut self, id: &str, subject: &str) -> Self {
        if let Some(commit) = self.commits.get_mut(id) {
            commit.subject = subject.to_string();
        }
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    fn reachable(&self, tip: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut stack = vec![tip.to_string()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(commit) = self.commits.get(&id) {
                stack.extend(commit.parents.iter().cloned());
            }
        }
        seen
    }

    fn range_ids(&self, range: &RangeSpec) -> Vec<String> {
        let mut ids: Vec<String> = match range {
            RangeSpec::Single(sha1) => return vec![sha1.clone()],
            RangeSpec::Reachable(end) => self.reachable(&end.sha1).into_iter().collect(),
            RangeSpec::Between { begin, end } => {
                let hidden = self.reachable(&begin.sha1);
                self.reachable(&end.sha1)
                    .into_iter()
                    .filter(|id| !hidden.contains(id))
                    .collect()
            }
        };
        ids.sort_by_key(|id| std::cmp::Reverse(self.commits.get(id).map_or(0, |c| c.time)));
        ids
    }
}

impl VcsQuery for FakeVcs {
    fn resolve_revision(&self, spec: &str) -> Result<String> {
        if let Some(sha1) = self.refs.get(spec) {
            return Ok(sha1.clone());
        }
        if self.commits.contains_key(spec) {
            return Ok(spec.to_string());
        }
        Err(ReportError::Revision(spec.to_string()))
    }

    fn list_root_ancestors(&self, sha1: &str) -> Result<Vec<String>> {
        let mut roots: Vec<String> = self
            .reachable(sha1)
            .into_iter()
            .filter(|id| self.commits.get(id).is_some_and(|c| c.parents.is_empty()))
            .collect();
        roots.sort();
        Ok(roots)
    }

    fn log_field_query(&self, field: LogField, range: &RangeSpec) -> Result<Vec<String>> {
        self.queries.set(self.queries.get() + 1);
        if self.failing.contains(&range.to_string()) {
            return Err(ReportError::Query(format!("bad range {range}")));
        }

        Ok(self
            .range_ids(range)
            .into_iter()
            .filter_map(|id| {
                let commit = self.commits.get(&id)?;
                Some(match field {
                    LogField::Sha1 => format!("\"{id}"),
                    LogField::AuthorEmail => commit.author_email.clone(),
                    LogField::CommitterEmail => commit.committer_email.clone(),
                    LogField::Subject => format!("{}\n", commit.subject),
                })
            })
            .collect())
    }

    fn default_remote(&self) -> Option<String> {
        self.remote.clone()
    }
}
