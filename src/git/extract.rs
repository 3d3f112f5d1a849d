use super::query::VcsQuery;
use crate::model::{CommitRecord, RangeLog, RangeSpec, RevisionRange};
use tracing::{debug, warn};

pub struct CommitLogExtractor<'a, Q: VcsQuery + ?Sized> {
    vcs: &'a Q,
}

impl<'a, Q: VcsQuery + ?Sized> CommitLogExtractor<'a, Q> {
    pub fn new(vcs: &'a Q) -> Self {
        Self { vcs }
    }

    /// Records of one traversal, newest first.
    ///
    /// A failing query leaves the range empty; some ranges legitimately have
    /// nothing to list.
    pub fn extract_spec(&self, spec: &RangeSpec) -> Vec<CommitRecord> {
        match self.vcs.extract_records(spec) {
            Ok(records) => {
                debug!(range = %spec, commits = records.len(), "Extracted range");
                records.into_iter().map(clean_record).collect()
            }
            Err(e) => {
                warn!(range = %spec, error = %e, "Skipping range");
                Vec::new()
            }
        }
    }

    pub fn extract(&self, range: &RevisionRange) -> Vec<RangeLog> {
        range
            .specs()
            .iter()
            .map(|spec| RangeLog {
                label: spec.label(),
                records: self.extract_spec(spec),
            })
            .collect()
    }
}

/// Whitespace only; quote artifacts are a concern of the raw log queries.
fn clean_record(record: CommitRecord) -> CommitRecord {
    CommitRecord {
        sha1: record.sha1.trim().to_string(),
        author_email: record.author_email.trim().to_string(),
        committer_email: record.committer_email.trim().to_string(),
        subject: record.subject.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeVcs;
    use crate::model::Revision;

    fn explicit(begin: &str, end: &str) -> RevisionRange {
        RevisionRange {
            begin_refs: vec![Revision::from_sha1(begin)],
            end_ref: Revision::from_sha1(end),
            explicit_begin: true,
        }
    }

    #[test]
    fn explicit_range_excludes_begin_and_its_ancestors() {
        let vcs = FakeVcs::linear(&["c1", "c2", "c3", "c4"]);
        let logs = CommitLogExtractor::new(&vcs).extract(&explicit("c2", "c4"));

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].label, "c2..c4");
        let hashes: Vec<_> = logs[0].records.iter().map(|r| r.sha1.as_str()).collect();
        assert_eq!(hashes, vec!["c4", "c3"]);
    }

    #[test]
    fn single_implicit_range_includes_the_root() {
        let vcs = FakeVcs::linear(&["c1", "c2"]);
        let range = RevisionRange {
            begin_refs: vec![Revision::from_sha1("c1")],
            end_ref: Revision::new("HEAD", "c2"),
            explicit_begin: false,
        };

        let logs = CommitLogExtractor::new(&vcs).extract(&range);
        assert_eq!(logs[0].label, "HEAD");
        assert_eq!(logs[0].records.len(), 2);
    }

    #[test]
    fn failing_range_is_empty_and_others_continue() {
        let mut vcs = FakeVcs::linear(&["r1", "a2"]);
        vcs.add("r2", &[]);
        vcs.add("m3", &["a2", "r2"]);
        vcs.failing.insert("r1..m3".to_string());

        let range = RevisionRange {
            begin_refs: vec![Revision::from_sha1("r1"), Revision::from_sha1("r2")],
            end_ref: Revision::from_sha1("m3"),
            explicit_begin: false,
        };

        let logs = CommitLogExtractor::new(&vcs).extract(&range);
        assert_eq!(logs.len(), 2);
        assert!(logs[0].records.is_empty());
        let hashes: Vec<_> = logs[1].records.iter().map(|r| r.sha1.as_str()).collect();
        assert_eq!(hashes, vec!["m3", "a2", "r1"]);
    }

    #[test]
    fn values_are_trimmed_of_quotes() {
        let vcs = FakeVcs::linear(&["c1"]).with_committer("c1", "\"quoted@example.com\" ");
        let records = CommitLogExtractor::new(&vcs)
            .extract_spec(&RangeSpec::Reachable(Revision::from_sha1("c1")));
        assert_eq!(records[0].committer_email, "quoted@example.com");
        assert_eq!(records[0].subject, "subject c1");
    }

    #[test]
    fn subject_keeps_its_closing_quote() {
        let vcs = FakeVcs::linear(&["c1", "c2"]).with_subject("c2", "Revert \"Add feature\"");
        let records = CommitLogExtractor::new(&vcs)
            .extract_spec(&RangeSpec::Reachable(Revision::from_sha1("c2")));
        assert_eq!(records[0].subject, "Revert \"Add feature\"");
        assert_eq!(records[1].subject, "subject c1");
    }
}
