use super::query::VcsQuery;
use crate::error::{ReportError, Result};
use crate::model::{Revision, RevisionRange};
use console::style;
use tracing::{debug, warn};

pub const DEFAULT_REMOTE: &str = "origin";

/// Turns user-supplied references into resolved ranges.
///
/// A bare branch name may only exist as a remote-tracking reference, so a
/// failed lookup is retried as `<remote>/<ref>`.
pub struct RevisionResolver<'a, Q: VcsQuery + ?Sized> {
    vcs: &'a Q,
    remote: String,
}

impl<'a, Q: VcsQuery + ?Sized> RevisionResolver<'a, Q> {
    pub fn new(vcs: &'a Q) -> Self {
        let remote = vcs
            .default_remote()
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
        Self { vcs, remote }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn resolve(&self, reference: &str) -> Result<Revision> {
        if let Ok(sha1) = self.vcs.resolve_revision(reference) {
            return Ok(Revision::new(reference, sha1));
        }

        let qualified = format!("{}/{}", self.remote, reference);
        debug!(reference, qualified = %qualified, "Retrying with remote-tracking name");
        match self.vcs.resolve_revision(&qualified) {
            Ok(sha1) => Ok(Revision::new(reference, sha1)),
            Err(_) => Err(ReportError::Revision(reference.to_string())),
        }
    }

    /// Builds the range for zero, one or two references; further ones are ignored.
    pub fn resolve_range<S: AsRef<str>>(&self, args: &[S]) -> Result<RevisionRange> {
        if let [begin, end, ..] = args {
            let end_ref = self.resolve(end.as_ref())?;
            let begin_ref = self.resolve(begin.as_ref())?;
            return Ok(RevisionRange {
                begin_refs: vec![begin_ref],
                end_ref,
                explicit_begin: true,
            });
        }

        let end_ref = match args.first() {
            Some(reference) => self.resolve(reference.as_ref())?,
            None => {
                eprintln!("{}", style("No SHA-1 provided, use HEAD by default").yellow());
                self.resolve("HEAD")?
            }
        };

        let begin_refs = match self.vcs.list_root_ancestors(&end_ref.sha1) {
            Ok(roots) => roots
                .into_iter()
                .filter(|r| !r.is_empty())
                .map(Revision::from_sha1)
                .collect(),
            Err(e) => {
                warn!(error = %e, "Failed to list root commits of {}", end_ref.name);
                Vec::new()
            }
        };

        Ok(RevisionRange {
            begin_refs,
            end_ref,
            explicit_begin: false,
        })
    }
}
