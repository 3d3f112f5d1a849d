use crate::error::Result;
use crate::model::{CommitRecord, RangeSpec};

/// Per-commit value requested from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Sha1,
    AuthorEmail,
    CommitterEmail,
    Subject,
}

impl LogField {
    /// Equivalent `git log --format` placeholder.
    pub fn format_spec(self) -> &'static str {
        match self {
            LogField::Sha1 => "%H",
            LogField::AuthorEmail => "%ae",
            LogField::CommitterEmail => "%ce",
            LogField::Subject => "%s",
        }
    }
}

/// Strips the whitespace and the enclosing quote pair a formatted log line
/// may carry. Quotes inside the value, or on one side only, are kept.
pub fn trim_field(raw: &str) -> &str {
    let value = raw.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .map_or(value, str::trim)
}

/// Hashes never contain quotes, so any stray one is dropped.
pub fn trim_hash(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

/// Version-control query surface the report is built on.
///
/// Implementors must provide the three primitive queries. `extract_records`
/// defaults to one hash listing followed by three field queries per commit;
/// backends able to read a whole range at once should override it.
pub trait VcsQuery {
    /// Resolves a revision spelling to a full commit hash.
    fn resolve_revision(&self, spec: &str) -> Result<String>;

    /// Commits without parents reachable from `sha1`.
    fn list_root_ancestors(&self, sha1: &str) -> Result<Vec<String>>;

    /// One value per commit of `range`, newest first.
    fn log_field_query(&self, field: LogField, range: &RangeSpec) -> Result<Vec<String>>;

    /// Name of the remote used to qualify unresolved branch names.
    fn default_remote(&self) -> Option<String> {
        None
    }

    fn extract_records(&self, range: &RangeSpec) -> Result<Vec<CommitRecord>> {
        let hashes = self.log_field_query(LogField::Sha1, range)?;

        let mut records = Vec::with_capacity(hashes.len());
        for sha1 in hashes.iter().map(|h| trim_hash(h)).filter(|h| !h.is_empty()) {
            let single = RangeSpec::Single(sha1.to_string());
            let field = |field: LogField| -> Result<String> {
                let values = self.log_field_query(field, &single)?;
                Ok(values
                    .first()
                    .map(|v| trim_field(v).to_string())
                    .unwrap_or_default())
            };

            records.push(CommitRecord {
                sha1: sha1.to_string(),
                author_email: field(LogField::AuthorEmail)?,
                committer_email: field(LogField::CommitterEmail)?,
                subject: field(LogField::Subject)?,
            });
        }

        Ok(records)
    }
}
