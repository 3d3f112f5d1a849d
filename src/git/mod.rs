pub mod extract;
pub mod query;
pub mod repo;
pub mod resolve;

#[cfg(test)]
pub(crate) mod fake;

pub use extract::CommitLogExtractor;
pub use query::{LogField, VcsQuery};
pub use repo::GitRepo;
pub use resolve::RevisionResolver;
