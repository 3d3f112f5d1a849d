//! Filter expressions over commit records.
//!
//! A raw token is either `field:value` or a bare value, which is taken as
//! `email:value`. A record matches a [`Pattern`] when any one expression
//! matches; values are compared as case-insensitive substrings so that
//! `@example.com` selects a whole domain.
//!
//! Against a [`CommitRecord`], `email` tests the committer email, `author`
//! the author email, `subject` the subject line and `sha1` the hash.

use crate::model::CommitRecord;
use std::fmt;
use tracing::warn;

/// Record attribute an expression can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Author,
    Subject,
    Sha1,
}

const FIELD_ALIASES: &[(Field, &[&str])] = &[
    (Field::Email, &["e", "email", "mail"]),
    (Field::Author, &["a", "author"]),
    (Field::Subject, &["s", "subject", "title"]),
    (Field::Sha1, &["h", "sha1", "hash"]),
];

impl Field {
    pub fn from_alias(alias: &str) -> Option<Self> {
        let alias = alias.trim();
        FIELD_ALIASES
            .iter()
            .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(alias)))
            .map(|(field, _)| *field)
    }

    /// Resolves a comma-separated alias list such as `"e,email"`.
    pub fn from_alias_list(aliases: &str) -> Vec<Self> {
        let mut fields = Vec::new();
        for field in aliases.split(',').filter_map(Field::from_alias) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Author => "author",
            Field::Subject => "subject",
            Field::Sha1 => "sha1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    /// `None` when the field name is unknown; such an expression never matches.
    pub field: Option<Field>,
    pub raw_field: String,
    pub value: String,
}

impl FilterExpression {
    pub fn parse(token: &str) -> Self {
        let (raw_field, value) = match token.find(':') {
            Some(pos) if pos > 0 => (&token[..pos], &token[pos + 1..]),
            _ => (Field::Email.name(), token),
        };

        let field = Field::from_alias(raw_field);
        if field.is_none() {
            warn!(field = raw_field, "Unknown filter field, expression will never match");
        }

        Self {
            field,
            raw_field: raw_field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn matches(&self, field: Field, value: &str) -> bool {
        self.field == Some(field) && value.to_lowercase().contains(&self.value.to_lowercase())
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{}:{}", field.name(), self.value),
            None => write!(f, "{}:{}", self.raw_field, self.value),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pattern {
    expressions: Vec<FilterExpression>,
}

impl Pattern {
    pub fn build<S: AsRef<str>>(raw: &[S]) -> Self {
        Self {
            expressions: raw
                .iter()
                .map(|token| FilterExpression::parse(token.as_ref()))
                .collect(),
        }
    }

    /// No expressions means no filtering was requested.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn expressions(&self) -> &[FilterExpression] {
        &self.expressions
    }

    pub fn matches(&self, field: Field, value: &str) -> bool {
        self.is_empty() || self.expressions.iter().any(|e| e.matches(field, value))
    }

    /// Tests every expression against the record attribute its field names.
    pub fn matches_record(&self, record: &CommitRecord) -> bool {
        let targets = [
            (Field::Email, record.committer_email.as_str()),
            (Field::Author, record.author_email.as_str()),
            (Field::Subject, record.subject.as_str()),
            (Field::Sha1, record.sha1.as_str()),
        ];
        self.is_empty()
            || targets
                .iter()
                .any(|&(field, value)| self.matches(field, value))
    }

    /// Like [`Pattern::matches`], accepting any field named in `aliases`.
    pub fn matches_alias(&self, aliases: &str, value: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        Field::from_alias_list(aliases)
            .into_iter()
            .any(|field| self.matches(field, value))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.expressions.len() == other.expressions.len()
            && self
                .expressions
                .iter()
                .zip(&other.expressions)
                .all(|(a, b)| a.field == b.field && a.value == b.value)
    }
}
