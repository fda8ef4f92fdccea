use std::collections::HashSet;

use tracing::debug;

/// Section names treated as generic (union) types by default.
pub const DEFAULT_GENERICS: &[&str] = &[
    "InlineQueryResult",
    "InputMessageContent",
    "PassportElementError",
];

/// Methods documented without a parameter table by default. They get an empty field list.
pub const DEFAULT_TABLELESS: &[&str] = &[
    "getMe",
    "logOut",
    "close",
    "deleteWebhook",
    "getWebhookInfo",
    "getForumTopicIconStickers",
    "getAvailableGifts",
];

/// What a documentation section declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A remote operation.
    Method,
    /// A record type.
    Model,
    /// A union over other models.
    Generic,
    /// Not a declaration, or already handled.
    Skip,
}

/// Name tables consulted while walking one document.
///
/// Built once per run. Tracks the names already classified so repeated headings are skipped.
#[derive(Debug, Clone)]
pub struct Registry {
    generics: HashSet<String>,
    tableless: HashSet<String>,
    skip: HashSet<String>,
    seen: HashSet<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding the default generic and tableless names.
    pub fn new() -> Self {
        Self {
            generics: DEFAULT_GENERICS.iter().map(|s| s.to_string()).collect(),
            tableless: DEFAULT_TABLELESS.iter().map(|s| s.to_string()).collect(),
            skip: HashSet::new(),
            seen: HashSet::new(),
        }
    }

    /// Adds names handled as generic unions.
    pub fn with_generics<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generics.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds method names extracted without a parameter table.
    pub fn with_tableless<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tableless.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds names that are ignored.
    pub fn with_skipped<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether the section is a generic union.
    pub fn is_generic(&self, name: &str) -> bool {
        self.generics.contains(name)
    }

    /// Whether the section is extracted without looking for a table.
    pub fn is_tableless(&self, name: &str) -> bool {
        self.tableless.contains(name)
    }

    /// Classify a section heading and record it as seen.
    ///
    /// Uppercase single-word headings are models; uppercase headings with several words are
    /// prose and skipped. Lowercase headings are methods.
    pub fn classify(&mut self, name: &str) -> SectionKind {
        if name.is_empty() || self.skip.contains(name) {
            debug!(name, "skipping section");
            return SectionKind::Skip;
        }
        if !self.seen.insert(name.to_string()) {
            debug!(name, "skipping duplicate section");
            return SectionKind::Skip;
        }
        if self.is_generic(name) {
            return SectionKind::Generic;
        }
        if name.chars().next().is_some_and(char::is_uppercase) {
            return if name.split_whitespace().count() == 1 {
                SectionKind::Model
            } else {
                debug!(name, "skipping prose heading");
                SectionKind::Skip
            };
        }
        SectionKind::Method
    }
}
