//! Scanner Data Types

use std::path::{Path, PathBuf};

use crate::analysis::AlgorithmCounts;

/// Identity of a repository to be analyzed
///
/// `name` and `remote_url` are fixed at creation; `local_path` is set by the
/// acquisition scope while a working tree exists and cleared when the scope
/// ends. A descriptor is owned by exactly one worker at a time.
#[derive(Debug, Clone)]
pub struct RepoDescriptor {
    name: String,
    remote_url: String,
    pub(crate) local_path: Option<PathBuf>,
}

impl RepoDescriptor {
    /// Descriptor for a GitHub-hosted repository identified as `owner/name`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let remote_url = format!("https://github.com/{}.git", name);
        Self {
            name,
            remote_url,
            local_path: None,
        }
    }

    /// Descriptor with an explicit remote locator
    pub fn with_remote(name: impl Into<String>, remote_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote_url: remote_url.into(),
            local_path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Local working tree, present only while an acquisition scope is active
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }
}

impl PartialEq for RepoDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RepoDescriptor {}

/// One repository's non-empty scan result, ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    repo_name: String,
    entries: Vec<(&'static str, u64)>,
}

impl ResultRecord {
    /// Build a record from a count map
    ///
    /// All-zero maps produce no record; repositories without recognized
    /// patterns are never emitted.
    pub fn from_counts(repo_name: &str, counts: &AlgorithmCounts) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        Some(Self {
            repo_name: repo_name.to_string(),
            entries: counts.ranked(),
        })
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Render as one output line: `name pattern:count pattern:count ...`
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.entries.len() + 1);
        parts.push(self.repo_name.clone());
        for (name, count) in &self.entries {
            parts.push(format!("{}:{}", name, count));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::vocabulary::index_of;

    #[test]
    fn test_descriptor_derives_github_clone_url() {
        let repo = RepoDescriptor::new("torvalds/linux");
        assert_eq!(repo.name(), "torvalds/linux");
        assert_eq!(repo.remote_url(), "https://github.com/torvalds/linux.git");
        assert_eq!(repo.local_path(), None);
    }

    #[test]
    fn test_descriptor_equality_is_by_name() {
        let a = RepoDescriptor::new("orgA/repo1");
        let b = RepoDescriptor::with_remote("orgA/repo1", "file:///tmp/fixture");
        let c = RepoDescriptor::new("orgA/repo2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_renders_name_and_ranked_counts() {
        let mut counts = AlgorithmCounts::new();
        counts.increment(index_of("sort").unwrap(), 2);
        counts.increment(index_of("find").unwrap(), 1);

        let record = ResultRecord::from_counts("orgA/repo1", &counts).unwrap();
        assert_eq!(record.render(), "orgA/repo1 sort:2 find:1");
    }

    #[test]
    fn test_all_zero_counts_produce_no_record() {
        let counts = AlgorithmCounts::new();
        assert!(ResultRecord::from_counts("orgA/repo2", &counts).is_none());
    }
}
