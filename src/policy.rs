//! # Rewrite Policy
//!
//! The identifier-renaming rules applied to names and file contents.
//!
//! A [`RewritePolicy`] is an ordered list of literal substitutions. Rules are
//! applied one after another, each replacing every occurrence in the output of
//! the previous rule. Order matters: the guard rules at the end of the default
//! policy exist only to repair words such as `digit` that the broad
//! `git` → `gut` rule damages, so they must come after it.
//!
//! A [`FilePatch`] is an extra substitution bound to one post-rename file
//! name. Patches run after the general policy and only for that exact name.
//!
//! Both tables are plain data: build them once (from [`RewritePolicy::gut`]
//! and [`FilePatch::gut_defaults`], or from a YAML file via [`PolicyFile`]) and
//! hand them to a [`Rewriter`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// A single literal substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub from: String,
    pub to: String,
}

impl Rule {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Ordered, dependent substitution rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewritePolicy {
    rules: Vec<Rule>,
}

impl RewritePolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The `git` → `gut` policy.
    ///
    /// The three case variants of the root token come first, then the guards
    /// that put `digit` back together in each casing.
    pub fn gut() -> Self {
        Self::new(vec![
            Rule::new("git", "gut"),
            Rule::new("Git", "Gut"),
            Rule::new("GIT", "GUT"),
            Rule::new("digut", "digit"),
            Rule::new("Digut", "Digit"),
            Rule::new("DIGUT", "DIGIT"),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Apply every rule in declared order.
    pub fn apply(&self, input: &str) -> String {
        let mut text = input.to_string();
        for rule in &self.rules {
            if rule.from.is_empty() {
                continue;
            }
            if text.contains(&rule.from) {
                text = text.replace(&rule.from, &rule.to);
            }
        }
        text
    }
}

/// An extra substitution applied only to files with exactly this name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePatch {
    /// Post-rename file name (no directory component).
    pub file: String,
    pub from: String,
    pub to: String,
}

impl FilePatch {
    pub fn new(file: &str, from: &str, to: &str) -> Self {
        Self {
            file: file.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Patches needed after rewriting the git sources.
    pub fn gut_defaults() -> Vec<FilePatch> {
        vec![
            // Hand-rolled check for the 'i' in ".git" path components.
            FilePatch::new(
                "read-cache.c",
                "rest[1] != 'i' && rest[1] != 'I'",
                "rest[1] != 'u' && rest[1] != 'U'",
            ),
            FilePatch::new(
                "utf8.c",
                "if (c != 'i' && c != 'I'",
                "if (c != 'u' && c != 'U'",
            ),
            // The version generator must keep calling the real git, otherwise
            // building gut would invoke gut and rebuild itself forever.
            FilePatch::new("GUT-VERSION-GEN", "gut ", "git "),
        ]
    }
}

/// A policy together with its per-file patches.
///
/// This is everything the tree walk needs; it holds no other state, so
/// rewriting is a function of the tree and this value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewriter {
    policy: RewritePolicy,
    patches: Vec<FilePatch>,
}

impl Rewriter {
    pub fn new(policy: RewritePolicy, patches: Vec<FilePatch>) -> Self {
        Self { policy, patches }
    }

    /// The default `git` → `gut` rewriter.
    pub fn gut() -> Self {
        Self::new(RewritePolicy::gut(), FilePatch::gut_defaults())
    }

    pub fn policy(&self) -> &RewritePolicy {
        &self.policy
    }

    pub fn patches(&self) -> &[FilePatch] {
        &self.patches
    }

    /// Compute the new name for a directory entry.
    pub fn rename(&self, name: &str) -> String {
        self.policy.apply(name)
    }

    /// Rewrite the contents of the file called `file_name` (its post-rename
    /// name).
    pub fn rewrite_contents(&self, file_name: &str, contents: &str) -> String {
        let mut text = self.policy.apply(contents);
        for patch in self.patches.iter().filter(|p| p.file == file_name) {
            if !patch.from.is_empty() {
                text = text.replace(&patch.from, &patch.to);
            }
        }
        text
    }
}

/// On-disk form of a policy.
///
/// ```yaml
/// rules:
///   - from: git
///     to: gut
/// patches:
///   - file: read-cache.c
///     from: "rest[1] != 'i'"
///     to: "rest[1] != 'u'"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFile {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub patches: Vec<FilePatch>,
}

impl PolicyFile {
    /// Parse a policy from YAML text.
    pub fn parse(yaml: &str) -> Result<Self> {
        let file: PolicyFile = serde_yaml::from_str(yaml)?;
        file.validate()?;
        Ok(file)
    }

    /// Load a policy from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(Error::ConfigParse {
                message: "policy defines no rules".to_string(),
                hint: Some("Add at least one entry under 'rules:'".to_string()),
            });
        }
        if let Some(rule) = self.rules.iter().find(|r| r.from.is_empty()) {
            return Err(Error::ConfigParse {
                message: format!("rule with replacement '{}' has an empty 'from'", rule.to),
                hint: None,
            });
        }
        if let Some(patch) = self
            .patches
            .iter()
            .find(|p| p.file.is_empty() || p.file.contains(['/', '\\']))
        {
            return Err(Error::ConfigParse {
                message: format!("invalid patch file name '{}'", patch.file),
                hint: Some("Patches match a bare file name, without directories".to_string()),
            });
        }
        Ok(())
    }

    pub fn into_rewriter(self) -> Rewriter {
        Rewriter::new(RewritePolicy::new(self.rules), self.patches)
    }
}
