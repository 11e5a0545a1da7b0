//! Plugin name extraction from documentation
//!
//! Documentation is prose, so names are recovered heuristically: several
//! independent [`NameMatcher`]s each over-approximate, their results are
//! unioned, and a denylist of known non-plugin tokens is subtracted.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static INSTALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:/plugin install )([a-z0-9-]+)").expect("valid install command regex")
});
static AT_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9-]+)@").expect("valid at-suffix regex"));
static BOLD_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([A-Za-z0-9 -]+)\*\*\s*-").expect("valid bold list item regex")
});

/// One pattern family for spotting plugin names in markdown
pub trait NameMatcher {
    /// Short label used in logs
    fn label(&self) -> &'static str;

    /// Adds every candidate found in `text` to `names`
    fn collect(&self, text: &str, names: &mut BTreeSet<String>);
}

/// `/plugin install <name>` (the phrase is matched case-insensitively)
pub struct InstallCommandMatcher;

impl NameMatcher for InstallCommandMatcher {
    fn label(&self) -> &'static str {
        "install-command"
    }

    fn collect(&self, text: &str, names: &mut BTreeSet<String>) {
        names.extend(INSTALL_RE.captures_iter(text).map(|c| c[1].to_string()));
    }
}

/// `<name>@<marketplace>` identifiers
pub struct AtSuffixMatcher;

impl NameMatcher for AtSuffixMatcher {
    fn label(&self) -> &'static str {
        "at-suffix"
    }

    fn collect(&self, text: &str, names: &mut BTreeSet<String>) {
        names.extend(AT_SUFFIX_RE.captures_iter(text).map(|c| c[1].to_string()));
    }
}

/// Featured-list items like `**Code Review** - ...`, kebab-cased
pub struct BoldListMatcher;

impl NameMatcher for BoldListMatcher {
    fn label(&self) -> &'static str {
        "bold-list"
    }

    fn collect(&self, text: &str, names: &mut BTreeSet<String>) {
        names.extend(
            BOLD_LIST_RE
                .captures_iter(text)
                .map(|c| c[1].to_lowercase().replace(' ', "-")),
        );
    }
}

/// The matchers used unless a caller supplies its own
pub fn default_matchers() -> Vec<Box<dyn NameMatcher>> {
    vec![
        Box::new(InstallCommandMatcher),
        Box::new(AtSuffixMatcher),
        Box::new(BoldListMatcher),
    ]
}

/// Plugin names recovered from one documentation text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentedPlugins(BTreeSet<String>);

impl DocumentedPlugins {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// Names from `expected` that this set does not mention, sorted
    pub fn missing<'a>(&self, expected: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let missing: BTreeSet<&str> = expected
            .into_iter()
            .filter(|name| !self.contains(name))
            .collect();
        missing.into_iter().map(str::to_string).collect()
    }
}

/// Unions matcher results and removes denylisted tokens
pub struct NameExtractor {
    matchers: Vec<Box<dyn NameMatcher>>,
    denylist: BTreeSet<String>,
}

impl NameExtractor {
    /// Creates an extractor with the default matchers
    pub fn new(denylist: BTreeSet<String>) -> Self {
        Self::with_matchers(default_matchers(), denylist)
    }

    pub fn with_matchers(matchers: Vec<Box<dyn NameMatcher>>, denylist: BTreeSet<String>) -> Self {
        Self { matchers, denylist }
    }

    pub fn denylist(&self) -> &BTreeSet<String> {
        &self.denylist
    }

    /// Extracts candidate plugin names from a documentation text
    pub fn extract(&self, text: &str) -> DocumentedPlugins {
        let mut names = BTreeSet::new();
        for matcher in &self.matchers {
            let before = names.len();
            matcher.collect(text, &mut names);
            tracing::trace!(
                matcher = matcher.label(),
                added = names.len() - before,
                "collected candidates"
            );
        }
        names.retain(|name| !self.denylist.contains(name));
        DocumentedPlugins(names)
    }
}

/// True if a documentation text looks like a plugin catalog
///
/// A catalog has a `# Plugins` heading and no `## Quickstart` heading.
pub fn is_catalog(text: &str) -> bool {
    text.contains("# Plugins") && !text.contains("## Quickstart")
}
