//! Domain entities: documentation nodes and export classification

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

static CAPITALISED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("valid regex"));
static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

/// Classification of an exported entity.
///
/// Anything the manifest does not describe as a module, function or class
/// lands in `Unknown`, whose category is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Module,
    Function,
    Class,
    Unknown,
}

impl ExportKind {
    /// Category used as output file prefix (`module_`, `function_`, ...).
    pub fn category(&self) -> &'static str {
        match self {
            ExportKind::Module => "module",
            ExportKind::Function => "function",
            ExportKind::Class => "class",
            ExportKind::Unknown => "",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Unknown => f.write_str("unknown"),
            kind => f.write_str(kind.category()),
        }
    }
}

/// One documented entity of the export tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocNode {
    /// Qualified identifier (module path for modules, bare name otherwise)
    pub name: String,
    /// Classification of the underlying entity
    pub kind: ExportKind,
    /// Destination page; only meaningful for top-level nodes
    pub output_path: PathBuf,
    /// Attached description, empty when absent
    pub docstring: String,
    /// Markdown heading depth
    pub heading_level: usize,
    /// Nested exports, in declared order
    pub children: Vec<DocNode>,
}

impl DocNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DocNode::node_count).sum::<usize>()
    }

    /// Heading marker: `#` repeated `heading_level` times.
    pub fn heading_marker(&self) -> String {
        "#".repeat(self.heading_level)
    }
}

/// Convert an identifier to snake_case.
///
/// `HTTPServer` → `http_server`, `getHTTPResponseCode` → `get_http_response_code`,
/// `my-module` → `my_module`.
pub fn to_snake_case(s: &str) -> String {
    let s1 = CAPITALISED_WORD.replace_all(s, "${1}_${2}");
    let s2 = LOWER_TO_UPPER.replace_all(&s1, "${1}_${2}");
    s2.replace('-', "_").to_lowercase()
}

/// Expand environment variables in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
