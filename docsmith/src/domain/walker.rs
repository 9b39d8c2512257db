//! Export walker: builds the documentation tree from declared exports.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::entities::{to_snake_case, DocNode, ExportKind};
use crate::domain::error::DomainError;
use crate::domain::manifest::{classify, ApiManifest};

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Default nesting limit for module recursion.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Walks a manifest's export lists and produces `DocNode` trees.
///
/// The walker holds no state between calls: every `build_tree` starts from
/// an empty module chain, so repeated builds over the same manifest yield
/// identical trees.
pub struct ExportWalker<'a> {
    manifest: &'a ApiManifest,
    api_dir: PathBuf,
    max_depth: usize,
}

impl<'a> ExportWalker<'a> {
    pub fn new(manifest: &'a ApiManifest, api_dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            api_dir: api_dir.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build one node per export of `container`, in declared order.
    ///
    /// Sub-modules recurse with `level + 1`. Fails if an export has no
    /// member binding, a referenced module is not declared, a module is
    /// re-entered while it is being expanded, or nesting exceeds the
    /// configured maximum depth. `level` is the Markdown heading depth of
    /// the top-level nodes and must be at least 1.
    pub fn build_tree(&self, container: &str, level: usize) -> TreeResult<Vec<DocNode>> {
        if level == 0 {
            return Err(DomainError::InvalidHeadingLevel(level));
        }
        let mut chain = Vec::new();
        self.walk(container, level, &mut chain)
    }

    fn walk(
        &self,
        container: &str,
        level: usize,
        chain: &mut Vec<String>,
    ) -> TreeResult<Vec<DocNode>> {
        if chain.iter().any(|m| m == container) {
            let mut cycle = chain.clone();
            cycle.push(container.to_string());
            return Err(DomainError::CycleDetected { chain: cycle });
        }
        if chain.len() >= self.max_depth {
            return Err(DomainError::DepthExceeded {
                module: container.to_string(),
                max_depth: self.max_depth,
            });
        }

        debug!("walk: module={}, level={}", container, level);
        let module = self.manifest.module(container)?;
        chain.push(container.to_string());

        let mut docs = Vec::with_capacity(module.exports.len());
        for export in &module.exports {
            debug!("walk: export={}", export);
            let member = module
                .members
                .get(export)
                .ok_or_else(|| DomainError::UnresolvedExport {
                    container: container.to_string(),
                    name: export.clone(),
                })?;

            let kind = classify(member);
            let node = if kind == ExportKind::Module {
                let target = member.module_target(container, export);
                let sub_module = self.manifest.module(&target)?;
                let children = self.walk(&target, level + 1, chain)?;
                DocNode {
                    output_path: self.output_path(kind, &to_snake_case(export)),
                    docstring: sub_module
                        .doc
                        .clone()
                        .or_else(|| member.doc.clone())
                        .unwrap_or_default(),
                    name: target,
                    kind,
                    heading_level: level,
                    children,
                }
            } else {
                let name = member.name.clone().unwrap_or_else(|| export.clone());
                DocNode {
                    output_path: self.output_path(kind, &name),
                    docstring: member.doc.clone().unwrap_or_default(),
                    name,
                    kind,
                    heading_level: level,
                    children: Vec::new(),
                }
            };
            docs.push(node);
        }

        chain.pop();
        Ok(docs)
    }

    fn output_path(&self, kind: ExportKind, slug: &str) -> PathBuf {
        self.api_dir.join(format!("{}_{}.md", kind.category(), slug))
    }
}
