//! Doc tree renderer: turns a `DocNode` subtree into one Markdown string.

use tera::Context;
use tracing::info;

use crate::application::templates::{TemplateEngine, DOCSTRING};
use crate::application::ApplicationResult;
use crate::domain::DocNode;

/// Renders documentation trees through the `docstring.md` template.
pub struct DocTreeRenderer<'a> {
    templates: &'a TemplateEngine,
}

impl<'a> DocTreeRenderer<'a> {
    pub fn new(templates: &'a TemplateEngine) -> Self {
        Self { templates }
    }

    /// Render `node` with its children embedded.
    ///
    /// Children are rendered first, in order, and joined with a single
    /// newline; the result is bound as `sub` in the node's own template.
    pub fn render(&self, node: &DocNode) -> ApplicationResult<String> {
        info!("Writing docstring from export: {}", node.name);

        let sub = node
            .children
            .iter()
            .map(|child| self.render(child))
            .collect::<ApplicationResult<Vec<_>>>()?
            .join("\n");

        let mut context = Context::new();
        context.insert("name", &node.name);
        context.insert("docstring", &node.docstring);
        context.insert("heading_level", &node.heading_marker());
        context.insert("sub", &sub);

        self.templates.render(DOCSTRING, &context)
    }
}
