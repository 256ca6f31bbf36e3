use super::helpers::unquote_import_path;
use super::GoNode;
use crate::extractors::base::{DeclarationKind, QualifiedName};
use tree_sitter::Node;

/// One `import` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Import path without quotes
    pub path: String,
    /// Explicit local name (`_`, `.`, or an identifier)
    pub alias: Option<String>,
}

/// Extraction of import, variable, and constant specs
impl super::GoExtractor {
    /// Top-level `var`/`const` names
    pub(super) fn extract_value_declaration(&mut self, node: Node) {
        for name_node in self.value_spec_names(node) {
            let name = self.get_node_text(name_node);
            let qualified = QualifiedName::top_level(self.base.package.clone(), name);
            self.emit(name_node, DeclarationKind::Value, qualified);
        }
    }

    /// Name nodes of every spec in a `var` or `const` declaration, grouped or not
    pub(super) fn value_spec_names<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::VarSpec | GoNode::ConstSpec => {
                    names.extend(self.field_nodes(child, "name"))
                }
                GoNode::VarSpecList | GoNode::ConstSpecList => {
                    let mut nested_cursor = child.walk();
                    for nested_child in child.named_children(&mut nested_cursor) {
                        let spec = GoNode::of(&nested_child);
                        if matches!(spec, GoNode::VarSpec | GoNode::ConstSpec) {
                            names.extend(self.field_nodes(nested_child, "name"));
                        }
                    }
                }
                _ => {}
            }
        }
        names
    }

    pub(super) fn extract_import_specs(&self, node: Node) -> Vec<ImportSpec> {
        let mut specs = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::ImportSpec => specs.extend(self.extract_import_spec(child)),
                GoNode::ImportSpecList => {
                    let mut nested_cursor = child.walk();
                    for nested_child in child.named_children(&mut nested_cursor) {
                        if GoNode::of(&nested_child) == GoNode::ImportSpec {
                            specs.extend(self.extract_import_spec(nested_child));
                        }
                    }
                }
                _ => {}
            }
        }

        specs
    }

    fn extract_import_spec(&self, node: Node) -> Option<ImportSpec> {
        let path_node = node.child_by_field_name("path")?;
        let path = unquote_import_path(&self.get_node_text(path_node));
        let alias = node
            .child_by_field_name("name")
            .map(|alias| self.get_node_text(alias));
        Some(ImportSpec { path, alias })
    }
}
