use super::GoNode;
use crate::extractors::base::{DeclarationKind, QualifiedName, Receiver};
use tree_sitter::Node;

/// Helper methods for Go-specific utilities and node text extraction
impl super::GoExtractor {
    /// Get node text (helper method)
    pub(super) fn get_node_text(&self, node: Node) -> String {
        self.base.get_node_text(&node)
    }

    /// Record a declaration unless its name is blank or reserved
    pub(super) fn emit(&mut self, node: Node, kind: DeclarationKind, name: QualifiedName) {
        if self.is_renameable(&name.name) {
            self.base.create_declaration(&node, kind, name);
        }
    }

    /// All children attached under `field`, e.g. every name of `a, b int`
    pub(super) fn field_nodes<'t>(&self, node: Node<'t>, field: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor).collect()
    }

    /// Receiver type of a method declaration
    ///
    /// Handles `T`, `*T`, `T[P]` and `*T[P]`; anything else yields `None`.
    pub(super) fn extract_receiver(&self, method: Node) -> Option<Receiver> {
        let receiver_list = method.child_by_field_name("receiver")?;
        let mut cursor = receiver_list.walk();
        let param = receiver_list
            .named_children(&mut cursor)
            .find(|child| GoNode::of(child) == GoNode::ParameterDeclaration)?;
        let type_node = param.child_by_field_name("type")?;

        match GoNode::of(&type_node) {
            GoNode::PointerType => {
                let mut inner_cursor = type_node.walk();
                let inner = type_node.named_children(&mut inner_cursor).next()?;
                self.receiver_type_name(inner)
                    .map(|name| Receiver::new(name, true))
            }
            _ => self
                .receiver_type_name(type_node)
                .map(|name| Receiver::new(name, false)),
        }
    }

    fn receiver_type_name(&self, node: Node) -> Option<String> {
        match GoNode::of(&node) {
            GoNode::TypeIdentifier => Some(self.get_node_text(node)),
            GoNode::GenericType => {
                let base = node.child_by_field_name("type")?;
                (GoNode::of(&base) == GoNode::TypeIdentifier).then(|| self.get_node_text(base))
            }
            _ => None,
        }
    }

    /// Names bound by a parameter list (`parameters`, `receiver`, or `result`)
    pub(super) fn parameter_names<'t>(&self, list: Node<'t>) -> Vec<Node<'t>> {
        let mut names = Vec::new();
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::ParameterDeclaration | GoNode::VariadicParameterDeclaration => {
                    names.extend(self.field_nodes(child, "name"));
                }
                _ => {}
            }
        }
        names
    }
}

/// Strip the quotes from an import path literal (`"fmt"` or `` `fmt` ``)
pub(super) fn unquote_import_path(literal: &str) -> String {
    literal.trim().trim_matches(|c| c == '"' || c == '`').to_string()
}
