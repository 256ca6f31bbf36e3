use super::GoNode;
use crate::analysis::ExclusionSet;
use crate::extractors::base::{DeclarationKind, QualifiedName};
use tree_sitter::Node;

/// Function and method extraction for Go
impl super::GoExtractor {
    pub(super) fn extract_function(&mut self, node: Node) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.get_node_text(name_node);
        let qualified = QualifiedName::top_level(self.base.package.clone(), name);
        self.emit(name_node, DeclarationKind::Function, qualified);
    }

    pub(super) fn extract_function_parameters(&mut self, node: Node) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let function = self.get_node_text(name_node);
        if !self.is_renameable(&function) {
            return;
        }
        let Some(params) = node.child_by_field_name("parameters") else {
            return;
        };

        for param in self.parameter_names(params) {
            let name = self.get_node_text(param);
            let qualified = QualifiedName::local(self.base.package.clone(), function.clone(), name);
            self.emit(param, DeclarationKind::Parameter, qualified);
        }
    }

    /// Method declaration (if any) plus every local of the body
    ///
    /// Functions and methods whose name is in the exclusion set are skipped
    /// entirely, locals included.
    pub(super) fn extract_callable_body(&mut self, node: Node, exclusions: &ExclusionSet) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.get_node_text(name_node);
        if exclusions.contains(&name) {
            return;
        }

        let receiver = match GoNode::of(&node) {
            GoNode::MethodDeclaration => match self.extract_receiver(node) {
                Some(receiver) => Some(receiver),
                // Unsupported receiver shape: nothing in this method can be qualified
                None => return,
            },
            _ => None,
        };

        if let Some(receiver) = &receiver {
            let qualified =
                QualifiedName::method(self.base.package.clone(), receiver.clone(), name.clone());
            self.emit(name_node, DeclarationKind::Method, qualified);
        }

        if let Some(body) = node.child_by_field_name("body") {
            let locals = self.collect_locals(node, body);
            for local in locals {
                let local_name = self.get_node_text(local);
                let qualified = match &receiver {
                    Some(receiver) => QualifiedName::method_local(
                        self.base.package.clone(),
                        receiver.clone(),
                        name.clone(),
                        local_name,
                    ),
                    None => QualifiedName::local(self.base.package.clone(), name.clone(), local_name),
                };
                self.emit(local, DeclarationKind::Local, qualified);
            }
        }
    }
}
