use super::GoNode;
use crate::extractors::base::{DeclarationKind, QualifiedName};
use tree_sitter::Node;

/// Type declaration extraction for Go (structs, interfaces, definitions, aliases)
impl super::GoExtractor {
    /// `type X ...` or a grouped `type ( ... )` block
    pub(super) fn extract_type_declaration(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(GoNode::of(&child), GoNode::TypeSpec | GoNode::TypeAlias) {
                self.extract_type_spec(child);
            }
        }
    }

    fn extract_type_spec(&mut self, node: Node) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let type_name = self.get_node_text(name_node);

        if let Some(type_node) = node.child_by_field_name("type") {
            if GoNode::of(&type_node) == GoNode::StructType {
                self.extract_struct_fields(type_node, &type_name);
            }
        }

        let qualified = QualifiedName::top_level(self.base.package.clone(), type_name);
        self.emit(name_node, DeclarationKind::Type, qualified);
    }

    /// One declaration per named field; embedded fields have no name of their own
    fn extract_struct_fields(&mut self, struct_node: Node, owner: &str) {
        let mut cursor = struct_node.walk();
        let Some(field_list) = struct_node
            .named_children(&mut cursor)
            .find(|child| GoNode::of(child) == GoNode::FieldDeclarationList)
        else {
            return;
        };

        let mut list_cursor = field_list.walk();
        for field in field_list.named_children(&mut list_cursor) {
            if GoNode::of(&field) != GoNode::FieldDeclaration {
                continue;
            }
            // X, Y float64 declares two fields
            for name_node in self.field_nodes(field, "name") {
                let name = self.get_node_text(name_node);
                let qualified = QualifiedName::member(self.base.package.clone(), owner, name);
                self.emit(name_node, DeclarationKind::Field, qualified);
            }
        }
    }
}
