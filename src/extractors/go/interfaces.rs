use super::GoNode;
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Interface (capability contract) method discovery
impl super::GoExtractor {
    pub(super) fn collect_interface_methods(&self, node: Node, names: &mut BTreeSet<String>) {
        if GoNode::of(&node) == GoNode::InterfaceType {
            let mut cursor = node.walk();
            for element in node.named_children(&mut cursor) {
                if GoNode::of(&element) == GoNode::MethodElem {
                    if let Some(name) = element.child_by_field_name("name") {
                        names.insert(self.get_node_text(name));
                    }
                }
            }
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect_interface_methods(child, names);
        }
    }
}
