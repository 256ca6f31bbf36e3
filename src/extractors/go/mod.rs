mod functions;
mod helpers;
mod interfaces;
mod locals;
mod nodes;
mod specs;
mod types;

pub use nodes::GoNode;
pub use specs::ImportSpec;

use crate::analysis::ExclusionSet;
use crate::config::ObfuscatorConfig;
use crate::extractors::base::{BaseExtractor, Declaration, SourceUnit};
use std::collections::BTreeSet;
use std::ops::Range;
use tree_sitter::{Node, Tree};

/// Go declaration extractor covering every rename pass:
/// - Top-level functions, types, struct fields, vars and consts
/// - Methods (qualified by receiver) and the locals of every body
/// - Parameters of top-level functions
/// - Interface method names and import paths for the capability scan
pub struct GoExtractor {
    base: BaseExtractor,
    entry_function: String,
    initializer_function: String,
}

impl GoExtractor {
    pub fn new(unit: &SourceUnit, config: &ObfuscatorConfig) -> Self {
        Self {
            base: BaseExtractor::new(
                unit.package.clone(),
                unit.relative_path.clone(),
                unit.content.clone(),
            ),
            entry_function: config.entry_function.clone(),
            initializer_function: config.initializer_function.clone(),
        }
    }

    /// First pass: functions, types (plus their fields), vars and consts
    pub fn extract_top_level(&mut self, tree: &Tree) -> Vec<Declaration> {
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::FunctionDeclaration => self.extract_function(child),
                GoNode::TypeDeclaration => self.extract_type_declaration(child),
                GoNode::VarDeclaration | GoNode::ConstDeclaration => {
                    self.extract_value_declaration(child)
                }
                // Methods belong to the second pass
                _ => {}
            }
        }
        self.base.take_declarations()
    }

    /// Second pass: methods not named by any interface, plus body locals
    pub fn extract_methods_and_locals(
        &mut self,
        tree: &Tree,
        exclusions: &ExclusionSet,
    ) -> Vec<Declaration> {
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::FunctionDeclaration | GoNode::MethodDeclaration => {
                    self.extract_callable_body(child, exclusions)
                }
                _ => {}
            }
        }
        self.base.take_declarations()
    }

    /// Third pass: parameters of top-level functions
    pub fn extract_parameters(&mut self, tree: &Tree) -> Vec<Declaration> {
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if GoNode::of(&child) == GoNode::FunctionDeclaration {
                self.extract_function_parameters(child);
            }
        }
        self.base.take_declarations()
    }

    /// Method names of every interface type in the unit, named or anonymous
    pub fn extract_interface_methods(&self, tree: &Tree) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_interface_methods(tree.root_node(), &mut names);
        names
    }

    pub fn extract_imports(&self, tree: &Tree) -> Vec<ImportSpec> {
        let root = tree.root_node();
        let mut imports = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if GoNode::of(&child) == GoNode::ImportDeclaration {
                imports.extend(self.extract_import_specs(child));
            }
        }
        imports
    }

    /// Declared package name and its byte range in the unit
    pub fn declared_package(&self, tree: &Tree) -> Option<(String, Range<usize>)> {
        package_identifier(tree.root_node())
            .map(|node| (self.get_node_text(node), node.start_byte()..node.end_byte()))
    }

    /// Names the extractor never proposes: blanks and reserved functions
    fn is_renameable(&self, name: &str) -> bool {
        !name.is_empty()
            && name != "_"
            && name != self.entry_function
            && name != self.initializer_function
    }
}

fn package_identifier(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|child| GoNode::of(child) == GoNode::PackageClause)?;
    let mut clause_cursor = clause.walk();
    let identifier = clause
        .named_children(&mut clause_cursor)
        .find(|child| GoNode::of(child) == GoNode::PackageIdentifier);
    identifier
}
