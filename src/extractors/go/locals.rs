use super::GoNode;
use std::collections::HashSet;
use tree_sitter::Node;

/// Names already bound by the signature and the locals found so far
struct LocalScope<'t> {
    parameters: HashSet<String>,
    named_results: HashSet<String>,
    seen: HashSet<String>,
    locals: Vec<Node<'t>>,
}

/// Local binding discovery inside function and method bodies
impl super::GoExtractor {
    /// Identifiers introduced in `body`, one node per distinct name
    ///
    /// Locals come from `:=` (including `range` clauses, type-switch aliases
    /// and `select` receives), `var`/`const` statements, and identifiers returned by name that resolve to a local or
    /// a named result. Function literals are not entered. Parameters and the
    /// receiver are left to the parameter pass.
    pub(super) fn collect_locals<'t>(&self, callable: Node<'t>, body: Node<'t>) -> Vec<Node<'t>> {
        let mut parameters = HashSet::new();
        for field in ["receiver", "parameters"] {
            if let Some(list) = callable.child_by_field_name(field) {
                for name in self.parameter_names(list) {
                    parameters.insert(self.get_node_text(name));
                }
            }
        }

        let mut named_results = HashSet::new();
        if let Some(result) = callable.child_by_field_name("result") {
            if GoNode::of(&result) == GoNode::ParameterList {
                for name in self.parameter_names(result) {
                    named_results.insert(self.get_node_text(name));
                }
            }
        }

        let mut scope = LocalScope {
            parameters,
            named_results,
            seen: HashSet::new(),
            locals: Vec::new(),
        };
        self.walk_statements(body, &mut scope);
        scope.locals
    }

    fn walk_statements<'t>(&self, node: Node<'t>, scope: &mut LocalScope<'t>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::ShortVarDeclaration => self.bind_field(child, "left", scope),
                GoNode::RangeClause | GoNode::ReceiveStatement => {
                    if GoNode::declares(&child) {
                        self.bind_field(child, "left", scope);
                    }
                }
                GoNode::TypeSwitchStatement => {
                    self.bind_field(child, "alias", scope);
                    // The initializer and the case bodies hold more bindings
                    self.walk_statements(child, scope);
                }
                GoNode::VarDeclaration | GoNode::ConstDeclaration => {
                    for ident in self.value_spec_names(child) {
                        self.bind_local(ident, scope);
                    }
                }
                GoNode::ReturnStatement => {
                    for ident in self.returned_identifiers(child) {
                        let name = self.get_node_text(ident);
                        let resolves =
                            scope.seen.contains(&name) || scope.named_results.contains(&name);
                        if resolves && scope.seen.insert(name) {
                            scope.locals.push(ident);
                        }
                    }
                }
                // Closures get their own scope
                GoNode::FuncLiteral => {}
                // Local type declarations carry no bindings of interest
                GoNode::TypeDeclaration
                | GoNode::TypeSpec
                | GoNode::TypeAlias
                | GoNode::StructType
                | GoNode::InterfaceType => {}
                GoNode::PackageClause
                | GoNode::PackageIdentifier
                | GoNode::ImportDeclaration
                | GoNode::ImportSpecList
                | GoNode::ImportSpec
                | GoNode::FunctionDeclaration
                | GoNode::MethodDeclaration
                | GoNode::VarSpecList
                | GoNode::VarSpec
                | GoNode::ConstSpecList
                | GoNode::ConstSpec
                | GoNode::ParameterList
                | GoNode::ParameterDeclaration
                | GoNode::VariadicParameterDeclaration
                | GoNode::TypeIdentifier
                | GoNode::PointerType
                | GoNode::GenericType
                | GoNode::FieldDeclarationList
                | GoNode::FieldDeclaration
                | GoNode::MethodElem
                | GoNode::Identifier
                | GoNode::Define
                | GoNode::Comment => {}
                GoNode::ExpressionList | GoNode::Other => self.walk_statements(child, scope),
            }
        }
    }

    /// Bind the identifiers of the expression list under `field`
    fn bind_field<'t>(&self, node: Node<'t>, field: &str, scope: &mut LocalScope<'t>) {
        if let Some(list) = node.child_by_field_name(field) {
            for ident in self.identifiers_in(list) {
                self.bind_local(ident, scope);
            }
        }
    }

    fn bind_local<'t>(&self, ident: Node<'t>, scope: &mut LocalScope<'t>) {
        let name = self.get_node_text(ident);
        if scope.parameters.contains(&name) {
            return;
        }
        if scope.seen.insert(name) {
            scope.locals.push(ident);
        }
    }

    /// Plain identifiers of an expression list (`a, b` in `a, b := f()`)
    fn identifiers_in<'t>(&self, list: Node<'t>) -> Vec<Node<'t>> {
        if GoNode::of(&list) == GoNode::Identifier {
            return vec![list];
        }
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|child| GoNode::of(child) == GoNode::Identifier)
            .collect()
    }

    /// Identifiers returned as whole expressions; `a + b` or `f(x)` do not count
    fn returned_identifiers<'t>(&self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut result = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match GoNode::of(&child) {
                GoNode::ExpressionList => result.extend(self.identifiers_in(child)),
                GoNode::Identifier => result.push(child),
                _ => {}
            }
        }
        result
    }
}
