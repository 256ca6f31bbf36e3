use tree_sitter::Node;

/// Closed set of Go syntax node kinds the passes care about
///
/// Every dispatch over syntax nodes goes through this enum; kinds outside the
/// set fall into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoNode {
    // Top-level declarations
    PackageClause,
    PackageIdentifier,
    ImportDeclaration,
    ImportSpecList,
    ImportSpec,
    FunctionDeclaration,
    MethodDeclaration,
    TypeDeclaration,
    TypeSpec,
    TypeAlias,
    VarDeclaration,
    VarSpecList,
    VarSpec,
    ConstDeclaration,
    ConstSpecList,
    ConstSpec,

    // Signatures
    ParameterList,
    ParameterDeclaration,
    VariadicParameterDeclaration,

    // Types
    TypeIdentifier,
    PointerType,
    GenericType,
    StructType,
    FieldDeclarationList,
    FieldDeclaration,
    InterfaceType,
    /// `method_spec` in older grammar releases
    MethodElem,

    // Statements and expressions
    ShortVarDeclaration,
    ReturnStatement,
    RangeClause,
    TypeSwitchStatement,
    ReceiveStatement,
    FuncLiteral,
    ExpressionList,
    Identifier,
    /// The `:=` token
    Define,

    Comment,
    Other,
}

impl GoNode {
    pub fn of(node: &Node) -> Self {
        match node.kind() {
            "package_clause" => GoNode::PackageClause,
            "package_identifier" => GoNode::PackageIdentifier,
            "import_declaration" => GoNode::ImportDeclaration,
            "import_spec_list" => GoNode::ImportSpecList,
            "import_spec" => GoNode::ImportSpec,
            "function_declaration" => GoNode::FunctionDeclaration,
            "method_declaration" => GoNode::MethodDeclaration,
            "type_declaration" => GoNode::TypeDeclaration,
            "type_spec" => GoNode::TypeSpec,
            "type_alias" => GoNode::TypeAlias,
            "var_declaration" => GoNode::VarDeclaration,
            "var_spec_list" => GoNode::VarSpecList,
            "var_spec" => GoNode::VarSpec,
            "const_declaration" => GoNode::ConstDeclaration,
            "const_spec_list" => GoNode::ConstSpecList,
            "const_spec" => GoNode::ConstSpec,
            "parameter_list" => GoNode::ParameterList,
            "parameter_declaration" => GoNode::ParameterDeclaration,
            "variadic_parameter_declaration" => GoNode::VariadicParameterDeclaration,
            "type_identifier" => GoNode::TypeIdentifier,
            "pointer_type" => GoNode::PointerType,
            "generic_type" => GoNode::GenericType,
            "struct_type" => GoNode::StructType,
            "field_declaration_list" => GoNode::FieldDeclarationList,
            "field_declaration" => GoNode::FieldDeclaration,
            "interface_type" => GoNode::InterfaceType,
            "method_elem" | "method_spec" => GoNode::MethodElem,
            "short_var_declaration" => GoNode::ShortVarDeclaration,
            "return_statement" => GoNode::ReturnStatement,
            "range_clause" => GoNode::RangeClause,
            "type_switch_statement" => GoNode::TypeSwitchStatement,
            "receive_statement" => GoNode::ReceiveStatement,
            "func_literal" => GoNode::FuncLiteral,
            "expression_list" => GoNode::ExpressionList,
            "identifier" => GoNode::Identifier,
            ":=" => GoNode::Define,
            "comment" => GoNode::Comment,
            _ => GoNode::Other,
        }
    }

    /// True when any direct child of `node` is the `:=` token
    pub fn declares(node: &Node) -> bool {
        let mut cursor = node.walk();
        let declares = node
            .children(&mut cursor)
            .any(|child| GoNode::of(&child) == GoNode::Define);
        declares
    }
}
