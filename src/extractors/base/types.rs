// Base Extractor Types
//
// Data structures shared by every extraction pass: declarations, their
// structured qualified names, and the rename candidates built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of named program entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Package,
    Function,
    Type,
    Field,
    /// Top-level `var` or `const`
    Value,
    Method,
    Local,
    Parameter,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeclarationKind::Package => "package",
            DeclarationKind::Function => "function",
            DeclarationKind::Type => "type",
            DeclarationKind::Field => "field",
            DeclarationKind::Value => "value",
            DeclarationKind::Method => "method",
            DeclarationKind::Local => "local",
            DeclarationKind::Parameter => "parameter",
        };
        write!(f, "{}", label)
    }
}

/// Receiver type a method is bound to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Receiver {
    pub type_name: String,
    /// `*T` rather than `T`
    pub pointer: bool,
}

impl Receiver {
    pub fn new(type_name: impl Into<String>, pointer: bool) -> Self {
        Self {
            type_name: type_name.into(),
            pointer,
        }
    }
}

/// Enclosing declaration of a qualified name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Declared at package level
    Package,
    /// Field of a struct type
    Member { owner: String },
    /// Method bound to a receiver type
    Method { receiver: Receiver },
    /// Local binding or parameter inside a function or method body
    Local {
        function: String,
        receiver: Option<Receiver>,
    },
}

/// Structured location of a declaration
///
/// Kept as separate components for the whole run; names are never joined
/// into a delimited string and split back apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Import path of the package, `/`-separated
    pub package: String,
    pub scope: Scope,
    pub name: String,
}

impl QualifiedName {
    pub fn top_level(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            scope: Scope::Package,
            name: name.into(),
        }
    }

    pub fn member(
        package: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            scope: Scope::Member {
                owner: owner.into(),
            },
            name: name.into(),
        }
    }

    pub fn method(package: impl Into<String>, receiver: Receiver, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            scope: Scope::Method { receiver },
            name: name.into(),
        }
    }

    /// Local binding of a package-level function
    pub fn local(
        package: impl Into<String>,
        function: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            scope: Scope::Local {
                function: function.into(),
                receiver: None,
            },
            name: name.into(),
        }
    }

    /// Local binding of a method
    pub fn method_local(
        package: impl Into<String>,
        receiver: Receiver,
        method: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            scope: Scope::Local {
                function: method.into(),
                receiver: Some(receiver),
            },
            name: name.into(),
        }
    }

    /// Number of structural components (package, enclosing declarations, name)
    ///
    /// A method local counts its receiver and its method, so it sorts ahead of
    /// the method it lives in.
    pub fn depth(&self) -> usize {
        match self.scope {
            Scope::Package => 2,
            Scope::Member { .. } | Scope::Method { .. } => 3,
            Scope::Local { receiver: None, .. } => 3,
            Scope::Local {
                receiver: Some(_), ..
            } => 4,
        }
    }

    /// Name of the enclosing declaration, if any
    pub fn enclosing(&self) -> Option<&str> {
        match &self.scope {
            Scope::Package => None,
            Scope::Member { owner } => Some(owner),
            Scope::Method { receiver } => Some(&receiver.type_name),
            Scope::Local { function, .. } => Some(function),
        }
    }
}

/// Renders the Go tool query form: `"pkg".Name`, `"pkg".T.F`, `(*"pkg".T).M`, `"pkg".F::x`
impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::Package => write!(f, "\"{}\".{}", self.package, self.name),
            Scope::Member { owner } => write!(f, "\"{}\".{}.{}", self.package, owner, self.name),
            Scope::Method { receiver } => {
                write_receiver(f, &self.package, receiver)?;
                write!(f, ".{}", self.name)
            }
            Scope::Local {
                function,
                receiver: None,
            } => write!(f, "\"{}\".{}::{}", self.package, function, self.name),
            Scope::Local {
                function,
                receiver: Some(receiver),
            } => {
                write_receiver(f, &self.package, receiver)?;
                write!(f, ".{}::{}", function, self.name)
            }
        }
    }
}

fn write_receiver(f: &mut fmt::Formatter<'_>, package: &str, receiver: &Receiver) -> fmt::Result {
    if receiver.pointer {
        write!(f, "(*\"{}\".{})", package, receiver.type_name)
    } else {
        write!(f, "\"{}\".{}", package, receiver.type_name)
    }
}

/// One named program entity found in a compilation unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: QualifiedName,
    /// Unit the declaration came from, relative to the source root
    pub file_path: String,
    /// 1-based line of the declaring identifier
    pub line: u32,
}

/// A proposed rename awaiting ambiguity resolution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenameCandidate {
    pub old: QualifiedName,
    pub new_name: String,
}

impl RenameCandidate {
    pub fn new(old: QualifiedName, new_name: impl Into<String>) -> Self {
        Self {
            old,
            new_name: new_name.into(),
        }
    }
}
