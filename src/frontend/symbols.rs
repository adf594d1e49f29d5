//! Symbol table and scope management for Wabbit
//!
//! Tracks variables and functions during resolution. Variables live in a chain of lexical scopes (global, function,
//! block); functions live in a separate, flat namespace that is filled before any body is resolved.
//!
//! ## Notes
//! - Scopes are never freed while the table is alive: exiting a scope only moves `current_scope` back to its parent,
//!   so symbols stay addressable by [`SymbolId`] afterwards.
//! - A variable symbol records the [`Place`] the back ends will use for it; the resolver decides the place when the
//!   variable is declared.

use std::collections::HashMap;

use crate::frontend::ast::Span;
use crate::frontend::typed_ast::{FuncId, Place, Type};

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Symbol table managing all named entities
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: usize,
    functions: HashMap<String, SymbolId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Global)],
            current_scope: 0,
            functions: HashMap::new(),
        }
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self, kind: ScopeKind) {
        let new_scope = Scope::new(Some(self.current_scope), kind);
        self.scopes.push(new_scope);
        self.current_scope = self.scopes.len() - 1;
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    /// Define a variable in the current scope.
    ///
    /// Returns the id of the symbol that already holds this name in the current scope, if any; the table is left
    /// unchanged in that case.
    pub fn define_variable(&mut self, name: &str, info: VariableInfo, span: Span) -> Result<SymbolId, SymbolId> {
        if let Some(existing) = self.lookup_local(name) {
            return Err(existing);
        }
        let id = self.push(name, SymbolKind::Variable(info), span);
        self.scopes[self.current_scope].symbols.insert(name.to_string(), id);
        Ok(id)
    }

    /// Define a function in the function namespace.
    ///
    /// Returns the id of the previous definition on a duplicate name.
    pub fn define_function(&mut self, name: &str, info: FunctionInfo, span: Span) -> Result<SymbolId, SymbolId> {
        if let Some(&existing) = self.functions.get(name) {
            return Err(existing);
        }
        let id = self.push(name, SymbolKind::Function(info), span);
        self.functions.insert(name.to_string(), id);
        Ok(id)
    }

    fn push(&mut self, name: &str, kind: SymbolKind, span: Span) -> SymbolId {
        let id = self.symbols.len();
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            span,
        });
        id
    }

    /// Look up a variable by name in the current scope chain
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope_idx = self.current_scope;
        loop {
            if let Some(&id) = self.scopes[scope_idx].symbols.get(name) {
                return Some(id);
            }
            if let Some(parent) = self.scopes[scope_idx].parent {
                scope_idx = parent;
            } else {
                break;
            }
        }
        None
    }

    /// Look up a variable only in the current scope (no parent lookup)
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current_scope].symbols.get(name).copied()
    }

    /// Look up a variable and return its info.
    pub fn variable(&self, name: &str) -> Option<&VariableInfo> {
        match &self.get(self.lookup(name)?)?.kind {
            SymbolKind::Variable(info) => Some(info),
            SymbolKind::Function(_) => None,
        }
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        let id = *self.functions.get(name)?;
        match &self.get(id)?.kind {
            SymbolKind::Function(info) => Some(info),
            SymbolKind::Variable(_) => None,
        }
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Get the current scope kind
    pub fn current_scope_kind(&self) -> ScopeKind {
        self.scopes[self.current_scope].kind
    }

    /// Check if we're at the top level (declarations here become globals)
    pub fn at_global_scope(&self) -> bool {
        self.current_scope_kind() == ScopeKind::Global
    }
}

/// A scope containing symbol definitions
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<usize>,
    pub kind: ScopeKind,
    pub symbols: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn new(parent: Option<usize>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
        }
    }
}

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// A function's parameters and the top level of its body.
    Function,
    /// Any `{ }` block: statement blocks, block expressions, `if`/`while` bodies.
    Block,
}

/// A symbol in the symbol table
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Where the name was declared; redeclaration errors point back here.
    pub span: Span,
}

/// Kind of symbol
#[derive(Debug, Clone)]
pub enum SymbolKind {
    Variable(VariableInfo),
    Function(FunctionInfo),
}

/// Variable information
#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub ty: Type,
    pub is_mutable: bool,
    pub place: Place,
}

/// Function information
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    pub id: FuncId,
    pub params: Vec<(String, Type)>,
    pub return_type: Type,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_var(place: Place) -> VariableInfo {
        VariableInfo {
            ty: Type::Int,
            is_mutable: true,
            place,
        }
    }

    #[test]
    fn test_scope_lookup() {
        let mut table = SymbolTable::new();

        // Define in global scope
        table.define_variable("x", int_var(Place::Global(0)), Span::default()).unwrap();

        // Enter a new scope
        table.enter_scope(ScopeKind::Function);
        assert_eq!(table.current_scope_kind(), ScopeKind::Function);

        // Should still find x
        assert!(table.lookup("x").is_some());

        // Define y in inner scope
        table.define_variable("y", int_var(Place::Local(0)), Span::default()).unwrap();
        assert!(table.lookup("y").is_some());

        // Exit scope
        table.exit_scope();

        // x still visible, y not
        assert!(table.lookup("x").is_some());
        assert!(table.lookup("y").is_none());
        assert!(table.at_global_scope());
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        let mut table = SymbolTable::new();
        table.define_variable("x", int_var(Place::Global(0)), Span::default()).unwrap();
        table.enter_scope(ScopeKind::Block);
        table.define_variable("x", int_var(Place::Local(3)), Span::default()).unwrap();
        assert_eq!(table.variable("x").map(|v| v.place), Some(Place::Local(3)));
        table.exit_scope();
        assert_eq!(table.variable("x").map(|v| v.place), Some(Place::Global(0)));
    }

    #[test]
    fn test_redeclaration_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();
        let first_span = Span::new(0, 1, 1, 1);
        let first = table.define_variable("x", int_var(Place::Global(0)), first_span).unwrap();
        assert_eq!(table.define_variable("x", int_var(Place::Global(1)), Span::default()), Err(first));
        assert_eq!(table.get(first).map(|s| s.span), Some(first_span));
    }

    #[test]
    fn test_functions_and_variables_use_separate_namespaces() {
        let mut table = SymbolTable::new();
        let info = FunctionInfo {
            id: 0,
            params: vec![],
            return_type: Type::Void,
        };
        table.define_function("f", info, Span::default()).unwrap();
        table.define_variable("f", int_var(Place::Global(0)), Span::default()).unwrap();
        assert_eq!(table.function("f").map(|f| f.id), Some(0));
        assert_eq!(table.variable("f").map(|v| v.ty), Some(Type::Int));
    }
}
