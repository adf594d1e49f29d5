//! First-pass collection: register every function signature, then resolve function bodies.

use crate::frontend::ast::{FuncDecl, Program, Span, Spanned, Statement};
use crate::frontend::diagnostics::{CompileError, errors};
use crate::frontend::symbols::*;
use crate::frontend::typed_ast::{self, Type};

use super::{FunctionContext, Resolver, returns};

impl Resolver {
    /// Register all top-level function signatures in the function namespace.
    ///
    /// Parameter and return types are validated here, so a body never sees an unknown type in its signature.
    pub(crate) fn collect_functions(&mut self, program: &Program) -> Result<(), CompileError> {
        let mut next_id = 0;
        for stmt in &program.statements {
            let Statement::Func(decl) = &stmt.node else {
                continue;
            };

            let mut params = Vec::with_capacity(decl.params.len());
            for param in &decl.params {
                params.push((param.node.name.clone(), self.resolve_type_name(&param.node.ty)?));
            }
            let return_type = match &decl.return_type {
                Some(ty) => self.resolve_type_name(ty)?,
                None => Type::Void,
            };

            let info = FunctionInfo {
                id: next_id,
                params,
                return_type,
            };
            self.symbols
                .define_function(&decl.name.node, info, decl.name.span)
                .map_err(|first| self.redeclared(&decl.name.node, decl.name.span, first))?;
            tracing::debug!(name = %decl.name.node, id = next_id, %return_type, "collected function");
            next_id += 1;
        }
        Ok(())
    }

    /// Resolve one function body in a fresh frame chained to the global scope.
    pub(crate) fn resolve_function(&mut self, decl: &FuncDecl, span: Span) -> Result<typed_ast::Function, CompileError> {
        let info = self
            .symbols
            .function(&decl.name.node)
            .cloned()
            .ok_or_else(|| errors::undefined_function(&decl.name.node, decl.name.span))?;

        let outer_frame = std::mem::take(&mut self.frame);
        self.function = Some(FunctionContext {
            name: decl.name.node.clone(),
            return_type: info.return_type,
        });

        // Parameters and the body's own declarations share the function scope.
        self.symbols.enter_scope(ScopeKind::Function);
        for (param, (_, ty)) in decl.params.iter().zip(&info.params) {
            let name = Spanned::new(param.node.name.clone(), param.span);
            self.declare(&name, *ty, true)?;
        }
        let body = self.resolve_stmts(&decl.body.node.statements)?;
        self.symbols.exit_scope();

        self.function = None;
        let locals = std::mem::replace(&mut self.frame, outer_frame);

        if info.return_type != Type::Void && !returns::always_returns(&body) {
            return Err(CompileError::type_error(
                format!(
                    "function '{}' must return a value of type '{}' on every path",
                    decl.name.node, info.return_type
                ),
                decl.name.span,
            )
            .with_hint("add a `return` at the end of the function body"));
        }

        Ok(typed_ast::Function {
            name: decl.name.node.clone(),
            param_count: info.params.len(),
            locals,
            return_type: info.return_type,
            body,
            span,
        })
    }
}
