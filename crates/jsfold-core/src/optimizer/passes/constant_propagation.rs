//! Constant Propagation and Folding Pass
//!
//! Substitutes reads of variables and array slots whose value is a known
//! constant literal, then folds binary expressions whose operands both
//! became constants.
//!
//! # Examples
//!
//! ```js
//! // Before:
//! var x = 2;
//! var y = 3;
//! var a = [1, 2, 3];
//! print(x + y, a[1]);
//!
//! // After:
//! var x = 2;
//! var y = 3;
//! var a = [1, 2, 3];
//! print(5, 2);
//! ```
//!
//! # Model
//!
//! Tracking is straight-line and flat: one name space for the whole
//! program, no merging at control-flow joins, no loop fixed points. Every
//! node is visited once, in source order, expressions post-order.
//!
//! Identifiers and bracket accesses are visited either as reads
//! (propagation) or as writes (the target of `=`, `++`/`--`, `delete`,
//! `for-in`), where any stale knowledge about the location is dropped.
//!
//! Syntax outside the ES5 subset the rules cover aborts the pass with
//! [`FoldError::UnsupportedSyntax`]; it is never skipped silently.

use crate::config::FoldConfig;
use crate::error::FoldError;
use crate::optimizer::env::{ConstEnv, IndexMap};
use crate::optimizer::trace::DebugTrace;
use crate::optimizer::{eval, kind, literal};
use swc_ecma_ast::{
    ArrayLit, AssignExpr, AssignOp, BinExpr, BinaryOp, BlockStmt, Callee, Decl, Expr,
    ExprOrSpread, ForHead, Function, Ident, Invalid, Lit, MemberExpr, MemberProp, ObjectLit,
    ParenExpr, Pat, PatOrExpr, Prop, PropName, PropOrSpread, Script, Stmt, SwitchCase, UnaryOp,
    VarDecl, VarDeclOrExpr, VarDeclarator,
};
use swc_ecma_quote::swc_common::{Span, Spanned};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, FoldError>;

/// How an identifier or bracket access is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FoldStats {
    /// Reads replaced by a known constant.
    pub propagated: usize,
    /// Binary expressions replaced by their result.
    pub folded: usize,
    /// Environment entries dropped because their location was written.
    pub invalidated: usize,
}

#[derive(Debug, Default)]
pub struct PassReport {
    pub stats: FoldStats,
    /// Debug trace lines; empty unless tracing was enabled.
    pub trace: Vec<String>,
}

impl PassReport {
    pub fn changed(&self) -> bool {
        self.stats.propagated > 0 || self.stats.folded > 0
    }
}

/// Resolved left-hand side of an assignment.
enum AssignTarget {
    Name(String),
    Slot {
        /// `None` when the base is not a plain identifier.
        base: Option<String>,
        /// `None` when the index is not a constant literal.
        key: Option<String>,
    },
}

/// One run over one script. The pass owns its environment and is consumed
/// by [`ConstantPropagationPass::run`], so knowledge never leaks from one
/// program into the next.
pub struct ConstantPropagationPass {
    env: ConstEnv,
    config: FoldConfig,
    trace: DebugTrace,
    stats: FoldStats,
}

impl ConstantPropagationPass {
    pub fn new(config: FoldConfig) -> Self {
        Self {
            env: ConstEnv::new(),
            trace: DebugTrace::new(config.debug_trace),
            config,
            stats: FoldStats::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        "constant-propagation"
    }

    pub fn run(mut self, script: &mut Script) -> Result<PassReport> {
        self.trace.enter("Script");
        self.visit_stmts(&mut script.body)?;
        self.trace.exit();

        debug!(
            propagated = self.stats.propagated,
            folded = self.stats.folded,
            invalidated = self.stats.invalidated,
            "{} finished",
            self.name()
        );

        Ok(PassReport {
            stats: self.stats,
            trace: self.trace.into_lines(),
        })
    }

    // ----- statements -----

    fn visit_stmts(&mut self, stmts: &mut [Stmt]) -> Result<()> {
        for stmt in stmts {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) -> Result<()> {
        self.trace.enter(kind::stmt_kind(stmt));

        match stmt {
            Stmt::Block(block) => self.visit_stmts(&mut block.stmts)?,
            Stmt::Empty(_) | Stmt::Debugger(_) | Stmt::Break(_) | Stmt::Continue(_) => {}
            Stmt::With(with) => {
                self.visit_expr(&mut with.obj)?;
                self.visit_stmt(&mut with.body)?;
            }
            Stmt::Return(ret) => {
                if let Some(arg) = &mut ret.arg {
                    self.visit_expr(arg)?;
                }
            }
            Stmt::Labeled(labeled) => self.visit_stmt(&mut labeled.body)?,
            Stmt::If(if_stmt) => {
                self.visit_expr(&mut if_stmt.test)?;
                self.visit_stmt(&mut if_stmt.cons)?;
                if let Some(alt) = &mut if_stmt.alt {
                    self.visit_stmt(alt)?;
                }
            }
            Stmt::Switch(switch) => {
                self.visit_expr(&mut switch.discriminant)?;
                for case in &mut switch.cases {
                    self.visit_switch_case(case)?;
                }
            }
            Stmt::Throw(throw) => self.visit_expr(&mut throw.arg)?,
            Stmt::Try(try_stmt) => {
                self.visit_block(&mut try_stmt.block)?;
                if let Some(handler) = &mut try_stmt.handler {
                    self.trace.enter("CatchClause");
                    self.visit_block(&mut handler.body)?;
                    self.trace.exit();
                }
                if let Some(finalizer) = &mut try_stmt.finalizer {
                    self.visit_block(finalizer)?;
                }
            }
            Stmt::While(while_stmt) => {
                self.visit_expr(&mut while_stmt.test)?;
                self.visit_stmt(&mut while_stmt.body)?;
            }
            Stmt::DoWhile(do_while) => {
                // body runs before the first test
                self.visit_stmt(&mut do_while.body)?;
                self.visit_expr(&mut do_while.test)?;
            }
            Stmt::For(for_stmt) => {
                match &mut for_stmt.init {
                    Some(VarDeclOrExpr::VarDecl(var)) => {
                        self.trace.enter("VarDecl");
                        self.visit_var_decl(var)?;
                        self.trace.exit();
                    }
                    Some(VarDeclOrExpr::Expr(init)) => self.visit_expr(init)?,
                    None => {}
                }
                if let Some(test) = &mut for_stmt.test {
                    self.visit_expr(test)?;
                }
                if let Some(update) = &mut for_stmt.update {
                    self.visit_expr(update)?;
                }
                self.visit_stmt(&mut for_stmt.body)?;
            }
            Stmt::ForIn(for_in) => {
                self.visit_for_head(&mut for_in.left, for_in.span)?;
                self.visit_expr(&mut for_in.right)?;
                self.visit_stmt(&mut for_in.body)?;
            }
            Stmt::ForOf(for_of) => return Err(unsupported("ForOfStmt", for_of.span)),
            Stmt::Decl(decl) => match decl {
                Decl::Var(var) => self.visit_var_decl(var)?,
                Decl::Fn(fn_decl) => self.visit_function(&mut fn_decl.function)?,
                other => return Err(unsupported(kind::decl_kind(other), other.span())),
            },
            Stmt::Expr(expr_stmt) => self.visit_expr(&mut expr_stmt.expr)?,
        }

        self.trace.exit();
        Ok(())
    }

    fn visit_block(&mut self, block: &mut BlockStmt) -> Result<()> {
        self.trace.enter("BlockStmt");
        self.visit_stmts(&mut block.stmts)?;
        self.trace.exit();
        Ok(())
    }

    fn visit_switch_case(&mut self, case: &mut SwitchCase) -> Result<()> {
        self.trace.enter("SwitchCase");
        if let Some(test) = &mut case.test {
            self.visit_expr(test)?;
        }
        self.visit_stmts(&mut case.cons)?;
        self.trace.exit();
        Ok(())
    }

    fn visit_for_head(&mut self, head: &mut ForHead, span: Span) -> Result<()> {
        match head {
            ForHead::VarDecl(var) => {
                self.trace.enter("VarDecl");
                self.visit_var_decl(var)?;
                self.trace.exit();
                Ok(())
            }
            ForHead::Pat(pat) => match &mut **pat {
                Pat::Ident(binding) => {
                    self.trace.enter("Ident");
                    self.forget_name(&binding.id.sym);
                    self.trace.exit();
                    Ok(())
                }
                Pat::Expr(expr) => self.visit_expr_in(expr, Access::Write),
                other => Err(unsupported(kind::pat_kind(other), other.span())),
            },
            #[allow(unreachable_patterns)]
            _ => Err(unsupported("ForHead", span)),
        }
    }

    /// Function names and parameters are bindings, not reads; only the body
    /// is rewritten.
    fn visit_function(&mut self, function: &mut Function) -> Result<()> {
        if let Some(body) = &mut function.body {
            self.visit_block(body)?;
        }
        Ok(())
    }

    // ----- declarations -----

    fn visit_var_decl(&mut self, var: &mut VarDecl) -> Result<()> {
        for declarator in &mut var.decls {
            self.visit_var_declarator(declarator)?;
        }
        Ok(())
    }

    fn visit_var_declarator(&mut self, declarator: &mut VarDeclarator) -> Result<()> {
        self.trace.enter("VarDeclarator");

        let name = match &declarator.name {
            Pat::Ident(binding) => binding.id.sym.to_string(),
            other => return Err(unsupported(kind::pat_kind(other), other.span())),
        };
        self.trace.leaf("Ident");

        if let Some(init) = &mut declarator.init {
            self.visit_expr(init)?;
        }

        match declarator.init.as_deref() {
            Some(Expr::Array(array)) => {
                let table = array_table(array);
                trace!(name = %name, slots = table.len(), "recorded constant array");
                if self.env.drop_scalar(&name) {
                    self.stats.invalidated += 1;
                }
                self.env.record_array(&name, table);
            }
            Some(init) => {
                let aliased = match init {
                    Expr::Ident(source) => self.env.alias_array(&name, &source.sym),
                    _ => false,
                };
                if !aliased {
                    self.env.unbind_array(&name);
                }
                self.bind_scalar(&name, literal::constant_literal(init).cloned());
            }
            None => self.forget_name(&name),
        }

        self.trace.exit();
        Ok(())
    }

    // ----- expressions -----

    fn visit_expr(&mut self, expr: &mut Expr) -> Result<()> {
        self.visit_expr_in(expr, Access::Read)
    }

    /// Rewrites `expr` in place. `access` only matters for identifiers and
    /// member accesses.
    fn visit_expr_in(&mut self, expr: &mut Expr, access: Access) -> Result<()> {
        self.trace.enter(kind::expr_kind(expr));

        let replacement = match expr {
            Expr::Ident(ident) => match access {
                Access::Read => self.resolve_read_ident(ident),
                Access::Write => {
                    self.resolve_write_ident(ident);
                    None
                }
            },
            Expr::Member(member) => self.visit_member(member, access)?,
            Expr::Bin(bin) => self.visit_binary(bin)?,
            Expr::Assign(assign) => {
                self.visit_assign(assign)?;
                None
            }
            Expr::Update(update) => {
                self.visit_expr_in(&mut update.arg, Access::Write)?;
                None
            }
            Expr::Unary(unary) => {
                let arg_access = if unary.op == UnaryOp::Delete {
                    Access::Write
                } else {
                    Access::Read
                };
                self.visit_expr_in(&mut unary.arg, arg_access)?;
                if arg_access == Access::Read {
                    parenthesize_negative(&mut unary.arg);
                }
                None
            }
            Expr::Paren(paren) => {
                self.visit_expr_in(&mut paren.expr, access)?;
                match access {
                    Access::Read => literal::constant_literal(&paren.expr)
                        .map(|lit| literal::relocated(lit, paren.span)),
                    Access::Write => None,
                }
            }
            Expr::Array(array) => {
                self.visit_elements(array)?;
                None
            }
            Expr::Object(object) => {
                self.visit_object(object)?;
                None
            }
            Expr::Fn(fn_expr) => {
                self.visit_function(&mut fn_expr.function)?;
                None
            }
            Expr::Cond(cond) => {
                self.visit_expr(&mut cond.test)?;
                self.visit_expr(&mut cond.cons)?;
                self.visit_expr(&mut cond.alt)?;
                None
            }
            Expr::Call(call) => {
                match &mut call.callee {
                    Callee::Expr(callee) => {
                        self.visit_expr(callee)?;
                        parenthesize_negative(callee);
                    }
                    Callee::Super(sup) => return Err(unsupported("Super", sup.span)),
                    Callee::Import(import) => return Err(unsupported("Import", import.span)),
                }
                self.visit_args(&mut call.args)?;
                None
            }
            Expr::New(new) => {
                self.visit_expr(&mut new.callee)?;
                parenthesize_negative(&mut new.callee);
                if let Some(args) = &mut new.args {
                    self.visit_args(args)?;
                }
                None
            }
            Expr::Seq(seq) => {
                for item in &mut seq.exprs {
                    self.visit_expr(item)?;
                }
                None
            }
            Expr::This(_)
            | Expr::Lit(
                Lit::Str(_)
                | Lit::Bool(_)
                | Lit::Null(_)
                | Lit::Num(_)
                | Lit::BigInt(_)
                | Lit::Regex(_),
            ) => None,
            other @ (Expr::Lit(Lit::JSXText(_))
            | Expr::SuperProp(_)
            | Expr::Tpl(_)
            | Expr::TaggedTpl(_)
            | Expr::Arrow(_)
            | Expr::Class(_)
            | Expr::Yield(_)
            | Expr::MetaProp(_)
            | Expr::Await(_)
            | Expr::JSXMember(_)
            | Expr::JSXNamespacedName(_)
            | Expr::JSXEmpty(_)
            | Expr::JSXElement(_)
            | Expr::JSXFragment(_)
            | Expr::TsTypeAssertion(_)
            | Expr::TsConstAssertion(_)
            | Expr::TsNonNull(_)
            | Expr::TsAs(_)
            | Expr::TsInstantiation(_)
            | Expr::TsSatisfies(_)
            | Expr::PrivateName(_)
            | Expr::OptChain(_)
            | Expr::Invalid(_)) => {
                return Err(unsupported(kind::expr_kind(other), other.span()));
            }
        };

        if let Some(replacement) = replacement {
            *expr = replacement;
        }

        self.trace.exit();
        Ok(())
    }

    fn visit_args(&mut self, args: &mut [ExprOrSpread]) -> Result<()> {
        for arg in args {
            self.visit_element(arg)?;
        }
        Ok(())
    }

    fn visit_elements(&mut self, array: &mut ArrayLit) -> Result<()> {
        for element in array.elems.iter_mut().flatten() {
            self.visit_element(element)?;
        }
        Ok(())
    }

    fn visit_element(&mut self, element: &mut ExprOrSpread) -> Result<()> {
        if let Some(spread) = element.spread {
            return Err(unsupported("SpreadElement", spread));
        }
        self.visit_expr(&mut element.expr)
    }

    fn visit_object(&mut self, object: &mut ObjectLit) -> Result<()> {
        for prop in &mut object.props {
            let prop = match prop {
                PropOrSpread::Prop(prop) => prop,
                PropOrSpread::Spread(spread) => {
                    return Err(unsupported("SpreadElement", spread.dot3_token))
                }
            };
            match &mut **prop {
                Prop::KeyValue(key_value) => {
                    check_prop_name(&key_value.key)?;
                    self.visit_expr(&mut key_value.value)?;
                }
                Prop::Getter(getter) => {
                    check_prop_name(&getter.key)?;
                    if let Some(body) = &mut getter.body {
                        self.visit_block(body)?;
                    }
                }
                Prop::Setter(setter) => {
                    check_prop_name(&setter.key)?;
                    if let Some(body) = &mut setter.body {
                        self.visit_block(body)?;
                    }
                }
                Prop::Shorthand(ident) => return Err(unsupported("ShorthandProp", ident.span)),
                Prop::Assign(assign) => return Err(unsupported("AssignProp", assign.key.span)),
                Prop::Method(method) => {
                    return Err(unsupported("MethodProp", method.function.span))
                }
            }
        }
        Ok(())
    }

    /// Bracket access `base[index]`; dot access only rewrites its object.
    fn visit_member(&mut self, member: &mut MemberExpr, access: Access) -> Result<Option<Expr>> {
        let computed = match &mut member.prop {
            MemberProp::Ident(_) => {
                self.visit_expr(&mut member.obj)?;
                parenthesize_negative(&mut member.obj);
                return Ok(None);
            }
            MemberProp::PrivateName(private) => {
                return Err(unsupported("PrivateName", private.span))
            }
            MemberProp::Computed(computed) => computed,
        };

        let base = match &*member.obj {
            Expr::Ident(base) => {
                self.trace.leaf("Ident");
                Some(base.sym.to_string())
            }
            _ => None,
        };

        self.visit_expr(&mut computed.expr)?;
        let key = literal::constant_literal(&computed.expr).and_then(literal::property_key);

        let Some(base) = base else {
            self.visit_expr(&mut member.obj)?;
            parenthesize_negative(&mut member.obj);
            return Ok(None);
        };

        Ok(match access {
            Access::Read => key.and_then(|key| self.resolve_read_slot(&base, &key, member.span)),
            Access::Write => {
                self.resolve_write_slot(&base, key.as_deref());
                None
            }
        })
    }

    fn visit_binary(&mut self, bin: &mut BinExpr) -> Result<Option<Expr>> {
        self.visit_expr(&mut bin.left)?;
        self.visit_expr(&mut bin.right)?;
        if bin.op == BinaryOp::Exp {
            parenthesize_negative(&mut bin.left);
        }

        let (Some(left), Some(right)) = (
            literal::constant_literal(&bin.left),
            literal::constant_literal(&bin.right),
        ) else {
            return Ok(None);
        };
        let Some(result) = eval::evaluate_binary(bin.op, left, right, self.config.shift_semantics)
        else {
            return Ok(None);
        };

        self.stats.folded += 1;
        trace!(op = ?bin.op, "folded binary expression");
        Ok(Some(literal::relocated(&result, bin.span)))
    }

    fn visit_assign(&mut self, assign: &mut AssignExpr) -> Result<()> {
        let target = self.visit_assign_target(&mut assign.left)?;
        self.visit_expr(&mut assign.right)?;

        // Compound operators combine with the old value, which is unknown
        // once the write rule has run; they only invalidate.
        let plain = assign.op == AssignOp::Assign;
        let value = if plain {
            literal::constant_literal(&assign.right).cloned()
        } else {
            None
        };

        match target {
            AssignTarget::Name(name) => {
                let aliased = match &*assign.right {
                    Expr::Ident(source) if plain => self.env.alias_array(&name, &source.sym),
                    _ => false,
                };
                if !aliased {
                    self.env.unbind_array(&name);
                }
                self.bind_scalar(&name, value);
            }
            AssignTarget::Slot {
                base: Some(base),
                key: Some(key),
            } => match value {
                Some(lit) => {
                    self.env.record_array_entry(&base, &key, lit);
                }
                None => {
                    if self.env.drop_array_entry(&base, &key) {
                        self.stats.invalidated += 1;
                    }
                }
            },
            // Unknown base, or a non-constant index already cleared the table.
            AssignTarget::Slot { .. } => {}
        }
        Ok(())
    }

    fn visit_assign_target(&mut self, left: &mut PatOrExpr) -> Result<AssignTarget> {
        match left {
            PatOrExpr::Expr(expr) => self.visit_target_expr(expr),
            PatOrExpr::Pat(pat) => match &mut **pat {
                Pat::Ident(binding) => {
                    self.trace.enter("Ident");
                    self.resolve_write_ident(&binding.id);
                    self.trace.exit();
                    Ok(AssignTarget::Name(binding.id.sym.to_string()))
                }
                Pat::Expr(expr) => self.visit_target_expr(expr),
                other => Err(FoldError::InvalidAssignTarget {
                    kind: kind::pat_kind(other),
                    span: other.span(),
                }),
            },
        }
    }

    fn visit_target_expr(&mut self, expr: &mut Expr) -> Result<AssignTarget> {
        self.visit_expr_in(expr, Access::Write)?;

        match unparen(expr) {
            Expr::Ident(ident) => Ok(AssignTarget::Name(ident.sym.to_string())),
            Expr::Member(member) => match &member.prop {
                MemberProp::Computed(computed) => Ok(AssignTarget::Slot {
                    base: match &*member.obj {
                        Expr::Ident(base) => Some(base.sym.to_string()),
                        _ => None,
                    },
                    key: literal::constant_literal(&computed.expr).and_then(literal::property_key),
                }),
                _ => Err(FoldError::InvalidAssignTarget {
                    kind: "property access",
                    span: member.span,
                }),
            },
            other => Err(FoldError::InvalidAssignTarget {
                kind: kind::expr_kind(other),
                span: other.span(),
            }),
        }
    }

    // ----- read / write resolution -----

    fn resolve_read_ident(&mut self, ident: &Ident) -> Option<Expr> {
        let lit = self.env.lookup_scalar(&ident.sym)?;
        let replacement = literal::relocated(lit, ident.span);
        self.stats.propagated += 1;
        trace!(name = %ident.sym, "propagated constant");
        Some(replacement)
    }

    fn resolve_write_ident(&mut self, ident: &Ident) {
        if self.env.drop_scalar(&ident.sym) {
            self.stats.invalidated += 1;
            trace!(name = %ident.sym, "invalidated constant");
        }
    }

    fn resolve_read_slot(&mut self, base: &str, key: &str, span: Span) -> Option<Expr> {
        let lit = self.env.lookup_array_entry(base, key)?;
        let replacement = literal::relocated(lit, span);
        self.stats.propagated += 1;
        trace!(name = base, index = key, "propagated array slot");
        Some(replacement)
    }

    /// A write through a non-constant index may hit any slot.
    fn resolve_write_slot(&mut self, base: &str, key: Option<&str>) {
        let dropped = match key {
            Some(key) => self.env.drop_array_entry(base, key),
            None => self.env.clear_array(base),
        };
        if dropped {
            self.stats.invalidated += 1;
            trace!(name = base, index = key, "invalidated array slot");
        }
    }

    fn bind_scalar(&mut self, name: &str, value: Option<Lit>) {
        match value {
            Some(lit) => self.env.record_scalar(name, lit),
            None => {
                if self.env.drop_scalar(name) {
                    self.stats.invalidated += 1;
                }
            }
        }
    }

    fn forget_name(&mut self, name: &str) {
        if self.env.drop_scalar(name) {
            self.stats.invalidated += 1;
        }
        self.env.unbind_array(name);
    }
}

/// Index -> constant for every constant position of an array literal.
/// Holes still take a position; nothing after a spread is recorded since
/// its positions are unknown.
fn array_table(array: &ArrayLit) -> IndexMap {
    let mut table = IndexMap::default();
    for (index, element) in array.elems.iter().enumerate() {
        let Some(element) = element else { continue };
        if element.spread.is_some() {
            break;
        }
        if let Some(lit) = literal::constant_literal(&element.expr) {
            table.insert(index.to_string(), lit.clone());
        }
    }
    table
}

/// A negative number prints as a unary minus, which binds looser than
/// member access, calls and the base of `**`. Such slots get parentheses.
fn parenthesize_negative(expr: &mut Box<Expr>) {
    let negative = matches!(&**expr, Expr::Lit(Lit::Num(num)) if num.value.is_sign_negative());
    if negative {
        let span = expr.span();
        let inner = std::mem::replace(&mut **expr, Expr::Invalid(Invalid { span }));
        **expr = Expr::Paren(ParenExpr {
            span,
            expr: Box::new(inner),
        });
    }
}

fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

fn check_prop_name(name: &PropName) -> Result<()> {
    match name {
        PropName::Computed(computed) => Err(unsupported("ComputedPropName", computed.span)),
        _ => Ok(()),
    }
}

fn unsupported(kind: &'static str, span: Span) -> FoldError {
    FoldError::UnsupportedSyntax { kind, span }
}
