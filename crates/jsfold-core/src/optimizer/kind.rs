//! Display names of node kinds, used by the debug trace and error messages.

use swc_ecma_ast::{Decl, Expr, Lit, Pat, Stmt};

pub fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Block(_) => "BlockStmt",
        Stmt::Empty(_) => "EmptyStmt",
        Stmt::Debugger(_) => "DebuggerStmt",
        Stmt::With(_) => "WithStmt",
        Stmt::Return(_) => "ReturnStmt",
        Stmt::Labeled(_) => "LabeledStmt",
        Stmt::Break(_) => "BreakStmt",
        Stmt::Continue(_) => "ContinueStmt",
        Stmt::If(_) => "IfStmt",
        Stmt::Switch(_) => "SwitchStmt",
        Stmt::Throw(_) => "ThrowStmt",
        Stmt::Try(_) => "TryStmt",
        Stmt::While(_) => "WhileStmt",
        Stmt::DoWhile(_) => "DoWhileStmt",
        Stmt::For(_) => "ForStmt",
        Stmt::ForIn(_) => "ForInStmt",
        Stmt::ForOf(_) => "ForOfStmt",
        Stmt::Decl(decl) => decl_kind(decl),
        Stmt::Expr(_) => "ExprStmt",
    }
}

pub fn decl_kind(decl: &Decl) -> &'static str {
    match decl {
        Decl::Var(_) => "VarDecl",
        Decl::Fn(_) => "FnDecl",
        Decl::Class(_) => "ClassDecl",
        Decl::TsInterface(_) => "TsInterfaceDecl",
        Decl::TsTypeAlias(_) => "TsTypeAliasDecl",
        Decl::TsEnum(_) => "TsEnumDecl",
        Decl::TsModule(_) => "TsModuleDecl",
        #[allow(unreachable_patterns)]
        _ => "Decl",
    }
}

pub fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::This(_) => "ThisExpr",
        Expr::Array(_) => "ArrayLit",
        Expr::Object(_) => "ObjectLit",
        Expr::Fn(_) => "FnExpr",
        Expr::Unary(_) => "UnaryExpr",
        Expr::Update(_) => "UpdateExpr",
        Expr::Bin(_) => "BinExpr",
        Expr::Assign(_) => "AssignExpr",
        Expr::Member(_) => "MemberExpr",
        Expr::SuperProp(_) => "SuperPropExpr",
        Expr::Cond(_) => "CondExpr",
        Expr::Call(_) => "CallExpr",
        Expr::New(_) => "NewExpr",
        Expr::Seq(_) => "SeqExpr",
        Expr::Ident(_) => "Ident",
        Expr::Lit(lit) => lit_kind(lit),
        Expr::Tpl(_) => "Tpl",
        Expr::TaggedTpl(_) => "TaggedTpl",
        Expr::Arrow(_) => "ArrowExpr",
        Expr::Class(_) => "ClassExpr",
        Expr::Yield(_) => "YieldExpr",
        Expr::MetaProp(_) => "MetaPropExpr",
        Expr::Await(_) => "AwaitExpr",
        Expr::Paren(_) => "ParenExpr",
        Expr::JSXMember(_) => "JSXMemberExpr",
        Expr::JSXNamespacedName(_) => "JSXNamespacedName",
        Expr::JSXEmpty(_) => "JSXEmptyExpr",
        Expr::JSXElement(_) => "JSXElement",
        Expr::JSXFragment(_) => "JSXFragment",
        Expr::TsTypeAssertion(_) => "TsTypeAssertion",
        Expr::TsConstAssertion(_) => "TsConstAssertion",
        Expr::TsNonNull(_) => "TsNonNullExpr",
        Expr::TsAs(_) => "TsAsExpr",
        Expr::TsInstantiation(_) => "TsInstantiation",
        Expr::TsSatisfies(_) => "TsSatisfiesExpr",
        Expr::PrivateName(_) => "PrivateName",
        Expr::OptChain(_) => "OptChainExpr",
        Expr::Invalid(_) => "Invalid",
    }
}

pub fn lit_kind(lit: &Lit) -> &'static str {
    match lit {
        Lit::Str(_) => "Str",
        Lit::Bool(_) => "Bool",
        Lit::Null(_) => "Null",
        Lit::Num(_) => "Number",
        Lit::BigInt(_) => "BigInt",
        Lit::Regex(_) => "Regex",
        Lit::JSXText(_) => "JSXText",
    }
}

pub fn pat_kind(pat: &Pat) -> &'static str {
    match pat {
        Pat::Ident(_) => "Ident",
        Pat::Array(_) => "ArrayPat",
        Pat::Rest(_) => "RestPat",
        Pat::Object(_) => "ObjectPat",
        Pat::Assign(_) => "AssignPat",
        Pat::Invalid(_) => "Invalid",
        Pat::Expr(expr) => expr_kind(expr),
    }
}
