//! Parse/print glue around the swc front end.
//!
//! The pass works on a [`Script`]; this module produces one from source
//! text and prints it back. The source map is kept alongside the tree so
//! error spans can be turned into line/column positions.

use crate::error::SyntaxError;
use swc_ecma_ast::{EsVersion, Script};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::Emitter;
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, Syntax};
use swc_ecma_quote::swc_common::input::StringInput;
use swc_ecma_quote::swc_common::sync::Lrc;
use swc_ecma_quote::swc_common::{FileName, SourceMap, Span, Spanned};

pub struct ParsedScript {
    cm: Lrc<SourceMap>,
    script: Script,
}

impl ParsedScript {
    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn script_mut(&mut self) -> &mut Script {
        &mut self.script
    }

    /// Prints the (possibly rewritten) tree as JavaScript.
    pub fn print(&self) -> Result<String, SyntaxError> {
        let mut buf = Vec::new();
        {
            let mut emitter = Emitter {
                cfg: swc_ecma_codegen::Config::default(),
                cm: self.cm.clone(),
                comments: None,
                wr: JsWriter::new(self.cm.clone(), "\n", &mut buf, None),
            };
            emitter.emit_script(&self.script)?;
        }
        Ok(String::from_utf8(buf)?)
    }

    /// 1-based line and column of `span`, or `None` for synthesized nodes.
    pub fn location(&self, span: Span) -> Option<(usize, usize)> {
        if span.is_dummy() {
            return None;
        }
        let loc = self.cm.lookup_char_pos(span.lo);
        Some((loc.line, loc.col_display + 1))
    }
}

/// Parses `source` as a classic (non-module) script.
///
/// Recoverable parser errors are treated as fatal too: the pass must never
/// see a tree the parser had to patch up.
pub fn parse_script(name: &str, source: &str) -> Result<ParsedScript, SyntaxError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Custom(name.to_string()), source.to_string());

    let lexer = Lexer::new(
        Syntax::Es(Default::default()),
        EsVersion::Es2022,
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let parsed = parser.parse_script();
    let mut errors = parser.take_errors();
    let script = match parsed {
        Ok(script) if errors.is_empty() => script,
        Ok(_) => return Err(parse_error(&cm, errors.remove(0))),
        Err(err) => return Err(parse_error(&cm, err)),
    };

    Ok(ParsedScript { cm, script })
}

fn parse_error(cm: &SourceMap, err: swc_ecma_parser::error::Error) -> SyntaxError {
    let loc = cm.lookup_char_pos(err.span().lo);
    SyntaxError::Parse {
        message: err.kind().msg().to_string(),
        line: loc.line,
        column: loc.col_display + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_print() {
        let parsed = parse_script("test.js", "var x = 1;\nprint(x);").unwrap();
        assert_eq!(parsed.script().body.len(), 2);
        let printed = parsed.print().unwrap();
        assert!(printed.contains("var x = 1;"));
        assert!(printed.contains("print(x);"));
    }

    #[test]
    fn test_parse_error_has_position() {
        let err = parse_script("bad.js", "var x = ;").err().unwrap();
        match err {
            SyntaxError::Parse { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_location_is_one_based() {
        let parsed = parse_script("test.js", "\n  foo;").unwrap();
        let span = match &parsed.script().body[0] {
            swc_ecma_ast::Stmt::Expr(stmt) => stmt.span,
            other => panic!("unexpected statement {other:?}"),
        };
        assert_eq!(parsed.location(span), Some((2, 3)));
    }
}
