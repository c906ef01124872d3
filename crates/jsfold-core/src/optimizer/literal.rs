//! Constant-literal classification and value conversions.
//!
//! Only number, string, boolean and null literals count as constants.
//! `undefined` is an identifier in the tree, so it is never propagated.

use swc_ecma_ast::{Expr, Lit, Number};
use swc_ecma_quote::swc_common::{Span, DUMMY_SP};

/// Largest integer a JS number holds exactly (2^53).
pub const MAX_SAFE_MAGNITUDE: i64 = 1 << 53;

/// Returns the literal if `expr` is a constant-literal node.
pub fn constant_literal(expr: &Expr) -> Option<&Lit> {
    match expr {
        Expr::Lit(lit) if is_constant(lit) => Some(lit),
        _ => None,
    }
}

pub fn is_constant(lit: &Lit) -> bool {
    matches!(lit, Lit::Num(_) | Lit::Str(_) | Lit::Bool(_) | Lit::Null(_))
}

/// Integer view of a constant used by the binary evaluator.
///
/// Numbers must be integral and exactly representable; strings are parsed
/// after trimming surrounding whitespace. Everything else has no integer
/// view and blocks folding.
pub fn integer_value(lit: &Lit) -> Option<i64> {
    match lit {
        Lit::Num(num) => {
            let value = num.value;
            if value.fract() != 0.0 || value.abs() > MAX_SAFE_MAGNITUDE as f64 {
                return None;
            }
            Some(value as i64)
        }
        Lit::Str(s) => s.value.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Key under which an array slot indexed by `lit` is stored.
///
/// Uses JavaScript property-key conversion, so `a[1]`, `a[1.0]` and
/// `a["1"]` address the same slot.
pub fn property_key(lit: &Lit) -> Option<String> {
    match lit {
        Lit::Num(num) => Some(number_to_key(num.value)),
        Lit::Str(s) => Some(s.value.to_string()),
        Lit::Bool(b) => Some(b.value.to_string()),
        Lit::Null(_) => Some("null".to_string()),
        _ => None,
    }
}

fn number_to_key(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_MAGNITUDE as f64 {
        // -0 stringifies as "0"
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A fresh number literal without source text, printed from its value.
pub fn number_literal(value: i64) -> Lit {
    Lit::Num(Number {
        span: DUMMY_SP,
        value: value as f64,
        raw: None,
    })
}

/// Copy of `lit` relocated to `span`, for splicing at a read site.
pub fn relocated(lit: &Lit, span: Span) -> Expr {
    let mut lit = lit.clone();
    match &mut lit {
        Lit::Num(n) => n.span = span,
        Lit::Str(s) => s.span = span,
        Lit::Bool(b) => b.span = span,
        Lit::Null(n) => n.span = span,
        _ => {}
    }
    Expr::Lit(lit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_ecma_ast::{Bool, Null, Str};

    fn num(value: f64) -> Lit {
        Lit::Num(Number {
            span: DUMMY_SP,
            value,
            raw: None,
        })
    }

    fn string(value: &str) -> Lit {
        Lit::Str(Str {
            span: DUMMY_SP,
            value: value.into(),
            raw: None,
        })
    }

    #[test]
    fn test_constant_kinds() {
        assert!(is_constant(&num(1.0)));
        assert!(is_constant(&string("a")));
        assert!(is_constant(&Lit::Bool(Bool {
            span: DUMMY_SP,
            value: true
        })));
        assert!(is_constant(&Lit::Null(Null { span: DUMMY_SP })));
    }

    #[test]
    fn test_integer_value_of_numbers() {
        assert_eq!(integer_value(&num(42.0)), Some(42));
        assert_eq!(integer_value(&num(-7.0)), Some(-7));
        assert_eq!(integer_value(&num(1.5)), None);
        assert_eq!(integer_value(&num(1e300)), None);
    }

    #[test]
    fn test_integer_value_of_strings() {
        assert_eq!(integer_value(&string("12")), Some(12));
        assert_eq!(integer_value(&string("  -3 ")), Some(-3));
        assert_eq!(integer_value(&string("abc")), None);
        assert_eq!(integer_value(&string("")), None);
    }

    #[test]
    fn test_booleans_and_null_have_no_integer_value() {
        let t = Lit::Bool(Bool {
            span: DUMMY_SP,
            value: true,
        });
        assert_eq!(integer_value(&t), None);
        assert_eq!(integer_value(&Lit::Null(Null { span: DUMMY_SP })), None);
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(property_key(&num(1.0)).as_deref(), Some("1"));
        assert_eq!(property_key(&num(-0.0)).as_deref(), Some("0"));
        assert_eq!(property_key(&num(2.5)).as_deref(), Some("2.5"));
        assert_eq!(property_key(&string("1")).as_deref(), Some("1"));
        assert_eq!(property_key(&num(f64::NAN)).as_deref(), Some("NaN"));
    }

    #[test]
    fn test_number_literal_has_no_raw_text() {
        match number_literal(-15) {
            Lit::Num(n) => {
                assert_eq!(n.value, -15.0);
                assert!(n.raw.is_none());
            }
            other => panic!("expected number, got {other:?}"),
        }
    }
}
