//! Constant binary evaluator.
//!
//! Both operands are read as signed integers (see
//! [`literal::integer_value`]) and the result becomes a number literal.
//! Supported operators: `+ - * / & << >> >>>`. Division truncates toward
//! zero. Anything that cannot be computed exactly (fractional operands,
//! division by zero, overflow, results past 2^53) leaves the expression
//! unfolded.

use super::literal::{self, MAX_SAFE_MAGNITUDE};
use crate::config::ShiftSemantics;
use swc_ecma_ast::{BinaryOp, Lit};

/// Folds `left op right`, or returns `None` when the pair must stay as is.
pub fn evaluate_binary(
    op: BinaryOp,
    left: &Lit,
    right: &Lit,
    shifts: ShiftSemantics,
) -> Option<Lit> {
    if !is_foldable_operator(op) {
        return None;
    }
    let l = literal::integer_value(left)?;
    let r = literal::integer_value(right)?;
    let result = apply(op, l, r, shifts)?;
    if result.unsigned_abs() > MAX_SAFE_MAGNITUDE as u64 {
        return None;
    }
    Some(literal::number_literal(result))
}

pub fn is_foldable_operator(op: BinaryOp) -> bool {
    matches!(
        op,
        BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::BitAnd
            | BinaryOp::LShift
            | BinaryOp::RShift
            | BinaryOp::ZeroFillRShift
    )
}

/// Integer semantics of the supported operators.
pub fn apply(op: BinaryOp, l: i64, r: i64, shifts: ShiftSemantics) -> Option<i64> {
    match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                None
            } else {
                l.checked_div(r)
            }
        }
        BinaryOp::BitAnd => Some(l & r),
        BinaryOp::LShift => shift_left(l, r),
        BinaryOp::RShift => shift_right(l, r),
        BinaryOp::ZeroFillRShift => match shifts {
            ShiftSemantics::Arithmetic => shift_right(l, r),
            ShiftSemantics::Unsigned => Some(unsigned_shift_right(l, r)),
        },
        _ => None,
    }
}

fn shift_left(l: i64, r: i64) -> Option<i64> {
    if r < 0 {
        return None;
    }
    if l == 0 {
        return Some(0);
    }
    if r >= 64 {
        return None;
    }
    let wide = (l as i128) << r;
    i64::try_from(wide).ok()
}

fn shift_right(l: i64, r: i64) -> Option<i64> {
    if r < 0 {
        return None;
    }
    if r >= 64 {
        return Some(if l < 0 { -1 } else { 0 });
    }
    Some(l >> r)
}

fn unsigned_shift_right(l: i64, r: i64) -> i64 {
    // ToUint32 on both sides, shift count masked to five bits
    let value = l as u32;
    let count = (r as u32) & 31;
    (value >> count) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_ecma_ast::{Bool, Number, Str};
    use swc_ecma_quote::swc_common::DUMMY_SP;

    fn num(value: i64) -> Lit {
        literal::number_literal(value)
    }

    fn string(value: &str) -> Lit {
        Lit::Str(Str {
            span: DUMMY_SP,
            value: value.into(),
            raw: None,
        })
    }

    fn folded(op: BinaryOp, l: &Lit, r: &Lit) -> Option<f64> {
        match evaluate_binary(op, l, r, ShiftSemantics::Arithmetic)? {
            Lit::Num(n) => Some(n.value),
            other => panic!("evaluator produced {other:?}"),
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(folded(BinaryOp::Add, &num(2), &num(3)), Some(5.0));
        assert_eq!(folded(BinaryOp::Sub, &num(2), &num(3)), Some(-1.0));
        assert_eq!(folded(BinaryOp::Mul, &num(6), &num(7)), Some(42.0));
        assert_eq!(folded(BinaryOp::Div, &num(7), &num(2)), Some(3.0));
        assert_eq!(folded(BinaryOp::Div, &num(-7), &num(2)), Some(-3.0));
    }

    #[test]
    fn test_bitwise_and_shifts() {
        assert_eq!(folded(BinaryOp::BitAnd, &num(6), &num(3)), Some(2.0));
        assert_eq!(folded(BinaryOp::LShift, &num(1), &num(4)), Some(16.0));
        assert_eq!(folded(BinaryOp::RShift, &num(-16), &num(2)), Some(-4.0));
    }

    #[test]
    fn test_zero_fill_shift_matches_arithmetic_by_default() {
        assert_eq!(
            folded(BinaryOp::ZeroFillRShift, &num(-16), &num(2)),
            folded(BinaryOp::RShift, &num(-16), &num(2))
        );
    }

    #[test]
    fn test_zero_fill_shift_unsigned() {
        let lit = evaluate_binary(
            BinaryOp::ZeroFillRShift,
            &num(-1),
            &num(28),
            ShiftSemantics::Unsigned,
        );
        match lit {
            Some(Lit::Num(n)) => assert_eq!(n.value, 15.0),
            other => panic!("expected 15, got {other:?}"),
        }
    }

    #[test]
    fn test_division_by_zero_is_not_folded() {
        assert_eq!(folded(BinaryOp::Div, &num(1), &num(0)), None);
    }

    #[test]
    fn test_negative_shift_is_not_folded() {
        assert_eq!(folded(BinaryOp::LShift, &num(1), &num(-1)), None);
        assert_eq!(folded(BinaryOp::RShift, &num(1), &num(-1)), None);
    }

    #[test]
    fn test_results_past_safe_range_are_not_folded() {
        assert_eq!(folded(BinaryOp::LShift, &num(1), &num(60)), None);
        assert_eq!(
            folded(BinaryOp::Mul, &num(1 << 30), &num(1 << 30)),
            None
        );
    }

    #[test]
    fn test_strings_are_coerced_as_integers() {
        assert_eq!(folded(BinaryOp::Add, &string("2"), &num(3)), Some(5.0));
        assert_eq!(folded(BinaryOp::Add, &string("a"), &num(3)), None);
    }

    #[test]
    fn test_fractional_operands_are_not_folded() {
        let half = Lit::Num(Number {
            span: DUMMY_SP,
            value: 0.5,
            raw: None,
        });
        assert_eq!(folded(BinaryOp::Add, &half, &num(1)), None);
    }

    #[test]
    fn test_booleans_are_not_folded() {
        let t = Lit::Bool(Bool {
            span: DUMMY_SP,
            value: true,
        });
        assert_eq!(folded(BinaryOp::Add, &t, &num(1)), None);
    }

    #[test]
    fn test_unsupported_operators() {
        assert_eq!(folded(BinaryOp::Mod, &num(7), &num(2)), None);
        assert_eq!(folded(BinaryOp::Lt, &num(1), &num(2)), None);
        assert_eq!(folded(BinaryOp::BitOr, &num(1), &num(2)), None);
    }
}
