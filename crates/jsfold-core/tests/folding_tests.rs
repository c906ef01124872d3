use jsfold_core::{FoldConfig, ShiftSemantics};
use jsfold_test_helpers::fixtures::{CONTROL_FLOW, STRAIGHT_LINE};
use jsfold_test_helpers::{fold, fold_with_config};

#[test]
fn test_propagate_then_fold() {
    let source = r#"
        var x = 2;
        var y = 3;
        print(x + y);
    "#;

    let result = fold(source).expect("fold failed");

    assert!(result.contains("print(5);"));
}

#[test]
fn test_each_supported_operator() {
    let source = "print(7 - 2, 6 * 7, 7 / 2, 6 & 3, 1 << 4, 16 >> 2);";

    let result = fold(source).expect("fold failed");

    assert!(result.contains("print(5, 42, 3, 2, 16, 4);"));
}

#[test]
fn test_nested_expressions_fold_bottom_up() {
    let result = fold("print(1 + 2 * 3);").expect("fold failed");

    assert!(result.contains("print(7);"));
}

#[test]
fn test_unsupported_operators_are_left_alone() {
    let result = fold("print(7 % 2, 1 < 2, 1 | 2, 1 === 1);").expect("fold failed");

    assert!(result.contains("7 % 2"));
    assert!(result.contains("1 < 2"));
    assert!(result.contains("1 | 2"));
    assert!(result.contains("1 === 1"));
}

#[test]
fn test_division_by_zero_is_left_alone() {
    let result = fold("print(1 / 0);").expect("fold failed");

    assert!(result.contains("1 / 0"));
}

#[test]
fn test_numeric_strings_are_coerced() {
    let result = fold("print(\"2\" + 3);").expect("fold failed");

    assert!(result.contains("print(5);"));
}

#[test]
fn test_non_numeric_operands_are_left_alone() {
    let source = r#"
        var t = true;
        print(t + 1, "a" + 1, 1.5 + 1);
    "#;

    let result = fold(source).expect("fold failed");

    assert!(result.contains("true + 1"));
    assert!(result.contains("\"a\" + 1"));
    assert!(result.contains("1.5 + 1"));
}

#[test]
fn test_results_past_safe_integers_are_left_alone() {
    let result = fold("print(9007199254740992 * 2);").expect("fold failed");

    assert!(result.contains("9007199254740992 * 2"));
}

#[test]
fn test_zero_fill_shift_defaults_to_arithmetic() {
    let source = r#"
        var n = 0 - 1;
        print((n >>> 28) + 2);
    "#;

    let result = fold(source).expect("fold failed");

    assert!(result.contains("print(1);"));
}

#[test]
fn test_zero_fill_shift_unsigned() {
    let source = r#"
        var n = 0 - 1;
        print((n >>> 28) + 2);
    "#;
    let config = FoldConfig::default().with_shift_semantics(ShiftSemantics::Unsigned);

    let result = fold_with_config(source, &config).expect("fold failed");

    assert!(result.contains("print(17);"));
}

#[test]
fn test_fixture_straight_line() {
    let result = fold(STRAIGHT_LINE).expect("fold failed");

    assert!(result.contains("var bytes = 1228800;"));
    assert!(result.contains("print(1228800, 1120);"));
}

#[test]
fn test_fixture_control_flow() {
    let result = fold(CONTROL_FLOW).expect("fold failed");

    assert!(result.contains("var scale = 16;"));
    assert!(result.contains("return 16 * 2;") || result.contains("return 32;"));
}

#[test]
fn test_folding_is_idempotent() {
    for source in [STRAIGHT_LINE, CONTROL_FLOW] {
        let once = fold(source).expect("fold failed");
        let twice = fold(&once).expect("second fold failed");
        assert_eq!(once, twice);
    }
}

#[test]
fn test_negative_member_object_keeps_parentheses() {
    let result = fold("print((1 - 2).toString());").expect("fold failed");

    assert!(result.contains("(-1).toString()"));
    assert_eq!(fold(&result).expect("second fold failed"), result);
}

#[test]
fn test_negative_exponent_base_keeps_parentheses() {
    let source = r#"
        var x = 0 - 2;
        print(x ** 2);
    "#;

    let result = fold(source).expect("fold failed");

    assert!(result.contains("(-2) ** 2"));
    assert_eq!(fold(&result).expect("second fold failed"), result);
}

#[test]
fn test_negative_unary_operand_keeps_parentheses() {
    let source = r#"
        var x = 0 - 2;
        print(-x);
    "#;

    let result = fold(source).expect("fold failed");

    assert!(result.contains("-(-2)"));
    assert_eq!(fold(&result).expect("second fold failed"), result);
}
