use winnow::ascii::{digit0, digit1, multispace0};
use winnow::combinator::{alt, cut_err, delimited, fail, opt};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

use crate::{ArithOp, CompareOp, Expr, Value};

pub(super) const KEYWORDS: &[&str] = &["and", "or", "not", "true", "false"];

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

// -- Identifiers & keywords -------------------------------------------------

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

/// Match a whole word case-insensitively. `andrew` does not match `and`.
fn keyword(input: &mut &str, kw: &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    let checkpoint = input.checkpoint();
    let found = word.parse_next(input)?;
    if found.eq_ignore_ascii_case(kw) {
        Ok(())
    } else {
        input.reset(&checkpoint);
        Err(ErrMode::from_input(input))
    }
}

fn kw<'i>(expected: &'static str) -> impl Parser<&'i str, (), ErrMode<ContextError>> {
    move |input: &mut &'i str| keyword(input, expected)
}

fn bare_column(input: &mut &str) -> ModalResult<Expr> {
    let checkpoint = input.checkpoint();
    let name = word.parse_next(input)?;
    if super::is_keyword(name) {
        input.reset(&checkpoint);
        return Err(ErrMode::from_input(input));
    }
    Ok(Expr::Column(name.to_owned()))
}

fn quoted_column(input: &mut &str) -> ModalResult<Expr> {
    delimited(
        '`',
        take_till(1.., |c: char| c == '`'),
        cut_err('`').context(StrContext::Expected(StrContextValue::CharLiteral('`'))),
    )
    .map(|name: &str| Expr::Column(name.to_owned()))
    .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<f64> {
    (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .try_map(|s: &str| s.parse::<f64>())
        .parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any::<_, ErrMode<ContextError>>)
            .context(StrContext::Expected(StrContextValue::CharLiteral(quote)))
            .parse_next(input)?;
        match ch {
            c if c == quote => return Ok(s),
            '\\' => {
                let esc = cut_err(any::<_, ErrMode<ContextError>>).parse_next(input)?;
                match esc {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    '\\' | '"' | '\'' => s.push(esc),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn boolean(input: &mut &str) -> ModalResult<bool> {
    alt((kw("true").value(true), kw("false").value(false))).parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    ws.parse_next(input)?;
    alt((
        ">=".value(CompareOp::Gte),
        "<=".value(CompareOp::Lte),
        "<>".value(CompareOp::Neq),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
        ">".value(CompareOp::Gt),
        "<".value(CompareOp::Lt),
        "=".value(CompareOp::Eq),
    ))
    .parse_next(input)
}

fn add_op(input: &mut &str) -> ModalResult<ArithOp> {
    ws.parse_next(input)?;
    alt(('+'.value(ArithOp::Add), '-'.value(ArithOp::Sub))).parse_next(input)
}

fn mul_op(input: &mut &str) -> ModalResult<ArithOp> {
    ws.parse_next(input)?;
    alt(('*'.value(ArithOp::Mul), '/'.value(ArithOp::Div))).parse_next(input)
}

// -- Expressions ------------------------------------------------------------
//
// Precedence, loosest first: OR < AND < NOT < comparison < + - < * / < unary -
//
// `depth` counts parentheses, prefix operators and chained operands seen on
// the way down. It bounds both parser recursion and the height of the tree.

/// Deepest nesting a condition may use.
pub(super) const MAX_DEPTH: usize = 96;

fn deeper(input: &mut &str, depth: usize) -> ModalResult<usize> {
    if depth < MAX_DEPTH {
        return Ok(depth + 1);
    }
    cut_err(fail::<_, usize, ErrMode<ContextError>>)
        .context(StrContext::Expected(StrContextValue::Description(
            "a less deeply nested condition",
        )))
        .parse_next(input)
}

fn group(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    '('.parse_next(input)?;
    let depth = deeper(input, depth)?;
    let expr = or_expr(input, depth)?;
    ws.parse_next(input)?;
    cut_err(')')
        .context(StrContext::Expected(StrContextValue::CharLiteral(')')))
        .parse_next(input)?;
    Ok(expr)
}

fn primary(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    if input.starts_with('(') {
        return group(input, depth);
    }
    alt((
        number.map(|n| Expr::Literal(Value::Number(n))),
        string_literal.map(|s| Expr::Literal(Value::String(s))),
        boolean.map(|b| Expr::Literal(Value::Bool(b))),
        quoted_column,
        bare_column,
    ))
    .context(StrContext::Expected(StrContextValue::Description("operand")))
    .parse_next(input)
}

fn unary(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    if opt('-').parse_next(input)?.is_none() {
        return primary(input, depth);
    }
    let depth = deeper(input, depth)?;
    let inner = cut_err(|i: &mut &str| unary(i, depth)).parse_next(input)?;
    Ok(match inner {
        Expr::Literal(Value::Number(n)) => Expr::Literal(Value::Number(-n)),
        other => Expr::Neg(Box::new(other)),
    })
}

fn arith(left: Expr, op: ArithOp, right: Expr) -> Expr {
    Expr::Arith {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn term(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    let mut expr = unary(input, depth)?;
    let mut depth = depth;
    while let Some(op) = opt(mul_op).parse_next(input)? {
        depth = deeper(input, depth)?;
        let right = cut_err(|i: &mut &str| unary(i, depth)).parse_next(input)?;
        expr = arith(expr, op, right);
    }
    Ok(expr)
}

fn additive(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    let mut expr = term(input, depth)?;
    let mut depth = depth;
    while let Some(op) = opt(add_op).parse_next(input)? {
        depth = deeper(input, depth)?;
        let right = cut_err(|i: &mut &str| term(i, depth)).parse_next(input)?;
        expr = arith(expr, op, right);
    }
    Ok(expr)
}

fn comparison(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    let left = additive(input, depth)?;
    let Some(op) = opt(compare_op).parse_next(input)? else {
        return Ok(left);
    };
    let right = cut_err(|i: &mut &str| additive(i, depth)).parse_next(input)?;
    Ok(Expr::Compare {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

fn not_expr(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    if opt(kw("not")).parse_next(input)?.is_none() {
        return comparison(input, depth);
    }
    let depth = deeper(input, depth)?;
    let inner = cut_err(|i: &mut &str| not_expr(i, depth)).parse_next(input)?;
    Ok(Expr::Not(Box::new(inner)))
}

fn and_expr(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    let mut expr = not_expr(input, depth)?;
    let mut depth = depth;
    while opt(kw("and")).parse_next(input)?.is_some() {
        depth = deeper(input, depth)?;
        let right = cut_err(|i: &mut &str| not_expr(i, depth)).parse_next(input)?;
        expr = Expr::And(Box::new(expr), Box::new(right));
    }
    Ok(expr)
}

fn or_expr(input: &mut &str, depth: usize) -> ModalResult<Expr> {
    let mut expr = and_expr(input, depth)?;
    let mut depth = depth;
    while opt(kw("or")).parse_next(input)?.is_some() {
        depth = deeper(input, depth)?;
        let right = cut_err(|i: &mut &str| and_expr(i, depth)).parse_next(input)?;
        expr = Expr::Or(Box::new(expr), Box::new(right));
    }
    Ok(expr)
}

// -- Top-level parser -------------------------------------------------------

pub(super) fn condition(input: &mut &str) -> ModalResult<Expr> {
    let expr = or_expr(input, 0)?;
    ws.parse_next(input)?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::{col, lit};

    use super::*;

    #[test]
    fn parse_simple_comparison() {
        assert_eq!(parse("score < 80").unwrap(), col("score").lt(80));
    }

    #[test]
    fn parse_without_spaces() {
        assert_eq!(parse("score<=99").unwrap(), col("score").lte(99));
    }

    #[test]
    fn parse_all_comparison_ops() {
        let ops = [
            ("==", CompareOp::Eq),
            ("=", CompareOp::Eq),
            ("!=", CompareOp::Neq),
            ("<>", CompareOp::Neq),
            (">", CompareOp::Gt),
            (">=", CompareOp::Gte),
            ("<", CompareOp::Lt),
            ("<=", CompareOp::Lte),
        ];
        for (sym, expected_op) in ops {
            let input = format!("x {sym} 1");
            match parse(&input).unwrap() {
                Expr::Compare { op, .. } => assert_eq!(op, expected_op, "failed for {sym}"),
                other => panic!("expected Compare for {sym}, got {other:?}"),
            }
        }
    }

    #[test]
    fn arithmetic_binds_tighter_than_comparison() {
        assert_eq!(
            parse("model1 + model2 < 50").unwrap(),
            (col("model1") + col("model2")).lt(50)
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("a + b * c > 1").unwrap(),
            (col("a") + col("b") * col("c")).gt(1)
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            parse("a - b - c == 0").unwrap(),
            (col("a") - col("b") - col("c")).eq(0)
        );
    }

    #[test]
    fn precedence_and_before_or() {
        let expr = parse("a > 1 or b > 2 and c > 3").unwrap();
        match expr {
            Expr::Or(left, right) => {
                assert_eq!(*left, col("a").gt(1));
                assert!(matches!(*right, Expr::And(_, _)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn not_binds_looser_than_comparison() {
        assert_eq!(parse("not x > 1").unwrap(), !col("x").gt(1));
    }

    #[test]
    fn not_binds_tighter_than_and() {
        assert_eq!(
            parse("not a > 1 and b > 2").unwrap(),
            (!col("a").gt(1)).and(col("b").gt(2))
        );
    }

    #[test]
    fn parenthesized_grouping() {
        let expr = parse("(model1 + model2 >= 50) and model3 > 50").unwrap();
        assert_eq!(
            expr,
            (col("model1") + col("model2"))
                .gte(50)
                .and(col("model3").gt(50))
        );
    }

    #[test]
    fn parentheses_override_arithmetic() {
        assert_eq!(
            parse("(a + b) * 2 > 1").unwrap(),
            ((col("a") + col("b")) * 2).gt(1)
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            parse("a > 1 AND NOT b > 2 Or c > 3").unwrap(),
            parse("a > 1 and not b > 2 or c > 3").unwrap()
        );
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        assert_eq!(parse("android > 1").unwrap(), col("android").gt(1));
        assert_eq!(parse("order == 1").unwrap(), col("order").eq(1));
        assert_eq!(parse("notes != 0").unwrap(), col("notes").neq(0));
    }

    #[test]
    fn number_forms() {
        let cases = [("80", 80.0), ("0.5", 0.5), (".5", 0.5), ("1e3", 1000.0), ("2.5E-1", 0.25)];
        for (literal, expected) in cases {
            let input = format!("x == {literal}");
            assert_eq!(parse(&input).unwrap(), col("x").eq(expected), "failed for {literal}");
        }
    }

    #[test]
    fn negative_literal_folds() {
        assert_eq!(parse("x > -5").unwrap(), col("x").gt(-5));
        assert_eq!(parse("-x < 0").unwrap(), (-col("x")).lt(0));
    }

    #[test]
    fn string_literals_both_quotes() {
        assert_eq!(parse("status == 'active'").unwrap(), col("status").eq("active"));
        assert_eq!(parse(r#"status == "active""#).unwrap(), col("status").eq("active"));
    }

    #[test]
    fn string_with_escapes() {
        assert_eq!(
            parse(r#"x == "a\"b\\c""#).unwrap(),
            col("x").eq("a\"b\\c")
        );
        assert_eq!(parse(r"x == 'it\'s'").unwrap(), col("x").eq("it's"));
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(parse("true").unwrap(), lit(true));
        assert_eq!(parse("FALSE or x > 1").unwrap(), lit(false).or(col("x").gt(1)));
    }

    #[test]
    fn backtick_column() {
        assert_eq!(parse("`risk score` >= 10").unwrap(), col("risk score").gte(10));
        assert_eq!(parse("`and` == 1").unwrap(), col("and").eq(1));
    }

    #[test]
    fn dotted_identifier() {
        assert_eq!(parse("user.age >= 18").unwrap(), col("user.age").gte(18));
    }

    #[test]
    fn display_round_trips() {
        let inputs = [
            "score < 80",
            "(model1 + model2 >= 50) and model3 > 50",
            "not a == 'x' or -b * 2 > c / 3",
            "`risk score` <> 1e3",
        ];
        for input in inputs {
            let expr = parse(input).unwrap();
            assert_eq!(parse(&expr.to_string()).unwrap(), expr, "failed for {input}");
        }
    }
}
