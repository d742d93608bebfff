//___________________________________TESTS____________________________________
// whole pipeline: text -> tokens -> tree -> solved tree -> number
#[cfg(test)]
mod tests {
    use crate::errors::{EvalError, ExpressionError, LexError, ParseError, SolveError};
    use crate::symbolic::expression::Expression;
    use crate::symbolic::interpret::Known;
    use crate::symbolic::token::Span;
    use approx::assert_relative_eq;

    fn known(pairs: &[(&str, f64)]) -> Known {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// Solves `eq` for every listed variable in turn using `base` for the others, puts the
    /// solved number back and checks that both sides agree.
    fn assert_round_trip(text: &str, targets: &[&str], base: &Known) {
        let eq = Expression::parse(text).unwrap();
        for target in targets {
            let mut values = base.clone();
            values.remove(*target);
            let solved = eq.solve(target).unwrap();
            let x = solved.interpret(Some(&values)).unwrap();
            values.insert(target.to_string(), x);
            let residual = eq.residual(&values).unwrap();
            assert_relative_eq!(residual, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_round_trip_simple_ratio() {
        let eq = Expression::parse("a / b = c").unwrap();
        let b = eq
            .solve("b")
            .unwrap()
            .interpret(Some(&known(&[("a", 10.0), ("c", 2.0)])))
            .unwrap();
        assert_relative_eq!(b, 5.0);
        assert_round_trip("a / b = c", &["a", "b", "c"], &known(&[("a", 10.0), ("b", 5.0), ("c", 2.0)]));
    }

    #[test]
    fn test_round_trip_ideal_gas() {
        let base = known(&[("P", 100.0), ("v", 0.861), ("R", 0.287), ("T", 300.0)]);
        assert_round_trip("P * v = R * T", &["P", "v", "R", "T"], &base);
    }

    #[test]
    fn test_round_trip_isentropic() {
        let base = known(&[
            ("T2", 543.0),
            ("T1", 300.0),
            ("P2", 800.0),
            ("P1", 100.0),
            ("k", 1.4),
        ]);
        assert_round_trip(
            "T2 / T1 = (P2 / P1) ^ ((k - 1) / k)",
            &["T2", "T1", "P2", "P1"],
            &base,
        );
    }

    #[test]
    fn test_round_trip_mixed_operators() {
        let base = known(&[("x", 7.0), ("y", 1.5)]);
        assert_round_trip("x - 3 = 2 * (y + 1)", &["x", "y"], &base);
        assert_round_trip("-x + 4 = y / 2", &["x", "y"], &base);

        let base = known(&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)]);
        assert_round_trip("[a + b] * c = d ^ 2", &["a", "b", "c", "d"], &base);
    }

    #[test]
    fn test_solving_leaves_source_intact() {
        let eq: Expression = "P * v = R * T".parse().unwrap();
        let isolated = eq.isolate("v").unwrap();
        assert_eq!(isolated.to_string(), "v = ((R * T) / P)");
        assert_eq!(eq.to_string(), "(P * v) = (R * T)");
    }

    #[test]
    fn test_exponent_target_reported() {
        let eq = Expression::parse("T2 / T1 = (P2 / P1) ^ ((k - 1) / k)").unwrap();
        assert!(matches!(
            eq.solve("k"),
            Err(SolveError::InverseUnavailable { .. })
        ));
    }

    #[test]
    fn test_pipeline_errors() {
        assert_eq!(
            Expression::parse("(1 + 2"),
            Err(ExpressionError::Parse(ParseError::UnmatchedParenthesis {
                span: Span::new(1, 1)
            }))
        );
        assert_eq!(
            Expression::parse("a # b"),
            Err(ExpressionError::Lex(LexError::UnexpectedCharacter {
                character: '#',
                position: 3
            }))
        );
        assert_eq!(
            Expression::parse("1.2.3 = x"),
            Err(ExpressionError::Parse(ParseError::UnexpectedToken {
                lexeme: "1.2.3".to_string(),
                span: Span::new(1, 5)
            }))
        );
        assert_eq!(
            Expression::parse("a = b = c"),
            Err(ExpressionError::Parse(ParseError::UnexpectedEquals {
                span: Span::new(7, 7)
            }))
        );
        let unbound = Expression::parse("a + 1").unwrap();
        assert_eq!(
            unbound.interpret(None),
            Err(EvalError::UnboundVariable("a".to_string()))
        );
    }
}
