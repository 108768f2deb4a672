//! Universal invariants that must hold across the whole ladder, not just at
//! one representative input: arena bookkeeping, coercion round trips,
//! operator-precedence algebra, short-circuit side-effect avoidance, the
//! recursion-depth ceiling, and allocator-failure injection.

use jexpr_arena::Arena;
use jexpr_engine::{eval, Env, Value};
use rstest::rstest;

fn run<'a>(arena: &'a Arena, env: &'a Env<'a>, expr: &'a str) -> String {
    match eval(expr, arena, env) {
        Ok(v) => v.to_string(),
        Err(e) => e.to_string(),
    }
}

#[test]
fn arena_counters_reset_after_cleanup() {
    let mut arena = Arena::new();
    {
        let env = Env::new();
        eval("'hello' + ' world'", &arena, &env).unwrap();
    }
    assert!(arena.stats().slab_allocs > 0);
    arena.cleanup();
    assert_eq!(arena.stats().slab_allocs, 0);
    assert_eq!(arena.stats().slab_used, 0);
    assert_eq!(arena.stats().heap_allocs, 0);
}

#[test]
fn float_string_roundtrip_preserves_value() {
    for n in [0.0, 1.0, -1.0, 3.5, -12.25, 100.0, 1e10, 1e-10, 123_456.789] {
        let s = Value::Float(n).to_string();
        let roundtripped = jexpr_value::to_f64(&Value::String(&s));
        assert_eq!(roundtripped, n, "roundtrip failed for {n}");
    }
}

#[test]
fn string_concatenation_matches_plain_join() {
    let arena = Arena::new();
    for (a, b) in [("'foo'", "'bar'"), ("1", "'x'"), ("'x'", "2"), ("true", "'!'")] {
        let joined_src = format!("{a} + {b}");
        let joined = run(&arena, &Env::new(), &joined_src);
        let expected = format!(
            "{}{}",
            run(&arena, &Env::new(), a),
            run(&arena, &Env::new(), b)
        );
        assert_eq!(joined, expected);
    }
}

#[test]
fn additive_multiplicative_precedence_holds() {
    let arena = Arena::new();
    for (a, b, c) in [(2, 3, 4), (100, 7, 9), (1000, 1000, 1000), (-5, 6, -2)] {
        let lhs_src = format!("{a} + {b} * {c}");
        let rhs_src = format!("{a} + ({b} * {c})");
        let lhs = run(&arena, &Env::new(), &lhs_src);
        let rhs = run(&arena, &Env::new(), &rhs_src);
        assert_eq!(lhs, rhs, "a + b*c should equal a + (b*c) for {a},{b},{c}");

        let lhs2_src = format!("{a} * {b} + {c}");
        let rhs2_src = format!("({a} * {b}) + {c}");
        let lhs2 = run(&arena, &Env::new(), &lhs2_src);
        let rhs2 = run(&arena, &Env::new(), &rhs2_src);
        assert_eq!(lhs2, rhs2, "a*b + c should equal (a*b) + c for {a},{b},{c}");
    }
}

#[rstest]
#[case::zero("0")]
#[case::one("1")]
#[case::empty_string("''")]
#[case::nonempty_string("'x'")]
#[case::null("null")]
#[case::undefined("undefined")]
#[case::bool_false("false")]
#[case::bool_true("true")]
fn double_negation_matches_to_bool(#[case] expr: &str) {
    let arena = Arena::new();
    let env = Env::new();
    let x = eval(expr, &arena, &env).unwrap();
    let not_not_src = format!("!!{expr}");
    let not_not_env = Env::new();
    let not_not = eval(&not_not_src, &arena, &not_not_env).unwrap();
    let not_not_not_src = format!("!!!{expr}");
    let not_not_not_env = Env::new();
    let not_not_not = eval(&not_not_not_src, &arena, &not_not_not_env).unwrap();
    assert_eq!(not_not.to_bool(), x.to_bool(), "!!{expr}");
    assert_eq!(not_not_not.to_bool(), !x.to_bool(), "!!!{expr}");
}

#[rstest]
#[case::undefined_falls_through("undefined ?? 5", "5")]
#[case::null_falls_through("null ?? 5", "5")]
#[case::zero_is_not_nullish("0 ?? 5", "0")]
#[case::false_is_not_nullish("false ?? 5", "false")]
#[case::empty_string_is_not_nullish("'' ?? 5", "")]
fn nullish_coalescing_semantics(#[case] expr: &str, #[case] expected: &str) {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, expr), expected);
}

#[test]
fn short_circuit_avoids_calling_host_function() {
    let arena = Arena::new();
    let counter = std::cell::Cell::new(0i32);
    let mark_called = |_this: Value<'_>, _args: &[Value<'_>], _u: Option<&()>| {
        counter.set(counter.get() + 1);
        Ok(Value::Bool(true))
    };
    let reference = |this: Value<'_>, ident: Value<'_>, _u: Option<&()>| {
        if this.is_global_sentinel() {
            if let Value::String("se") = ident {
                return Ok(Value::Function(&mark_called));
            }
        }
        Ok(Value::Undefined)
    };
    let env = Env::new().with_reference(&reference);

    assert_eq!(run(&arena, &env, "false && se()"), "false");
    assert_eq!(counter.get(), 0, "&& must not evaluate its right side");

    assert_eq!(run(&arena, &env, "true || se()"), "true");
    assert_eq!(counter.get(), 0, "|| must not evaluate its right side");

    assert_eq!(run(&arena, &env, "true && se()"), "true");
    assert_eq!(counter.get(), 1, "&& must evaluate its right side when the left is truthy");
}

#[test]
fn depth_limit_boundary_is_inclusive_at_max() {
    let arena = Arena::new();
    let env = Env::new();
    let at_limit = format!("{}{}{}", "(".repeat(100), "1", ")".repeat(100));
    let over_limit = format!("{}{}{}", "(".repeat(101), "1", ")".repeat(101));
    assert_eq!(run(&arena, &env, &at_limit), "1");
    assert_eq!(run(&arena, &env, &over_limit), "MaxDepthError");
}

#[test]
fn allocator_failure_never_panics_and_stays_consistent() {
    for k in 2..=20u64 {
        let arena = Arena::with_fallible_alloc_for_test(64, k);
        let env = Env::new();
        for _ in 0..30 {
            match eval("'abcdefghij' + 'klmnopqrst'", &arena, &env) {
                Ok(v) => assert_eq!(v.to_string(), "abcdefghijklmnopqrst"),
                Err(e) => assert!(e.is_out_of_memory(), "unexpected error kind: {e}"),
            }
        }
    }
}
