//! The ten concrete scenarios: bit-exact stringified results or error
//! messages for representative inputs across the whole ladder.

use indoc::indoc;
use jexpr_arena::Arena;
use jexpr_engine::{Env, Value};

fn run<'a>(arena: &'a Arena, env: &'a Env<'a>, expr: &'a str) -> String {
    match jexpr_engine::eval(expr, arena, env) {
        Ok(v) => v.to_string(),
        Err(e) => e.to_string(),
    }
}

#[test]
fn arithmetic_precedence() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "1 + 2 * (10 * 20)"), "401");
}

#[test]
fn string_concatenation() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "'hello' + ' ' + 'world'"), "hello world");
}

#[test]
fn json_member_and_index_access() {
    let arena = Arena::new();
    const JSON: &str = indoc! {r#"
        {
            "data": [1, true, false, null, {"a": 1}]
        }
    "#};
    let reference = |this: Value<'_>, ident: Value<'_>, _udata: Option<&()>| {
        if this.is_global_sentinel() {
            if let Value::String("json") = ident {
                return Ok(Value::Json(JSON));
            }
        }
        Ok(Value::Undefined)
    };
    let env = Env::new().with_reference(&reference);
    assert_eq!(run(&arena, &env, "json.data[3] == null"), "true");
}

#[test]
fn exact_i64_arithmetic_via_host_functions() {
    let arena = Arena::new();
    fn i64_fn<'a>(
        _r: Value<'a>,
        args: &[Value<'a>],
        _u: Option<&'a ()>,
    ) -> Result<Value<'a>, jexpr_value::Error<'a>> {
        let Some(Value::String(s)) = args.first() else {
            return Ok(Value::Int(0));
        };
        Ok(Value::Int(s.parse().unwrap_or(0)))
    }
    let reference = |this: Value<'_>, ident: Value<'_>, _udata: Option<&()>| {
        if this.is_global_sentinel() {
            if let Value::String("i64") = ident {
                return Ok(Value::Function(&i64_fn));
            }
        }
        Ok(Value::Undefined)
    };
    let env = Env::new().with_reference(&reference);
    assert_eq!(
        run(&arena, &env, "i64(\"9223372036854775807\") - i64(\"1\")"),
        "9223372036854775806"
    );
}

#[test]
fn short_circuit_and_relational_mix() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "(1 || (2 > 5)) && (4 < 5 || 5 < 4)"), "true");
}

#[test]
fn calling_an_undefined_identifier_reports_not_a_function() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "howdy()"), "TypeError: howdy is not a function");
}

#[test]
fn dotting_into_an_undefined_identifier_reports_chained_type_error() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(
        run(&arena, &env, "a.b"),
        "TypeError: Cannot read properties of undefined (reading 'b')"
    );
}

#[test]
fn optional_chaining_absorbs_the_same_miss() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "a?.b"), "undefined");
}

#[test]
fn case_sensitive_string_ordering() {
    let arena = Arena::new();
    let env = Env::new();
    assert_eq!(run(&arena, &env, "'HI' < 'hi'"), "true");
}

#[test]
fn no_case_string_ordering() {
    let arena = Arena::new();
    let env = Env::new().with_no_case(true);
    assert_eq!(run(&arena, &env, "'HI' < 'hi'"), "false");
}
