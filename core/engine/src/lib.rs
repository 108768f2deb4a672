//! A single-pass, recursive-descent, precedence-climbing evaluator for a
//! JavaScript-subset expression grammar (§4). There is no separate
//! tokenizer or AST: [`eval`] scans the input text directly, level by
//! level, re-entering tighter levels on narrower sub-spans as it goes.

mod atom;
mod ctx;
mod depth;
mod env;
mod json_probe;
mod ladder;
mod lexer;
mod steps;

pub use env::{Env, RefCallback};
pub use jexpr_value::{Error, ErrorFlags, HostFunction, ObjectRef, Value, ValueKind};

use ctx::Ctx;
use jexpr_arena::Arena;

/// Evaluates `input` against `env`, allocating any produced strings, arrays,
/// or error payloads from `arena`. The returned `Value` (and any error's
/// payload) borrows from both `input` and `arena`, so neither may be
/// dropped or reused for another evaluation before the result is.
#[tracing::instrument(level = "trace", skip(arena, env))]
pub fn eval<'a>(input: &'a str, arena: &'a Arena, env: &'a Env<'a>) -> Result<Value<'a>, Error<'a>> {
    let ctx = Ctx::new(arena, env);
    let result = ladder::eval_comma(&ctx, input.trim());
    if let Err(err) = &result {
        tracing::debug!(%err, "evaluation failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_arithmetic_with_parens() {
        let arena = Arena::new();
        let env = Env::new();
        let result = eval("1 + 2 * (10 * 20)", &arena, &env).unwrap();
        assert_eq!(result.to_string(), "401");
    }

    #[test]
    fn concatenates_strings() {
        let arena = Arena::new();
        let env = Env::new();
        let result = eval("'hello' + ' ' + 'world'", &arena, &env).unwrap();
        assert_eq!(result.to_string(), "hello world");
    }

    #[test]
    fn short_circuits_or_without_evaluating_the_right_side() {
        let arena = Arena::new();
        let env = Env::new();
        let result = eval("true || nonexistent", &arena, &env).unwrap();
        assert!(result.to_bool());
    }

    #[test]
    fn undefined_identifier_without_a_reference_callback_errors() {
        let arena = Arena::new();
        let env = Env::new();
        let err = eval("missing", &arena, &env).unwrap_err();
        assert!(err.flags().contains(ErrorFlags::UNDEFINED_IDENTIFIER));
    }
}
