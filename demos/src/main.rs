//! Evaluates one expression, resolving bare identifiers against the
//! process environment and exposing a single `len(x)` host function.

use clap::Parser;
use jexpr_arena::Arena;
use jexpr_engine::{eval, Env, Value};

#[derive(Parser)]
#[command(author, about = "Evaluate a jexpr expression against the environment")]
struct Args {
    /// The expression to evaluate, e.g. "HOME + '/bin'"
    expression: String,

    /// Compare strings case-insensitively.
    #[arg(long)]
    no_case: bool,
}

fn len_fn<'a>(
    _receiver: Value<'a>,
    args: &[Value<'a>],
    _udata: Option<&'a ()>,
) -> Result<Value<'a>, jexpr_value::Error<'a>> {
    let n = match args.first() {
        Some(Value::String(s)) => s.chars().count() as i64,
        Some(Value::Array(items)) => items.len() as i64,
        _ => 0,
    };
    Ok(Value::Int(n))
}

fn main() {
    let args = Args::parse();
    let arena = Arena::new();

    let reference = |this: Value<'_>, ident: Value<'_>, _udata: Option<&()>| {
        let Value::String(name) = ident else {
            return Ok(Value::Undefined);
        };
        if !this.is_global_sentinel() {
            return Ok(Value::Undefined);
        }
        if name == "len" {
            return Ok(Value::Function(&len_fn));
        }
        match std::env::var(name) {
            Ok(v) => Ok(arena.alloc_str(&v).map_or(Value::Undefined, Value::String)),
            Err(_) => Ok(Value::Undefined),
        }
    };

    let env = Env::new().with_no_case(args.no_case).with_reference(&reference);

    match eval(&args.expression, &arena, &env) {
        Ok(value) => println!("{value}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
