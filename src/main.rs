use std::{env, process};

use lazyrt::{
    numeric::BigInt,
    primop::{PrimOp, execute_primop},
    runtime::{RuntimeError, Value, telemetry},
};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let trace = args.iter().any(|arg| arg == "--trace");
    let show_stats = args.iter().any(|arg| arg == "--stats");
    if trace {
        args.retain(|arg| arg != "--trace");
    }
    if show_stats {
        args.retain(|arg| arg != "--stats");
    }
    let radix = match extract_radix(&mut args) {
        Some(value) => value,
        None => return,
    };

    let mut logger = env_logger::Builder::from_default_env();
    if trace {
        logger.filter_level(log::LevelFilter::Trace);
    }
    logger.init();

    if args.len() < 2 || args[1] == "help" || args[1] == "--help" || args[1] == "-h" {
        print_help();
        return;
    }

    let result = match args[1].as_str() {
        "bigint" | "integer" => run_binary(&args[2..], "integer", parse_integer),
        "int64" => run_binary(&args[2..], "int64", parse_int64),
        "word64" => run_binary(&args[2..], "word64", parse_word64),
        "words" => run_words(&args[2..]),
        other => {
            eprintln!("Error: unknown command `{other}`.");
            print_help();
            process::exit(2);
        }
    };

    match result {
        Ok(value) => println!("{}", render(&value, radix)),
        Err(err) => {
            eprintln!("{}", err.render());
            process::exit(1);
        }
    }

    if show_stats {
        let stats = telemetry::snapshot();
        eprintln!(
            "thunks: created={} forced={} memo_hits={} | closures={} calls: exact={} partial={} over={}",
            stats.thunks_created,
            stats.thunks_forced,
            stats.memo_hits,
            stats.closures,
            stats.exact_calls,
            stats.partial_applications,
            stats.over_applications,
        );
    }
}

fn print_help() {
    println!(
        "\
lazyrt calculator

Usage:
  lazyrt bigint <a> <op> <b>
  lazyrt int64 <a> <op> <b>
  lazyrt word64 <a> <op> <b>
  lazyrt bigint <op> <a>
  lazyrt words <integer>

Binary ops:
  + - * quot rem div mod quotRem divMod and or xor shl shr cmp eq
Unary ops:
  neg abs signum not

Flags:
  --trace            Log every force and application (RUST_LOG=trace)
  --stats            Print evaluation counters after the run
  --radix <n>        Output radix for integer results (2..=36, default 10)
"
    );
}

fn extract_radix(args: &mut Vec<String>) -> Option<u32> {
    let mut radix = 10;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--radix" {
            if i + 1 >= args.len() {
                eprintln!("Usage: lazyrt <command> --radix <n>");
                return None;
            }
            let value = args.remove(i + 1);
            args.remove(i);
            match value.parse::<u32>() {
                Ok(parsed) if (2..=36).contains(&parsed) => {
                    radix = parsed;
                }
                _ => {
                    eprintln!("Error: --radix expects an integer between 2 and 36.");
                    return None;
                }
            }
            continue;
        }
        i += 1;
    }
    Some(radix)
}

fn parse_integer(text: &str) -> Result<Value, RuntimeError> {
    Ok(Value::Integer(text.parse::<BigInt>()?))
}

fn parse_int64(text: &str) -> Result<Value, RuntimeError> {
    let n = text.parse::<BigInt>()?;
    Ok(Value::Int64(n.to_int64()))
}

fn parse_word64(text: &str) -> Result<Value, RuntimeError> {
    let n = text.parse::<BigInt>()?;
    Ok(Value::Word64(n.to_word64()))
}

/// Operand-parsing step for one numeric family.
type Parser = fn(&str) -> Result<Value, RuntimeError>;

fn run_binary(args: &[String], family: &str, parse: Parser) -> Result<Value, RuntimeError> {
    match args {
        [op, a] => {
            let op = lookup(family, op, 1)?;
            execute_primop(op, vec![parse(a)?])
        }
        [a, op, b] => {
            let op = lookup(family, op, 2)?;
            let rhs = if takes_bit_count(op) {
                Value::Int(b.parse::<BigInt>()?.to_i32())
            } else {
                parse(b)?
            };
            execute_primop(op, vec![parse(a)?, rhs])
        }
        _ => usage(),
    }
}

fn takes_bit_count(op: PrimOp) -> bool {
    matches!(
        op,
        PrimOp::IntegerShiftL
            | PrimOp::IntegerShiftR
            | PrimOp::Int64ShiftL
            | PrimOp::Int64ShiftRA
            | PrimOp::Int64ShiftRL
            | PrimOp::Word64ShiftL
            | PrimOp::Word64ShiftRL
    )
}

fn usage<T>() -> Result<T, RuntimeError> {
    Err(RuntimeError::User(
        "expected `<a> <op> <b>` or `<op> <a>`".to_string(),
    ))
}

/// Maps a command-line operator onto the primop table.
fn lookup(family: &str, symbol: &str, arity: usize) -> Result<PrimOp, RuntimeError> {
    let suffix = match symbol {
        "+" => "Add",
        "-" => "Sub",
        "*" => "Mul",
        "quot" => "Quot",
        "rem" => "Rem",
        "div" => "Div",
        "mod" => "Mod",
        "quotRem" => "QuotRem",
        "divMod" => "DivMod",
        "and" => "And",
        "or" => "Or",
        "xor" => "Xor",
        "shl" => "ShiftL",
        "shr" if family == "integer" => "ShiftR",
        "shr" if family == "int64" => "ShiftRA",
        "shr" => "ShiftRL",
        "cmp" => "Compare",
        "eq" => "Eq",
        "neg" => "Negate",
        "abs" => "Abs",
        "signum" => "Signum",
        "not" if family == "integer" => "Complement",
        "not" => "Not",
        other => other,
    };
    PrimOp::from_name(&format!("{family}{suffix}"))
        .filter(|op| op.arity() == arity)
        .ok_or_else(|| RuntimeError::User(format!("unknown {family} operator `{symbol}`")))
}

/// Dumps the canonical word representation as JSON.
fn run_words(args: &[String]) -> Result<Value, RuntimeError> {
    let [text] = args else {
        return usage();
    };
    let n = text.parse::<BigInt>()?;
    let json = serde_json::to_string(&n).map_err(|err| RuntimeError::User(err.to_string()))?;
    Ok(Value::text(&json))
}

fn render(value: &Value, radix: u32) -> String {
    match value {
        Value::Integer(n) => n.to_string_radix(radix).unwrap_or_else(|err| err.render()),
        Value::Str(s) => s.to_string(),
        Value::Data(data) => {
            let fields: Vec<String> = data.fields.iter().map(|f| render(f, radix)).collect();
            fields.join(" ")
        }
        other => other.to_string(),
    }
}
