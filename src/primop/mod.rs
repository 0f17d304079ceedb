use std::cmp::Ordering;

use crate::numeric::{BigInt, Int64, Word64, float, word32};
use crate::runtime::{error::RuntimeError, force, value::Value};

macro_rules! define_primops {
    ($($name:ident = $id:literal => $display:literal / $arity:literal),* $(,)?) => {
        /// Primitive operations invoked by generated code on forced values.
        ///
        /// IDs are emitted into generated programs, so existing
        /// discriminants must remain stable.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PrimOp {
            $($name = $id,)*
        }

        impl PrimOp {
            pub const ALL: &'static [PrimOp] = &[$(PrimOp::$name,)*];

            /// Returns the stable ID for this primitive op.
            pub fn id(self) -> u8 {
                self as u8
            }

            pub fn from_id(id: u8) -> Option<Self> {
                match id {
                    $($id => Some(Self::$name),)*
                    _ => None,
                }
            }

            /// Returns the fixed argument count for this operation.
            pub fn arity(self) -> usize {
                match self {
                    $(Self::$name => $arity,)*
                }
            }

            /// Human-readable name used in diagnostics and traces.
            pub fn display_name(self) -> &'static str {
                match self {
                    $(Self::$name => $display,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($display => Some(Self::$name),)*
                    _ => None,
                }
            }
        }
    };
}

define_primops! {
    // Integer
    IntegerAdd = 0 => "integerAdd" / 2,
    IntegerSub = 1 => "integerSub" / 2,
    IntegerMul = 2 => "integerMul" / 2,
    IntegerQuot = 3 => "integerQuot" / 2,
    IntegerRem = 4 => "integerRem" / 2,
    IntegerDiv = 5 => "integerDiv" / 2,
    IntegerMod = 6 => "integerMod" / 2,
    IntegerQuotRem = 7 => "integerQuotRem" / 2,
    IntegerDivMod = 8 => "integerDivMod" / 2,
    IntegerNegate = 9 => "integerNegate" / 1,
    IntegerAbs = 10 => "integerAbs" / 1,
    IntegerSignum = 11 => "integerSignum" / 1,
    IntegerAnd = 12 => "integerAnd" / 2,
    IntegerOr = 13 => "integerOr" / 2,
    IntegerXor = 14 => "integerXor" / 2,
    IntegerComplement = 15 => "integerComplement" / 1,
    IntegerShiftL = 16 => "integerShiftL" / 2,
    IntegerShiftR = 17 => "integerShiftR" / 2,
    IntegerCompare = 18 => "integerCompare" / 2,
    IntegerEq = 19 => "integerEq" / 2,
    IntegerToString = 20 => "integerToString" / 2,
    IntegerFromString = 21 => "integerFromString" / 2,
    IntegerToInt = 22 => "integerToInt" / 1,
    IntegerFromInt = 23 => "integerFromInt" / 1,
    IntegerToDouble = 24 => "integerToDouble" / 1,
    IntegerFromDouble = 25 => "integerFromDouble" / 1,
    IntegerToInt64 = 26 => "integerToInt64" / 1,
    IntegerFromInt64 = 27 => "integerFromInt64" / 1,
    IntegerToWord64 = 28 => "integerToWord64" / 1,
    IntegerFromWord64 = 29 => "integerFromWord64" / 1,
    IntegerShorten = 30 => "integerShorten" / 2,
    IntegerEncodeDouble = 31 => "integerEncodeDouble" / 2,
    IntegerDecodeDouble = 32 => "integerDecodeDouble" / 1,
    IntegerFromRat = 33 => "integerFromRat" / 2,

    // Int64
    Int64Add = 40 => "int64Add" / 2,
    Int64Sub = 41 => "int64Sub" / 2,
    Int64Mul = 42 => "int64Mul" / 2,
    Int64Quot = 43 => "int64Quot" / 2,
    Int64Rem = 44 => "int64Rem" / 2,
    Int64Div = 45 => "int64Div" / 2,
    Int64Mod = 46 => "int64Mod" / 2,
    Int64Negate = 47 => "int64Negate" / 1,
    Int64And = 48 => "int64And" / 2,
    Int64Or = 49 => "int64Or" / 2,
    Int64Xor = 50 => "int64Xor" / 2,
    Int64Not = 51 => "int64Not" / 1,
    Int64ShiftL = 52 => "int64ShiftL" / 2,
    Int64ShiftRA = 53 => "int64ShiftRA" / 2,
    Int64ShiftRL = 54 => "int64ShiftRL" / 2,
    Int64Compare = 55 => "int64Compare" / 2,
    Int64Eq = 56 => "int64Eq" / 2,
    Int64FromInt = 57 => "int64FromInt" / 1,
    Int64ToInt = 58 => "int64ToInt" / 1,
    Int64FromDouble = 59 => "int64FromDouble" / 1,
    Int64ToDouble = 60 => "int64ToDouble" / 1,

    // Word64
    Word64Add = 70 => "word64Add" / 2,
    Word64Sub = 71 => "word64Sub" / 2,
    Word64Mul = 72 => "word64Mul" / 2,
    Word64Quot = 73 => "word64Quot" / 2,
    Word64Rem = 74 => "word64Rem" / 2,
    Word64And = 75 => "word64And" / 2,
    Word64Or = 76 => "word64Or" / 2,
    Word64Xor = 77 => "word64Xor" / 2,
    Word64Not = 78 => "word64Not" / 1,
    Word64ShiftL = 79 => "word64ShiftL" / 2,
    Word64ShiftRL = 80 => "word64ShiftRL" / 2,
    Word64Compare = 81 => "word64Compare" / 2,
    Word64Eq = 82 => "word64Eq" / 2,
    Word64ToInt64 = 83 => "word64ToInt64" / 1,
    Word64FromInt64 = 84 => "word64FromInt64" / 1,

    // Machine words and floats
    IntMul = 100 => "imul" / 2,
    IntAddC = 101 => "addIntC" / 2,
    IntSubC = 102 => "subIntC" / 2,
    IntQuotRem = 103 => "quotRemInt" / 2,
    WordPopCnt = 104 => "popCnt" / 1,
    DecodeFloat = 105 => "decodeFloat" / 1,
    DataToTag = 106 => "dataToTag" / 1,
}

/// Executes a primitive operation.
///
/// Arguments are forced first; arity is validated before anything is forced.
pub fn execute_primop(op: PrimOp, args: Vec<Value>) -> Result<Value, RuntimeError> {
    if args.len() != op.arity() {
        return Err(RuntimeError::PrimOpArity {
            name: op.display_name(),
            expected: op.arity(),
            got: args.len(),
        });
    }
    let args = args.iter().map(force).collect::<Result<Vec<_>, _>>()?;
    log::trace!("primop {}", op.display_name());

    match op {
        PrimOp::IntegerAdd => integer2(op, &args, |a, b| Ok(a.add(b).into())),
        PrimOp::IntegerSub => integer2(op, &args, |a, b| Ok(a.sub(b).into())),
        PrimOp::IntegerMul => integer2(op, &args, |a, b| Ok(a.mul(b).into())),
        PrimOp::IntegerQuot => integer2(op, &args, |a, b| Ok(a.quot(b)?.into())),
        PrimOp::IntegerRem => integer2(op, &args, |a, b| Ok(a.rem(b)?.into())),
        PrimOp::IntegerDiv => integer2(op, &args, |a, b| Ok(a.div(b)?.into())),
        PrimOp::IntegerMod => integer2(op, &args, |a, b| Ok(a.modulo(b)?.into())),
        PrimOp::IntegerQuotRem => integer2(op, &args, |a, b| {
            let (q, r) = a.quot_rem(b)?;
            Ok(pair(q.into(), r.into()))
        }),
        PrimOp::IntegerDivMod => integer2(op, &args, |a, b| {
            let (d, m) = a.div_mod(b)?;
            Ok(pair(d.into(), m.into()))
        }),
        PrimOp::IntegerNegate => Ok(expect_integer(op, &args[0])?.negate().into()),
        PrimOp::IntegerAbs => Ok(expect_integer(op, &args[0])?.abs().into()),
        PrimOp::IntegerSignum => Ok(expect_integer(op, &args[0])?.signum().into()),
        PrimOp::IntegerAnd => integer2(op, &args, |a, b| Ok(a.and(b).into())),
        PrimOp::IntegerOr => integer2(op, &args, |a, b| Ok(a.or(b).into())),
        PrimOp::IntegerXor => integer2(op, &args, |a, b| Ok(a.xor(b).into())),
        PrimOp::IntegerComplement => Ok(expect_integer(op, &args[0])?.not().into()),
        PrimOp::IntegerShiftL => {
            let n = expect_integer(op, &args[0])?;
            Ok(n.shift_left(expect_shift(op, &args[1])?).into())
        }
        PrimOp::IntegerShiftR => {
            let n = expect_integer(op, &args[0])?;
            Ok(n.shift_right(expect_shift(op, &args[1])?).into())
        }
        PrimOp::IntegerCompare => integer2(op, &args, |a, b| Ok(ordering(a.cmp(b)))),
        PrimOp::IntegerEq => integer2(op, &args, |a, b| Ok(Value::Bool(a == b))),
        PrimOp::IntegerToString => {
            let n = expect_integer(op, &args[0])?;
            let radix = expect_radix(op, &args[1])?;
            Ok(Value::text(&n.to_string_radix(radix)?))
        }
        PrimOp::IntegerFromString => {
            let text = expect_text(op, &args[0])?;
            let radix = expect_radix(op, &args[1])?;
            Ok(BigInt::from_str_radix(text, radix)?.into())
        }
        PrimOp::IntegerToInt => Ok(Value::Int(expect_integer(op, &args[0])?.to_i32())),
        PrimOp::IntegerFromInt => Ok(BigInt::from_i32(expect_int(op, &args[0])?).into()),
        PrimOp::IntegerToDouble => Ok(Value::Double(expect_integer(op, &args[0])?.to_f64())),
        PrimOp::IntegerFromDouble => Ok(BigInt::from_f64(expect_double(op, &args[0])?).into()),
        PrimOp::IntegerToInt64 => Ok(expect_integer(op, &args[0])?.to_int64().into()),
        PrimOp::IntegerFromInt64 => Ok(BigInt::from_int64(expect_int64(op, &args[0])?).into()),
        PrimOp::IntegerToWord64 => Ok(expect_integer(op, &args[0])?.to_word64().into()),
        PrimOp::IntegerFromWord64 => {
            Ok(BigInt::from_word64(expect_word64(op, &args[0])?).into())
        }
        PrimOp::IntegerShorten => {
            let n = expect_integer(op, &args[0])?;
            Ok(n.shorten(expect_shift(op, &args[1])?).into())
        }
        PrimOp::IntegerEncodeDouble => {
            let mantissa = expect_integer(op, &args[0])?.to_f64();
            let exponent = expect_int(op, &args[1])?;
            Ok(Value::Double(float::encode_double(mantissa, exponent)))
        }
        PrimOp::IntegerDecodeDouble => {
            let (mantissa, exponent) = BigInt::decode_double(expect_double(op, &args[0])?);
            Ok(pair(mantissa.into(), Value::Int(exponent)))
        }
        PrimOp::IntegerFromRat => integer2(op, &args, |a, b| {
            Ok(Value::Double(BigInt::from_rat(a, b)))
        }),

        PrimOp::Int64Add => int64_2(op, &args, |a, b| Ok(a.add(b).into())),
        PrimOp::Int64Sub => int64_2(op, &args, |a, b| Ok(a.sub(b).into())),
        PrimOp::Int64Mul => int64_2(op, &args, |a, b| Ok(a.mul(b).into())),
        PrimOp::Int64Quot => int64_2(op, &args, |a, b| Ok(a.quot(b)?.into())),
        PrimOp::Int64Rem => int64_2(op, &args, |a, b| Ok(a.rem(b)?.into())),
        PrimOp::Int64Div => int64_2(op, &args, |a, b| Ok(a.div(b)?.into())),
        PrimOp::Int64Mod => int64_2(op, &args, |a, b| Ok(a.modulo(b)?.into())),
        PrimOp::Int64Negate => Ok(expect_int64(op, &args[0])?.negate().into()),
        PrimOp::Int64And => int64_2(op, &args, |a, b| Ok(a.and(b).into())),
        PrimOp::Int64Or => int64_2(op, &args, |a, b| Ok(a.or(b).into())),
        PrimOp::Int64Xor => int64_2(op, &args, |a, b| Ok(a.xor(b).into())),
        PrimOp::Int64Not => Ok(expect_int64(op, &args[0])?.not().into()),
        PrimOp::Int64ShiftL => {
            let n = expect_int64(op, &args[0])?;
            Ok(n.shift_left(expect_int(op, &args[1])? as u32).into())
        }
        PrimOp::Int64ShiftRA => {
            let n = expect_int64(op, &args[0])?;
            Ok(n.shift_right(expect_int(op, &args[1])? as u32).into())
        }
        PrimOp::Int64ShiftRL => {
            let n = expect_int64(op, &args[0])?;
            Ok(n.shift_right_unsigned(expect_int(op, &args[1])? as u32).into())
        }
        PrimOp::Int64Compare => int64_2(op, &args, |a, b| Ok(ordering(a.cmp(&b)))),
        PrimOp::Int64Eq => int64_2(op, &args, |a, b| Ok(Value::Bool(a == b))),
        PrimOp::Int64FromInt => Ok(Int64::from_i32(expect_int(op, &args[0])?).into()),
        PrimOp::Int64ToInt => Ok(Value::Int(expect_int64(op, &args[0])?.to_i32())),
        PrimOp::Int64FromDouble => Ok(Int64::from_f64(expect_double(op, &args[0])?).into()),
        PrimOp::Int64ToDouble => Ok(Value::Double(expect_int64(op, &args[0])?.to_f64())),

        PrimOp::Word64Add => word64_2(op, &args, |a, b| Ok(a.add(b).into())),
        PrimOp::Word64Sub => word64_2(op, &args, |a, b| Ok(a.sub(b).into())),
        PrimOp::Word64Mul => word64_2(op, &args, |a, b| Ok(a.mul(b).into())),
        PrimOp::Word64Quot => word64_2(op, &args, |a, b| Ok(a.quot(b)?.into())),
        PrimOp::Word64Rem => word64_2(op, &args, |a, b| Ok(a.rem(b)?.into())),
        PrimOp::Word64And => word64_2(op, &args, |a, b| Ok(a.and(b).into())),
        PrimOp::Word64Or => word64_2(op, &args, |a, b| Ok(a.or(b).into())),
        PrimOp::Word64Xor => word64_2(op, &args, |a, b| Ok(a.xor(b).into())),
        PrimOp::Word64Not => Ok(expect_word64(op, &args[0])?.not().into()),
        PrimOp::Word64ShiftL => {
            let n = expect_word64(op, &args[0])?;
            Ok(n.shift_left(expect_int(op, &args[1])? as u32).into())
        }
        PrimOp::Word64ShiftRL => {
            let n = expect_word64(op, &args[0])?;
            Ok(n.shift_right(expect_int(op, &args[1])? as u32).into())
        }
        PrimOp::Word64Compare => word64_2(op, &args, |a, b| Ok(ordering(a.cmp(&b)))),
        PrimOp::Word64Eq => word64_2(op, &args, |a, b| Ok(Value::Bool(a == b))),
        PrimOp::Word64ToInt64 => Ok(expect_word64(op, &args[0])?.to_int64().into()),
        PrimOp::Word64FromInt64 => Ok(Word64::from_int64(expect_int64(op, &args[0])?).into()),

        PrimOp::IntMul => {
            let (a, b) = (expect_int(op, &args[0])?, expect_int(op, &args[1])?);
            Ok(Value::Int(word32::imul(a, b)))
        }
        PrimOp::IntAddC => {
            let (a, b) = (expect_int(op, &args[0])?, expect_int(op, &args[1])?);
            let (sum, overflow) = word32::add_c(a, b);
            Ok(pair(Value::Int(sum), Value::Int(i32::from(overflow))))
        }
        PrimOp::IntSubC => {
            let (a, b) = (expect_int(op, &args[0])?, expect_int(op, &args[1])?);
            let (diff, overflow) = word32::sub_c(a, b);
            Ok(pair(Value::Int(diff), Value::Int(i32::from(overflow))))
        }
        PrimOp::IntQuotRem => {
            let (a, b) = (expect_int(op, &args[0])?, expect_int(op, &args[1])?);
            let (q, r) = word32::quot_rem_i32(a, b)?;
            Ok(pair(Value::Int(q), Value::Int(r)))
        }
        PrimOp::WordPopCnt => match &args[0] {
            Value::Word(w) => Ok(Value::Int(word32::pop_cnt(*w) as i32)),
            other => Ok(Value::Int(word32::pop_cnt(expect_int(op, other)? as u32) as i32)),
        },
        PrimOp::DecodeFloat => {
            let (mantissa, exponent) = float::decode_float(expect_double(op, &args[0])? as f32);
            Ok(pair(Value::Int(mantissa), Value::Int(exponent)))
        }
        PrimOp::DataToTag => match args[0].data_to_tag() {
            Some(tag) => Ok(Value::Int(tag as i32)),
            None => Err(type_error(op, "Data", &args[0])),
        },
    }
}

fn pair(first: Value, second: Value) -> Value {
    Value::data(0, vec![first, second])
}

fn ordering(ordering: Ordering) -> Value {
    Value::Int(ordering as i32)
}

/// Helper for binary Integer primops.
fn integer2<F>(op: PrimOp, args: &[Value], f: F) -> Result<Value, RuntimeError>
where
    F: FnOnce(&BigInt, &BigInt) -> Result<Value, RuntimeError>,
{
    f(expect_integer(op, &args[0])?, expect_integer(op, &args[1])?)
}

fn int64_2<F>(op: PrimOp, args: &[Value], f: F) -> Result<Value, RuntimeError>
where
    F: FnOnce(Int64, Int64) -> Result<Value, RuntimeError>,
{
    f(expect_int64(op, &args[0])?, expect_int64(op, &args[1])?)
}

fn word64_2<F>(op: PrimOp, args: &[Value], f: F) -> Result<Value, RuntimeError>
where
    F: FnOnce(Word64, Word64) -> Result<Value, RuntimeError>,
{
    f(expect_word64(op, &args[0])?, expect_word64(op, &args[1])?)
}

fn expect_integer(op: PrimOp, value: &Value) -> Result<&BigInt, RuntimeError> {
    match value {
        Value::Integer(n) => Ok(n),
        other => Err(type_error(op, "Integer", other)),
    }
}

fn expect_int64(op: PrimOp, value: &Value) -> Result<Int64, RuntimeError> {
    match value {
        Value::Int64(n) => Ok(*n),
        other => Err(type_error(op, "Int64", other)),
    }
}

fn expect_word64(op: PrimOp, value: &Value) -> Result<Word64, RuntimeError> {
    match value {
        Value::Word64(n) => Ok(*n),
        other => Err(type_error(op, "Word64", other)),
    }
}

fn expect_int(op: PrimOp, value: &Value) -> Result<i32, RuntimeError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(type_error(op, "Int", other)),
    }
}

/// Bit counts for BigInt shifts must be non-negative.
fn expect_shift(op: PrimOp, value: &Value) -> Result<u32, RuntimeError> {
    let n = expect_int(op, value)?;
    u32::try_from(n).map_err(|_| type_error(op, "non-negative Int", value))
}

fn expect_radix(op: PrimOp, value: &Value) -> Result<u32, RuntimeError> {
    let n = expect_int(op, value)?;
    u32::try_from(n).map_err(|_| RuntimeError::RadixOutOfRange(0))
}

fn expect_double(op: PrimOp, value: &Value) -> Result<f64, RuntimeError> {
    match value {
        Value::Double(n) => Ok(*n),
        other => Err(type_error(op, "Double", other)),
    }
}

fn expect_text(op: PrimOp, value: &Value) -> Result<&str, RuntimeError> {
    match value {
        Value::Str(s) => Ok(&**s),
        other => Err(type_error(op, "String", other)),
    }
}

/// Standardized type-mismatch error for primops.
fn type_error(op: PrimOp, expected: &'static str, got: &Value) -> RuntimeError {
    RuntimeError::PrimOpType {
        name: op.display_name(),
        expected,
        got: got.type_name(),
    }
}
