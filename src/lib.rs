pub mod numeric;
pub mod primop;
pub mod runtime;
