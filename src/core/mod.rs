pub mod codec;
pub mod literal;
pub mod value;

pub use codec::{DecodeError, decode, encode};
pub use literal::{LiteralError, PropertyLiteral};
pub use value::{BigInt, OpaqueKind, Pattern, Value};
