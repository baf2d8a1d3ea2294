#![deny(missing_docs)]
#![doc = "Value model, verdicts, descriptors and the error surface shared by the checker crates."]

pub mod errors;
mod info;
pub mod serde;
pub mod value;
mod verdict;

pub use errors::{CheckError, ErrorInfo};
pub use info::{arity_mismatch, Checker, CheckerInfo, Predicate};
pub use value::{format_duration, ErrorValue, FromValue, Kind, Map, Record, Seq, Typed, Value};
pub use verdict::Verdict;
