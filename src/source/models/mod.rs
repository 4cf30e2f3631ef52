mod interval;
mod keywords;
mod scope;

pub use interval::Interval;
pub use keywords::Keywords;
pub use scope::Scope;

pub(crate) use keywords::{deserialize_tokens, encode_tokens};
