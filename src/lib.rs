pub mod source;

pub use source::{Error, Interval, Keywords, PhotoQuery, Result, Scope};
