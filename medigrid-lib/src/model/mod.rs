//! Dynamic row model

mod record;
mod value;

pub use record::Record;
pub use value::Value;
