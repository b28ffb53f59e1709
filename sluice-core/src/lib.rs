mod as_value;
mod buffer;
mod conversions;
mod interval;
mod logical_type;
mod parameter_cache;
mod parameter_map;
mod placeholder;
mod prepared;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use buffer::*;
pub use interval::*;
pub use logical_type::*;
pub use parameter_cache::*;
pub use parameter_map::*;
pub use placeholder::*;
pub use prepared::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
