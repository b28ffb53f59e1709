use crate::{Result, Value};
use std::fmt::Display;

/// Binds parameter values of a prepared statement invocation.
///
/// Implementors check each value against the declared parameter type before
/// accepting it, a mismatch is an ordinary bind-time error.
///
/// # Binding Semantics
/// * `bind` sets the parameter after the last one bound (starting at 0).
/// * `bind_index` sets the parameter at `index` (from 0).
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// parameters.bind(42)?.bind("hello")?;
/// ```
pub trait Prepared: Send + Sync + Display {
    /// Forget all the values bound so far.
    fn clear_bindings(&mut self) -> &mut Self;
    /// Bind the next parameter.
    fn bind<'v, V: Into<Value<'v>>>(&mut self, value: V) -> Result<&mut Self>;
    /// Bind a value at a specific index.
    fn bind_index<'v, V: Into<Value<'v>>>(&mut self, value: V, index: u32) -> Result<&mut Self>;
}
