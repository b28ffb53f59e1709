//! Parameter marshalling for compiled prepared statements.
//!
//! The placeholders of a statement are normalized once, at preparation time,
//! into a dense `0..N-1` numbering ordered by their position in the text
//! ([`PrepareStatement`]). Type inference then resolves a [`ParameterMap`],
//! and every compilation pass of an invocation reads its bound values from
//! the runtime buffer through a [`ParameterCache`], decoding each one at most
//! once.
//!
//! ```rust
//! use sluice::*;
//! let statement = PrepareStatement::new(
//!     "find",
//!     "SELECT * FROM t WHERE a = ? AND b = ?",
//!     vec![Some(Placeholder::new(36, 0)), Some(Placeholder::new(26, 1))],
//! );
//! assert_eq!(statement.placeholders()[0].source_position, 26);
//! let map = ParameterMap::for_statement(
//!     &statement,
//!     [
//!         ParameterInfo::new(LogicalType::Integer, false),
//!         ParameterInfo::new(LogicalType::Varchar, true),
//!     ],
//! )?;
//! let mut buffer = ParameterBuffer::new(&map);
//! buffer.bind(42)?.bind("hello")?;
//! let mut cache = ParameterCache::new(&map, buffer.as_runtime());
//! assert_eq!(cache.get_value(1)?, &Value::Varchar(Some("hello".into())));
//! # Ok::<(), Error>(())
//! ```
pub use sluice_core::*;
