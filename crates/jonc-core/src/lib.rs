//! # jonc-core
//!
//! Document model, lenient parser, writer, and type-directed marshalling for
//! **JONC** (JSON with comments) — a configuration-friendly JSON dialect with
//! `//` and `/* */` comments, unquoted keys, single-quoted strings, and
//! optional commas.
//!
//! Comments survive the round trip: the parser attaches a comment to the
//! object entry it precedes, the writer emits it again, and the marshalling
//! engine's field tables can declare comments that land in generated
//! configuration files.
//!
//! ## Quick start
//!
//! ```rust
//! use jonc_core::{parse, Marshaller};
//!
//! let doc = parse("{ /* retry budget */ attempts: 3, host: 'localhost' }").unwrap();
//! let object = doc.as_object().unwrap();
//! assert_eq!(object.comment("attempts"), Some("retry budget"));
//!
//! let marshaller = Marshaller::new();
//! let attempts: i32 = object.get_as(&marshaller, "attempts").unwrap();
//! assert_eq!(attempts, 3);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` / `Primitive` / `Object` document tree
//! - [`parse`] — JONC text → tree, with comment attribution
//! - [`write`] — tree → JONC text, compact or pretty
//! - [`marshal`] — the `Marshaller` engine: tree ⇄ native values
//! - [`registry`] — per-type conversion strategy tables
//! - [`reflect`] — the introspection seam for generic serialization
//! - [`json`] — serde interop for plain-JSON input and output
//! - [`error`] — parse error types

mod defaults;
pub mod error;
pub mod json;
pub mod marshal;
pub mod parse;
pub mod reflect;
pub mod registry;
pub mod value;
pub mod write;

pub use error::ParseError;
pub use marshal::{Marshal, Marshaller, TypeClass};
pub use parse::{parse, parse_object};
pub use reflect::{Field, Reflect, Shape};
pub use registry::Registry;
pub use value::{Object, Primitive, Value};
pub use write::{encode, encode_compact, encode_pretty, Style};
