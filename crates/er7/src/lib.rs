//! # ER7 message model and parser
//!
//! This crate turns an ER7-encoded HL7 v2 message (pipe/caret delimited,
//! escape-sequence bearing, segment-per-line) into a generic, order-preserving
//! message tree. It is the front half of the hl7cvt conversion engine; the
//! `hl7cvt-serde` crate renders the tree as XML and JSON.
//!
//! ## Pipeline
//!
//! 1. **Normalization** — `\r\n` and bare `\n` segment terminators are
//!    rewritten to `\r` ([`normalize_line_endings`]). Idempotent.
//! 2. **Delimiter resolution** — the five control characters are read
//!    positionally from the header prefix ([`Delimiters::from_header`]).
//!    Nothing assumes the conventional `|^~\&` set.
//! 3. **Tokenization** — segments split on `\r`, fields on the field
//!    separator, then repetitions, components, and subcomponents on theirs
//!    ([`parse_message`]).
//! 4. **Escape expansion** — `\F\`-style sequences are decoded into each
//!    subcomponent as it is read ([`escape::decode_escapes`]).
//!
//! The whole pass is a pure function of the input string: no globals, no
//! caching, no I/O. Concurrent parses never coordinate.
//!
//! ## Errors vs. warnings
//!
//! Only an unreadable header aborts a parse. Everything else is locally
//! recoverable: malformed segment lines and unrecognized escape sequences
//! are accumulated as [`Warning`]s and returned beside the tree, unless
//! [`ParseMode::Strict`] turns malformed segments fatal.
//!
//! ## Example
//!
//! ```
//! use hl7cvt_er7::{parse_message, Field};
//!
//! let parsed = parse_message("MSH|^~\\&|APP|FAC\rPID|||123^^^MRN")?;
//! let pid = parsed.message.segment("PID").unwrap();
//! assert_eq!(pid.field(3).and_then(Field::value), Some("123"));
//! # Ok::<(), hl7cvt_er7::ParseError>(())
//! ```

pub mod delimiters;
pub mod error;
pub mod escape;
pub mod message;
pub mod normalize;
pub mod parse;

pub use delimiters::Delimiters;
pub use error::{ParseError, Warning};
pub use message::{Component, Field, Message, Repetition, Segment};
pub use normalize::normalize_line_endings;
pub use parse::{Parsed, ParseMode, parse_message, parse_message_with_mode};
