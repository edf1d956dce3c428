//! sh2py — translate a subset of POSIX shell into Python 3, line by line.
//!
//! There is no grammar and no syntax tree. Each source line is classified by
//! an ordered table of recognizers and rewritten on its own, with a small
//! amount of state (nesting depth, required imports) carried between lines.
//!
//! # Modules
//!
//! - [`translate`] — the [`Translator`] engine and its per-construct handlers
//! - [`patterns`] — the ordered recognizer table and [`classify`](patterns::classify)
//! - [`state`] — indent depth and required capabilities for one run
//! - [`emit`] — structured output lines (suppressed / blank / code + comment)
//! - [`python`] — target-language quoting, reserved names, and imports
//! - [`lexer`] — byte-level helpers for scanning a single line
//!
//! # Examples
//!
//! ```
//! let py = sh2py::transpile("x=5\necho \"x is $x\"\n").unwrap();
//! assert_eq!(py, "#!/usr/bin/python3 -u\nx = 5\nprint(f'x is {x}')\n");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::too_many_lines)] // the dispatch match mirrors the whole rule table

pub mod emit;
pub mod lexer;
pub mod patterns;
pub mod python;
pub mod state;
pub mod translate;

pub use translate::{TranslateError, Translation, Translator, translate, transpile};
