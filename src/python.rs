//! Python 3 target knowledge: reserved names, literal quoting, f-string
//! templates, and the modules emitted code may need to import.

use std::fmt;
use std::fmt::Write as _;

/// Interpreter line written after the import preamble.
pub const HEADER: &str = "#!/usr/bin/python3 -u";

/// Spaces per nesting level in emitted code.
pub const INDENT_WIDTH: usize = 4;

/// `keyword.kwlist`.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally",
    "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// `dir(builtins)`.
const BUILTINS: &[&str] = &[
    "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
    "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError", "BufferError",
    "BytesWarning", "ChildProcessError", "ConnectionAbortedError",
    "ConnectionError", "ConnectionRefusedError", "ConnectionResetError",
    "DeprecationWarning", "EOFError", "Ellipsis", "EncodingWarning",
    "EnvironmentError", "Exception", "ExceptionGroup", "False",
    "FileExistsError", "FileNotFoundError", "FloatingPointError",
    "FutureWarning", "GeneratorExit", "IOError", "ImportError",
    "ImportWarning", "IndentationError", "IndexError", "InterruptedError",
    "IsADirectoryError", "KeyError", "KeyboardInterrupt", "LookupError",
    "MemoryError", "ModuleNotFoundError", "NameError", "None",
    "NotADirectoryError", "NotImplemented", "NotImplementedError", "OSError",
    "OverflowError", "PendingDeprecationWarning", "PermissionError",
    "ProcessLookupError", "RecursionError", "ReferenceError", "ResourceWarning",
    "RuntimeError", "RuntimeWarning", "StopAsyncIteration", "StopIteration",
    "SyntaxError", "SyntaxWarning", "SystemError", "SystemExit", "TabError",
    "TimeoutError", "True", "TypeError", "UnboundLocalError",
    "UnicodeDecodeError", "UnicodeEncodeError", "UnicodeError",
    "UnicodeTranslateError", "UnicodeWarning", "UserWarning", "ValueError",
    "Warning", "ZeroDivisionError", "__build_class__", "__debug__", "__doc__",
    "__import__", "__loader__", "__name__", "__package__", "__spec__", "abs",
    "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint",
    "bytearray", "bytes", "callable", "chr", "classmethod", "compile",
    "complex", "copyright", "credits", "delattr", "dict", "dir", "divmod",
    "enumerate", "eval", "exec", "exit", "filter", "float", "format",
    "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex", "id",
    "input", "int", "isinstance", "issubclass", "iter", "len", "license",
    "list", "locals", "map", "max", "memoryview", "min", "next", "object",
    "oct", "open", "ord", "pow", "print", "property", "quit", "range", "repr",
    "reversed", "round", "set", "setattr", "slice", "sorted", "staticmethod",
    "str", "sum", "super", "tuple", "type", "vars", "zip",
];

/// Is `name` a Python keyword or a builtin?
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains(&name) || BUILTINS.contains(&name)
}

/// Render `text` the way Python's `repr()` renders a `str`.
///
/// Single quotes are preferred; double quotes are used when the text holds a
/// `'` but no `"`.
///
/// # Examples
///
/// ```
/// use sh2py::python::repr;
/// assert_eq!(repr("myfile.txt"), "'myfile.txt'");
/// assert_eq!(repr("it's"), "\"it's\"");
/// ```
#[must_use]
pub fn repr(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Builder for a single-quoted f-string: literal text plus `{expr}` holes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FString {
    body: String,
}

impl FString {
    /// Start an empty template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text, escaping anything f-string syntax would consume.
    pub fn literal(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            match c {
                '\\' => self.body.push_str("\\\\"),
                '\'' => self.body.push_str("\\'"),
                '{' => self.body.push_str("{{"),
                '}' => self.body.push_str("}}"),
                c => self.body.push(c),
            }
        }
        self
    }

    /// Append an interpolated expression.
    pub fn expr(&mut self, expr: &str) -> &mut Self {
        self.body.push('{');
        self.body.push_str(expr);
        self.body.push('}');
        self
    }
}

impl fmt::Display for FString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f'{}'", self.body)
    }
}

/// A runtime facility emitted code depends on, rendered as an import.
///
/// Variants are declared in module-name order so a sorted set renders a
/// sorted preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Filesystem globbing (`glob`).
    Glob,
    /// Filesystem path queries and working-directory changes (`os`).
    FsPath,
    /// Spawning external commands (`subprocess`).
    ProcessSpawn,
    /// Command-line arguments and process exit (`sys`).
    Args,
}

impl Capability {
    /// Python module providing this capability.
    #[must_use]
    pub fn module(self) -> &'static str {
        match self {
            Capability::Glob => "glob",
            Capability::FsPath => "os",
            Capability::ProcessSpawn => "subprocess",
            Capability::Args => "sys",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {}", self.module())
    }
}
