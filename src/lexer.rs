//! Byte-oriented scanning helpers for single shell lines.
//!
//! There is no token stream here — the translator works one stripped line at
//! a time, so each helper answers one question about a line or a word and
//! returns zero-copy slices of its input.

/// Split a line at its first `#` into `(code, comment)`.
///
/// The comment keeps its leading `#` and loses trailing whitespace. Quotes are
/// not tracked: a `#` inside a quoted string still starts the comment.
#[must_use]
pub fn split_inline_comment(line: &str) -> Option<(&str, &str)> {
    let pos = line.find('#')?;
    Some((&line[..pos], line[pos..].trim_end()))
}

/// Remove one layer of matching single or double quotes wrapping `text`.
///
/// Returns the input unchanged when it is not fully wrapped.
#[must_use]
pub fn strip_matching_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if matches!(first, b'"' | b'\'') && bytes[bytes.len() - 1] == first {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Does `text` contain a glob metacharacter (`*`, `?`, `[` or `]`)?
#[inline]
#[must_use]
pub fn has_glob_meta(text: &str) -> bool {
    text.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b']'))
}

/// Is `b` a regex-style word byte (`[A-Za-z0-9_]`)?
#[inline]
#[must_use]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Is `text` a non-empty run of word bytes?
#[must_use]
pub fn is_word(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(is_word_byte)
}

/// Is `text` a non-empty run of ASCII digits?
#[must_use]
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// A `$`-prefixed reference found at the start of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRef<'a> {
    /// `$1`, `$2`, ... — a positional command-line argument.
    Positional(&'a str),
    /// `$name` — a named variable.
    Named(&'a str),
}

/// Parse a word of the form `$ref[rest]`.
///
/// The reference is the longest run of word bytes after the `$`; whatever
/// follows is returned as literal trailing text. Returns `None` if the word
/// does not start with `$` or nothing name-like follows it.
#[must_use]
pub fn parse_var_ref(word: &str) -> Option<(VarRef<'_>, &str)> {
    let body = word.strip_prefix('$')?;
    let end = body
        .bytes()
        .position(|b| !is_word_byte(b))
        .unwrap_or(body.len());
    if end == 0 {
        return None;
    }
    let (name, rest) = body.split_at(end);
    let var = if is_digits(name) {
        VarRef::Positional(name)
    } else {
        VarRef::Named(name)
    };
    Some((var, rest))
}

/// Does `line` start with the keyword `kw` as a whole word?
///
/// `echo hi` and `echo` start with `echo`; `echoing` does not.
#[must_use]
pub fn starts_with_keyword(line: &str, kw: &str) -> bool {
    match line.strip_prefix(kw) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// The text after keyword `kw`, with surrounding whitespace removed.
///
/// Callers check [`starts_with_keyword`] first.
#[must_use]
pub fn after_keyword<'a>(line: &'a str, kw: &str) -> &'a str {
    line.get(kw.len()..).unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_hash() {
        assert_eq!(
            split_inline_comment("x=5 # set x # twice"),
            Some(("x=5 ", "# set x # twice"))
        );
        assert_eq!(split_inline_comment("echo hi"), None);
    }

    #[test]
    fn comment_loses_trailing_whitespace() {
        assert_eq!(split_inline_comment("ls #list  \t"), Some(("ls ", "#list")));
    }

    #[test]
    fn strips_one_layer_of_quotes() {
        assert_eq!(strip_matching_quotes("\"hello\""), "hello");
        assert_eq!(strip_matching_quotes("'hello'"), "hello");
        assert_eq!(strip_matching_quotes("\"'nested'\""), "'nested'");
        assert_eq!(strip_matching_quotes("\"\""), "");
    }

    #[test]
    fn leaves_unbalanced_quotes_alone() {
        assert_eq!(strip_matching_quotes("\"hello'"), "\"hello'");
        assert_eq!(strip_matching_quotes("\""), "\"");
        assert_eq!(strip_matching_quotes("hello"), "hello");
    }

    #[test]
    fn glob_meta_detection() {
        assert!(has_glob_meta("*.txt"));
        assert!(has_glob_meta("file?.c"));
        assert!(has_glob_meta("[abc]"));
        assert!(!has_glob_meta("plain.txt"));
    }

    #[test]
    fn var_refs() {
        assert_eq!(parse_var_ref("$name"), Some((VarRef::Named("name"), "")));
        assert_eq!(parse_var_ref("$1"), Some((VarRef::Positional("1"), "")));
        assert_eq!(parse_var_ref("$x,"), Some((VarRef::Named("x"), ",")));
        assert_eq!(parse_var_ref("$"), None);
        assert_eq!(parse_var_ref("$$"), None);
        assert_eq!(parse_var_ref("name"), None);
    }

    #[test]
    fn mixed_digit_name_is_named() {
        assert_eq!(parse_var_ref("$1a"), Some((VarRef::Named("1a"), "")));
    }

    #[test]
    fn keyword_boundaries() {
        assert!(starts_with_keyword("echo hi", "echo"));
        assert!(starts_with_keyword("echo", "echo"));
        assert!(starts_with_keyword("exit\t1", "exit"));
        assert!(!starts_with_keyword("echoing", "echo"));
        assert!(!starts_with_keyword("ech", "echo"));
        assert_eq!(after_keyword("echo   hi there ", "echo"), "hi there");
        assert_eq!(after_keyword("echo", "echo"), "");
    }

    #[test]
    fn words_and_digits() {
        assert!(is_word("row_1"));
        assert!(!is_word("a-b"));
        assert!(!is_word(""));
        assert!(is_digits("042"));
        assert!(!is_digits("4a"));
    }
}
