//! Line-by-line shell-to-Python translation engine.
//!
//! A [`Translator`] walks the source one line at a time. Each stripped line
//! is classified by the first matching entry of
//! [`RULES`](crate::patterns::RULES) and handed to that construct's handler,
//! which returns an [`Emit`] and may open or close a block or record a
//! required [`Capability`] as a side effect.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use tracing::{debug, warn};

use crate::emit::Emit;
use crate::lexer::{
    VarRef, after_keyword, has_glob_meta, parse_var_ref, split_inline_comment,
    strip_matching_quotes,
};
use crate::patterns::{
    ASSIGNMENT, COMMAND, COMPARISON_OP, DIGIT_VAR, DOLLAR_NAME, ELIF_NOT_EQUAL, EQUAL, FILE_TEST,
    FOR, IF_NOT_EQUAL, RAW_NOT_EQUAL, READ, RuleKind, WHILE, find_rule, is_flag_test,
};
use crate::python::{Capability, FString, HEADER, is_reserved, repr};
use crate::state::EngineState;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Fatal translation failure. Aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// `if test -<flag> path` with a flag that has no Python equivalent.
    #[error("line {line}: unrecognized file test operation: {flag}")]
    UnknownFileTest {
        /// The flag as written, e.g. `-z`.
        flag: String,
        /// 1-based source line number.
        line: usize,
    },
}

// ---------------------------------------------------------------------------
// Result of a run
// ---------------------------------------------------------------------------

/// Translated lines plus the capabilities they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    /// Output lines in source order; suppressed lines are absent.
    pub lines: Vec<String>,
    /// Modules the lines depend on.
    pub capabilities: BTreeSet<Capability>,
}

impl Translation {
    /// Full program text: sorted imports, the interpreter header, then the
    /// translated lines, each newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cap in &self.capabilities {
            writeln!(f, "{cap}")?;
        }
        writeln!(f, "{HEADER}")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Translate a sequence of shell lines with a fresh [`Translator`].
///
/// # Errors
///
/// Returns [`TranslateError::UnknownFileTest`] if a file test uses an
/// unsupported flag. No partial output is returned.
///
/// # Examples
///
/// ```
/// let out = sh2py::translate(["x=5", "echo \"hello $name\""]).unwrap();
/// assert_eq!(out.lines, ["x = 5", "print(f'hello {name}')"]);
/// assert!(out.capabilities.is_empty());
/// ```
pub fn translate<I>(lines: I) -> Result<Translation, TranslateError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Translator::new().translate(lines)
}

/// Translate a whole script and render the Python program text.
///
/// # Errors
///
/// Same as [`translate`].
///
/// # Examples
///
/// ```
/// let py = sh2py::transpile("#!/bin/sh\ncd /tmp\n").unwrap();
/// assert_eq!(py, "import os\n#!/usr/bin/python3 -u\nos.chdir('/tmp')\n");
/// ```
pub fn transpile(source: &str) -> Result<String, TranslateError> {
    translate(source.lines()).map(|t| t.render())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The translation engine. One instance per source file.
#[derive(Debug, Default)]
pub struct Translator {
    state: EngineState,
    glob_root: Option<PathBuf>,
    line_no: usize,
}

impl Translator {
    /// A translator with fresh state that expands translation-time globs
    /// against the process working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand translation-time globs against `root` instead of the working
    /// directory. Matches are reported relative to `root`.
    #[must_use]
    pub fn with_glob_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.glob_root = Some(root.into());
        self
    }

    /// State carried between lines.
    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Translate every line, consuming the translator.
    ///
    /// # Errors
    ///
    /// Stops at the first [`TranslateError`].
    pub fn translate<I>(mut self, lines: I) -> Result<Translation, TranslateError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut out = Vec::new();
        for line in lines {
            if let Some(text) = self.translate_line(line.as_ref())?.render() {
                out.push(text);
            }
        }
        if self.state.indent_level() != 0 {
            warn!(depth = self.state.indent_level(), "input ended inside an open block");
        }
        Ok(Translation {
            lines: out,
            capabilities: self.state.into_capabilities(),
        })
    }

    /// Translate the next source line.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::UnknownFileTest`] for an unsupported
    /// file-test flag.
    pub fn translate_line(&mut self, line: &str) -> Result<Emit, TranslateError> {
        self.line_no += 1;
        self.dispatch(line.trim())
    }

    fn dispatch(&mut self, line: &str) -> Result<Emit, TranslateError> {
        let Some(rule) = find_rule(line) else {
            warn!(line = self.line_no, text = line, "no rule matched, line dropped");
            return Ok(Emit::Suppressed);
        };
        debug!(line = self.line_no, rule = rule.name, "classified");

        let indent = self.state.indent_level();
        let emit = match rule.kind {
            RuleKind::Blank => Emit::Blank,
            RuleKind::Shebang | RuleKind::NoOp => Emit::Suppressed,
            RuleKind::Comment => Emit::code(indent, line),
            RuleKind::InlineComment => return self.inline_comment(line),
            RuleKind::EchoWildcard => {
                self.state.require(Capability::Glob);
                Emit::code(indent, r#"print(" ".join(glob.glob("*")))"#)
            }
            RuleKind::Assignment => self.assignment(line),
            RuleKind::Done | RuleKind::Fi => {
                if !self.state.close_block() {
                    warn!(line = self.line_no, text = line, "closer without an open block");
                }
                Emit::Suppressed
            }
            RuleKind::IfNotEqual => match IF_NOT_EQUAL.captures(line) {
                Some(caps) => self.comparison("if", &caps[1], "!=", &caps[2]),
                None => Emit::Suppressed,
            },
            RuleKind::FileTest => return self.file_test(line),
            RuleKind::Echo => self.echo(line),
            RuleKind::For => self.for_loop(line),
            RuleKind::While => self.while_loop(line),
            RuleKind::Equal => match EQUAL.captures(line) {
                Some(caps) => self.comparison(&caps[1], &caps[2], "==", &caps[3]),
                None => Emit::Suppressed,
            },
            RuleKind::ElifNotEqual => match ELIF_NOT_EQUAL.captures(line) {
                Some(caps) => self.comparison("elif", &caps[1], "!=", &caps[2]),
                None => Emit::Suppressed,
            },
            RuleKind::Else => Emit::code(self.state.sibling_level(), "else:"),
            RuleKind::Read => match READ.captures(line) {
                Some(caps) => Emit::code(indent, format!("{} = input()", &caps[1])),
                None => Emit::Suppressed,
            },
            RuleKind::Cd => self.cd(line),
            RuleKind::Exit => {
                self.state.require(Capability::Args);
                Emit::code(indent, "sys.exit(0)")
            }
            RuleKind::Glob => self.glob(line),
            RuleKind::Command => self.command(line),
        };
        Ok(emit)
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    fn inline_comment(&mut self, line: &str) -> Result<Emit, TranslateError> {
        let Some((code, comment)) = split_inline_comment(line) else {
            return Ok(Emit::Suppressed);
        };
        let emit = self.dispatch(code.trim())?;
        Ok(emit.with_comment(comment, self.state.indent_level()))
    }

    /// `name=value`. Reserved names are upper-cased here only; later uses of
    /// the name are left alone.
    fn assignment(&mut self, line: &str) -> Emit {
        let Some(caps) = ASSIGNMENT.captures(line) else {
            return Emit::Suppressed;
        };
        let name = &caps[1];
        let name = if is_reserved(name) {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        let value = assignment_value(caps[2].trim());
        Emit::code(self.state.indent_level(), format!("{name} = {value}"))
    }

    /// Open an `if` block, or continue the current one with `elif`.
    fn conditional(&mut self, keyword: &str, condition: &str) -> Emit {
        if keyword == "elif" {
            Emit::code(self.state.sibling_level(), format!("elif {condition}:"))
        } else {
            let level = self.state.open_block();
            Emit::code(level, format!("if {condition}:"))
        }
    }

    /// Bare-operand `=`/`!=` test. A `$` on the left makes both sides raw
    /// names; otherwise both sides are quoted literals.
    fn comparison(&mut self, keyword: &str, left: &str, op: &str, right: &str) -> Emit {
        let lhs = left.replace('$', "");
        let rhs = right.replace('$', "");
        let condition = if left.starts_with('$') {
            format!("{lhs} {op} {rhs}")
        } else {
            format!("{} {op} {}", repr(&lhs), repr(&rhs))
        };
        self.conditional(keyword, &condition)
    }

    fn file_test(&mut self, line: &str) -> Result<Emit, TranslateError> {
        if is_flag_test(line) {
            if let Some(caps) = FILE_TEST.captures(line) {
                let path = repr(caps[3].trim());
                let condition = match &caps[2] {
                    "-r" => format!("os.access({path}, os.R_OK)"),
                    "-w" => format!("os.access({path}, os.W_OK)"),
                    "-x" => format!("os.access({path}, os.X_OK)"),
                    "-f" => format!("os.path.isfile({path})"),
                    "-d" => format!("os.path.isdir({path})"),
                    "-s" => format!("os.path.getsize({path}) > 0"),
                    "-e" => format!("os.path.exists({path})"),
                    flag => {
                        return Err(TranslateError::UnknownFileTest {
                            flag: flag.to_string(),
                            line: self.line_no,
                        });
                    }
                };
                self.state.require(Capability::FsPath);
                return Ok(self.conditional(&caps[1], &condition));
            }
        }
        // Multi-word operands are emitted exactly as written.
        match RAW_NOT_EQUAL.captures(line) {
            Some(caps) => {
                let condition = format!("{} != {}", caps[2].trim(), caps[3].trim());
                Ok(self.conditional(&caps[1], &condition))
            }
            None => Ok(Emit::Suppressed),
        }
    }

    fn echo(&mut self, line: &str) -> Emit {
        let rest = after_keyword(line, "echo");
        let mut template = FString::new();

        if rest.contains('$') {
            let text = strip_matching_quotes(rest);
            for (i, word) in text.split_whitespace().enumerate() {
                if i > 0 {
                    template.literal(" ");
                }
                match parse_var_ref(word) {
                    Some((VarRef::Positional(index), tail)) => {
                        self.state.require(Capability::Args);
                        template.expr(&format!("sys.argv[{index}]")).literal(tail);
                    }
                    Some((VarRef::Named(name), tail)) => {
                        template.expr(name).literal(tail);
                    }
                    None => {
                        template.literal(word);
                    }
                }
            }
        } else {
            let text = strip_matching_quotes(rest);
            if text.len() == rest.len() {
                let words: Vec<&str> = rest.split_whitespace().collect();
                template.literal(&words.join(" "));
            } else {
                template.literal(text);
            }
        }

        Emit::code(self.state.indent_level(), format!("print({template})"))
    }

    fn for_loop(&mut self, line: &str) -> Emit {
        let Some(caps) = FOR.captures(line) else {
            return Emit::Suppressed;
        };
        let items = caps[2].trim();
        let iterable = if has_glob_meta(items) {
            self.state.require(Capability::Glob);
            format!("sorted(glob.glob({}))", repr(items))
        } else {
            let words: Vec<String> = items.split_whitespace().map(repr).collect();
            format!("[{}]", words.join(", "))
        };
        let level = self.state.open_block();
        Emit::code(level, format!("for {} in {iterable}:", &caps[1]))
    }

    fn while_loop(&mut self, line: &str) -> Emit {
        let Some(caps) = WHILE.captures(line) else {
            return Emit::Suppressed;
        };
        let parts: Vec<String> = caps[1]
            .split_whitespace()
            .filter(|word| *word != "test")
            .map(|word| {
                if COMPARISON_OP.is_match(word) {
                    word.to_string()
                } else if let Some(name) = word.strip_prefix('$') {
                    name.to_string()
                } else {
                    repr(word)
                }
            })
            .collect();
        let level = self.state.open_block();
        Emit::code(level, format!("while {}:", parts.join(" ")))
    }

    fn cd(&mut self, line: &str) -> Emit {
        self.state.require(Capability::FsPath);
        let code = match after_keyword(line, "cd").split_whitespace().next() {
            Some(dir) => format!("os.chdir({})", repr(dir)),
            None => "os.chdir(os.path.expanduser('~'))".to_string(),
        };
        Emit::code(self.state.indent_level(), code)
    }

    /// A line with glob metacharacters that nothing else claimed.
    ///
    /// With an `=`, the right-hand side becomes a `glob.glob()` expression
    /// and the left-hand side is discarded. Otherwise the whole line is
    /// expanded now and the matches are written out literally.
    fn glob(&mut self, line: &str) -> Emit {
        self.state.require(Capability::Glob);
        let indent = self.state.indent_level();
        if let Some((_, pattern)) = line.split_once('=') {
            return Emit::code(indent, format!("glob.glob({})", repr(pattern)));
        }
        let matches = self.expand_glob(line);
        if matches.is_empty() {
            Emit::Blank
        } else {
            Emit::code(indent, matches.join(" "))
        }
    }

    fn command(&mut self, line: &str) -> Emit {
        let Some(caps) = COMMAND.captures(line) else {
            return Emit::Suppressed;
        };
        self.state.require(Capability::ProcessSpawn);
        let name = repr(&caps[1]);
        let args = caps.get(2).map_or("", |m| m.as_str().trim());
        let code = if args.is_empty() {
            format!("subprocess.run({name})")
        } else {
            let mut parts = vec![name];
            parts.extend(args.split_whitespace().map(|arg| {
                if arg.contains('$') {
                    arg.replace('$', "")
                } else {
                    repr(arg)
                }
            }));
            format!("subprocess.run([{}])", parts.join(", "))
        };
        Emit::code(self.state.indent_level(), code)
    }

    // -----------------------------------------------------------------------
    // Translation-time globbing
    // -----------------------------------------------------------------------

    /// Sorted matches for `pattern`. Hidden files need a literal leading dot.
    fn expand_glob(&self, pattern: &str) -> Vec<String> {
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let root = self.glob_root.as_deref().filter(|_| !Path::new(pattern).is_absolute());
        let full = match root {
            Some(root) => format!("{}/{pattern}", Pattern::escape(&root.to_string_lossy())),
            None => pattern.to_string(),
        };
        let paths = match glob::glob_with(&full, options) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(line = self.line_no, pattern, error = %e, "invalid glob pattern");
                return Vec::new();
            }
        };
        let mut matches: Vec<String> = paths
            .filter_map(Result::ok)
            .map(|path| {
                let path = match root {
                    Some(root) => match path.strip_prefix(root) {
                        Ok(relative) => relative.to_path_buf(),
                        Err(_) => path,
                    },
                    None => path,
                };
                path.to_string_lossy().into_owned()
            })
            .collect();
        matches.sort();
        matches
    }
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

/// Python expression for the right-hand side of an assignment.
fn assignment_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let numeric = match bytes {
        [first, ..] if first.is_ascii_digit() => true,
        [b'-', second, ..] => second.is_ascii_digit(),
        _ => false,
    };
    if numeric {
        if let Some(caps) = DIGIT_VAR.captures(value) {
            return format!("{} + str({})", repr(&caps[1]), &caps[2]);
        }
        if let Some(int) = integer_literal(value) {
            return int;
        }
    }

    let text = strip_matching_quotes(value);
    if !text.contains('$') {
        return repr(text);
    }
    let mut template = FString::new();
    let mut last = 0;
    for caps in DOLLAR_NAME.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        template.literal(&text[last..whole.start()]).expr(name.as_str());
        last = whole.end();
    }
    template.literal(&text[last..]);
    template.to_string()
}

/// Normalize an optionally signed decimal integer the way Python's `int()`
/// would print it (`007` is `7`, `-0` is `0`).
fn integer_literal(value: &str) -> Option<String> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some("0".to_string());
    }
    Some(if negative {
        format!("-{trimmed}")
    } else {
        trimmed.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> Translation {
        translate(src.lines()).unwrap()
    }

    fn t(line: &str) -> String {
        run(line).lines.join("\n")
    }

    fn caps(src: &str) -> Vec<&'static str> {
        run(src).capabilities.iter().map(|c| c.module()).collect()
    }

    // --- Assignment ---

    #[test]
    fn integer_assignment() {
        assert_eq!(t("x=5"), "x = 5");
        assert_eq!(t("x=-3"), "x = -3");
        assert_eq!(t("x=007"), "x = 7");
        assert_eq!(t("x=-0"), "x = 0");
    }

    #[test]
    fn string_assignment() {
        assert_eq!(t("name=hello"), "name = 'hello'");
        assert_eq!(t("msg=\"hi there\""), "msg = 'hi there'");
        assert_eq!(t("msg='single'"), "msg = 'single'");
        assert_eq!(t("x="), "x = ''");
    }

    #[test]
    fn interpolated_assignment() {
        assert_eq!(t("greeting=\"hi $name\""), "greeting = f'hi {name}'");
        assert_eq!(t("path=$HOME/bin"), "path = f'{HOME}/bin'");
        assert_eq!(t("cost=\"5 $\""), "cost = f'5 $'");
    }

    #[test]
    fn digit_followed_by_variable() {
        assert_eq!(t("cell=1$row"), "cell = '1' + str(row)");
    }

    #[test]
    fn non_integer_number_is_a_string() {
        assert_eq!(t("pi=3.14"), "pi = '3.14'");
    }

    #[test]
    fn reserved_name_is_upper_cased_at_assignment_only() {
        let out = run("list=abc\necho $list");
        assert_eq!(out.lines, ["LIST = 'abc'", "print(f'{list}')"]);
    }

    // --- Comments ---

    #[test]
    fn shebang_is_suppressed() {
        assert!(run("#!/bin/bash").lines.is_empty());
    }

    #[test]
    fn other_interpreter_lines_are_comments() {
        assert_eq!(t("#!/usr/bin/env sh"), "#!/usr/bin/env sh");
    }

    #[test]
    fn whole_line_comment_keeps_indent() {
        let out = run("for f in a b\ndo\n   # inside\ndone");
        assert_eq!(out.lines[1], "    # inside");
    }

    #[test]
    fn inline_comment_splits_before_assignment() {
        assert_eq!(t("x=5 # five"), "x = 5 # five");
        assert_eq!(t("echo hi #greet"), "print(f'hi') #greet");
    }

    #[test]
    fn inline_comment_on_closer() {
        let out = run("if test -d d\nthen\necho in\nfi # end");
        assert_eq!(out.lines, ["if os.path.isdir('d'):", "    print(f'in')", "# end"]);
    }

    // --- Conditionals ---

    #[test]
    fn file_test_block() {
        let out = run("if test -f myfile.txt\nthen\necho \"found\"\nfi");
        assert_eq!(out.lines, ["if os.path.isfile('myfile.txt'):", "    print(f'found')"]);
        assert_eq!(caps("if test -f myfile.txt\nfi"), ["os"]);
    }

    #[test]
    fn every_file_test_flag() {
        assert_eq!(t("if test -r f"), "if os.access('f', os.R_OK):");
        assert_eq!(t("if test -w f"), "if os.access('f', os.W_OK):");
        assert_eq!(t("if test -x f"), "if os.access('f', os.X_OK):");
        assert_eq!(t("if test -d f"), "if os.path.isdir('f'):");
        assert_eq!(t("if test -s f"), "if os.path.getsize('f') > 0:");
        assert_eq!(t("if test -e f"), "if os.path.exists('f'):");
    }

    #[test]
    fn unknown_file_test_is_fatal() {
        let err = translate(["echo start", "if test -z foo", "then", "fi"]).unwrap_err();
        assert_eq!(
            err,
            TranslateError::UnknownFileTest {
                flag: "-z".to_string(),
                line: 2
            }
        );
        assert_eq!(err.to_string(), "line 2: unrecognized file test operation: -z");
    }

    #[test]
    fn inequality_with_variable() {
        assert_eq!(t("if test $a != $b"), "if a != b:");
    }

    #[test]
    fn inequality_with_literal_quotes_both_sides() {
        assert_eq!(t("if test abc != $x"), "if 'abc' != 'x':");
    }

    #[test]
    fn equality() {
        assert_eq!(t("if test $a = 1"), "if a == 1:");
        assert_eq!(t("if test yes = $reply"), "if 'yes' == 'reply':");
        assert_eq!(t("if test -1 = $x"), "if '-1' == 'x':");
    }

    #[test]
    fn raw_inequality_keeps_tokens() {
        assert_eq!(t("if test \"a b\" != c"), "if \"a b\" != c:");
    }

    #[test]
    fn elif_else_chain() {
        let src = "\
if test $a = 1
then
echo one
elif test $a = 2
then
echo two
elif test $a != 3
then
echo three
else
echo other
fi";
        let out = run(src);
        assert_eq!(
            out.lines,
            [
                "if a == 1:",
                "    print(f'one')",
                "elif a == 2:",
                "    print(f'two')",
                "elif a != 3:",
                "    print(f'three')",
                "else:",
                "    print(f'other')",
            ]
        );
    }

    #[test]
    fn elif_file_test_does_not_open_a_block() {
        let mut tr = Translator::new();
        tr.translate_line("if test -f a").unwrap();
        let e = tr.translate_line("elif test -d b").unwrap();
        assert_eq!(e.render().unwrap(), "elif os.path.isdir('b'):");
        assert_eq!(tr.state().indent_level(), 1);
    }

    #[test]
    fn unmatched_fi_clamps_at_zero() {
        let mut tr = Translator::new();
        assert_eq!(tr.translate_line("fi").unwrap(), Emit::Suppressed);
        assert_eq!(tr.state().indent_level(), 0);
    }

    // --- Echo ---

    #[test]
    fn echo_variable() {
        assert_eq!(t("echo \"hello $name\""), "print(f'hello {name}')");
        assert_eq!(t("echo $i"), "print(f'{i}')");
    }

    #[test]
    fn echo_plain_text() {
        assert_eq!(t("echo \"found\""), "print(f'found')");
        assert_eq!(t("echo 'a   b'"), "print(f'a   b')");
        assert_eq!(t("echo a   b"), "print(f'a b')");
        assert_eq!(t("echo"), "print(f'')");
    }

    #[test]
    fn echo_escapes_template_syntax() {
        assert_eq!(t("echo \"it's {x}\""), "print(f'it\\'s {{x}}')");
    }

    #[test]
    fn echo_positional_argument() {
        assert_eq!(t("echo first: $1"), "print(f'first: {sys.argv[1]}')");
        assert_eq!(caps("echo $1"), ["sys"]);
    }

    #[test]
    fn echo_variable_with_punctuation() {
        assert_eq!(t("echo \"$greeting, $name!\""), "print(f'{greeting}, {name}!')");
    }

    #[test]
    fn echo_wildcard() {
        assert_eq!(t("echo *"), r#"print(" ".join(glob.glob("*")))"#);
        assert_eq!(caps("echo *"), ["glob"]);
    }

    // --- Loops ---

    #[test]
    fn for_over_glob() {
        let out = run("for i in *.txt\ndo\necho $i\ndone");
        assert_eq!(out.lines, ["for i in sorted(glob.glob('*.txt')):", "    print(f'{i}')"]);
        assert_eq!(caps("for i in *.txt\ndone"), ["glob"]);
    }

    #[test]
    fn for_over_words() {
        assert_eq!(t("for w in a b c"), "for w in ['a', 'b', 'c']:");
    }

    #[test]
    fn while_condition_tokens() {
        assert_eq!(t("while test $i != 5"), "while i != '5':");
        assert_eq!(t("while test $a == $b"), "while a == b:");
    }

    #[test]
    fn nested_blocks_return_to_zero() {
        let src = "\
for f in a b
do
if test -f $f
then
while test $n != 0
do
echo $f
done
fi
done
echo end";
        let mut tr = Translator::new();
        let mut lines = Vec::new();
        for line in src.lines() {
            if let Some(text) = tr.translate_line(line).unwrap().render() {
                lines.push(text);
            }
        }
        assert_eq!(tr.state().indent_level(), 0);
        assert_eq!(
            lines,
            [
                "for f in ['a', 'b']:",
                "    if os.path.isfile('$f'):",
                "        while n != '0':",
                "            print(f'{f}')",
                "print(f'end')",
            ]
        );
    }

    // --- Builtins ---

    #[test]
    fn read_into_variable() {
        assert_eq!(t("read name"), "name = input()");
        assert_eq!(t("read -r line"), "line = input()");
        assert!(caps("read name").is_empty());
    }

    #[test]
    fn change_directory() {
        assert_eq!(t("cd /tmp"), "os.chdir('/tmp')");
        assert_eq!(t("cd"), "os.chdir(os.path.expanduser('~'))");
        assert_eq!(caps("cd /tmp"), ["os"]);
    }

    #[test]
    fn exit_ignores_status() {
        assert_eq!(t("exit 3"), "sys.exit(0)");
        assert_eq!(t("exit"), "sys.exit(0)");
        assert_eq!(caps("exit 1"), ["sys"]);
    }

    // --- Globs and commands ---

    #[test]
    fn glob_after_equals_drops_binding() {
        assert_eq!(t("ls x=*.c"), "glob.glob('*.c')");
        assert_eq!(caps("ls x=*.c"), ["glob"]);
    }

    #[test]
    fn command_without_arguments() {
        assert_eq!(t("date"), "subprocess.run('date')");
        assert_eq!(caps("date"), ["subprocess"]);
    }

    #[test]
    fn command_with_arguments() {
        assert_eq!(t("ls -l $dir"), "subprocess.run(['ls', '-l', dir])");
        assert_eq!(t("mkdir -p out"), "subprocess.run(['mkdir', '-p', 'out'])");
    }

    #[test]
    fn unmatched_line_is_dropped() {
        let out = run("./run.sh\necho after");
        assert_eq!(out.lines, ["print(f'after')"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        assert_eq!(run("x=1\n\nx=2").lines, ["x = 1", "", "x = 2"]);
    }

    // --- Rendering ---

    #[test]
    fn render_puts_sorted_imports_before_header() {
        let src = "#!/bin/sh\nexit 0\ncd /tmp\ndate\nfor f in *\ndone";
        assert_eq!(
            transpile(src).unwrap(),
            "import glob\nimport os\nimport subprocess\nimport sys\n\
             #!/usr/bin/python3 -u\n\
             sys.exit(0)\nos.chdir('/tmp')\nsubprocess.run('date')\n\
             for f in sorted(glob.glob('*')):\n"
        );
    }

    #[test]
    fn render_without_capabilities() {
        assert_eq!(transpile("x=1").unwrap(), "#!/usr/bin/python3 -u\nx = 1\n");
    }

    #[test]
    fn translation_is_deterministic() {
        let src = "cd /\nread x\nfor i in *.rs\ndo\necho $1 $i\ndone\nls -a";
        assert_eq!(transpile(src).unwrap(), transpile(src).unwrap());
    }

    #[test]
    fn integer_literal_normalization() {
        assert_eq!(integer_literal("0"), Some("0".to_string()));
        assert_eq!(integer_literal("-12"), Some("-12".to_string()));
        assert_eq!(integer_literal("1e3"), None);
        assert_eq!(integer_literal("-"), None);
    }
}
