//! The ordered recognizer table.
//!
//! Each stripped source line is tested against [`RULES`] top to bottom and
//! the first match decides how it is translated. The table is the whole
//! grammar: keeping it as data makes precedence auditable, and
//! [`classify`] lets each rule be tested on its own.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexer::{has_glob_meta, starts_with_keyword};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("recognizer patterns are valid regexes")
}

pub(crate) static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| re(r"^(\w+)=(.*)$"));
pub(crate) static DIGIT_VAR: Lazy<Regex> = Lazy::new(|| re(r"^(\d+)\$(\w+)"));
pub(crate) static DOLLAR_NAME: Lazy<Regex> = Lazy::new(|| re(r"\$(\w+)"));
pub(crate) static IF_NOT_EQUAL: Lazy<Regex> = Lazy::new(|| re(r"^if test (\S+)\s!=\s(\S+)"));
pub(crate) static ELIF_NOT_EQUAL: Lazy<Regex> = Lazy::new(|| re(r"^elif test (\S+)\s!=\s(\S+)"));
pub(crate) static EQUAL: Lazy<Regex> = Lazy::new(|| re(r"^(if|elif) test (\S+)\s=\s(\S+)"));
pub(crate) static FILE_TEST: Lazy<Regex> =
    Lazy::new(|| re(r"^(if|elif) test (-[A-Za-z]+)\s+(.+)$"));
pub(crate) static RAW_NOT_EQUAL: Lazy<Regex> = Lazy::new(|| re(r"^(if|elif) test (.+)\s!=\s(.+)$"));
pub(crate) static FOR: Lazy<Regex> = Lazy::new(|| re(r"^for (\w+) in (.*)$"));
pub(crate) static WHILE: Lazy<Regex> = Lazy::new(|| re(r"^while (.*)$"));
pub(crate) static COMPARISON_OP: Lazy<Regex> = Lazy::new(|| re(r"^(==|>=|<=|!=)"));
pub(crate) static READ: Lazy<Regex> = Lazy::new(|| re(r"^read\s+(?:-\S*\s+)*([^-\s]\S*)"));
pub(crate) static COMMAND: Lazy<Regex> = Lazy::new(|| re(r"^(\w+)(?:\s+(.*))?$"));

/// The construct a line was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RuleKind {
    /// Empty line.
    Blank,
    /// `#!/bin/...` interpreter line.
    Shebang,
    /// Whole-line `# comment`.
    Comment,
    /// Code followed by `# comment`.
    InlineComment,
    /// Exactly `echo *`.
    EchoWildcard,
    /// `name=value`.
    Assignment,
    /// `do` or `then`.
    NoOp,
    /// `done` — closes a loop body.
    Done,
    /// `fi` — closes a conditional.
    Fi,
    /// `if test A != B` with bare operands.
    IfNotEqual,
    /// `if|elif test -flag path`, or a non-bare `!=` comparison.
    FileTest,
    /// `echo ...`.
    Echo,
    /// `for var in ...`.
    For,
    /// `while condition`.
    While,
    /// `if|elif test A = B`.
    Equal,
    /// `elif test A != B` with bare operands.
    ElifNotEqual,
    /// `else`.
    Else,
    /// `read name`.
    Read,
    /// `cd path`.
    Cd,
    /// `exit [code]`.
    Exit,
    /// Any remaining line containing a glob metacharacter.
    Glob,
    /// Fallback: `command [args...]`.
    Command,
}

/// One entry of the recognizer table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// What the rule recognizes.
    pub kind: RuleKind,
    /// Short human-readable name, used in logs.
    pub name: &'static str,
    test: fn(&str) -> bool,
}

impl Rule {
    /// Does this rule accept the stripped line?
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        (self.test)(line)
    }
}

/// Recognizers in precedence order; the first match wins.
pub static RULES: &[Rule] = &[
    Rule { kind: RuleKind::Blank, name: "blank", test: is_blank },
    Rule { kind: RuleKind::Shebang, name: "shebang", test: is_shebang },
    Rule { kind: RuleKind::Comment, name: "comment", test: is_comment },
    Rule { kind: RuleKind::InlineComment, name: "inline comment", test: has_inline_comment },
    Rule { kind: RuleKind::EchoWildcard, name: "echo *", test: is_echo_wildcard },
    Rule { kind: RuleKind::Assignment, name: "assignment", test: is_assignment },
    Rule { kind: RuleKind::NoOp, name: "do/then", test: is_noop },
    Rule { kind: RuleKind::Done, name: "done", test: is_done },
    Rule { kind: RuleKind::Fi, name: "fi", test: is_fi },
    Rule { kind: RuleKind::IfNotEqual, name: "if !=", test: is_if_not_equal },
    Rule { kind: RuleKind::FileTest, name: "file test", test: is_file_test },
    Rule { kind: RuleKind::Echo, name: "echo", test: is_echo },
    Rule { kind: RuleKind::For, name: "for", test: is_for },
    Rule { kind: RuleKind::While, name: "while", test: is_while },
    Rule { kind: RuleKind::Equal, name: "if/elif =", test: is_equal },
    Rule { kind: RuleKind::ElifNotEqual, name: "elif !=", test: is_elif_not_equal },
    Rule { kind: RuleKind::Else, name: "else", test: is_else },
    Rule { kind: RuleKind::Read, name: "read", test: is_read },
    Rule { kind: RuleKind::Cd, name: "cd", test: is_cd },
    Rule { kind: RuleKind::Exit, name: "exit", test: is_exit },
    Rule { kind: RuleKind::Glob, name: "glob", test: is_glob },
    Rule { kind: RuleKind::Command, name: "command", test: is_command },
];

/// Find the first rule accepting `line`, which must already be stripped.
///
/// # Examples
///
/// ```
/// use sh2py::patterns::{classify, RuleKind};
/// assert_eq!(classify("x=5"), Some(RuleKind::Assignment));
/// assert_eq!(classify("x=5 # five"), Some(RuleKind::InlineComment));
/// assert_eq!(classify("fi"), Some(RuleKind::Fi));
/// ```
#[must_use]
pub fn classify(line: &str) -> Option<RuleKind> {
    find_rule(line).map(|rule| rule.kind)
}

pub(crate) fn find_rule(line: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(line))
}

fn is_blank(line: &str) -> bool {
    line.is_empty()
}

fn is_shebang(line: &str) -> bool {
    line.starts_with("#!/bin")
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

fn has_inline_comment(line: &str) -> bool {
    line.contains('#')
}

fn is_echo_wildcard(line: &str) -> bool {
    line == "echo *"
}

fn is_assignment(line: &str) -> bool {
    ASSIGNMENT.is_match(line)
}

fn is_noop(line: &str) -> bool {
    matches!(line, "do" | "then")
}

fn is_done(line: &str) -> bool {
    line == "done"
}

fn is_fi(line: &str) -> bool {
    line == "fi"
}

fn is_if_not_equal(line: &str) -> bool {
    IF_NOT_EQUAL.is_match(line)
}

/// The operand of a flag test must not itself be a comparison, so
/// `if test -1 = $x` stays an equality.
pub(crate) fn is_flag_test(line: &str) -> bool {
    FILE_TEST.captures(line).is_some_and(|caps| {
        let operand = &caps[3];
        !(operand.starts_with("= ") || operand.starts_with("!= "))
    })
}

/// `!=` comparisons whose operands are not both bare tokens.
pub(crate) fn is_raw_not_equal(line: &str) -> bool {
    RAW_NOT_EQUAL.is_match(line) && !IF_NOT_EQUAL.is_match(line) && !ELIF_NOT_EQUAL.is_match(line)
}

fn is_file_test(line: &str) -> bool {
    is_flag_test(line) || is_raw_not_equal(line)
}

fn is_echo(line: &str) -> bool {
    starts_with_keyword(line, "echo")
}

fn is_for(line: &str) -> bool {
    FOR.is_match(line)
}

fn is_while(line: &str) -> bool {
    WHILE.is_match(line)
}

fn is_equal(line: &str) -> bool {
    EQUAL.is_match(line)
}

fn is_elif_not_equal(line: &str) -> bool {
    ELIF_NOT_EQUAL.is_match(line)
}

fn is_else(line: &str) -> bool {
    line == "else"
}

fn is_read(line: &str) -> bool {
    READ.is_match(line)
}

fn is_cd(line: &str) -> bool {
    starts_with_keyword(line, "cd")
}

fn is_exit(line: &str) -> bool {
    starts_with_keyword(line, "exit")
}

fn is_glob(line: &str) -> bool {
    has_glob_meta(line)
}

fn is_command(line: &str) -> bool {
    COMMAND.is_match(line)
}
