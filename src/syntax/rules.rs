//! Per-language lexical rule tables.
//!
//! Each table is an ordered list of `(pattern, color)` pairs. Order matters:
//! the scanner takes the first pattern that matches, so comments, strings and
//! attributes come before identifiers and operators, and every table ends with
//! a single-character catch-all. When a pattern has a capture group, only the
//! group's text is consumed; this stands in for look-ahead (e.g. a function
//! name followed by `(`).

use std::sync::LazyLock;

use regex::Regex;

use super::TokenColor;
use super::language::Language;

pub struct Rule {
    pub pattern: Regex,
    pub color: TokenColor,
}

type RuleTable = &'static [(&'static str, TokenColor)];

const CLIKE_RULES: RuleTable = &[
    (r"//.*", TokenColor::Comment),
    (r"/\*.*?(?:\*/|$)", TokenColor::Comment),
    (r#""(?:[^"\\]|\\.)*"?"#, TokenColor::String),
    (r"'(?:[^'\\]|\\.)*'?", TokenColor::String),
    (r"`(?:[^`\\]|\\.)*`?", TokenColor::String),
    (r"@[A-Za-z_][\w.]*", TokenColor::Attribute),
    (r"#\s*[a-z]+\b", TokenColor::Attribute),
    (
        r"(?:abstract|as|async|await|break|case|catch|class|const|continue|default|delete|do|else|enum|export|extends|finally|for|from|func|function|if|implements|import|in|instanceof|interface|let|new|of|package|private|protected|public|readonly|return|static|struct|switch|throw|try|type|typeof|var|void|while|yield)\b",
        TokenColor::Keyword,
    ),
    (
        r"(?:true|false|null|undefined|nil|this|super|NaN|Infinity)\b",
        TokenColor::Constant,
    ),
    (
        r"(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?)n?",
        TokenColor::Number,
    ),
    (r"([A-Za-z_$][\w$]*)\s*\(", TokenColor::Function),
    (r"[A-Z][\w$]*", TokenColor::Type),
    (r"[A-Za-z_$][\w$]*", TokenColor::Plain),
    (
        r"=>|===|!==|==|!=|<=|>=|&&|\|\||\?\?|\+\+|--|[-+*/%=<>!&|^~?:]",
        TokenColor::Operator,
    ),
    (r"[{}()\[\];,.]", TokenColor::Punctuation),
    (r"\s+", TokenColor::Plain),
    (r".", TokenColor::Plain),
];

const RUST_RULES: RuleTable = &[
    (r"//.*", TokenColor::Comment),
    (r"/\*.*?(?:\*/|$)", TokenColor::Comment),
    (r"#!?\[[^\]]*\]?", TokenColor::Attribute),
    (r##"b?r#*"[^"]*"#*"##, TokenColor::String),
    (r#"b?"(?:[^"\\]|\\.)*"?"#, TokenColor::String),
    (r"b?'(?:[^'\\]|\\.)'", TokenColor::String),
    (r"'[A-Za-z_]\w*", TokenColor::Keyword),
    (
        r"(?:as|async|await|break|const|continue|crate|dyn|else|enum|extern|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|static|struct|trait|type|unsafe|use|where|while)\b",
        TokenColor::Keyword,
    ),
    (r"(?:true|false|self|super)\b", TokenColor::Constant),
    (
        r"(?:0[xX][0-9a-fA-F_]+|0[bB][01_]+|0[oO][0-7_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)(?:[iu](?:8|16|32|64|128|size)|f32|f64)?",
        TokenColor::Number,
    ),
    (r"[A-Za-z_]\w*!", TokenColor::Macro),
    (r"([a-z_]\w*)\s*(?:\(|::<)", TokenColor::Function),
    (r"[A-Z]\w*", TokenColor::Type),
    (r"[A-Za-z_]\w*", TokenColor::Plain),
    (
        r"=>|->|::|==|!=|<=|>=|&&|\|\||\.\.=?|[-+*/%=<>!&|^?]",
        TokenColor::Operator,
    ),
    (r"[{}()\[\];,.:]", TokenColor::Punctuation),
    (r"\s+", TokenColor::Plain),
    (r".", TokenColor::Plain),
];

const JSON_RULES: RuleTable = &[
    (r#"("(?:[^"\\]|\\.)*")\s*:"#, TokenColor::Property),
    (r#""(?:[^"\\]|\\.)*"?"#, TokenColor::String),
    (r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?", TokenColor::Number),
    (r"(?:true|false|null)\b", TokenColor::Constant),
    (r"[{}\[\],:]", TokenColor::Punctuation),
    (r"\s+", TokenColor::Plain),
    (r".", TokenColor::Plain),
];

fn compile(table: RuleTable) -> Vec<Rule> {
    table
        .iter()
        .filter_map(|(pattern, color)| match Regex::new(&format!("^(?:{pattern})")) {
            Ok(pattern) => Some(Rule {
                pattern,
                color: *color,
            }),
            Err(err) => {
                log::error!("skipping invalid highlight rule {pattern:?}: {err}");
                None
            }
        })
        .collect()
}

static CLIKE: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(CLIKE_RULES));
static RUST: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(RUST_RULES));
static JSON: LazyLock<Vec<Rule>> = LazyLock::new(|| compile(JSON_RULES));

/// Compiled rules for a language, built on first use.
pub fn rules_for(language: Language) -> &'static [Rule] {
    match language {
        Language::CLike => &CLIKE,
        Language::Rust => &RUST,
        Language::Json => &JSON,
    }
}
