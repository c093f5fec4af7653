//! Single-pass lexical highlighting driven by per-language rule tables.

pub mod language;
pub mod rules;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use language::{Language, detect};

/// Semantic color tag; the theme decides the concrete color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenColor {
    #[default]
    Plain,
    Keyword,
    String,
    Comment,
    Number,
    Constant,
    Type,
    Function,
    Macro,
    Attribute,
    Property,
    Operator,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub color: TokenColor,
}

impl Token {
    pub fn new(text: impl Into<String>, color: TokenColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// Split a line into colored tokens.
///
/// The tokens partition the line exactly, and no two neighbours share a color.
/// Without a language the whole line is one plain token.
pub fn tokenize(line: &str, language: Option<Language>) -> Vec<Token> {
    let Some(language) = language else {
        return vec![Token::new(line, TokenColor::Plain)];
    };

    let rules = rules::rules_for(language);
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let matched = rules.iter().find_map(|rule| {
            let caps = rule.pattern.captures(rest)?;
            let len = caps.get(1).or_else(|| caps.get(0))?.end();
            (len > 0).then_some((len, rule.color))
        });

        let (len, color) = matched.unwrap_or_else(|| {
            let len = rest.chars().next().map_or(rest.len(), char::len_utf8);
            (len, TokenColor::Plain)
        });

        push_merged(&mut tokens, &rest[..len], color);
        pos += len;
    }

    tokens
}

fn push_merged(tokens: &mut Vec<Token>, text: &str, color: TokenColor) {
    match tokens.last_mut() {
        Some(last) if last.color == color => last.text.push_str(text),
        _ => tokens.push(Token::new(text, color)),
    }
}

/// Memoizes tokenized lines per language.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: HashMap<(Option<Language>, String), Vec<Token>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&mut self, line: &str, language: Option<Language>) -> Vec<Token> {
        self.entries
            .entry((language, line.to_string()))
            .or_insert_with(|| tokenize(line, language))
            .clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
