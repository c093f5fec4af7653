use std::path::Path;

use serde::{Deserialize, Serialize};

/// Selects which lexical rule table the tokenizer scans with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C-family and ECMAScript-like sources (JS, TS, C, Java, Go, ...)
    CLike,
    Rust,
    Json,
}

const EXTENSIONS: &[(&str, Language)] = &[
    ("js", Language::CLike),
    ("jsx", Language::CLike),
    ("mjs", Language::CLike),
    ("cjs", Language::CLike),
    ("ts", Language::CLike),
    ("tsx", Language::CLike),
    ("mts", Language::CLike),
    ("cts", Language::CLike),
    ("c", Language::CLike),
    ("h", Language::CLike),
    ("cc", Language::CLike),
    ("cpp", Language::CLike),
    ("hpp", Language::CLike),
    ("cs", Language::CLike),
    ("java", Language::CLike),
    ("kt", Language::CLike),
    ("go", Language::CLike),
    ("swift", Language::CLike),
    ("rs", Language::Rust),
    ("json", Language::Json),
    ("jsonc", Language::Json),
];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::CLike => "clike",
            Language::Rust => "rust",
            Language::Json => "json",
        }
    }

    /// Look up a language by file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, language)| *language)
    }
}

/// Detect the language of a path from its extension alone.
pub fn detect(path: &str) -> Option<Language> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}
