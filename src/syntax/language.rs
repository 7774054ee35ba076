//! Language detection
//!
//! Maps file names to display labels and to the keyword family used by the
//! tokenizer. The label table covers more extensions than the tokenizer has
//! keyword sets for; unlisted families still get strings, numbers and
//! comments highlighted.

use super::builtin;

/// Label shown for unknown or missing extensions
pub const PLAIN_TEXT: &str = "Plain Text";

/// Extract the lower-cased extension from a file name
///
/// A name without a `.` has no extension.
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Final component of a path, accepting both `/` and `\` separators
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Display label for an extension
pub fn language_label(extension: &str) -> &'static str {
    match extension {
        "cs" => "C#",
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "jsx" => "JSX",
        "tsx" => "TSX",
        "py" => "Python",
        "html" => "HTML",
        "css" => "CSS",
        "json" => "JSON",
        "xml" => "XML",
        "cpp" => "C++",
        "c" => "C",
        "h" => "C Header",
        "hpp" => "C++ Header",
        "java" => "Java",
        "kt" => "Kotlin",
        "rs" => "Rust",
        "go" => "Go",
        "sh" => "Shell",
        "md" => "Markdown",
        "txt" => PLAIN_TEXT,
        "yaml" | "yml" => "YAML",
        "toml" => "TOML",
        "lua" => "Lua",
        "rb" => "Ruby",
        "php" => "PHP",
        "swift" => "Swift",
        "unity" | "asset" => "Unity Asset",
        "prefab" => "Unity Prefab",
        "meta" => "Unity Meta",
        _ => PLAIN_TEXT,
    }
}

/// Detect the display label from a file name
pub fn detect_language_label(filename: &str) -> &'static str {
    language_label(&extension_of(filename))
}

/// Keyword family selected by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    CSharp,
    EcmaScript,
    Python,
    CFamily,
    Java,
    /// No keyword set
    None,
}

impl LanguageFamily {
    pub fn for_extension(extension: &str) -> Self {
        match extension {
            "cs" => LanguageFamily::CSharp,
            "js" | "ts" | "jsx" | "tsx" => LanguageFamily::EcmaScript,
            "py" => LanguageFamily::Python,
            "cpp" | "c" | "h" | "hpp" => LanguageFamily::CFamily,
            "java" | "kt" => LanguageFamily::Java,
            _ => LanguageFamily::None,
        }
    }

    /// Check membership in this family's keyword set
    pub fn is_keyword(&self, word: &str) -> bool {
        match self {
            LanguageFamily::CSharp => builtin::csharp::is_keyword(word),
            LanguageFamily::EcmaScript => builtin::ecmascript::is_keyword(word),
            LanguageFamily::Python => builtin::python::is_keyword(word),
            LanguageFamily::CFamily => builtin::c::is_keyword(word),
            LanguageFamily::Java => builtin::java::is_keyword(word),
            LanguageFamily::None => false,
        }
    }
}
