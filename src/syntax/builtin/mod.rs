//! Built-in keyword tables
//!
//! One module per keyword family, plus the cross-language builtin names.

pub mod c;
pub mod csharp;
pub mod ecmascript;
pub mod java;
pub mod python;

/// Common runtime globals shared by every language
///
/// Capitalized entries never match: the tokenizer classifies those as types
/// before consulting this list.
pub fn is_builtin(word: &str) -> bool {
    matches!(
        word,
        "console"
            | "Math"
            | "Object"
            | "Array"
            | "String"
            | "JSON"
            | "process"
            | "window"
            | "document"
            | "print"
            | "len"
            | "range"
            | "list"
            | "dict"
            | "set"
            | "tuple"
            | "int"
            | "float"
            | "str"
            | "bool"
            | "type"
    )
}
