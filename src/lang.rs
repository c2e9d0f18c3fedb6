//! Language detection and tree-sitter grammar loading

use std::path::Path;
use tree_sitter::Language;

use crate::error::{OutlineError, Result};

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Go,
    C,
    Cpp,
    Java,
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Python,
    Rust,
    CSharp,
}

impl Lang {
    /// Every supported language, in tech-stack order
    pub const ALL: [Lang; 11] = [
        Self::Go,
        Self::C,
        Self::Cpp,
        Self::Java,
        Self::JavaScript,
        Self::Jsx,
        Self::TypeScript,
        Self::Tsx,
        Self::Python,
        Self::Rust,
        Self::CSharp,
    ];

    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| OutlineError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "go" => Ok(Self::Go),
            "c" | "h" => Ok(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hxx" | "hh" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            "js" | "mjs" | "cjs" => Ok(Self::JavaScript),
            "jsx" => Ok(Self::Jsx),
            "ts" | "mts" | "cts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            "py" | "pyi" => Ok(Self::Python),
            "rs" => Ok(Self::Rust),
            "cs" => Ok(Self::CSharp),
            _ => Err(OutlineError::UnsupportedLanguage {
                extension: ext.to_string(),
            }),
        }
    }

    /// Whether a path has an extension this crate can index
    pub fn is_supported_path(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::CSharp => "csharp",
        }
    }

    /// Human-readable label used in the snapshot's `tech_stack`
    pub fn tech_label(&self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Java => "Java",
            Self::JavaScript | Self::Jsx => "JavaScript",
            Self::TypeScript | Self::Tsx => "TypeScript",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::CSharp => "C#",
        }
    }

    /// Get the tree-sitter Language for parsing
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
            Self::JavaScript | Self::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    /// Get the language family, which selects the symbol extractor
    pub fn family(&self) -> LangFamily {
        match self {
            Self::Go => LangFamily::Go,
            Self::C => LangFamily::C,
            Self::Cpp => LangFamily::Cpp,
            Self::Java => LangFamily::Java,
            Self::JavaScript | Self::Jsx | Self::TypeScript | Self::Tsx => LangFamily::JavaScript,
            Self::Python => LangFamily::Python,
            Self::Rust => LangFamily::Rust,
            Self::CSharp => LangFamily::CSharp,
        }
    }

    /// Get common file extensions for this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Go => &["go"],
            Self::C => &["c", "h"],
            Self::Cpp => &["cpp", "cc", "cxx", "hpp", "hxx", "hh"],
            Self::Java => &["java"],
            Self::JavaScript => &["js", "mjs", "cjs"],
            Self::Jsx => &["jsx"],
            Self::TypeScript => &["ts", "mts", "cts"],
            Self::Tsx => &["tsx"],
            Self::Python => &["py", "pyi"],
            Self::Rust => &["rs"],
            Self::CSharp => &["cs"],
        }
    }
}

/// Language families sharing one symbol extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LangFamily {
    /// Go: free functions, methods with receivers, type/const/var groups
    Go,
    /// C: functions, prototypes, typedefs and tagged types
    C,
    /// C++: C plus classes, namespaces and templates
    Cpp,
    /// Java: classes, interfaces, enums, records
    Java,
    /// JavaScript, JSX, TypeScript, TSX
    JavaScript,
    /// Python: indentation-delimited bodies and docstrings
    Python,
    /// Rust: items, impl blocks, traits, modules
    Rust,
    /// C#: namespaces, types, XML doc comments
    CSharp,
}

impl LangFamily {
    /// Get the canonical name of the language family
    pub fn name(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::CSharp => "csharp",
        }
    }
}
