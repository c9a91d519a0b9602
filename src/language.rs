use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// Language tag derived from a source file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Go,
    C,
    Cpp,
    CSharp,
    Java,
    Ruby,
    Python,
    Lua,
    Perl,
    Php,
    Rust,
    Dart,
    JavaScript,
    TypeScript,
    Shell,
    Unknown,
}

/// Suffix table, checked in order. The first match wins.
const EXTENSIONS: &[(&str, Language)] = &[
    (".go", Language::Go),
    (".c", Language::C),
    (".cpp", Language::Cpp),
    (".cc", Language::Cpp),
    (".cs", Language::CSharp),
    (".java", Language::Java),
    (".rb", Language::Ruby),
    (".py", Language::Python),
    (".lua", Language::Lua),
    (".pl", Language::Perl),
    (".php", Language::Php),
    (".rs", Language::Rust),
    (".dart", Language::Dart),
    (".js", Language::JavaScript),
    (".ts", Language::TypeScript),
    (".sh", Language::Shell),
];

impl Language {
    /// Lower-case tag, e.g. `"cpp"` or `"c-sharp"`.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "c-sharp",
            Language::Java => "java",
            Language::Ruby => "ruby",
            Language::Python => "python",
            Language::Lua => "lua",
            Language::Perl => "perl",
            Language::Php => "php",
            Language::Rust => "rust",
            Language::Dart => "dart",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Shell => "shell",
            Language::Unknown => "unknown",
        }
    }

    /// File suffixes (with the leading dot) that classify as this language.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |(_, lang)| *lang == self)
            .map(|(ext, _)| *ext)
    }

    /// Whether the dispatch table has a recipe for this language.
    pub fn is_supported(self) -> bool {
        crate::runner::Recipe::for_language(self).is_some()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Classify a filename by its suffix, ignoring case.
pub fn classify(filename: &str) -> Language {
    let lower = filename.to_lowercase();
    EXTENSIONS
        .iter()
        .find(|(ext, _)| lower.ends_with(ext))
        .map(|(_, lang)| *lang)
        .unwrap_or(Language::Unknown)
}

/// Drop the last `.suffix` of the final path component.
///
/// Dots inside directory names are left alone, so `./prog` and `dir.d/prog` come back
/// unchanged.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(pos) => &path[..name_start + pos],
        None => path,
    }
}

/// [`strip_extension`] for paths that may not be valid Unicode.
pub fn strip_os_extension(path: &OsStr) -> OsString {
    match path.to_str() {
        Some(path) => OsString::from(strip_extension(path)),
        None => Path::new(path).with_extension("").into_os_string(),
    }
}
