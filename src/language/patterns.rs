//! Declaration heuristics shared by the chunk segmenter and describer.
//!
//! Every pattern is tried against every file regardless of language, so an
//! unrecognized dialect still gets boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Top-level declarations that make a good chunk boundary. Matched against
/// the trimmed line.
pub static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        // js / ts
        r"(?:export\s+)?(?:async\s+)?function\s+\w+",
        r"|(?:export\s+)?(?:const|let|var)\s+\w+\s*=\s*(?:async\s+)?(?:\(|function)",
        r"|(?:export\s+)?(?:class|interface|type)\s+\w+",
        // python
        r"|(?:async\s+)?def\s+\w+",
        // rust
        r"|(?:pub\s+)?(?:async\s+)?fn\s+\w+",
        r"|impl\s+",
        r"|(?:pub\s+)?struct\s+\w+",
        // go
        r"|func\s+",
        r")",
    ))
    .unwrap()
});

/// Title patterns in priority order. Group 1 is the declared name.
pub static TITLES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Function", r"\bfunction\s+(\w+)"),
        ("Function", r"\b(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?\("),
        ("Class", r"\bclass\s+(\w+)"),
        ("Interface", r"\binterface\s+(\w+)"),
        ("Type", r"\btype\s+(\w+)"),
        ("Function", r"\bdef\s+(\w+)"),
        ("Function", r"\bfn\s+(\w+)"),
        ("Implementation", r"\bimpl\s+(\w+)"),
        ("Struct", r"\bstruct\s+(\w+)"),
        ("Function", r"\bfunc\s+(\w+)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
    .collect()
});

pub static IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:import\s|from\s.*import|require\(|use\s)").unwrap());

pub static EXPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^export\s").unwrap());

pub static FUNCTION_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"function\s+\w+|=>\s*\{|\bdef\s+\w+|\bfn\s+\w+|\bfunc\s+\w+").unwrap()
});

pub static CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:export\s+)?class\s+\w+").unwrap());

pub static INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:export\s+)?interface\s+\w+").unwrap());

/// React-style hook identifiers such as `useState`.
pub static HOOK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\buse[A-Z]\w+").unwrap());

pub static ASYNC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\basync\s+").unwrap());
