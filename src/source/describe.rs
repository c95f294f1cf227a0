use itertools::Itertools;
use regex::Regex;

use crate::language::{
    patterns::{ASYNC, CLASS, EXPORT, FUNCTION_LIKE, HOOK, IMPORT, INTERFACE, TITLES},
    LanguageId,
};

const TITLE_SCAN_LINES: usize = 10;
const MAX_HOOKS: usize = 3;

/// Label a chunk after the first declaration in its opening lines,
/// falling back to `Section <number>`.
pub fn chunk_title(lines: &[&str], number: usize) -> String {
    for line in lines.iter().take(TITLE_SCAN_LINES) {
        let trimmed = line.trim();
        for (kind, pattern) in TITLES.iter() {
            if let Some(caps) = pattern.captures(trimmed) {
                return format!("{kind}: {}", &caps[1]);
            }
        }
    }

    format!("Section {number}")
}

/// One-line summary of what a block of code contains.
pub fn describe(content: &str, language: LanguageId) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut insights = Vec::new();

    let imports = count_trimmed(&lines, &IMPORT);
    if imports > 0 {
        insights.push(plural(imports, "import", "imports"));
    }

    let exports = count_trimmed(&lines, &EXPORT);
    if exports > 0 {
        insights.push(plural(exports, "export", "exports"));
    }

    let functions = lines.iter().filter(|l| FUNCTION_LIKE.is_match(l)).count();
    if functions > 0 {
        insights.push(plural(functions, "function", "functions"));
    }

    let classes = count_trimmed(&lines, &CLASS);
    if classes > 0 {
        insights.push(plural(classes, "class", "classes"));
    }

    let interfaces = count_trimmed(&lines, &INTERFACE);
    if interfaces > 0 {
        insights.push(plural(interfaces, "interface", "interfaces"));
    }

    let hooks: Vec<&str> = lines
        .iter()
        .flat_map(|l| HOOK.find_iter(l).map(|m| m.as_str()))
        .unique()
        .take(MAX_HOOKS)
        .collect();
    if !hooks.is_empty() {
        insights.push(format!("hooks: {}", hooks.join(", ")));
    }

    let asyncs = ASYNC.find_iter(content).count();
    if asyncs > 0 {
        insights.push(plural(asyncs, "async operation", "async operations"));
    }

    if insights.is_empty() {
        insights.push(format!("{} lines of {language} code", lines.len()));
    }

    insights.join(" • ")
}

fn count_trimmed(lines: &[&str], re: &Regex) -> usize {
    lines.iter().filter(|l| re.is_match(l.trim())).count()
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("1 {one}")
    } else {
        format!("{count} {many}")
    }
}
