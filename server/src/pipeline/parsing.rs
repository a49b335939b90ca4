//! Text helpers that turn free-form model replies into structured values
//!
//! None of these fail: when a reply doesn't have the expected shape they fall
//! back to a defined default so the pipeline can keep going.

use regex::Regex;
use std::sync::OnceLock;

static LIST_MARKER: OnceLock<Regex> = OnceLock::new();
static QUERY_SEPARATOR: OnceLock<Regex> = OnceLock::new();
static BULLET: OnceLock<Regex> = OnceLock::new();
static CODE_FENCE: OnceLock<Regex> = OnceLock::new();

fn list_marker() -> &'static Regex {
    LIST_MARKER
        .get_or_init(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").expect("valid list marker regex"))
}

fn query_separator() -> &'static Regex {
    QUERY_SEPARATOR
        .get_or_init(|| Regex::new(r"(?i)\s*[;|]\s*|\s+and\s+").expect("valid separator regex"))
}

fn bullet() -> &'static Regex {
    BULLET.get_or_init(|| Regex::new(r"^\s*[-*•]\s*").expect("valid bullet regex"))
}

fn code_fence() -> &'static Regex {
    // An opening fence may carry a language tag ("```csv") and is followed by a
    // newline; a closing fence is just the backticks.
    CODE_FENCE
        .get_or_init(|| Regex::new(r"```[\w-]*[ \t]*\r?\n|```").expect("valid fence regex"))
}

/// Extract two search queries from the planning reply.
///
/// 1. One query per line, with leading `1.` / `2)` numbering or `-` / `*` / `•`
///    bullets removed.
/// 2. Otherwise a single line split on `;`, `|` or the word "and".
/// 3. Otherwise both queries are the raw reply.
pub fn parse_two_queries(text: &str) -> [String; 2] {
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| list_marker().replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() >= 2 {
        return [lines[0].clone(), lines[1].clone()];
    }

    let parts: Vec<&str> = query_separator()
        .split(text)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() >= 2 {
        return [parts[0].to_string(), parts[1].to_string()];
    }

    [text.to_string(), text.to_string()]
}

/// First non-empty line of `text` with any leading bullet (`-`, `*`, `•`) removed.
///
/// Falls back to the trimmed text when every line is blank.
pub fn first_line_or_bullet(text: &str) -> String {
    text.split('\n')
        .map(|line| bullet().replace(line, "").trim().to_string())
        .find(|line| !line.is_empty())
        .unwrap_or_else(|| text.trim().to_string())
}

/// Remove markdown code fence delimiters, keeping the fenced content
pub fn strip_code_fences(text: &str) -> String {
    code_fence().replace_all(text, "").trim().to_string()
}
