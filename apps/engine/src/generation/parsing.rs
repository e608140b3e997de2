//! Turns raw backend text into document field values. Every parser is total:
//! malformed or empty input yields a defined (possibly empty) result.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterSections {
    pub introduction: String,
    pub body: String,
    pub conclusion: String,
}

/// Splits a whole letter on blank lines. First paragraph is the
/// introduction, last is the conclusion, anything between is the body. A
/// single paragraph fills both introduction and conclusion.
pub fn parse_whole_letter(text: &str) -> LetterSections {
    let paragraphs = paragraphs(text);
    match paragraphs.as_slice() {
        [] => LetterSections::default(),
        [only] => LetterSections {
            introduction: only.clone(),
            body: String::new(),
            conclusion: only.clone(),
        },
        [first, middle @ .., last] => LetterSections {
            introduction: first.clone(),
            body: middle.join("\n\n"),
            conclusion: last.clone(),
        },
    }
}

/// Normalizes bullet output: one `• ` bullet per non-empty fragment, split on
/// newlines and on `•`.
pub fn parse_bulleted_description(text: &str) -> String {
    text.split(['\n', '•'])
        .map(str::trim)
        .map(|fragment| fragment.strip_prefix('-').unwrap_or(fragment).trim_start())
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| format!("• {fragment}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_plain_prose(text: &str) -> String {
    text.trim().to_string()
}

/// Comma-separated suggestions not already in `existing` (or earlier in the
/// same response), in response order. Comparison is exact.
pub fn parse_suggestions(text: &str, existing: &[String]) -> Vec<String> {
    let mut accepted: Vec<String> = Vec::new();
    for item in text.split(',').map(str::trim) {
        if item.is_empty()
            || existing.iter().any(|e| e == item)
            || accepted.iter().any(|a| a == item)
        {
            continue;
        }
        accepted.push(item.to_string());
    }
    accepted
}

fn paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in normalized.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n").trim().to_string());
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n").trim().to_string());
    }
    paragraphs
}
