use std::collections::HashMap;
use std::sync::OnceLock;

static ABBREVIATIONS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_abbreviations() -> &'static HashMap<&'static str, &'static str> {
    ABBREVIATIONS.get_or_init(|| {
        const ABBREV_DATA: &str = include_str!("abbreviations.txt");

        ABBREV_DATA
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let mut parts = line.split('=');
                let abbrev = parts.next()?.trim();
                let expansion = parts.next()?.trim();
                Some((abbrev, expansion))
            })
            .collect()
    })
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '.' || ch == '\'' || ch == '\u{2019}'
}

/// "St." directly before a capitalised word is a saint, as in "St. Louis".
fn is_saint(stem: &str, period: &str, rest: &str) -> bool {
    stem == "St"
        && !period.is_empty()
        && rest
            .strip_prefix(' ')
            .and_then(|r| r.chars().next())
            .is_some_and(char::is_uppercase)
}

fn push_word(result: &mut String, word: &str, rest: &str, abbrev_map: &HashMap<&str, &str>) {
    // "St." expands like "St" and keeps its period.
    let (stem, period) = match word.strip_suffix('.') {
        Some(stem) => (stem, "."),
        None => (word, ""),
    };
    if is_saint(stem, period, rest) {
        result.push_str("Saint");
        return;
    }
    match abbrev_map.get(stem) {
        Some(expansion) => {
            result.push_str(expansion);
            result.push_str(period);
        }
        None => result.push_str(word),
    }
}

/// Spell out road abbreviations so speech engines read "Main Street" rather
/// than "Main S T". Words containing digits or apostrophes ("E45", "I'm")
/// never match.
pub fn expand_abbreviations(text: &str) -> String {
    let abbrev_map = get_abbreviations();

    let mut result = String::with_capacity(text.len() + 50);
    let mut word_start = None;

    for (i, ch) in text.char_indices() {
        if is_word_char(ch) {
            word_start.get_or_insert(i);
        } else {
            if let Some(start) = word_start.take() {
                push_word(&mut result, &text[start..i], &text[i..], abbrev_map);
            }
            result.push(ch);
        }
    }

    if let Some(start) = word_start {
        push_word(&mut result, &text[start..], "", abbrev_map);
    }

    result
}
