/*!
 * Output cleaning for provider results.
 *
 * Provider text can carry wiki markup, HTML, bracketed placeholders and
 * several senses or clauses. Cleaning keeps the first sense only and bounds the
 * length so results are safe to render as-is.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters kept from a dictionary definition
pub const MAX_DEFINITION_CHARS: usize = 100;

/// Maximum characters kept from a machine translation
pub const MAX_TRANSLATION_CHARS: usize = 50;

static WIKI_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(?:[^\]|]*\|)?([^\]]+)\]\]").expect("static regex is valid"));
static TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[^}]*\}\}").expect("static regex is valid"));
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("static regex is valid"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex is valid"));
static HTML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("static regex is valid")
});
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]{}]").expect("static regex is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex is valid"));

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(decimal) = entity.strip_prefix('#') {
        return decimal.parse().ok().and_then(char::from_u32);
    }
    match entity {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Decode numeric and common named HTML entities; unknown ones are kept
pub fn decode_entities(text: &str) -> String {
    HTML_ENTITY
        .replace_all(text, |caps: &regex::Captures| match decode_entity(&caps[1]) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Clean a dictionary gloss down to its first sentence
pub fn clean_definition(definition: &str) -> String {
    let text = HTML_TAG.replace_all(definition, "");
    let text = decode_entities(&text);
    let text = WIKI_LINK.replace_all(&text, "$1");
    let text = TEMPLATE.replace_all(&text, "");
    let text = PARENTHETICAL.replace_all(&text, "");
    let text = collapse_whitespace(&text);

    let first_sentence = text.split('.').next().unwrap_or_default().trim();
    truncate_chars(first_sentence, MAX_DEFINITION_CHARS)
}

/// Clean a machine translation down to its first clause
pub fn clean_translation(translation: &str) -> String {
    let text = BRACKETS.replace_all(translation, "");
    let text = collapse_whitespace(&text);

    let first_clause = text.split(',').next().unwrap_or_default().trim();
    truncate_chars(first_clause, MAX_TRANSLATION_CHARS)
}

/// Whether raw provider output is unusable for the given input
///
/// Output is degenerate when it is blank, repeats the input (ignoring case and
/// surrounding whitespace) or still contains a bracket placeholder.
pub fn is_degenerate(input: &str, output: &str) -> bool {
    let output = output.trim();
    output.is_empty()
        || output.to_lowercase() == input.trim().to_lowercase()
        || output.contains('[')
}

/// The untranslated marker shown when every provider failed
pub fn untranslated_marker(text: &str) -> String {
    format!("[{}]", text.trim())
}
