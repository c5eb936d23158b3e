/*!
 * Built-in starter dictionary.
 *
 * A tiny static glossary of very common lyric words per language, used to give
 * freshly ingested vocabulary a coarse translation without touching the network.
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

type Glossary = HashMap<&'static str, &'static str>;

static STARTER_GLOSSARIES: Lazy<HashMap<&'static str, Glossary>> = Lazy::new(|| {
    let mut glossaries = HashMap::new();

    glossaries.insert(
        "ko",
        glossary(&[
            ("사랑", "love"),
            ("너", "you"),
            ("나", "I/me"),
            ("우리", "we/us"),
            ("마음", "heart/mind"),
            ("시간", "time"),
            ("안녕", "hello/goodbye"),
            ("기뻐", "happy/glad"),
            ("함께", "together"),
            ("언제까지나", "forever"),
            ("만나서", "meeting/to meet"),
        ]),
    );
    glossaries.insert(
        "es",
        glossary(&[
            ("amor", "love"),
            ("corazón", "heart"),
            ("vida", "life"),
            ("hola", "hello"),
            ("mucho", "much/very"),
            ("siempre", "always"),
            ("para", "for"),
            ("contigo", "with you"),
            ("quiero", "I want/I love"),
            ("eres", "you are"),
            ("mi", "my"),
        ]),
    );
    glossaries.insert(
        "fr",
        glossary(&[
            ("amour", "love"),
            ("cœur", "heart"),
            ("vie", "life"),
            ("bonjour", "hello"),
            ("toujours", "always"),
            ("avec", "with"),
            ("pour", "for"),
            ("très", "very"),
            ("mon", "my"),
            ("tu", "you"),
            ("je", "I"),
        ]),
    );
    glossaries.insert(
        "ja",
        glossary(&[
            ("愛", "love"),
            ("心", "heart"),
            ("君", "you"),
            ("僕", "I (male)"),
            ("私", "I (female)"),
            ("時間", "time"),
            ("こんにちは", "hello"),
            ("いつも", "always"),
            ("一緒", "together"),
            ("大好き", "love very much"),
        ]),
    );
    glossaries.insert(
        "de",
        glossary(&[
            ("liebe", "love"),
            ("herz", "heart"),
            ("leben", "life"),
            ("hallo", "hello"),
            ("immer", "always"),
            ("mit", "with"),
            ("für", "for"),
            ("sehr", "very"),
            ("mein", "my"),
            ("du", "you"),
            ("ich", "I"),
        ]),
    );
    glossaries.insert(
        "it",
        glossary(&[
            ("amore", "love"),
            ("cuore", "heart"),
            ("vita", "life"),
            ("ciao", "hello/bye"),
            ("sempre", "always"),
            ("con", "with"),
            ("per", "for"),
            ("molto", "very"),
            ("mio", "my"),
            ("tu", "you"),
            ("io", "I"),
        ]),
    );
    glossaries.insert(
        "pt",
        glossary(&[
            ("amor", "love"),
            ("coração", "heart"),
            ("vida", "life"),
            ("olá", "hello"),
            ("sempre", "always"),
            ("com", "with"),
            ("para", "for"),
            ("muito", "very"),
            ("meu", "my"),
            ("você", "you"),
            ("eu", "I"),
        ]),
    );
    glossaries.insert(
        "zh",
        glossary(&[
            ("爱", "love"),
            ("心", "heart"),
            ("生活", "life"),
            ("你好", "hello"),
            ("总是", "always"),
            ("和", "with"),
            ("为", "for"),
            ("很", "very"),
            ("我的", "my"),
            ("你", "you"),
            ("我", "I"),
        ]),
    );
    glossaries.insert(
        "hi",
        glossary(&[
            ("प्रेम", "love"),
            ("दिल", "heart"),
            ("जीवन", "life"),
            ("नमस्ते", "hello"),
            ("हमेशा", "always"),
            ("साथ", "with"),
            ("बहुत", "very"),
            ("मेरा", "my"),
            ("तुम", "you"),
            ("मैं", "I"),
        ]),
    );
    glossaries.insert(
        "ar",
        glossary(&[
            ("حب", "love"),
            ("قلب", "heart"),
            ("حياة", "life"),
            ("مرحبا", "hello"),
            ("دائما", "always"),
            ("مع", "with"),
            ("جدا", "very"),
            ("لي", "my"),
            ("أنت", "you"),
            ("أنا", "I"),
        ]),
    );

    glossaries
});

fn glossary(pairs: &[(&'static str, &'static str)]) -> Glossary {
    pairs.iter().copied().collect()
}

/// Look up a coarse translation for a word
///
/// Matching is exact on the lower-cased word. Returns an empty string when the
/// language has no glossary or the word is not in it.
pub fn starter_translation(word: &str, language_code: &str) -> String {
    STARTER_GLOSSARIES
        .get(language_code)
        .and_then(|entries| entries.get(word.to_lowercase().as_str()))
        .map(|translation| translation.to_string())
        .unwrap_or_default()
}

/// Language codes that have a starter glossary
pub fn available_languages() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = STARTER_GLOSSARIES.keys().copied().collect();
    codes.sort_unstable();
    codes
}
