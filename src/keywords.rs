/*!
 * Keyword extraction for the link-vocab flow.
 *
 * Pure text processing: tokenize, drop stopwords and short tokens, count
 * frequencies, return the most frequent words first. Deterministic, no I/O.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// A keyword with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// The extracted word, lowercased
    pub word: String,
    /// Number of occurrences in the source text
    pub count: usize,
}

/// Options for keyword extraction
#[derive(Debug, Clone)]
pub struct KeywordOptions {
    /// Language code for stopword selection; None or "auto" guesses from the text
    pub lang: Option<String>,
    /// Minimum token length to keep
    pub min_len: usize,
    /// Maximum number of keywords to return
    pub max: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            lang: None,
            min_len: 3,
            max: 50,
        }
    }
}

// Anything outside letters, combining marks, apostrophes and hyphens separates tokens
static TOKEN_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{M}'-]+").unwrap());
static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Cyrillic}").unwrap());
static LATIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Latin}").unwrap());

static STOPWORDS: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "en",
        [
            "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "than", "so",
            "to", "of", "in", "on", "for", "with", "as", "at", "by", "from", "is", "are", "was",
            "were", "be", "been", "being", "it", "this", "that", "these", "those", "i", "you",
            "he", "she", "we", "they", "them", "their", "our", "your", "my", "me",
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        "de",
        [
            "der", "die", "das", "und", "oder", "aber", "wenn", "dann", "sonst", "als", "zu",
            "von", "in", "auf", "für", "mit", "an", "bei", "aus", "ist", "sind", "war", "waren",
            "sein", "es", "dies", "diese", "dieser", "ich", "du", "er", "sie", "wir", "ihr",
            "ihnen", "unser", "euer", "mein", "dein",
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        "uk",
        [
            "і", "й", "та", "або", "але", "якщо", "то", "коли", "ніж", "що", "це", "ця", "цей",
            "ці", "той", "такий", "у", "в", "на", "до", "з", "із", "по", "від", "за", "для",
            "як", "ми", "ви", "вони", "він", "вона", "я", "ти", "є", "бути", "був", "були",
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        "ru",
        [
            "и", "или", "но", "если", "то", "когда", "чем", "что", "это", "этот", "эта", "эти",
            "тот", "такой", "в", "на", "к", "с", "из", "по", "от", "за", "для", "как", "мы",
            "вы", "они", "он", "она", "я", "ты", "есть", "быть", "был", "были",
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        "fr",
        [
            "le", "la", "les", "un", "une", "et", "ou", "mais", "si", "alors", "quand", "que",
            "de", "du", "des", "à", "en", "dans", "sur", "pour", "avec", "par", "est", "sont",
            "été", "être", "ce", "cet", "cette", "ces",
        ]
        .into_iter()
        .collect(),
    );
    map.insert(
        "es",
        [
            "el", "la", "los", "las", "un", "una", "y", "o", "pero", "si", "cuando", "que",
            "de", "del", "en", "sobre", "para", "con", "por", "es", "son", "fue", "ser",
            "esto", "esta", "estas", "estos",
        ]
        .into_iter()
        .collect(),
    );
    map
});

/// Stopword set for a language code, falling back to English
pub fn stopwords(lang: &str) -> &'static HashSet<&'static str> {
    let key = lang.trim().to_lowercase();
    // The UI's Ukrainian code is "ukr"; the stopword table is keyed by 639-1
    let key = if key == "ukr" { "uk".to_string() } else { key };
    STOPWORDS
        .get(key.as_str())
        .unwrap_or_else(|| STOPWORDS.get("en").unwrap())
}

/// Guess the dominant language of a text from its script.
///
/// Counts Cyrillic versus Latin letters; more Cyrillic means Ukrainian for
/// this app's audience, anything else defaults to English.
pub fn guess_lang_from_text(text: &str) -> &'static str {
    let cyrillic = CYRILLIC.find_iter(text).count();
    let latin = LATIN.find_iter(text).count();
    if cyrillic > latin { "uk" } else { "en" }
}

/// Extract the most frequent keywords from raw text.
///
/// Tokens are lowercased, split on anything outside letters/marks/apostrophe/
/// hyphen, filtered by length and stopword list, counted, and returned sorted
/// by descending count. Ties keep first-seen order, so output is stable for
/// identical input.
pub fn extract_keywords(raw: &str, opts: &KeywordOptions) -> Vec<Keyword> {
    let lang = match opts.lang.as_deref() {
        Some(l) if !l.is_empty() && l != "auto" => l.to_string(),
        _ => guess_lang_from_text(raw).to_string(),
    };
    let stop = stopwords(&lang);

    let lowered = raw.to_lowercase();

    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in TOKEN_SEPARATOR.split(&lowered) {
        let token = token.trim_matches(|c| c == '\'' || c == '-');
        if token.chars().count() < opts.min_len || stop.contains(token) {
            continue;
        }
        match counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                first_seen.push(token.to_string());
                counts.insert(token.to_string(), 1);
            }
        }
    }

    let mut keywords: Vec<Keyword> = first_seen
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            Keyword { word, count }
        })
        .collect();

    // sort_by is stable: equal counts keep first-seen order
    keywords.sort_by(|a, b| b.count.cmp(&a.count));
    keywords.truncate(opts.max);
    keywords
}
