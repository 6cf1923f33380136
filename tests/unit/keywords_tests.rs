/*!
 * Tests for keyword extraction
 */

use traduki::keywords::{KeywordOptions, extract_keywords, guess_lang_from_text};

#[test]
fn test_extractKeywords_shouldBeDeterministic() {
    let text = "ownership borrowing lifetimes ownership borrowing ownership";

    let first = extract_keywords(text, &KeywordOptions::default());
    let second = extract_keywords(text, &KeywordOptions::default());

    assert_eq!(first, second);
    assert_eq!(first[0].word, "ownership");
    assert_eq!(first[0].count, 3);
}

#[test]
fn test_extractKeywords_shouldLowercaseTokens() {
    let text = "Rust RUST rust";
    let keywords = extract_keywords(text, &KeywordOptions::default());

    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].word, "rust");
    assert_eq!(keywords[0].count, 3);
}

#[test]
fn test_extractKeywords_shouldSplitOnPunctuationAndDigits() {
    let text = "compile-time, magic! magic? 42 magic.";
    let keywords = extract_keywords(text, &KeywordOptions::default());

    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words[0], "magic");
    assert_eq!(keywords[0].count, 3);
    // Hyphenated words survive as one token
    assert!(words.contains(&"compile-time"));
    // Pure numbers never appear
    assert!(!words.contains(&"42"));
}

#[test]
fn test_extractKeywords_withMinLen_shouldDropShortTokens() {
    let opts = KeywordOptions {
        min_len: 6,
        ..KeywordOptions::default()
    };
    let keywords = extract_keywords("short longerword tiny longerword", &opts);

    assert_eq!(keywords.len(), 1);
    assert_eq!(keywords[0].word, "longerword");
}

#[test]
fn test_extractKeywords_withExplicitLanguage_shouldUseItsStopwords() {
    let opts = KeywordOptions {
        lang: Some("de".to_string()),
        ..KeywordOptions::default()
    };
    // "diese" is a German stopword; "hund" is not
    let keywords = extract_keywords("diese hund diese hund hund", &opts);

    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words, vec!["hund"]);
}

#[test]
fn test_extractKeywords_withAutoLanguage_shouldGuessFromScript() {
    let opts = KeywordOptions {
        lang: Some("auto".to_string()),
        ..KeywordOptions::default()
    };
    // Cyrillic text: Ukrainian stopwords apply, so "вони" disappears
    let keywords = extract_keywords("вони словник словник переклад", &opts);

    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words, vec!["словник", "переклад"]);
}

#[test]
fn test_guessLangFromText_withMixedText_shouldFollowMajorityScript() {
    assert_eq!(guess_lang_from_text("word слово слово"), "uk");
    assert_eq!(guess_lang_from_text("слово word word"), "en");
    assert_eq!(guess_lang_from_text(""), "en");
}

#[test]
fn test_extractKeywords_withMaxZero_shouldReturnNothing() {
    let opts = KeywordOptions {
        max: 0,
        ..KeywordOptions::default()
    };
    assert!(extract_keywords("alpha beta gamma", &opts).is_empty());
}
