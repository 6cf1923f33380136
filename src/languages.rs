/*!
 * Language registry and code utilities.
 *
 * The UI surface offers a small closed list of languages; the history layer
 * accepts any code string. Lookups outside the closed list fall back to
 * isolang so arbitrary ISO 639 codes still get a readable name.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Languages offered by the interactive surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLanguage {
    /// English
    English,
    /// German
    German,
    /// Ukrainian
    Ukrainian,
    /// Russian
    Russian,
    /// Detect from the text
    Auto,
}

impl AppLanguage {
    /// All selectable languages, in display order
    pub const ALL: [AppLanguage; 5] = [
        AppLanguage::English,
        AppLanguage::German,
        AppLanguage::Ukrainian,
        AppLanguage::Russian,
        AppLanguage::Auto,
    ];

    /// Short code used in records and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            AppLanguage::English => "en",
            AppLanguage::German => "de",
            AppLanguage::Ukrainian => "ukr",
            AppLanguage::Russian => "ru",
            AppLanguage::Auto => "auto",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            AppLanguage::English => "English",
            AppLanguage::German => "German",
            AppLanguage::Ukrainian => "Ukrainian",
            AppLanguage::Russian => "Russian",
            AppLanguage::Auto => "Detect Language",
        }
    }
}

impl std::fmt::Display for AppLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for AppLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(AppLanguage::English),
            "de" => Ok(AppLanguage::German),
            "ukr" | "uk" => Ok(AppLanguage::Ukrainian),
            "ru" => Ok(AppLanguage::Russian),
            "auto" => Ok(AppLanguage::Auto),
            _ => Err(anyhow!("Unsupported language code: {}", s)),
        }
    }
}

/// Resolve a language code to a display name.
///
/// Codes from the closed list resolve directly; other ISO 639-1/639-3 codes
/// are looked up through isolang; anything else is echoed back so prompts
/// still read sensibly for codes the store accepted but the UI never offered.
pub fn language_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();

    if let Ok(lang) = normalized.parse::<AppLanguage>() {
        return lang.display_name().to_string();
    }

    let resolved = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    match resolved {
        Some(lang) => lang.to_name().to_string(),
        None => code.to_string(),
    }
}

/// Map an app language code to the code the tesseract binary expects
pub fn to_tesseract_lang(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    // Closed-list mapping first, matching what the UI offers
    let mapped = match normalized.as_str() {
        "en" => Some("eng"),
        "de" => Some("deu"),
        "ru" => Some("rus"),
        "ukr" | "uk" => Some("ukr"),
        _ => None,
    };
    if let Some(m) = mapped {
        return Ok(m.to_string());
    }

    // Tesseract uses ISO 639-2/T codes; convert what isolang recognizes
    if normalized.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(normalized);
    }

    Err(anyhow!("Cannot map language code for OCR: {}", code))
}
