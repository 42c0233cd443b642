use serde::Serialize;

/// A language the translation service accepts as source or target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

const LANGUAGES: &[Language] = &[
    Language { code: "ko", name: "Korean", native_name: "한국어", flag: "🇰🇷" },
    Language { code: "en", name: "English", native_name: "English", flag: "🇺🇸" },
    Language { code: "ja", name: "Japanese", native_name: "日本語", flag: "🇯🇵" },
    Language { code: "zh", name: "Chinese", native_name: "中文", flag: "🇨🇳" },
    Language { code: "es", name: "Spanish", native_name: "Español", flag: "🇪🇸" },
    Language { code: "fr", name: "French", native_name: "Français", flag: "🇫🇷" },
    Language { code: "de", name: "German", native_name: "Deutsch", flag: "🇩🇪" },
    Language { code: "vi", name: "Vietnamese", native_name: "Tiếng Việt", flag: "🇻🇳" },
];

pub fn supported_languages() -> &'static [Language] {
    LANGUAGES
}

/// Look up a language by ISO-639-1 code, ignoring case and surrounding whitespace
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}
