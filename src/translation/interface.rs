use serde::{Deserialize, Serialize};

/// Kind of document being translated; selects the prompt guidance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationType {
    #[default]
    General,
    Resume,
    Interview,
}

impl TranslationType {
    pub fn all() -> [TranslationType; 3] {
        [TranslationType::General, TranslationType::Resume, TranslationType::Interview]
    }

    pub fn id(&self) -> &'static str {
        match self {
            TranslationType::General => "general",
            TranslationType::Resume => "resume",
            TranslationType::Interview => "interview",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TranslationType::General => "General",
            TranslationType::Resume => "Resume",
            TranslationType::Interview => "Interview",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TranslationType::General => "Context-aware translation for everyday text",
            TranslationType::Resume => "Precise, professional terminology for resumes and cover letters",
            TranslationType::Interview => "Natural, fluent phrasing for spoken interview answers",
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            TranslationType::General => {
                "Translate naturally while preserving the meaning and tone of the original."
            }
            TranslationType::Resume => {
                "This is a resume or cover letter. Use concise, professional language, \
                 standard job titles and industry terminology, and keep list and section \
                 structure intact. Prefer action verbs and do not embellish achievements."
            }
            TranslationType::Interview => {
                "This is an answer for a job interview. Produce natural, fluent spoken \
                 language that sounds confident and polite, as a native speaker would say it."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationTypeInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<TranslationType> for TranslationTypeInfo {
    fn from(t: TranslationType) -> Self {
        Self {
            id: t.id(),
            label: t.label(),
            description: t.description(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(alias = "sourceLanguage")]
    pub source_language: String,
    #[serde(alias = "targetLanguage")]
    pub target_language: String,
    #[serde(default, rename = "type")]
    pub translation_type: TranslationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(rename = "type")]
    pub translation_type: TranslationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: Translation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub original: String,
    pub translated: String,
    #[serde(alias = "sourceLanguage")]
    pub source_language: String,
    #[serde(alias = "targetLanguage")]
    pub target_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_case_aliases_and_default_type() {
        let req: TranslateRequest = serde_json::from_str(
            r#"{"text": "안녕하세요", "sourceLanguage": "ko", "targetLanguage": "en"}"#,
        )
        .unwrap();
        assert_eq!(req.source_language, "ko");
        assert_eq!(req.translation_type, TranslationType::General);
    }

    #[test]
    fn type_field_is_snake_case() {
        let req: TranslateRequest = serde_json::from_str(
            r#"{"text": "x", "source_language": "ko", "target_language": "en", "type": "resume"}"#,
        )
        .unwrap();
        assert_eq!(req.translation_type, TranslationType::Resume);
        assert!(serde_json::from_str::<TranslateRequest>(
            r#"{"text": "x", "source_language": "ko", "target_language": "en", "type": "poem"}"#
        )
        .is_err());
    }
}
