use std::sync::Arc;
use tracing::{debug, info};

use crate::config::TranslationConfig;
use crate::error::{AppError, AppResult};
use crate::llm::{collect_completion, Message, StatelessLLMInterface};
use super::evaluation::{TranslationEvaluation, EVALUATION_INSTRUCTIONS};
use super::interface::{EvaluateRequest, TranslateRequest, Translation, TranslationType};
use super::languages::{find_language, Language};

/// Translation of job documents through the configured language model
pub struct TranslationService {
    llm: Arc<dyn StatelessLLMInterface>,
    config: TranslationConfig,
}

impl TranslationService {
    pub fn new(llm: Arc<dyn StatelessLLMInterface>, config: TranslationConfig) -> Self {
        Self { llm, config }
    }

    pub async fn translate(&self, request: TranslateRequest) -> AppResult<Translation> {
        let text = self.validate_text(&request.text, "text")?;
        let source = resolve_language(&request.source_language)?;
        let target = resolve_language(&request.target_language)?;

        if source.code == target.code {
            debug!("Source and target are both {}, returning text unchanged", source.code);
            return Ok(Translation {
                original_text: text.to_string(),
                translated_text: text.to_string(),
                source_language: source.code.to_string(),
                target_language: target.code.to_string(),
                translation_type: request.translation_type,
            });
        }

        info!(
            "Translating {} chars {} -> {} ({})",
            text.chars().count(),
            source.code,
            target.code,
            request.translation_type.id()
        );

        let system = translation_prompt(source, target, request.translation_type);
        let stream = self
            .llm
            .chat_completion(vec![Message::user(text)], Some(&system))
            .await
            .map_err(AppError::Upstream)?;
        let reply = collect_completion(stream).await.map_err(AppError::Upstream)?;

        let translated = clean_model_output(&reply);
        if translated.is_empty() {
            return Err(AppError::Upstream(anyhow::anyhow!("model returned an empty translation")));
        }

        Ok(Translation {
            original_text: text.to_string(),
            translated_text: translated,
            source_language: source.code.to_string(),
            target_language: target.code.to_string(),
            translation_type: request.translation_type,
        })
    }

    pub async fn evaluate(&self, request: EvaluateRequest) -> AppResult<TranslationEvaluation> {
        let original = self.validate_text(&request.original, "original")?;
        let translated = self.validate_text(&request.translated, "translated")?;
        let source = resolve_language(&request.source_language)?;
        let target = resolve_language(&request.target_language)?;

        let prompt = format!(
            "Source language: {}\nTarget language: {}\n\nOriginal:\n{}\n\nTranslation:\n{}",
            source.name, target.name, original, translated
        );

        let stream = self
            .llm
            .chat_completion(vec![Message::user(prompt)], Some(EVALUATION_INSTRUCTIONS))
            .await
            .map_err(AppError::Upstream)?;
        let reply = collect_completion(stream).await.map_err(AppError::Upstream)?;

        Ok(TranslationEvaluation::from_model_reply(&reply))
    }

    fn validate_text<'a>(&self, text: &'a str, field: &str) -> AppResult<&'a str> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(format!("{} must not be empty", field)));
        }
        let len = text.chars().count();
        if len > self.config.max_text_length {
            return Err(AppError::Validation(format!(
                "{} is too long ({} characters, maximum {})",
                field, len, self.config.max_text_length
            )));
        }
        Ok(text)
    }
}

fn resolve_language(code: &str) -> AppResult<&'static Language> {
    find_language(code).ok_or_else(|| AppError::UnsupportedLanguage(code.to_string()))
}

fn translation_prompt(source: &Language, target: &Language, kind: TranslationType) -> String {
    format!(
        "You are a professional translator specialising in job-seeking documents. \
         Translate the user's text from {} to {}. {} \
         Reply with the translated text only, without notes, quotes or explanations.",
        source.name,
        target.name,
        kind.guidance()
    )
}

/// Strip wrapping code fences or quotes the model sometimes adds
fn clean_model_output(reply: &str) -> String {
    let mut text = reply.trim();

    if let Some(inner) = text.strip_prefix("```") {
        // drop an optional language tag on the fence line
        let inner = inner.split_once('\n').map(|(_, rest)| rest).unwrap_or(inner);
        text = inner.strip_suffix("```").unwrap_or(inner).trim();
    }

    for (open, close) in [('"', '"'), ('“', '”'), ('「', '」')] {
        if text.len() > 1 && text.starts_with(open) && text.ends_with(close) {
            let inner = &text[open.len_utf8()..text.len() - close.len_utf8()];
            if !inner.contains(open) && !inner.contains(close) {
                text = inner.trim();
            }
            break;
        }
    }

    text.to_string()
}
