use std::sync::Arc;
use std::time::Instant;

use crate::chatbot::ChatbotService;
use crate::config::Config;
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::translation::TranslationService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn StatelessLLMInterface>,
    pub translation: Arc<TranslationService>,
    pub chatbot: Arc<ChatbotService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm)?;
        Ok(Self::with_llm(config, llm))
    }

    /// Build state around an already constructed model backend
    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        let translation = Arc::new(TranslationService::new(llm.clone(), config.translation.clone()));
        let chatbot = Arc::new(ChatbotService::new(llm.clone(), config.chatbot.clone()));

        Self {
            config: Arc::new(config),
            llm,
            translation,
            chatbot,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
