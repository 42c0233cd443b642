pub mod stateless_llm_interface;
pub mod openai_compatible_llm;
pub mod claude_llm;
pub mod stateless_llm_factory;

pub use stateless_llm_interface::*;
pub use stateless_llm_factory::*;

/// Turn a non-2xx response into an error carrying the status and body
pub(crate) async fn ensure_success(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("LLM API returned {}: {}", status, body.trim())
}
