//! The summarize module asks the active LLM provider for a one-sentence summary of a page.

use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, ChatMessageBuilder, ChatProvider};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::Provider;
use crate::constants::{
    DEFAULT_PROMPT_TEMPLATE, GROQ_MODEL, HYPERBOLIC_BASE_URL, HYPERBOLIC_MODEL,
    SUMMARY_MARKER, SUMMARY_MAX_TOKENS, SUMMARY_TEMPERATURE, SUMMARY_TOP_P, THINK_STRIPPER,
};
use crate::error::{Error, Result};

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));

static SUMMARY_MARKER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(SUMMARY_MARKER).expect("Failed to compile SUMMARY_MARKER regex"));

/// Shared data for summarization during a run. The provider never changes within a run.
pub struct SummarizeContext<'a> {
    /// Which provider `model` talks to; recorded on every enrichment record
    pub provider: Provider,
    /// LLM model to use for summarization
    pub model: &'a dyn ChatProvider,
    /// Prompt template to use
    pub prompt_template: Option<&'a str>,
}

/// Builds the chat model for `provider`.
///
/// # Errors
///
/// Returns `Configuration` if the `llm` builder rejects the settings.
pub fn build_model(provider: Provider, api_key: &str) -> Result<Box<dyn LLMProvider>> {
    let builder = LLMBuilder::new()
        .api_key(api_key)
        .max_tokens(SUMMARY_MAX_TOKENS)
        .temperature(SUMMARY_TEMPERATURE)
        .top_p(SUMMARY_TOP_P);

    let builder = match provider {
        Provider::Hyperbolic => builder
            .backend(LLMBackend::OpenAI)
            .base_url(HYPERBOLIC_BASE_URL)
            .model(HYPERBOLIC_MODEL),
        Provider::Groq => builder.backend(LLMBackend::Groq).model(GROQ_MODEL),
    };

    builder
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build {provider} model: {e}")))
}

/// Summarises a single page by formatting its URL and content into the prompt.
///
/// # Arguments
///
/// * `url` - The URL of the page
/// * `text` - The extracted content of the page
/// * `ctx` - Context containing provider, model and prompt template
///
/// # Returns
///
/// Returns the summary: the text inside `<summary>` tags if present, otherwise the whole
/// response, with any `<think>` block removed.
///
/// # Errors
///
/// Returns `Provider` if the chat call fails or the response carries no text.
pub async fn summarize_page(url: &str, text: &str, ctx: &SummarizeContext<'_>) -> Result<String> {
    let prompt_template = ctx.prompt_template.unwrap_or(DEFAULT_PROMPT_TEMPLATE);
    let prompt = prompt_template
        .replace("{url}", url)
        .replace("{text}", text);

    let mut messages: Vec<ChatMessageBuilder> = vec![ChatMessage::user().content(prompt)];

    if !prompt_template.contains("{text}") {
        messages.push(ChatMessage::user().content(text));
    }

    let messages: Vec<ChatMessage> = messages
        .into_iter()
        .map(|message| message.build())
        .collect();

    let response = ctx
        .model
        .chat(&messages)
        .await
        .map_err(|err| Error::Provider(format!("{} error: {err}", ctx.provider)))?;

    let response = response
        .text()
        .ok_or_else(|| Error::Provider(format!("{} returned no text", ctx.provider)))?;

    extract_summary(&response)
        .ok_or_else(|| Error::Provider(format!("{} returned an empty summary", ctx.provider)))
}

/// Pulls the summary out of a raw model response, or `None` if nothing is left.
pub fn extract_summary(response: &str) -> Option<String> {
    let response = THINK_STRIPPER_REGEX.replace_all(response, "");
    let summary = SUMMARY_MARKER_REGEX
        .captures(&response)
        .and_then(|captures| captures.get(1))
        .map_or(response.as_ref(), |marked| marked.as_str())
        .trim();

    (!summary.is_empty()).then(|| summary.to_owned())
}
