//! Three-phase diagram generation pipeline.
//!
//! Phase 1 explains the repository from its file tree and README, phase 2
//! maps the explained components to files, phase 3 renders a Mermaid
//! diagram from both. Phases are strictly sequential: each phase's prompt
//! embeds the *extracted* payload of the previous phase, so phase N+1 never
//! starts before phase N's extraction has completed.

use std::sync::Arc;

use regex::Regex;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiError, ChatClient, ChatMessage};
use crate::prompts;

/// Errors from a pipeline invocation.
///
/// There is no partial-success mode: either all three phases complete and a
/// diagram is produced, or the invocation fails as a whole.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A phase's API round-trip failed. No retry is attempted.
    #[error("phase {phase} failed: {source}")]
    Phase {
        phase: u8,
        #[source]
        source: ApiError,
    },

    /// Phase 3 reported that the user-supplied instructions could not be
    /// honored. A user-correctable input problem, not a system fault.
    #[error("the provided instructions were invalid or unclear")]
    InvalidInstructions,
}

/// Extracted payloads of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub diagram: String,
    pub explanation: String,
    pub mapping: String,
}

/// Orchestrates the three generation phases against a chat client.
pub struct Generator {
    client: Arc<dyn ChatClient>,
    model: String,
    verbose: bool,
}

impl Generator {
    /// Creates a generator for the given client and model.
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>, verbose: bool) -> Self {
        Self {
            client,
            model: model.into(),
            verbose,
        }
    }

    fn progress(&self, message: &str) {
        if self.verbose {
            eprintln!("  {message}");
        }
    }

    async fn phase(
        &self,
        phase: u8,
        system: &str,
        user: String,
    ) -> Result<String, GenerateError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.client
            .complete(&self.model, &messages)
            .await
            .map_err(|source| GenerateError::Phase { phase, source })
    }

    /// Run the full pipeline and return the extracted results.
    ///
    /// # Errors
    ///
    /// Fails with the originating phase number on any transport error, or
    /// with [`GenerateError::InvalidInstructions`] when phase 3 rejects the
    /// supplied instructions.
    pub async fn generate(
        &self,
        file_tree: &str,
        readme: &str,
        instructions: &str,
    ) -> Result<GenerationResult, GenerateError> {
        self.progress("Phase 1/3: Analyzing repository structure...");
        let raw = self
            .phase(
                1,
                prompts::SYSTEM_EXPLAIN,
                prompts::format_explain_prompt(file_tree, readme),
            )
            .await?;
        let explanation = extract_tag(&raw, "explanation");

        self.progress("Phase 2/3: Mapping components to files...");
        let raw = self
            .phase(
                2,
                prompts::SYSTEM_MAPPING,
                prompts::format_mapping_prompt(&explanation, file_tree),
            )
            .await?;
        let mapping = extract_tag(&raw, "component_mapping");

        self.progress("Phase 3/3: Generating Mermaid diagram...");
        let raw = self
            .phase(
                3,
                prompts::diagram_system_prompt(!instructions.is_empty()),
                prompts::format_diagram_prompt(&explanation, &mapping, instructions),
            )
            .await?;
        let diagram = clean_output(&raw);

        if diagram == prompts::BAD_INSTRUCTIONS {
            return Err(GenerateError::InvalidInstructions);
        }

        Ok(GenerationResult {
            diagram,
            explanation,
            mapping,
        })
    }

    async fn stream_phase(
        &self,
        phase: u8,
        system: &str,
        user: String,
        chunks: UnboundedSender<String>,
    ) -> Result<String, GenerateError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.client
            .complete_streaming(&self.model, &messages, chunks)
            .await
            .map_err(|source| GenerateError::Phase { phase, source })
    }

    /// Run the full pipeline, streaming each phase's response on `chunks`
    /// as it is produced.
    ///
    /// Chunks arrive in model order within a phase and phases never
    /// interleave; extraction and sanitization apply to the concatenated
    /// per-phase payload exactly as in [`Generator::generate`].
    ///
    /// # Errors
    ///
    /// Same failure semantics as [`Generator::generate`].
    pub async fn generate_streaming(
        &self,
        file_tree: &str,
        readme: &str,
        instructions: &str,
        chunks: UnboundedSender<String>,
    ) -> Result<GenerationResult, GenerateError> {
        self.progress("Phase 1/3: Analyzing repository structure...");
        let raw = self
            .stream_phase(
                1,
                prompts::SYSTEM_EXPLAIN,
                prompts::format_explain_prompt(file_tree, readme),
                chunks.clone(),
            )
            .await?;
        let explanation = extract_tag(&raw, "explanation");

        self.progress("Phase 2/3: Mapping components to files...");
        let raw = self
            .stream_phase(
                2,
                prompts::SYSTEM_MAPPING,
                prompts::format_mapping_prompt(&explanation, file_tree),
                chunks.clone(),
            )
            .await?;
        let mapping = extract_tag(&raw, "component_mapping");

        self.progress("Phase 3/3: Generating Mermaid diagram...");
        let raw = self
            .stream_phase(
                3,
                prompts::diagram_system_prompt(!instructions.is_empty()),
                prompts::format_diagram_prompt(&explanation, &mapping, instructions),
                chunks,
            )
            .await?;
        let diagram = clean_output(&raw);

        if diagram == prompts::BAD_INSTRUCTIONS {
            return Err(GenerateError::InvalidInstructions);
        }

        Ok(GenerationResult {
            diagram,
            explanation,
            mapping,
        })
    }
}

/// Extract the first `<tag>...</tag>` payload from a model response.
///
/// First occurrence wins; the match is non-greedy and spans newlines. An
/// untagged response is treated as already being the payload and returned
/// trimmed.
pub fn extract_tag(text: &str, tag: &str) -> String {
    let pattern = format!(r"(?s)<{tag}>(.*?)</{tag}>");
    // tag is always a known identifier, so the pattern compiles
    if let Ok(re) = Regex::new(&pattern) {
        if let Some(captures) = re.captures(text) {
            if let Some(inner) = captures.get(1) {
                return inner.as_str().trim().to_string();
            }
        }
    }
    text.trim().to_string()
}

/// Strip incidental code-fence wrapping from a diagram payload.
///
/// Removes at most one leading fence (with an optional `mermaid` tag) and
/// one trailing fence, trimming surrounding whitespace on both sides.
/// Only the literal `mermaid` tag is consumed: anything else after the
/// fence is diagram content and must survive.
pub fn clean_output(text: &str) -> String {
    let mut content = text.trim();

    if let Some(rest) = content.strip_prefix("```mermaid") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }

    content.trim().to_string()
}
