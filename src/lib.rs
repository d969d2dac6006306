//! Limn - Generate Mermaid architecture diagrams from local repositories.
//!
//! Limn scans a repository's file tree, locates its README, and drives a
//! three-phase LLM pipeline that explains the project, maps components to
//! files, and renders a Mermaid.js architecture diagram.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use limn::api::OpenAiClient;
//! use limn::generator::Generator;
//! use limn::scanner::{find_readme, scan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new("./my-project");
//! let file_tree = scan(root)?;
//! let readme = find_readme(root).unwrap_or_default();
//!
//! let client = Arc::new(OpenAiClient::new("sk-..."));
//! let generator = Generator::new(client, "gpt-4o-mini", false);
//! let result = generator.generate(&file_tree, &readme, "").await?;
//!
//! println!("{}", result.diagram);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`exclude`] - Static exclusion rules for scans
//! - [`scanner`] - File-tree listings and README discovery
//! - [`prompts`] - Per-phase prompt templates
//! - [`api`] - Chat-completion client
//! - [`generator`] - Three-phase generation pipeline
//! - [`output`] - Diagram post-processing

pub mod api;
pub mod errors;
pub mod exclude;
pub mod generator;
pub mod output;
pub mod prompts;
pub mod scanner;

// Re-export key types at crate root for convenience
pub use api::{ApiError, ChatClient, ChatMessage, OpenAiClient};
pub use errors::LimnError;
pub use generator::{GenerateError, GenerationResult, Generator};
pub use scanner::ScanError;
