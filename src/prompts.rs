//! Prompt templates for the three generation phases.
//!
//! Each phase pairs a system prompt constant with a user-prompt formatter.
//! Phases 1 and 2 instruct the model to wrap its answer in a known tag so
//! the pipeline can extract the payload from surrounding prose; phase 3
//! asks for bare Mermaid syntax, or the [`BAD_INSTRUCTIONS`] literal when
//! user-supplied instructions cannot be honored.

/// Literal the model emits when custom instructions are incoherent or
/// unsafe to honor. Checked after sanitization, never returned as a diagram.
pub const BAD_INSTRUCTIONS: &str = "BAD_INSTRUCTIONS";

/// System prompt for phase 1 (repository explanation).
pub const SYSTEM_EXPLAIN: &str = r#"You are a principal software engineer analyzing a repository in order to produce a system design document.

You will be given the repository's file tree and, when available, its README. From these, explain the project: its purpose, the major components and what each is responsible for, how the components relate to one another, and any architectural patterns you can infer (layers, pipelines, client/server splits, plugin systems).

Base your analysis only on the provided material. Do not invent components that have no corresponding files.

Wrap your full analysis in <explanation></explanation> tags."#;

/// System prompt for phase 2 (component-to-file mapping).
pub const SYSTEM_MAPPING: &str = r#"You are a principal software engineer relating a system design to its source layout.

You will be given an explanation of a project's architecture and the project's file tree. For every component named in the explanation, identify the file or directory in the tree that most directly implements it. Use exact relative paths from the tree; never invent paths.

Format each entry as:
component name: path/to/file_or_directory

Wrap the complete list in <component_mapping></component_mapping> tags."#;

/// System prompt for phase 3 (diagram generation), no custom instructions.
pub const SYSTEM_DIAGRAM: &str = r#"You are a principal software engineer producing a Mermaid.js architecture diagram.

You will be given an explanation of a project's architecture and a mapping of components to files. Produce a flowchart (graph TD) that shows the main components, grouped into subgraphs where the explanation implies layers or subsystems, with labeled arrows for the important data and control flows. For each component that maps to a file or directory, add a click event of the form:

click ComponentName "path/to/file_or_directory"

Respond with valid Mermaid.js syntax only: no commentary, no markdown code fences."#;

/// System prompt for phase 3 when custom instructions were supplied.
pub const SYSTEM_DIAGRAM_INSTRUCTED: &str = r#"You are a principal software engineer producing a Mermaid.js architecture diagram.

You will be given an explanation of a project's architecture, a mapping of components to files, and instructions from the user about how the diagram should be drawn. Follow the instructions as long as they concern the diagram's content, emphasis, or layout. Produce a flowchart (graph TD) with labeled arrows, subgraphs for layers or subsystems, and click events of the form:

click ComponentName "path/to/file_or_directory"

If the instructions are unrelated to diagram generation, contradictory, or impossible to honor, respond with exactly BAD_INSTRUCTIONS and nothing else.

Otherwise respond with valid Mermaid.js syntax only: no commentary, no markdown code fences."#;

/// Select the phase-3 system prompt by presence of user instructions.
pub fn diagram_system_prompt(has_instructions: bool) -> &'static str {
    if has_instructions {
        SYSTEM_DIAGRAM_INSTRUCTED
    } else {
        SYSTEM_DIAGRAM
    }
}

/// Render the phase-1 user prompt from the file tree and optional README.
pub fn format_explain_prompt(file_tree: &str, readme: &str) -> String {
    let readme_section = if readme.is_empty() {
        "No README was found in this repository.".to_string()
    } else {
        format!("<readme>\n{readme}\n</readme>")
    };

    format!(
        "Analyze this repository.\n\n<file_tree>\n{file_tree}\n</file_tree>\n\n{readme_section}"
    )
}

/// Render the phase-2 user prompt from the extracted explanation and tree.
pub fn format_mapping_prompt(explanation: &str, file_tree: &str) -> String {
    format!(
        "Map the components in this explanation to the file tree.\n\n<explanation>\n{explanation}\n</explanation>\n\n<file_tree>\n{file_tree}\n</file_tree>"
    )
}

/// Render the phase-3 user prompt from prior phase outputs and instructions.
pub fn format_diagram_prompt(explanation: &str, mapping: &str, instructions: &str) -> String {
    let mut prompt = format!(
        "Generate the diagram.\n\n<explanation>\n{explanation}\n</explanation>\n\n<component_mapping>\n{mapping}\n</component_mapping>"
    );

    if !instructions.is_empty() {
        prompt.push_str(&format!(
            "\n\n<instructions>\n{instructions}\n</instructions>"
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_prompt_includes_tree_and_readme() {
        let prompt = format_explain_prompt("src/\nsrc/main.rs", "# My Project");
        assert!(prompt.contains("src/main.rs"));
        assert!(prompt.contains("# My Project"));
        assert!(prompt.contains("<readme>"));
    }

    #[test]
    fn test_explain_prompt_without_readme() {
        let prompt = format_explain_prompt("src/", "");
        assert!(prompt.contains("No README was found"));
        assert!(!prompt.contains("<readme>"));
    }

    #[test]
    fn test_mapping_prompt_includes_both_inputs() {
        let prompt = format_mapping_prompt("the scanner walks files", "src/scanner.rs");
        assert!(prompt.contains("the scanner walks files"));
        assert!(prompt.contains("src/scanner.rs"));
    }

    #[test]
    fn test_diagram_prompt_instructions_section_is_optional() {
        let without = format_diagram_prompt("expl", "map", "");
        assert!(!without.contains("<instructions>"));

        let with = format_diagram_prompt("expl", "map", "focus on the API layer");
        assert!(with.contains("<instructions>"));
        assert!(with.contains("focus on the API layer"));
    }

    #[test]
    fn test_diagram_system_prompt_selection() {
        assert_eq!(diagram_system_prompt(false), SYSTEM_DIAGRAM);
        assert_eq!(diagram_system_prompt(true), SYSTEM_DIAGRAM_INSTRUCTED);
        assert!(SYSTEM_DIAGRAM_INSTRUCTED.contains(BAD_INSTRUCTIONS));
    }
}
