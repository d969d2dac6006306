//! Post-processing of generated diagram text.
//!
//! Pure string transforms applied after the pipeline: optional removal of
//! `click` directives and wrapping in a minimal self-contained HTML viewer.

/// Remove Mermaid `click` directives from a diagram.
pub fn remove_click_events(diagram: &str) -> String {
    diagram
        .lines()
        .filter(|line| !line.trim_start().starts_with("click "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a diagram in a minimal HTML page that renders it with Mermaid.js.
pub fn to_html(diagram: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Architecture Diagram</title>
</head>
<body>
  <pre class="mermaid">
{diagram}
  </pre>
  <script type="module">
    import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
    mermaid.initialize({{ startOnLoad: true }});
  </script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_click_events_drops_only_click_lines() {
        let diagram = "graph TD;\nA-->B\nclick A \"src/a.rs\"\n  click B \"src/b.rs\"\nB-->C";
        let cleaned = remove_click_events(diagram);
        assert_eq!(cleaned, "graph TD;\nA-->B\nB-->C");
    }

    #[test]
    fn test_remove_click_events_keeps_click_in_labels() {
        let diagram = "A[\"Handles click events\"]-->B";
        assert_eq!(remove_click_events(diagram), diagram);
    }

    #[test]
    fn test_to_html_embeds_diagram() {
        let html = to_html("graph TD;\nA-->B");
        assert!(html.contains("graph TD;\nA-->B"));
        assert!(html.contains("class=\"mermaid\""));
        assert!(html.contains("mermaid.initialize"));
    }
}
