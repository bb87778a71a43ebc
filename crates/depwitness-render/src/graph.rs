use crate::RenderableConfiguration;

const INDENT: &str = "    ";

/// Render the configuration graph, one block per configuration, in the given order.
pub fn render_graph_report(configurations: &[RenderableConfiguration]) -> String {
    let mut out = String::new();

    for c in configurations {
        out.push_str(&format!("{}:\n", c.name));
        out.push_str(&format!("{INDENT}superconfigurations:\n"));
        for name in &c.superconfigurations {
            out.push_str(&format!("{INDENT}{INDENT}{name}\n"));
        }
        out.push_str(&format!("{INDENT}dependencies:\n"));
        for dep in &c.dependencies {
            out.push_str(&format!("{INDENT}{INDENT}{dep}\n"));
        }
    }

    out
}
