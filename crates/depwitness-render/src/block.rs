/// Render assertions as a paste-ready `dependencyVerification` block.
pub fn render_assertion_block(assertions: &[String]) -> String {
    let mut out = String::new();
    out.push_str("dependencyVerification {\n");
    out.push_str("    verify = [\n");
    for a in assertions {
        out.push_str(&format!("        '{a}',\n"));
    }
    out.push_str("    ]\n");
    out.push_str("}\n");
    out
}
