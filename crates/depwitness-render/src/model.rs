#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableConfiguration {
    /// `project:configuration`.
    pub name: String,
    pub superconfigurations: Vec<String>,
    pub dependencies: Vec<String>,
}
