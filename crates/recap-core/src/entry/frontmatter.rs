use serde::Deserialize;

/// Typed view of the YAML frontmatter fields recap reads.
///
/// Vault notes carry arbitrary frontmatter; only the fields below matter
/// here and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryFrontmatter {
    /// Note title (optional)
    pub title: Option<String>,
    /// Note date, kept as the raw scalar and parsed later
    pub date: Option<String>,
    /// Tags listed in frontmatter (optional)
    #[serde(default)]
    pub tags: Vec<String>,
}
