//! File-content dereferencing for file-reference fields.
//!
//! A field of the file-list kind with content extraction enabled resolves
//! to the referenced documents' *bodies* rather than their paths: the
//! front-matter block and a single leading top-level heading are stripped,
//! leading blank lines trimmed, and multiple documents joined with a
//! literal separator. Every failure mode is soft — an unreadable reference
//! becomes an inline bracketed marker, never an error.

use std::sync::Arc;

use scribe_core::FieldValue;

use crate::traits::VaultOps;

/// Separator between the bodies of multiple referenced documents.
pub const CONTENT_SEPARATOR: &str = "\n\n---\n\n";

/// Normalize a file reference: strip `[[wiki-link]]` brackets, drop a
/// `|display` alias, and trim whitespace.
pub fn clean_file_path(reference: &str) -> String {
    let mut path = reference.trim();
    path = path.strip_prefix("[[").unwrap_or(path);
    path = path.strip_suffix("]]").unwrap_or(path);
    if let Some((target, _alias)) = path.split_once('|') {
        path = target;
    }
    path.trim().to_string()
}

/// Append `.md` when the reference carries no extension.
pub fn with_default_extension(path: &str) -> String {
    if path.contains('.') {
        path.to_string()
    } else {
        format!("{path}.md")
    }
}

/// Split a document into its front-matter block and body.
///
/// Returns `(front_matter, body)` where the front matter is the raw YAML
/// between the `---` fences, without the fences themselves.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---\n").or_else(|| {
        (content == "---").then_some("")
    }) else {
        return (None, content);
    };

    for (offset, line_end) in fence_candidates(rest) {
        if rest[offset..line_end].trim_end_matches('\r') == "---" {
            let body_start = if line_end < rest.len() {
                line_end + 1
            } else {
                line_end
            };
            return (Some(&rest[..offset]), &rest[body_start..]);
        }
    }

    (None, content)
}

/// Byte ranges of each line in the text.
fn fence_candidates(text: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut start = 0;
    text.split_inclusive('\n').map(move |line| {
        let offset = start;
        start += line.len();
        let end = offset + line.trim_end_matches('\n').len();
        (offset, end)
    })
}

/// Strip front matter, a single leading `# ` heading, and leading blank
/// lines from a document.
pub fn strip_note_preamble(content: &str) -> String {
    let (_, mut body) = split_front_matter(content);

    if body.starts_with("# ") {
        body = body.split_once('\n').map_or("", |(_, rest)| rest);
    }

    body.trim_start_matches('\n').to_string()
}

/// Read one referenced document's body, soft-failing to a marker string.
pub async fn read_note_body(vault: &Arc<dyn VaultOps>, reference: &str) -> String {
    let path = with_default_extension(&clean_file_path(reference));
    let Some(resolved) = vault.resolve_path(&path) else {
        return format!("[file not found: {path}]");
    };
    if !vault.exists(&resolved) {
        return format!("[file not found: {resolved}]");
    }
    match vault.read(&resolved).await {
        Ok(content) => strip_note_preamble(&content),
        Err(_) => format!("[failed to read file: {resolved}]"),
    }
}

/// Dereference a file-reference value to document contents.
///
/// A single path yields one body; a list yields every body joined with
/// [`CONTENT_SEPARATOR`].
pub async fn extract_contents(vault: &Arc<dyn VaultOps>, value: &FieldValue) -> String {
    match value {
        FieldValue::Text(path) => read_note_body(vault, path).await,
        FieldValue::List(paths) => {
            let mut bodies = Vec::with_capacity(paths.len());
            for path in paths {
                bodies.push(read_note_body(vault, path).await);
            }
            bodies.join(CONTENT_SEPARATOR)
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;

    use async_trait::async_trait;

    use super::*;

    struct MockVault {
        files: HashMap<String, String>,
    }

    impl MockVault {
        fn new() -> Self {
            Self {
                files: HashMap::new(),
            }
        }

        fn with_file(mut self, path: &str, content: &str) -> Self {
            let _ = self.files.insert(path.to_string(), content.to_string());
            self
        }
    }

    #[async_trait]
    impl VaultOps for MockVault {
        fn exists(&self, path: &str) -> bool {
            self.files.contains_key(path)
        }

        async fn read(&self, path: &str) -> Result<String, io::Error> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }

        async fn write(&self, _path: &str, _content: &str) -> Result<(), io::Error> {
            Ok(())
        }

        async fn create_dir_all(&self, _path: &str) -> Result<(), io::Error> {
            Ok(())
        }

        fn resolve_path(&self, reference: &str) -> Option<String> {
            (!reference.contains("..")).then(|| reference.to_string())
        }
    }

    fn vault(mock: MockVault) -> Arc<dyn VaultOps> {
        Arc::new(mock)
    }

    // ── clean_file_path / with_default_extension ────────────────────

    #[test]
    fn cleans_wiki_link_syntax() {
        assert_eq!(clean_file_path("[[notes/alpha]]"), "notes/alpha");
        assert_eq!(clean_file_path("[[alpha|Alpha Note]]"), "alpha");
        assert_eq!(clean_file_path("  plain.md  "), "plain.md");
    }

    #[test]
    fn appends_md_when_no_extension() {
        assert_eq!(with_default_extension("alpha"), "alpha.md");
        assert_eq!(with_default_extension("alpha.md"), "alpha.md");
        assert_eq!(with_default_extension("dir.v2/alpha"), "dir.v2/alpha");
    }

    // ── split_front_matter / strip_note_preamble ────────────────────

    #[test]
    fn splits_front_matter_block() {
        let content = "---\ntitle: A\ntags: [x]\n---\nBody here\n";
        let (fm, body) = split_front_matter(content);
        assert_eq!(fm, Some("title: A\ntags: [x]\n"));
        assert_eq!(body, "Body here\n");
    }

    #[test]
    fn no_front_matter_returns_whole_body() {
        let content = "Just a body\n";
        let (fm, body) = split_front_matter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn unterminated_front_matter_is_left_alone() {
        let content = "---\ntitle: A\nno closing fence";
        let (fm, body) = split_front_matter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn strips_front_matter_title_and_blank_lines() {
        let content = "---\ntitle: A\n---\n# Title\n\n\nP1\n";
        assert_eq!(strip_note_preamble(content), "P1\n");
    }

    #[test]
    fn strips_only_first_top_level_heading() {
        let content = "# Title\nIntro\n# Second\n";
        assert_eq!(strip_note_preamble(content), "Intro\n# Second\n");
    }

    #[test]
    fn deeper_headings_are_kept() {
        let content = "## Section\nBody\n";
        assert_eq!(strip_note_preamble(content), "## Section\nBody\n");
    }

    // ── read_note_body / extract_contents ───────────────────────────

    #[tokio::test]
    async fn reads_and_strips_single_note() {
        let vault = vault(MockVault::new().with_file("alpha.md", "---\nk: v\n---\n# Alpha\n\nP1"));
        let body = read_note_body(&vault, "[[alpha]]").await;
        assert_eq!(body, "P1");
    }

    #[tokio::test]
    async fn missing_note_yields_marker() {
        let vault = vault(MockVault::new());
        let body = read_note_body(&vault, "ghost").await;
        assert_eq!(body, "[file not found: ghost.md]");
    }

    #[tokio::test]
    async fn escaping_reference_yields_marker() {
        let vault = vault(MockVault::new());
        let body = read_note_body(&vault, "../outside").await;
        assert_eq!(body, "[file not found: ../outside.md]");
    }

    #[tokio::test]
    async fn list_joins_with_separator() {
        let vault = vault(
            MockVault::new()
                .with_file("a.md", "---\nk: v\n---\n# A\nP1")
                .with_file("b.md", "---\nk: v\n---\n# B\nP2"),
        );
        let value = FieldValue::List(vec!["a".into(), "b".into()]);
        let joined = extract_contents(&vault, &value).await;
        assert_eq!(joined, "P1\n\n---\n\nP2");
    }

    #[tokio::test]
    async fn non_path_value_extracts_to_empty() {
        let vault = vault(MockVault::new());
        assert_eq!(extract_contents(&vault, &FieldValue::Bool(true)).await, "");
    }
}
