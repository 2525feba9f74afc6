use crate::document::{starts_with_heading, DocumentState};
use crate::error::{HashpadError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File format chosen for an export, from the shape of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn detect(content: &str) -> Self {
        if starts_with_heading(content) {
            ExportFormat::Markdown
        } else {
            ExportFormat::Text
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
        }
    }
}

/// A document ready to be written somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedFile {
    pub filename: String,
    pub format: ExportFormat,
    pub contents: String,
}

impl ExportedFile {
    /// Write into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.is_dir() {
            return Err(HashpadError::Export(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// Package the current document as a file. Style is not exported.
pub fn run(state: &DocumentState, title: &str) -> ExportedFile {
    let format = ExportFormat::detect(&state.content);
    let mut stem = sanitize_filename(title);
    if stem.is_empty() {
        stem = "hashpad".to_string();
    }
    ExportedFile {
        filename: format!("{}.{}", stem, format.extension()),
        format,
        contents: state.content.clone(),
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_filename("Hello World"), "Hello World");
        assert_eq!(sanitize_filename("a/b:c"), "a_b_c");
        assert_eq!(sanitize_filename("  padded  "), "padded");
        assert_eq!(sanitize_filename("notes…"), "notes_");
    }

    #[test]
    fn test_heading_content_exports_markdown() {
        let state = DocumentState::new("# Groceries\n- milk\n", "color:red");
        let file = run(&state, "Groceries");
        assert_eq!(file.filename, "Groceries.md");
        assert_eq!(file.format, ExportFormat::Markdown);
        assert_eq!(file.contents, "# Groceries\n- milk\n");
    }

    #[test]
    fn test_plain_content_exports_text() {
        let state = DocumentState::new("just words", "");
        let file = run(&state, "Untitled");
        assert_eq!(file.filename, "Untitled.txt");
        assert_eq!(file.format, ExportFormat::Text);
    }

    #[test]
    fn test_empty_title_gets_fallback_name() {
        let file = run(&DocumentState::blank(), "");
        assert_eq!(file.filename, "hashpad.txt");
        assert_eq!(file.contents, "");
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempdir().unwrap();
        let file = run(&DocumentState::new("# Out\nbody", ""), "Out");
        let path = file.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("Out.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Out\nbody");
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let file = run(&DocumentState::new("x", ""), "x");
        let err = file.write_to(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, HashpadError::Export(_)));
    }
}
