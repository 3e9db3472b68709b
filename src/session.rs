//! Editing session: the project folder and its open documents

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::error::{EditorError, Result};

/// Upper bound on candidates tried when naming a new file
const MAX_NAME_ATTEMPTS: u32 = 9999;

const UNTITLED_STEM: &str = "untitled";

#[derive(Debug)]
pub struct Session {
    root: PathBuf,
    /// Suffix for the next generated file name
    untitled_counter: u32,
    documents: Vec<Document>,
}

impl Session {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            untitled_counter: 1,
            documents: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A path in the project folder that does not exist yet
    ///
    /// Names are `<stem><n><extension>` with `n` taken from the session
    /// counter, so successive calls never hand out the same name.
    pub fn next_new_file_path(&mut self, extension: &str, stem: Option<&str>) -> PathBuf {
        let stem = stem.filter(|stem| !stem.is_empty()).unwrap_or(UNTITLED_STEM);
        let extension = normalize_extension(extension);

        let mut attempts = 0;
        loop {
            let candidate = self.root.join(format!("{stem}{}{extension}", self.untitled_counter));
            self.untitled_counter += 1;
            attempts += 1;
            if !candidate.exists() || attempts >= MAX_NAME_ATTEMPTS {
                return candidate;
            }
        }
    }

    /// A fresh sibling name for a copy of `path`
    pub fn duplicate_path(&mut self, path: &Path) -> PathBuf {
        let stem = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.next_new_file_path(&extension, stem.as_deref())
    }

    /// Create an empty document with a generated name
    pub fn new_document(&mut self, extension: &str) -> Result<usize> {
        let path = self.next_new_file_path(extension, None);
        debug!(path = %path.display(), "new document");
        self.documents.push(Document::untitled(path)?);
        Ok(self.documents.len() - 1)
    }

    /// Open a file, or return the index of the document already showing it
    pub fn open(&mut self, path: &Path) -> Result<usize> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let canonical = fs::canonicalize(&path).map_err(|_| EditorError::FileNotFound(path.display().to_string()))?;

        let existing = self
            .documents
            .iter()
            .position(|document| document.path().and_then(|p| fs::canonicalize(p).ok()).as_ref() == Some(&canonical));
        if let Some(index) = existing {
            return Ok(index);
        }

        self.documents.push(Document::open(&canonical)?);
        Ok(self.documents.len() - 1)
    }

    /// Close a document and hand it back
    pub fn close(&mut self, index: usize) -> Result<Document> {
        if index >= self.documents.len() {
            return Err(EditorError::NoSuchDocument(index));
        }
        Ok(self.documents.remove(index))
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn document_mut(&mut self, index: usize) -> Option<&mut Document> {
        self.documents.get_mut(index)
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

/// Lowercase extension with a leading dot, or empty
fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim().trim_start_matches('.').to_lowercase();
    if extension.is_empty() {
        extension
    } else {
        format!(".{extension}")
    }
}
