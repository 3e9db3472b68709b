//! Full-text search across files
//!
//! [`search`] walks a folder (or a fixed list of files) and reports one
//! item per matching line. [`SearchWorker`] runs a search on its own
//! thread so the caller can keep editing; only one search may be in
//! flight at a time.

use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use regex::{Regex, RegexBuilder};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthChar;

use crate::error::{EditorError, Result};

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &[".git", ".svn", ".hg", ".bzr", "__pycache__", "build", "dist"];

/// Bytes inspected when deciding whether a file is binary
const BINARY_SNIFF_LEN: usize = 1024;

/// Display columns kept from a matching line
const SNIPPET_WIDTH: usize = 50;

pub const DEFAULT_MAX_RESULTS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub ignore_case: bool,
    /// Treat the pattern as a regular expression instead of plain text
    pub regex: bool,
    /// Also search files and folders whose name starts with `.`
    pub include_hidden: bool,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ignore_case: false,
            regex: false,
            include_hidden: false,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Where to search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Every file under a folder, recursively
    Folder(PathBuf),
    /// Only these files
    Files(Vec<PathBuf>),
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub pattern: String,
    pub scope: SearchScope,
    pub options: SearchOptions,
}

/// One matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Byte offset just past the match within the line
    pub end: usize,
    pub snippet: String,
}

impl SearchItem {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
    }
}

impl fmt::Display for SearchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{} - {} ...", self.name(), self.line, self.end, self.snippet)
    }
}

/// Plain text patterns are escaped so both modes share one matcher
fn build_matcher(pattern: &str, options: &SearchOptions) -> Result<Regex> {
    let source = if options.regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };
    Ok(RegexBuilder::new(&source).case_insensitive(options.ignore_case).build()?)
}

/// Run a search to completion on the calling thread
pub fn search(request: &SearchRequest) -> Result<Vec<SearchItem>> {
    let options = &request.options;
    if request.pattern.is_empty() {
        return Ok(Vec::new());
    }
    let matcher = build_matcher(&request.pattern, options)?;

    let files = match &request.scope {
        SearchScope::Folder(root) => collect_files(root, options.include_hidden)?,
        SearchScope::Files(files) => files.clone(),
    };
    debug!(pattern = %request.pattern, files = files.len(), "searching");

    let mut items = Vec::new();
    'files: for path in files {
        if is_binary_file(&path) {
            continue;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable file");
                continue;
            }
        };

        for (index, line) in text.lines().enumerate() {
            let Some(found) = matcher.find(line) else {
                continue;
            };
            // plain matches show the whole line, regex matches start at the match
            let shown = if options.regex { &line[found.start()..] } else { line };
            items.push(SearchItem {
                path: path.clone(),
                line: index + 1,
                end: found.end(),
                snippet: snippet(shown),
            });
            if items.len() >= options.max_results {
                break 'files;
            }
        }
    }

    info!(pattern = %request.pattern, matches = items.len(), "search finished");
    Ok(items)
}

/// Trimmed line cut to the snippet width
fn snippet(line: &str) -> String {
    let mut width = 0;
    line.trim()
        .chars()
        .take_while(|ch| {
            width += ch.width().unwrap_or(0);
            width <= SNIPPET_WIDTH
        })
        .collect()
}

/// Every searchable file under `root`, sorted by path
pub fn collect_files(root: &Path, include_hidden: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(EditorError::FileNotFound(root.display().to_string()));
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "skipping unreadable folder");
                continue;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !include_hidden && name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => {
                    if !EXCLUDED_DIRS.contains(&&*name) {
                        pending.push(path);
                    }
                }
                Ok(kind) if kind.is_file() => files.push(path),
                _ => {}
            }
        }
    }

    files.sort();
    Ok(files)
}

/// A file is binary if it has a NUL byte near the start
///
/// Files that cannot be opened count as binary.
pub fn is_binary_file(path: &Path) -> bool {
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    match File::open(path).and_then(|file| file.take(BINARY_SNIFF_LEN as u64).read_to_end(&mut head)) {
        Ok(_) => head.contains(&0),
        Err(_) => true,
    }
}

/// Runs searches on a background thread
#[derive(Debug, Default)]
pub struct SearchWorker {
    handle: Option<JoinHandle<()>>,
    results: Option<Receiver<Result<Vec<SearchItem>>>>,
}

impl SearchWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.results.is_some()
    }

    /// Start a search; fails if the previous one has not been collected
    pub fn start(&mut self, request: SearchRequest) -> Result<()> {
        if self.is_running() {
            return Err(EditorError::SearchInProgress);
        }

        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new().name("search".to_string()).spawn(move || {
            // the receiver may have been dropped with the worker
            let _ = sender.send(search(&request));
        })?;

        self.handle = Some(handle);
        self.results = Some(receiver);
        Ok(())
    }

    /// Collect the results if the search has finished
    pub fn try_finish(&mut self) -> Option<Result<Vec<SearchItem>>> {
        let result = match self.results.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(stopped()),
        };
        self.join();
        Some(result)
    }

    /// Block until the running search finishes
    pub fn wait(&mut self) -> Option<Result<Vec<SearchItem>>> {
        let result = self.results.as_ref()?.recv().unwrap_or_else(|_| Err(stopped()));
        self.join();
        Some(result)
    }

    fn join(&mut self) {
        self.results = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("search thread panicked");
            }
        }
    }
}

fn stopped() -> EditorError {
    EditorError::Message("search worker stopped unexpectedly".to_string())
}
