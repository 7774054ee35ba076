//! File gateway - disk I/O and file dialogs behind a trait
//!
//! Content crossing this boundary is normalized: CRLF becomes LF on read,
//! and LF becomes CRLF on write when `crlf_on_save` is set. A dismissed
//! dialog is `Ok(None)`, never an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{EditorError, Result};
use crate::line;

/// A file loaded through the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    pub path: PathBuf,
    /// LF-normalized text
    pub content: String,
}

/// Named group of extensions for file dialogs; `*` matches anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }

    /// Extensions offered when opening files
    pub fn script_files() -> Self {
        Self::new(
            "Script Files",
            &["cs", "js", "ts", "py", "cpp", "c", "h", "java", "lua", "rb", "go", "rs"],
        )
    }

    /// First concrete extension, if any
    fn default_extension(&self) -> Option<&str> {
        self.extensions.iter().map(String::as_str).find(|e| *e != "*")
    }

    /// Short description, e.g. "Script Files (*.cs, *.js)"
    pub fn describe(&self) -> String {
        let patterns: Vec<String> = self.extensions.iter().map(|e| format!("*.{}", e)).collect();
        format!("{} ({})", self.name, patterns.join(", "))
    }
}

/// Disk and dialog collaborator used by the file commands
pub trait FileGateway {
    /// Open `hint` directly, or ask the user for a path when there is none
    fn open(&mut self, hint: Option<&Path>) -> Result<Option<OpenedFile>>;

    /// Read and normalize a file
    fn read(&self, path: &Path) -> Result<String>;

    /// Write content, converting line endings per configuration
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Ask where to save a new file
    fn prompt_save_path(&mut self, default_name: &str, filters: &[FileFilter]) -> Result<Option<PathBuf>>;
}

/// Interactive input used for dialogs and confirmations
pub trait Prompter {
    /// Read a line of input; None if the user cancelled
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Yes/no question
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Gateway over the local filesystem
pub struct DiskGateway<P: Prompter> {
    prompter: P,
    crlf_on_save: bool,
}

impl<P: Prompter> DiskGateway<P> {
    pub fn new(prompter: P, crlf_on_save: bool) -> Self {
        Self { prompter, crlf_on_save }
    }
}

impl<P: Prompter> FileGateway for DiskGateway<P> {
    fn open(&mut self, hint: Option<&Path>) -> Result<Option<OpenedFile>> {
        let path = match hint {
            Some(path) => path.to_path_buf(),
            None => {
                let prompt = format!("Open file [{}]", FileFilter::script_files().describe());
                match self.prompter.ask(&prompt, None)? {
                    Some(input) if !input.trim().is_empty() => PathBuf::from(input.trim()),
                    _ => return Ok(None),
                }
            }
        };
        let path = absolute(&path);
        let content = self.read(&path)?;
        Ok(Some(OpenedFile { path, content }))
    }

    fn read(&self, path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "read failed");
            EditorError::from_io(path, e)
        })?;
        info!(path = %path.display(), bytes = raw.len(), "file read");
        Ok(line::normalize_line_endings(&raw))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let data = if self.crlf_on_save {
            line::to_crlf(content)
        } else {
            content.to_string()
        };
        fs::write(path, &data).map_err(|e| {
            warn!(path = %path.display(), error = %e, "write failed");
            EditorError::from_io(path, e)
        })?;
        info!(path = %path.display(), bytes = data.len(), "file written");
        Ok(())
    }

    fn prompt_save_path(&mut self, default_name: &str, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        let hint = filters
            .iter()
            .map(FileFilter::describe)
            .collect::<Vec<_>>()
            .join(" | ");
        let prompt = if hint.is_empty() {
            "Save as".to_string()
        } else {
            format!("Save as [{}]", hint)
        };
        let Some(input) = self.prompter.ask(&prompt, Some(default_name))? else {
            return Ok(None);
        };
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        Ok(Some(absolute(&with_default_extension(PathBuf::from(input), filters))))
    }
}

/// Append the first filter's extension to a path that has none
pub fn with_default_extension(path: PathBuf, filters: &[FileFilter]) -> PathBuf {
    if path.extension().is_some() {
        return path;
    }
    match filters.first().and_then(FileFilter::default_extension) {
        Some(ext) => path.with_extension(ext),
        None => path,
    }
}

/// Resolve relative paths against the working directory
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Prompter replaying canned answers
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answers: VecDeque<Option<String>>,
        pub confirms: VecDeque<bool>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn answering(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, prompt: &str, _default: Option<&str>) -> Result<Option<String>> {
            self.asked.push(prompt.to_string());
            Ok(self.answers.pop_front().flatten())
        }

        fn confirm(&mut self, question: &str) -> Result<bool> {
            self.asked.push(question.to_string());
            Ok(self.confirms.pop_front().unwrap_or(false))
        }
    }

    #[test]
    fn test_read_normalizes_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Player.cs");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        let gateway = DiskGateway::new(ScriptedPrompter::default(), true);
        assert_eq!(gateway.read(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = DiskGateway::new(ScriptedPrompter::default(), true);
        let err = gateway.read(&dir.path().join("missing.cs")).unwrap_err();
        assert!(matches!(err, EditorError::NotFound(_)));
    }

    #[test]
    fn test_write_crlf_round_trip_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.py");
        fs::write(&path, "one\r\ntwo\nthree\r\n").unwrap();
        let gateway = DiskGateway::new(ScriptedPrompter::default(), true);

        let content = gateway.read(&path).unwrap();
        gateway.write(&path, &content).unwrap();
        let first = fs::read(&path).unwrap();

        let content = gateway.read(&path).unwrap();
        gateway.write(&path, &content).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"one\r\ntwo\r\nthree\r\n");
    }

    #[test]
    fn test_write_lf_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unix.sh");
        let gateway = DiskGateway::new(ScriptedPrompter::default(), false);
        gateway.write(&path, "a\nb\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a\nb\n");
    }

    #[test]
    fn test_write_failure_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = DiskGateway::new(ScriptedPrompter::default(), true);
        // Writing to a directory path fails
        let err = gateway.write(dir.path(), "x").unwrap_err();
        assert!(matches!(err, EditorError::Io { .. }));
    }

    #[test]
    fn test_open_with_hint_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo.py");
        fs::write(&path, "x = 1\r\n").unwrap();

        let mut gateway = DiskGateway::new(ScriptedPrompter::default(), true);
        let opened = gateway.open(Some(&path)).unwrap().unwrap();
        assert_eq!(opened.path, path);
        assert_eq!(opened.content, "x = 1\n");
        assert!(gateway.prompter.asked.is_empty());
    }

    #[test]
    fn test_open_prompt_cancelled() {
        let mut gateway = DiskGateway::new(ScriptedPrompter::answering(&[None]), true);
        assert_eq!(gateway.open(None).unwrap(), None);

        let mut gateway = DiskGateway::new(ScriptedPrompter::answering(&[Some("  ")]), true);
        assert_eq!(gateway.open(None).unwrap(), None);
    }

    #[test]
    fn test_open_prompted_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Enemy.cs");
        fs::write(&path, "class Enemy {}").unwrap();
        let answer = path.to_string_lossy().into_owned();

        let mut gateway = DiskGateway::new(ScriptedPrompter::answering(&[Some(answer.as_str())]), true);
        let opened = gateway.open(None).unwrap().unwrap();
        assert_eq!(opened.content, "class Enemy {}");
        assert!(gateway.prompter.asked[0].contains("Script Files"));
    }

    #[test]
    fn test_prompt_save_path_appends_extension() {
        let filters = [FileFilter::new("C# Files", &["cs"]), FileFilter::all_files()];
        let mut gateway = DiskGateway::new(ScriptedPrompter::answering(&[Some("/tmp/Player")]), true);
        let path = gateway.prompt_save_path("untitled", &filters).unwrap();
        assert_eq!(path, Some(PathBuf::from("/tmp/Player.cs")));
    }

    #[test]
    fn test_prompt_save_path_cancelled() {
        let mut gateway = DiskGateway::new(ScriptedPrompter::answering(&[None]), true);
        assert_eq!(gateway.prompt_save_path("untitled", &[]).unwrap(), None);
    }

    #[test]
    fn test_with_default_extension() {
        let all = [FileFilter::all_files()];
        assert_eq!(with_default_extension(PathBuf::from("/a/b"), &all), PathBuf::from("/a/b"));
        let cs = [FileFilter::new("C#", &["cs"])];
        assert_eq!(with_default_extension(PathBuf::from("/a/b.txt"), &cs), PathBuf::from("/a/b.txt"));
        assert_eq!(with_default_extension(PathBuf::from("/a/b"), &cs), PathBuf::from("/a/b.cs"));
    }

    #[test]
    fn test_filter_describe() {
        assert_eq!(FileFilter::new("C# Files", &["cs"]).describe(), "C# Files (*.cs)");
        assert_eq!(FileFilter::all_files().describe(), "All Files (*.*)");
    }
}
