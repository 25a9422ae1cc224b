// src/scanner.rs

use memchr::memchr_iter;
use std::{
    collections::BTreeSet,
    fs,
    path::{
        Path,
        PathBuf
    },
};
use walkdir::WalkDir;
use crate::error::{
    walk_io_error,
    ScanError,
    ScanResult
};

const INCLUDE_TOKEN: &str = "#include";

/// Includes that mean the build needs `-pthread` / `-ldl` style link flags.
pub const THREADING_HEADERS: &[&str] = &[
    "condition_variable", "future", "mutex", "new", "pthread.h", "thread", "dlfcn.h",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Header,
    C,
    Cpp,
}

impl SourceKind {
    pub fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "h" | "hpp" | "hh" | "h++" => Some(SourceKind::Header),
            "c" => Some(SourceKind::C),
            "cpp" | "cc" | "cxx" | "c++" => Some(SourceKind::Cpp),
            _ => None,
        }
    }
}

/// Deduplicated, lexicographically sorted short include names.
pub type ShortIncludeSet = BTreeSet<String>;

/// Every C/C++ file under a project root, read into one corpus.
#[derive(Debug, Default)]
pub struct ProjectSources {
    root: PathBuf,
    headers: Vec<PathBuf>,
    c_sources: Vec<PathBuf>,
    cpp_sources: Vec<PathBuf>,
    corpus: Vec<u8>,
}

/// Walk `root`, read every header and C/C++ source, and extract the short includes.
/// Any walk or read failure aborts the scan.
pub fn scan_project(root: &Path) -> ScanResult<(ProjectSources, ShortIncludeSet)> {
    let sources = ProjectSources::collect(root)?;
    let includes = sources.short_includes();
    Ok((sources, includes))
}

impl ProjectSources {
    pub fn collect(root: &Path) -> ScanResult<Self> {
        let mut src = ProjectSources {
            root: root.to_path_buf(),
            ..Default::default()
        };

        for dent in WalkDir::new(root).sort_by_file_name() {
            let dent = dent.map_err(|err| ScanError::Walk {
                root: root.to_path_buf(),
                source: walk_io_error(err),
            })?;
            if dent.file_type().is_dir() {
                continue;
            }
            let path = dent.path();
            let Some(kind) = SourceKind::of(path) else {
                continue;
            };
            log::debug!("added: {:?}", path);
            let bucket = match kind {
                SourceKind::Header => &mut src.headers,
                SourceKind::C => &mut src.c_sources,
                SourceKind::Cpp => &mut src.cpp_sources,
            };
            bucket.push(path.to_path_buf());
        }

        src.read_all()?;
        Ok(src)
    }

    fn read_all(&mut self) -> ScanResult<()> {
        let files = self.all_files();
        let total = files.len();
        let mut corpus = Vec::new();
        for (i, path) in files.iter().enumerate() {
            log::debug!("{}", progress_line(i + 1, total, path));
            let data = fs::read(path).map_err(|source| ScanError::Read {
                path: path.clone(),
                source,
            })?;
            corpus.push(b'\n');
            corpus.extend_from_slice(&data);
        }
        self.corpus = corpus;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn headers(&self) -> &[PathBuf] {
        &self.headers
    }

    pub fn c_sources(&self) -> &[PathBuf] {
        &self.c_sources
    }

    pub fn cpp_sources(&self) -> &[PathBuf] {
        &self.cpp_sources
    }

    /// Headers first, then C, then C++; the corpus is concatenated in this order.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.headers
            .iter()
            .chain(&self.c_sources)
            .chain(&self.cpp_sources)
            .cloned()
            .collect()
    }

    pub fn corpus(&self) -> &[u8] {
        &self.corpus
    }

    pub fn include_lines(&self) -> Vec<String> {
        include_lines(&self.corpus)
    }

    pub fn short_includes(&self) -> ShortIncludeSet {
        short_includes(&self.corpus)
    }
}

/* ----------------------------- extraction ----------------------------- */

/// Trimmed lines starting with `#include`, in corpus order.
pub fn include_lines(corpus: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let ends = memchr_iter(b'\n', corpus).chain(std::iter::once(corpus.len()));
    for end in ends {
        let line = String::from_utf8_lossy(&corpus[start..end]);
        let trimmed = line.trim();
        if trimmed.starts_with(INCLUDE_TOKEN) {
            out.push(trimmed.to_string());
        }
        start = (end + 1).min(corpus.len());
    }
    out
}

/// `[2/3, 67.00%] Reading path...`: the percentage is rounded first, then shown with two decimals.
fn progress_line(n: usize, total: usize, path: &Path) -> String {
    let pct = (n as f64 * 100.0 / total as f64).round();
    format!("[{n}/{total}, {pct:.2}%] Reading {}...", path.display())
}

/// `#include <vector>` -> `vector`, `#include "a/b.h"` -> `a/b.h`.
pub fn short_include_name(line: &str) -> &str {
    let s = line.trim();
    let s = s.strip_prefix(INCLUDE_TOKEN).unwrap_or(s).trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_prefix('<').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.strip_suffix('>').unwrap_or(s)
}

pub fn short_includes(corpus: &[u8]) -> ShortIncludeSet {
    include_lines(corpus)
        .iter()
        .map(|l| short_include_name(l).to_string())
        .collect()
}

/// True when any include pulls in threads or dynamic loading.
pub fn detects_threading_headers(includes: &ShortIncludeSet) -> bool {
    THREADING_HEADERS.iter().any(|h| includes.contains(*h))
}
