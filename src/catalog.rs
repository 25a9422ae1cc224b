// src/catalog.rs
//! Header indexer: walks the system include roots once and records every file
//! that looks like a C/C++ header, either by extension or because its path
//! ends with a name from the common-include allow-list.

use std::{
    collections::HashSet,
    path::{
        Path,
        PathBuf
    }
};
use walkdir::WalkDir;
use crate::{
    config::SearchConfig,
    error::{
        walk_io_error,
        IndexError
    }
};

pub const HEADER_EXTENSIONS: &[&str] = &["h", "hpp", "hh", "h++"];

/// Ordered list of header paths found on the host. Immutable once built.
#[derive(Debug, Default)]
pub struct HeaderCatalog {
    roots: Vec<PathBuf>,
    entries: Vec<PathBuf>,
    lookup: HashSet<PathBuf>,
    skipped: Vec<IndexError>,
}

impl HeaderCatalog {
    /// System include roots this catalog was built from, in configured order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Entries in traversal order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lookup.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roots and entries that could not be walked.
    pub fn skipped(&self) -> &[IndexError] {
        &self.skipped
    }

    /// Build straight from a list of paths. Nothing is read from disk.
    pub fn from_entries<I, P>(roots: Vec<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut catalog = HeaderCatalog { roots, ..Default::default() };
        for e in entries {
            catalog.push(e.into());
        }
        catalog
    }

    fn push(&mut self, path: PathBuf) {
        if self.lookup.insert(path.clone()) {
            self.entries.push(path);
        }
    }
}

pub fn build_catalog_for(config: &SearchConfig) -> HeaderCatalog {
    build_catalog(&config.system_roots, &config.common_includes)
}

/// Walk every root and collect header paths. A root that cannot be walked is
/// recorded on the catalog and skipped; the remaining roots are still indexed.
pub fn build_catalog<S: AsRef<str>>(roots: &[PathBuf], common_names: &[S]) -> HeaderCatalog {
    let mut catalog = HeaderCatalog {
        roots: roots.to_vec(),
        ..Default::default()
    };

    for root in roots {
        for dent in WalkDir::new(root) {
            let dent = match dent {
                Ok(d) => d,
                Err(err) => {
                    let at_root = err.depth() == 0;
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    let skip = if at_root {
                        IndexError::RootUnavailable { root: root.clone(), source: walk_io_error(err) }
                    } else {
                        IndexError::EntryUnreadable { path, source: walk_io_error(err) }
                    };
                    log::info!("{skip}");
                    catalog.skipped.push(skip);
                    continue;
                }
            };

            let ft = dent.file_type();
            let is_file = ft.is_file() || (ft.is_symlink() && dent.path().is_file());
            if !is_file {
                continue;
            }

            let path = dent.path();
            if is_header_path(path, common_names) {
                log::debug!("added: {:?}", path);
                catalog.push(path.to_path_buf());
            }
        }
    }

    log::info!(
        "Found {} include files in {}",
        catalog.len(),
        roots.iter().map(|r| r.display().to_string()).collect::<Vec<_>>().join(", ")
    );
    catalog
}

/// Header extension (case-insensitive), or a path ending in an allow-listed name.
pub fn is_header_path<S: AsRef<str>>(path: &Path, common_names: &[S]) -> bool {
    if has_header_extension(path) {
        return true;
    }
    let s = path.to_string_lossy();
    common_names.iter().any(|name| s.ends_with(name.as_ref()))
}

pub fn has_header_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| HEADER_EXTENSIONS.iter().any(|h| e.eq_ignore_ascii_case(h)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(p: &Path) {
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, b"").unwrap();
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let none: &[&str] = &[];
        assert!(is_header_path(Path::new("/x/a.H"), none));
        assert!(is_header_path(Path::new("/x/a.Hpp"), none));
        assert!(is_header_path(Path::new("/x/a.h++"), none));
        assert!(!is_header_path(Path::new("/x/a.c"), none));
        assert!(!is_header_path(Path::new("/x/vector"), none));
        assert!(is_header_path(Path::new("/x/c++/11/vector"), &["vector"]));
    }

    #[test]
    fn walks_roots_and_admits_allow_listed_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("inc");
        touch(&root.join("stdio.h"));
        touch(&root.join("c++/11/vector"));
        touch(&root.join("c++/11/README"));
        touch(&root.join("sys/types.hpp"));
        fs::create_dir_all(root.join("vector")).unwrap(); // directory, not a header

        let cat = build_catalog(&[root.clone()], &["vector", "stdio.h"]);
        let mut got: Vec<_> = cat.entries().to_vec();
        got.sort();
        assert_eq!(
            got,
            vec![
                root.join("c++/11/vector"),
                root.join("stdio.h"),
                root.join("sys/types.hpp"),
            ]
        );
        // stdio.h matched twice (extension + allow-list) but is listed once.
        assert_eq!(cat.len(), 3);
        assert!(cat.skipped().is_empty());
    }

    #[test]
    fn missing_root_is_skipped_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good");
        touch(&good.join("a.h"));
        let missing = tmp.path().join("nope");

        let cat = build_catalog(&[missing.clone(), good.clone()], &[] as &[&str]);
        assert_eq!(cat.entries(), &[good.join("a.h")]);
        assert_eq!(cat.skipped().len(), 1);
        assert!(matches!(cat.skipped()[0], IndexError::RootUnavailable { .. }));
        assert_eq!(cat.skipped()[0].path(), missing.as_path());
        assert_eq!(cat.roots(), &[missing, good]);
    }

    #[test]
    fn from_entries_dedups_and_keeps_order() {
        let cat = HeaderCatalog::from_entries(
            vec![PathBuf::from("/usr/include")],
            ["/usr/include/b.h", "/usr/include/a.h", "/usr/include/b.h"],
        );
        assert_eq!(
            cat.entries(),
            &[PathBuf::from("/usr/include/b.h"), PathBuf::from("/usr/include/a.h")]
        );
        assert!(cat.contains(Path::new("/usr/include/a.h")));
    }
}
