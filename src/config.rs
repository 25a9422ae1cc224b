// src/config.rs

use serde::Serialize;
use std::{
    env,
    path::{
        Component,
        Path,
        PathBuf
    }
};
use crate::platform::{
    self,
    Platform
};

/// Extra system include roots, separated like `PATH`.
pub const ROOTS_ENV: &str = "INCLUDE_LOCATOR_ROOTS";

/// Conventional relative directories probed for project-local headers.
/// Some entries climb out with `..`, so these are never walked, only probed.
pub const CONVENTIONAL_LOCAL_DIRS: &[&str] = &[
    ".", "include", "Include",
    "..", "../include", "../Include",
    "common", "Common", "../common", "../Common",
];

/// Fixed, ordered list of local directories, joined onto `base` at probe time.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LocalDirectorySet {
    base: PathBuf,
    dirs: Vec<PathBuf>,
}

impl LocalDirectorySet {
    pub fn conventional() -> Self {
        Self::new(CONVENTIONAL_LOCAL_DIRS.iter().map(PathBuf::from).collect())
    }

    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { base: PathBuf::from("."), dirs }
    }

    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = base.into();
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Candidate paths for `include`, in probe order.
    pub fn candidates<'a>(&'a self, include: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.dirs
            .iter()
            .map(move |d| join_include(&self.base.join(d), include))
    }
}

/// `dir` joined with `include`, cleaned lexically.
///
/// The include is always taken as relative to `dir`: a leading root or
/// drive prefix on it is dropped. `.` segments vanish, and `..` pops the
/// previous normal segment (or stays, when there is nothing left to pop).
pub fn join_include(dir: &Path, include: &str) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    let relative = Path::new(include)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir));

    for comp in dir.components().chain(relative) {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            _ => parts.push(comp),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

impl Default for LocalDirectorySet {
    fn default() -> Self {
        Self::conventional()
    }
}

/// Everything a run needs to know about where headers may live.
#[derive(Serialize, Clone, Debug)]
pub struct SearchConfig {
    pub platform: Platform,
    pub system_roots: Vec<PathBuf>,
    pub common_includes: Vec<String>,
    pub local_dirs: LocalDirectorySet,
    pub verbose: bool,
}

impl SearchConfig {
    /// Host platform defaults plus any roots listed in `INCLUDE_LOCATOR_ROOTS`.
    pub fn for_host() -> Self {
        let mut cfg = Self::for_platform(Platform::host());
        if let Some(extra) = env::var_os(ROOTS_ENV) {
            for root in env::split_paths(&extra) {
                if !root.as_os_str().is_empty() {
                    cfg = cfg.with_system_root(root);
                }
            }
        }
        cfg
    }

    pub fn for_platform(platform: Platform) -> Self {
        let profile = platform::profile(platform);
        Self {
            platform,
            system_roots: profile.system_roots.clone(),
            common_includes: profile.common_includes.iter().map(|s| s.to_string()).collect(),
            local_dirs: LocalDirectorySet::conventional(),
            verbose: false,
        }
    }

    pub fn with_system_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if !self.system_roots.contains(&root) {
            self.system_roots.push(root);
        }
        self
    }

    pub fn with_local_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.local_dirs = self.local_dirs.with_base(base);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_dirs_keep_order() {
        let set = LocalDirectorySet::conventional();
        let got: Vec<_> = set.candidates("a.h").collect();
        assert_eq!(got.len(), CONVENTIONAL_LOCAL_DIRS.len());
        assert_eq!(got[0], PathBuf::from("a.h"));
        assert_eq!(got[1], PathBuf::from("include/a.h"));
        assert_eq!(got[3], PathBuf::from("../a.h"));
        assert_eq!(got[4], PathBuf::from("../include/a.h"));
    }

    #[test]
    fn base_prefixes_every_candidate() {
        let set = LocalDirectorySet::conventional().with_base("/proj");
        let got: Vec<_> = set.candidates("x.h").collect();
        assert_eq!(got[0], PathBuf::from("/proj/x.h"));
        assert_eq!(got[1], PathBuf::from("/proj/include/x.h"));
        assert_eq!(got[3], PathBuf::from("/x.h"));
    }

    #[test]
    fn absolute_include_stays_under_dir() {
        assert_eq!(join_include(Path::new("/usr/include"), "/opt/other/x.h"), PathBuf::from("/usr/include/opt/other/x.h"));
        assert_eq!(join_include(Path::new("."), "/x/outside.h"), PathBuf::from("x/outside.h"));
        let set = LocalDirectorySet::conventional().with_base("/proj");
        let got: Vec<_> = set.candidates("/etc/passwd.h").collect();
        assert_eq!(got[0], PathBuf::from("/proj/etc/passwd.h"));
        assert_eq!(got[1], PathBuf::from("/proj/include/etc/passwd.h"));
    }

    #[test]
    fn dotdot_in_include_is_cleaned() {
        assert_eq!(join_include(Path::new("/usr/include"), "../foo.h"), PathBuf::from("/usr/foo.h"));
        assert_eq!(join_include(Path::new("/usr/include"), "sys/./../a.h"), PathBuf::from("/usr/include/a.h"));
        assert_eq!(join_include(Path::new("/"), "../../a.h"), PathBuf::from("/a.h"));
        assert_eq!(join_include(Path::new(".."), "../a.h"), PathBuf::from("../../a.h"));
        assert_eq!(join_include(Path::new("."), "."), PathBuf::from("."));
    }

    #[test]
    fn extra_root_is_appended_once() {
        let cfg = SearchConfig::for_platform(Platform::Linux)
            .with_system_root("/opt/inc")
            .with_system_root("/opt/inc");
        assert_eq!(
            cfg.system_roots,
            vec![PathBuf::from("/usr/include"), PathBuf::from("/opt/inc")]
        );
    }
}
