// src/packages.rs
//! Seam to the system package manager. Implementations live with the flag
//! generator; this crate only asks about names it could not find on disk and
//! hands include directories over for flag formatting.

use anyhow::Result;
use std::{
    collections::{
        BTreeMap,
        BTreeSet
    },
    path::{
        Path,
        PathBuf
    }
};
use crate::resolver::Resolution;

pub trait PackageSystem {
    /// Paths installed by whatever package provides `name`.
    fn package_provides(&self, name: &str) -> Result<Vec<PathBuf>>;

    /// Compiler flag(s) that put `path` on the include search path.
    fn include_path_to_cxxflags(&self, path: &Path) -> String;
}

/// Ask the package system about every unresolved include. Names it has no
/// answer for are left out; lookup errors are logged and skipped.
pub fn package_fallback(res: &Resolution, pkg: &dyn PackageSystem) -> BTreeMap<String, Vec<PathBuf>> {
    let mut out = BTreeMap::new();
    for name in res.not_found() {
        match pkg.package_provides(name) {
            Ok(paths) if !paths.is_empty() => {
                out.insert(name.clone(), paths);
            }
            Ok(_) => {}
            Err(e) => log::warn!("package lookup for {name} failed: {e:#}"),
        }
    }
    out
}

/// Include directory implied by a resolved header:
/// `/usr/include/c++/11/string` for `string` -> `/usr/include/c++/11`,
/// `/usr/include/sys/types.h` for `sys/types.h` -> `/usr/include`.
pub fn include_dir_for(path: &Path, include: &str) -> Option<PathBuf> {
    let mut dir = path;
    for _ in Path::new(include).components() {
        dir = dir.parent()?;
    }
    Some(dir.to_path_buf())
}

/// One flag string per distinct include directory, sorted by directory.
pub fn include_flags(res: &Resolution, pkg: &dyn PackageSystem) -> Vec<String> {
    let dirs: BTreeSet<PathBuf> = res
        .paths()
        .into_iter()
        .filter_map(|(name, path)| include_dir_for(path, name))
        .collect();
    dirs.iter()
        .map(|d| pkg.include_path_to_cxxflags(d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::HeaderCatalog,
        config::LocalDirectorySet,
        resolver::resolve,
        scanner::ShortIncludeSet
    };
    use anyhow::anyhow;

    struct FakePkg;

    impl PackageSystem for FakePkg {
        fn package_provides(&self, name: &str) -> Result<Vec<PathBuf>> {
            match name {
                "SDL2/SDL.h" => Ok(vec![PathBuf::from("/opt/sdl/include/SDL2/SDL.h")]),
                "broken.h" => Err(anyhow!("database locked")),
                _ => Ok(Vec::new()),
            }
        }

        fn include_path_to_cxxflags(&self, path: &Path) -> String {
            format!("-I{}", path.display())
        }
    }

    fn sample() -> Resolution {
        let cat = HeaderCatalog::from_entries(
            vec![PathBuf::from("/usr/include")],
            [
                "/usr/include/c++/11/string",
                "/usr/include/sys/types.h",
                "/usr/include/stdio.h",
            ],
        );
        let includes: ShortIncludeSet = ["string", "sys/types.h", "stdio.h", "SDL2/SDL.h", "broken.h", "gone.h"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        resolve(&includes, &cat, &LocalDirectorySet::new(Vec::new()))
    }

    #[test]
    fn include_dir_strips_every_include_component() {
        assert_eq!(
            include_dir_for(Path::new("/usr/include/sys/types.h"), "sys/types.h"),
            Some(PathBuf::from("/usr/include"))
        );
        assert_eq!(
            include_dir_for(Path::new("/usr/include/c++/11/string"), "string"),
            Some(PathBuf::from("/usr/include/c++/11"))
        );
    }

    #[test]
    fn fallback_keeps_only_answered_names() {
        let got = package_fallback(&sample(), &FakePkg);
        assert_eq!(got.len(), 1);
        assert_eq!(got["SDL2/SDL.h"], vec![PathBuf::from("/opt/sdl/include/SDL2/SDL.h")]);
    }

    #[test]
    fn flags_are_deduplicated_per_directory() {
        let flags = include_flags(&sample(), &FakePkg);
        assert_eq!(flags, vec!["-I/usr/include", "-I/usr/include/c++/11"]);
    }
}
