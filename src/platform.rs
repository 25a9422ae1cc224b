// src/platform.rs
//! Per-platform search defaults: where system headers live and which header
//! names are admitted by allow-list. Built once per process, read-only after.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::PathBuf
};
use crate::common_includes;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug)]
pub struct PlatformProfile {
    pub system_roots: Vec<PathBuf>,
    pub common_includes: Vec<&'static str>,
}

static PROFILES: Lazy<BTreeMap<Platform, PlatformProfile>> = Lazy::new(|| {
    let posix = || PlatformProfile {
        system_roots: vec![PathBuf::from("/usr/include")],
        common_includes: common_includes::STANDARD.to_vec(),
    };

    // Windows has no single system root; SDK headers come from the allow-list.
    let windows = PlatformProfile {
        system_roots: Vec::new(),
        common_includes: common_includes::STANDARD
            .iter()
            .chain(common_includes::WINDOWS_SDK)
            .copied()
            .collect(),
    };

    let mut table = BTreeMap::new();
    table.insert(Platform::Linux, posix());
    table.insert(Platform::Windows, windows);
    table.insert(Platform::Other, posix());
    table
});

pub fn profile(platform: Platform) -> &'static PlatformProfile {
    // Every variant is inserted above.
    &PROFILES[&platform]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_profiles_seed_usr_include() {
        for p in [Platform::Linux, Platform::Other] {
            assert_eq!(profile(p).system_roots, vec![PathBuf::from("/usr/include")]);
            assert!(profile(p).common_includes.contains(&"vector"));
            assert!(!profile(p).common_includes.contains(&"d3d11.h"));
        }
    }

    #[test]
    fn windows_swaps_roots_for_sdk_allow_list() {
        let w = profile(Platform::Windows);
        assert!(w.system_roots.is_empty());
        assert!(w.common_includes.contains(&"vector"));
        assert!(w.common_includes.contains(&"GL/gl.h"));
        assert!(w.common_includes.len() > profile(Platform::Linux).common_includes.len());
    }
}
