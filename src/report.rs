// src/report.rs
//! JSON report for one project: what was asked for, what was found, and
//! whether thread/dl link flags are needed.

use chrono::{
    Local,
    SecondsFormat
};
use serde::Serialize;
use std::path::PathBuf;
use crate::{
    resolver::Resolution,
    scanner::{
        detects_threading_headers,
        ShortIncludeSet
    }
};

#[derive(Serialize, Debug)]
pub struct ResolveReport<'a> {
    pub version: u32,
    pub generated_at: String,
    pub project: PathBuf,
    pub catalog_size: usize,
    pub includes: &'a ShortIncludeSet,
    pub resolution: &'a Resolution,
    pub needs_threads: bool,
}

impl<'a> ResolveReport<'a> {
    pub fn new(
        project: PathBuf,
        catalog_size: usize,
        includes: &'a ShortIncludeSet,
        resolution: &'a Resolution,
    ) -> Self {
        Self {
            version: 1,
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            project,
            catalog_size,
            includes,
            resolution,
            needs_threads: detects_threading_headers(includes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::HeaderCatalog,
        config::LocalDirectorySet,
        resolver::resolve
    };

    #[test]
    fn report_serializes_partition_and_thread_flag() {
        let cat = HeaderCatalog::from_entries(
            vec![PathBuf::from("/usr/include")],
            ["/usr/include/pthread.h"],
        );
        let includes: ShortIncludeSet = ["pthread.h", "x.h"].iter().map(|s| s.to_string()).collect();
        let res = resolve(&includes, &cat, &LocalDirectorySet::new(Vec::new()));
        let report = ResolveReport::new(PathBuf::from("/proj"), cat.len(), &includes, &res);

        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["version"], 1);
        assert_eq!(v["needs_threads"], true);
        assert_eq!(v["resolution"]["found"]["pthread.h"]["path"], "/usr/include/pthread.h");
        assert_eq!(v["resolution"]["found"]["pthread.h"]["strategy"], "system");
        assert_eq!(v["resolution"]["not_found"][0], "x.h");
        assert!(v["generated_at"].as_str().is_some());
    }
}
