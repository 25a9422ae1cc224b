// src/resolver.rs
//! Include path resolver.
//!
//! Each short include name is tried against three strategies in order, and the
//! first hit wins:
//! 1. `System`: `<root>/<name>` is an exact catalog entry for some system root.
//! 2. `Local`: `<local dir>/<name>` exists on disk (probed, never listed).
//! 3. `Fuzzy`: catalog entries ending in `/<name>`, ranked by [`compare_candidates`].
//!
//! Names with no hit at all land in `not_found`. That is an expected outcome,
//! since many headers come from a package manager instead.

use serde::Serialize;
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    io::{
        self,
        Write
    },
    path::{
        Path,
        PathBuf
    }
};
use crate::{
    catalog::HeaderCatalog,
    config::{
        join_include,
        LocalDirectorySet
    },
    scanner::ShortIncludeSet
};

/// Substring that marks a C++-flavoured header location.
pub const CXX_KEYWORD: &str = "++";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    System,
    Local,
    Fuzzy,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedInclude {
    pub path: PathBuf,
    pub strategy: Strategy,
}

/// Outcome of one resolution pass. `found` and `not_found` partition the input.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    found: BTreeMap<String, ResolvedInclude>,
    not_found: Vec<String>,
}

impl Resolution {
    pub fn found(&self) -> &BTreeMap<String, ResolvedInclude> {
        &self.found
    }

    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    pub fn path_of(&self, include: &str) -> Option<&Path> {
        self.found.get(include).map(|r| r.path.as_path())
    }

    /// Include name -> resolved path, without the strategy.
    pub fn paths(&self) -> BTreeMap<&str, &Path> {
        self.found
            .iter()
            .map(|(k, v)| (k.as_str(), v.path.as_path()))
            .collect()
    }
}

pub fn resolve(
    includes: &ShortIncludeSet,
    catalog: &HeaderCatalog,
    local_dirs: &LocalDirectorySet,
) -> Resolution {
    let mut res = Resolution::default();
    for include in includes {
        match resolve_one(include, catalog, local_dirs) {
            Some(hit) => {
                log::info!("FOUND: {} -> {}", include, hit.path.display());
                res.found.insert(include.clone(), hit);
            }
            None => {
                log::info!("NOT FOUND: {include}");
                res.not_found.push(include.clone());
            }
        }
    }
    res
}

pub fn resolve_one(
    include: &str,
    catalog: &HeaderCatalog,
    local_dirs: &LocalDirectorySet,
) -> Option<ResolvedInclude> {
    if let Some(path) = system_exact_match(include, catalog) {
        return Some(ResolvedInclude { path, strategy: Strategy::System });
    }
    if let Some(path) = local_existing(include, local_dirs) {
        return Some(ResolvedInclude { path, strategy: Strategy::Local });
    }
    fuzzy_match(include, catalog).map(|path| ResolvedInclude { path, strategy: Strategy::Fuzzy })
}

fn system_exact_match(include: &str, catalog: &HeaderCatalog) -> Option<PathBuf> {
    catalog
        .roots()
        .iter()
        .map(|root| join_include(root, include))
        .find(|candidate| catalog.contains(candidate))
}

fn local_existing(include: &str, local_dirs: &LocalDirectorySet) -> Option<PathBuf> {
    local_dirs.candidates(include).find(|p| p.exists())
}

fn fuzzy_match(include: &str, catalog: &HeaderCatalog) -> Option<PathBuf> {
    let suffix = format!("/{include}");
    let mut candidates: Vec<String> = catalog
        .entries()
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| p.ends_with(&suffix))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    candidates.sort();

    log::debug!("Candidates for {include}:");
    for c in &candidates {
        log::debug!("\t{c}");
    }
    let chosen = pick_candidate(&candidates, CXX_KEYWORD)?;
    log::debug!("\tChose:\n\t{chosen}");
    Some(PathBuf::from(chosen))
}

/* ------------------------------ tie-break ------------------------------ */

/// Ranks two fuzzy candidates; `Greater` means `a` is preferred.
///
/// Precedence keys:
/// 1. containing `keyword` beats not containing it;
/// 2. among keyword holders the shorter path wins, and on equal length the
///    lexicographically larger one;
/// 3. among the rest the lexicographically smaller one wins.
pub fn compare_candidates(a: &str, b: &str, keyword: &str) -> Ordering {
    match (a.contains(keyword), b.contains(keyword)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => b.len().cmp(&a.len()).then_with(|| a.cmp(b)),
        (false, false) => b.cmp(a),
    }
}

/// Best candidate by [`compare_candidates`], or `None` for an empty slice.
pub fn pick_candidate<'a>(candidates: &'a [String], keyword: &str) -> Option<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .max_by(|a, b| compare_candidates(a, b, keyword))
}

/* ------------------------------- output ------------------------------- */

pub fn print_include_paths<W: Write>(res: &Resolution, out: &mut W) -> io::Result<()> {
    for hit in res.found.values() {
        writeln!(out, "FOUND: {}", hit.path.display())?;
    }
    for include in &res.not_found {
        writeln!(out, "NOT FOUND: {include}")?;
    }
    Ok(())
}
