// src/commands.rs

use anyhow::{
    anyhow,
    Context,
    Result
};
use std::{
    env,
    io::{
        self,
        Write
    },
    path::PathBuf
};
use crate::{
    catalog,
    config::SearchConfig,
    report::ResolveReport,
    resolver,
    scanner
};

/// Parsed command line: one subcommand, an optional directory, and flags.
#[derive(Debug, Default, PartialEq, Eq)]
struct Invocation {
    cmd: String,
    dir: Option<PathBuf>,
    roots: Vec<PathBuf>,
    verbose: bool,
    json: bool,
}

pub fn run_cli() -> Result<()> {
    let inv = parse_args(env::args().skip(1))?;

    let mut cfg = SearchConfig::for_host().verbose(inv.verbose);
    for root in &inv.roots {
        cfg = cfg.with_system_root(root.clone());
    }
    init_logging(&cfg);

    match inv.cmd.as_str() {
        "scan"    => scan(&inv)?,
        "catalog" => show_catalog(&cfg)?,
        "resolve" => resolve(&inv, cfg)?,
        "threads" => threads(&inv)?,
        "config"  => show_config(&cfg)?,
        _         => print_help(),
    }
    Ok(())
}

/// `RUST_LOG` still wins; this is only the fallback filter.
fn default_log_filter(cfg: &SearchConfig) -> &'static str {
    if cfg.verbose { "debug" } else { "warn" }
}

fn init_logging(cfg: &SearchConfig) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_log_filter(cfg)))
        .format_timestamp(None)
        .init();
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut inv = Invocation::default();
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        match a.as_str() {
            "-v" | "--verbose" => inv.verbose = true,
            "--json" => inv.json = true,
            "--root" => {
                let dir = it.next().ok_or_else(|| anyhow!("--root needs a directory"))?;
                inv.roots.push(PathBuf::from(dir));
            }
            s if s.starts_with("--root=") => inv.roots.push(PathBuf::from(&s["--root=".len()..])),
            s if s.starts_with('-') => return Err(anyhow!("unknown flag: {s}")),
            s if inv.cmd.is_empty() => inv.cmd = s.to_string(),
            s if inv.dir.is_none() => inv.dir = Some(PathBuf::from(s)),
            _ => return Err(anyhow!("unexpected argument: {a}")),
        }
    }
    if inv.cmd.is_empty() {
        inv.cmd = "help".into();
    }
    Ok(inv)
}

fn project_dir(inv: &Invocation) -> PathBuf {
    inv.dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

fn scan(inv: &Invocation) -> Result<()> {
    let dir = project_dir(inv);
    let (_, includes) = scanner::scan_project(&dir)
        .with_context(|| format!("scanning {}", dir.display()))?;
    let mut out = io::stdout().lock();
    for name in &includes {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn show_catalog(cfg: &SearchConfig) -> Result<()> {
    let cat = catalog::build_catalog_for(cfg);
    println!("{} include files indexed", cat.len());
    for skip in cat.skipped() {
        println!("skipped: {skip}");
    }
    Ok(())
}

fn resolve(inv: &Invocation, cfg: SearchConfig) -> Result<()> {
    let dir = project_dir(inv);
    let cfg = cfg.with_local_base(&dir);

    let (_, includes) = scanner::scan_project(&dir)
        .with_context(|| format!("scanning {}", dir.display()))?;
    let cat = catalog::build_catalog_for(&cfg);
    let res = resolver::resolve(&includes, &cat, &cfg.local_dirs);

    let mut out = io::stdout().lock();
    if inv.json {
        let report = ResolveReport::new(dir, cat.len(), &includes, &res);
        serde_json::to_writer_pretty(&mut out, &report).context("writing report json")?;
        writeln!(out)?;
    } else {
        resolver::print_include_paths(&res, &mut out)?;
    }
    Ok(())
}

fn threads(inv: &Invocation) -> Result<()> {
    let dir = project_dir(inv);
    let (_, includes) = scanner::scan_project(&dir)
        .with_context(|| format!("scanning {}", dir.display()))?;
    println!("{}", if scanner::detects_threading_headers(&includes) { "yes" } else { "no" });
    Ok(())
}

fn show_config(cfg: &SearchConfig) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, cfg).context("writing config json")?;
    writeln!(out)?;
    Ok(())
}

fn print_help() {
    println!(
r#"
include-locator: find where a C/C++ project's #includes live on this machine

USAGE:
    include-locator scan [DIR]             # List the short include names used under DIR
    include-locator catalog                # Index system include roots, report size
    include-locator resolve [DIR] [--json] # FOUND / NOT FOUND per include (or a JSON report)
    include-locator threads [DIR]          # "yes" if thread/dl link flags are needed
    include-locator config                 # Print the effective search configuration
    include-locator help                   # Show this message

FLAGS:
    -v, --verbose     Per-file and per-candidate diagnostics on stderr
    --root DIR        Extra system include root (repeatable)

DIR defaults to the current directory. Extra roots can also be listed in
INCLUDE_LOCATOR_ROOTS, separated like PATH.
"#    );
}
