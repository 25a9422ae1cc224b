use include_locator::{
    build_catalog,
    detects_threading_headers,
    resolve,
    scan_project,
    HeaderCatalog,
    IndexError,
    LocalDirectorySet,
    ScanError,
    Strategy,
};
use pretty_assertions::assert_eq;
use std::{
    fs,
    path::{
        Path,
        PathBuf
    }
};
use tempfile::TempDir;

fn write(p: &Path, body: &str) {
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, body).unwrap();
}

/// A fake system include root plus a small project that uses it.
fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let sys = tmp.path().join("sys");
    write(&sys.join("stdio.h"), "");
    write(&sys.join("string.h"), "");
    write(&sys.join("c++/11/string"), "");
    write(&sys.join("c++/11/vector"), "");
    write(&sys.join("c++/11/mutex"), "");

    let proj = tmp.path().join("proj");
    write(
        &proj.join("src/main.cpp"),
        "#include <vector>\n#include \"util.h\"\n  #include <string>  \nint main() {}\n",
    );
    write(&proj.join("src/util.c"), "#include <stdio.h>\n#include \"util.h\"\n");
    write(&proj.join("util.h"), "#pragma once\n#include <stdio.h>\n");
    write(&proj.join("include/shared.h"), "");
    write(&proj.join("src/extra.hpp"), "#include <shared.h>\n#include <nowhere.h>\n");
    write(&proj.join("README.md"), "#include <ignored.h>\n");
    (tmp, sys, proj)
}

#[test]
fn scanner_collects_sorted_unique_includes() {
    let (_tmp, _sys, proj) = fixture();
    let (sources, includes) = scan_project(&proj).unwrap();

    let got: Vec<&str> = includes.iter().map(String::as_str).collect();
    assert_eq!(
        got,
        vec!["nowhere.h", "shared.h", "stdio.h", "string", "util.h", "vector"]
    );
    assert_eq!(sources.headers().len(), 3);
    assert_eq!(sources.c_sources(), &[proj.join("src/util.c")]);
    assert_eq!(sources.cpp_sources(), &[proj.join("src/main.cpp")]);
    assert!(!detects_threading_headers(&includes));
}

#[test]
fn corpus_concatenates_headers_then_c_then_cpp() {
    let (_tmp, _sys, proj) = fixture();
    let (sources, _) = scan_project(&proj).unwrap();
    let corpus = String::from_utf8(sources.corpus().to_vec()).unwrap();

    assert!(corpus.starts_with('\n'));
    let c = corpus.find("#include <stdio.h>\n#include \"util.h\"").unwrap();
    let cpp = corpus.find("#include <vector>").unwrap();
    let hpp = corpus.find("#include <shared.h>").unwrap();
    assert!(hpp < c && c < cpp);
}

#[test]
fn end_to_end_resolution() {
    let (_tmp, sys, proj) = fixture();
    let (_, includes) = scan_project(&proj).unwrap();
    let cat = build_catalog(&[sys.clone()], &["string", "vector", "mutex"]);
    let local = LocalDirectorySet::conventional().with_base(&proj);

    let res = resolve(&includes, &cat, &local);

    let stdio = &res.found()["stdio.h"];
    assert_eq!((stdio.path.clone(), stdio.strategy), (sys.join("stdio.h"), Strategy::System));

    // Not under the system root, but present in the project's include/ dir.
    assert_eq!(res.found()["shared.h"].strategy, Strategy::Local);
    assert_eq!(res.found()["shared.h"].path, proj.join("include").join("shared.h"));

    assert_eq!(res.found()["util.h"].strategy, Strategy::Local);

    // `<sys>/string` is not a catalog entry, so fuzzy matching picks the C++ one.
    assert_eq!(res.found()["string"].strategy, Strategy::Fuzzy);
    assert_eq!(res.found()["string"].path, sys.join("c++/11/string"));
    assert_eq!(res.found()["vector"].path, sys.join("c++/11/vector"));

    assert_eq!(res.not_found(), &["nowhere.h".to_string()]);
    assert_eq!(res.found().len() + res.not_found().len(), includes.len());
}

#[test]
fn local_probe_climbs_with_dotdot_without_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    write(&tmp.path().join("common/cfg.h"), "");
    let sub = tmp.path().join("app");
    fs::create_dir_all(&sub).unwrap();

    let includes = ["cfg.h".to_string()].into_iter().collect();
    let empty = HeaderCatalog::from_entries(Vec::new(), Vec::<PathBuf>::new());
    let res = resolve(&includes, &empty, &LocalDirectorySet::conventional().with_base(&sub));

    let hit = &res.found()["cfg.h"];
    assert_eq!(hit.strategy, Strategy::Local);
    assert_eq!(hit.path, tmp.path().join("common/cfg.h"));
    assert!(hit.path.exists());
}

#[test]
fn threading_detected_from_project() {
    let tmp = tempfile::tempdir().unwrap();
    write(&tmp.path().join("a.cc"), "#include <mutex>\n#include <vector>\n");
    let (_, includes) = scan_project(tmp.path()).unwrap();
    assert!(detects_threading_headers(&includes));
}

#[test]
fn missing_project_root_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = scan_project(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, ScanError::Walk { .. }));
}

#[cfg(unix)]
#[test]
fn unreadable_source_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write(&tmp.path().join("ok.c"), "#include <stdio.h>\n");
    std::os::unix::fs::symlink(tmp.path().join("gone.cpp"), tmp.path().join("dangling.cpp")).unwrap();

    let err = scan_project(tmp.path()).unwrap_err();
    match err {
        ScanError::Read { path, .. } => assert_eq!(path, tmp.path().join("dangling.cpp")),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn unavailable_roots_do_not_stop_indexing() {
    let (_tmp, sys, _proj) = fixture();
    let missing = sys.join("does-not-exist");
    let cat = build_catalog(&[missing, sys.clone()], &["string"]);

    assert_eq!(cat.skipped().len(), 1);
    assert!(matches!(cat.skipped()[0], IndexError::RootUnavailable { .. }));
    assert!(cat.contains(&sys.join("c++/11/string")));
    assert!(cat.contains(&sys.join("stdio.h")));
    assert!(!cat.contains(&sys.join("c++/11/vector")));
}
