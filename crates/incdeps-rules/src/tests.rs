//! Generation tests over real source trees

use super::*;
use incdeps_core::Error;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(temp: &TempDir, rel: &str, content: &str) {
    let path = temp.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_tree() -> (TempDir, Config) {
    let temp = TempDir::new().unwrap();
    write(&temp, "src/SumatraPDF.cpp", "#include \"BaseUtil.h\"\n#include \"Menu.h\"\n#include <windows.h>\n");
    write(&temp, "src/Menu.h", "#include \"WinUtil.h\"\n");
    write(&temp, "src/Empty.cpp", "#include <stdio.h>\n");
    write(&temp, "src/utils/BaseUtil.h", "");
    write(&temp, "src/utils/WinUtil.h", "#include \"BaseUtil.h\"\n");
    write(&temp, "src/utils/WinUtil.cpp", "#include \"WinUtil.h\"\n#include <zlib.h>\n");
    write(&temp, "ext/zlib/zlib.h", "/* #include \"zconf.h\" */\n");
    write(&temp, "ext/zlib/zconf.h", "");

    let mut config = Config::default();
    config.root = temp.path().to_path_buf();
    config.scan.source_dirs = vec![PathBuf::from("src"), PathBuf::from("src/utils")];
    config.scan.extra_include_dirs = vec![PathBuf::from("ext/zlib")];
    config
        .rules
        .object_dirs
        .insert("src\\utils".to_string(), "$(OU)".to_string());
    (temp, config)
}

#[test]
fn test_generate_full_artifact() {
    let (_temp, config) = sample_tree();
    let generated = generate(&config).unwrap();

    assert_eq!(
        generated.content,
        "## Header-dependencies for src\\* and src\\*\\*\r\n\
         ### the list below is auto-generated by incdeps\r\n\
         B=$(BASEDIR)\r\n\
         $(OS)\\SumatraPDF.obj: $B\\src\\Menu.h $B\\src\\utils\\BaseUtil.h $B\\src\\utils\\WinUtil.h\r\n\
         $(OU)\\WinUtil.obj: $B\\ext\\zlib\\zlib.h $B\\src\\utils\\BaseUtil.h $B\\src\\utils\\WinUtil.h\r\n"
    );
    assert_eq!(generated.sources, 3);
    assert_eq!(generated.entries, 2);
    assert_eq!(generated.rules, 2);
}

#[test]
fn test_empty_dependency_sources_omitted() {
    let (_temp, config) = sample_tree();
    let generated = generate(&config).unwrap();

    assert!(!generated.content.contains("Empty.obj"));
}

#[test]
fn test_regeneration_is_idempotent() {
    let (_temp, config) = sample_tree();
    let out = config.output_path();

    let first = generate(&config).unwrap();
    write_makefile(&out, &first.content).unwrap();
    let second = generate(&config).unwrap();

    assert_eq!(first.content, second.content);
    assert!(is_up_to_date(&out, &second.content).unwrap());
    assert_eq!(fs::read(&out).unwrap(), second.content.into_bytes());
}

#[test]
fn test_chunking_across_lines() {
    let (temp, mut config) = sample_tree();
    write(&temp, "src/Many.cpp", "#include \"h1.h\"\n#include \"h2.h\"\n#include \"h3.h\"\n");
    for name in ["h1.h", "h2.h", "h3.h"] {
        write(&temp, &format!("src/{}", name), "");
    }
    config.rules.dependencies_per_line = 2;

    let generated = generate(&config).unwrap();
    let many: Vec<&str> = generated
        .content
        .split("\r\n")
        .filter(|line| line.starts_with("$(OS)\\Many.obj"))
        .collect();
    assert_eq!(
        many,
        vec![
            "$(OS)\\Many.obj: $B\\src\\h1.h $B\\src\\h2.h",
            "$(OS)\\Many.obj: $B\\src\\h3.h",
        ]
    );
}

#[test]
fn test_latin1_source_generates_rules() {
    let (temp, config) = sample_tree();
    fs::write(
        temp.path().join("src/Latin.cpp"),
        b"/* Copyright (c) Fran\xe7ois */\n#include \"Menu.h\"\n",
    )
    .unwrap();

    let generated = generate(&config).unwrap();
    assert!(generated
        .content
        .contains("$(OS)\\Latin.obj: $B\\src\\Menu.h $B\\src\\utils\\BaseUtil.h $B\\src\\utils\\WinUtil.h\r\n"));
}

#[test]
fn test_repeated_source_dir_emits_rules_once() {
    let (_temp, mut config) = sample_tree();
    let baseline = generate(&config).unwrap();
    config.scan.source_dirs.push(PathBuf::from("./src"));
    config.scan.source_dirs.push(PathBuf::from("src"));

    let generated = generate(&config).unwrap();
    assert_eq!(generated.sources, baseline.sources);
    assert_eq!(generated.content, baseline.content);
    assert_eq!(generated.content.matches("SumatraPDF.obj").count(), 1);
}

#[test]
fn test_cycle_aborts_generation() {
    let (temp, config) = sample_tree();
    write(&temp, "src/utils/BaseUtil.h", "#include \"WinUtil.h\"\n");

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, Error::IncludeCycle { .. }));
    assert!(!config.output_path().exists());
}

#[test]
fn test_missing_source_dir_aborts() {
    let (_temp, mut config) = sample_tree();
    config.scan.source_dirs.push(PathBuf::from("src/missing"));

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
}

#[test]
fn test_build_dependency_list_skips_empty() {
    let (_temp, config) = sample_tree();
    let resolver = HeaderResolver::from_config(&config);
    let mut walker = IncludeWalker::new(&resolver);
    let sources = vec![
        SourceFile::new("src/Empty.cpp"),
        SourceFile::new("src/SumatraPDF.cpp"),
    ];

    let entries = build_dependency_list(&mut walker, &sources).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, SourceFile::new("src/SumatraPDF.cpp"));
    assert_eq!(entries[0].deps.len(), 3);
}
