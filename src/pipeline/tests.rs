use super::*;
use crate::analysis::ExclusionSet;
use crate::engine::RenameError;
use crate::extractors::base::{QualifiedName, Scope};
use crate::naming::SuffixHasher;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Moves directories on disk the way the Go tools would, and records every call
#[derive(Default)]
struct DiskEngine {
    source_root: PathBuf,
    moves: Vec<(String, String)>,
    renames: Vec<(QualifiedName, String)>,
    reject: Vec<String>,
}

impl DiskEngine {
    fn new(root: &Path) -> Self {
        Self {
            source_root: root.join("src"),
            ..Self::default()
        }
    }

    fn rejecting(mut self, name: &str) -> Self {
        self.reject.push(name.to_string());
        self
    }

    fn renamed_names(&self) -> Vec<&str> {
        self.renames.iter().map(|(old, _)| old.name.as_str()).collect()
    }
}

impl RenameEngine for DiskEngine {
    fn move_package(&mut self, old: &str, new: &str) -> std::result::Result<(), RenameError> {
        let from = self.source_root.join(old);
        let to = self.source_root.join(new);
        fs::rename(&from, &to).map_err(|e| RenameError::PathConflict {
            target: new.to_string(),
            detail: e.to_string(),
        })?;

        // gomvpkg renames the package clause after the new directory
        let new_base = new.rsplit('/').next().unwrap_or(new);
        for entry in fs::read_dir(&to).unwrap() {
            let path = entry.unwrap().path();
            if path.extension().is_some_and(|ext| ext == "go") {
                let content = fs::read_to_string(&path).unwrap();
                let rewritten: Vec<String> = content
                    .lines()
                    .map(|line| match line.strip_prefix("package ") {
                        Some(_) => format!("package {}", new_base),
                        None => line.to_string(),
                    })
                    .collect();
                fs::write(&path, rewritten.join("\n") + "\n").unwrap();
            }
        }

        self.moves.push((old.to_string(), new.to_string()));
        Ok(())
    }

    fn rename_symbol(
        &mut self,
        old: &QualifiedName,
        new_name: &str,
    ) -> std::result::Result<(), RenameError> {
        if self.reject.contains(&old.name) {
            return Err(RenameError::BuildError {
                query: old.to_string(),
                detail: "would conflict".to_string(),
            });
        }
        // gorename cannot find a local once its enclosing method has a new name
        if let Scope::Local {
            function,
            receiver: Some(receiver),
        } = &old.scope
        {
            let enclosing = QualifiedName::method(old.package.as_str(), receiver.clone(), function);
            if self.renames.iter().any(|(renamed, _)| *renamed == enclosing) {
                return Err(RenameError::NotFound {
                    query: old.to_string(),
                    detail: "no such method".to_string(),
                });
            }
        }
        self.renames.push((old.clone(), new_name.to_string()));
        Ok(())
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn obfuscator(root: &Path) -> Obfuscator<DiskEngine> {
    Obfuscator::new(
        root,
        ObfuscatorConfig::default(),
        SuffixHasher::new("_obf"),
        DiskEngine::new(root),
    )
    .unwrap()
}

fn two_package_tree(root: &Path) {
    write(root, "src/a/a.go", "package a\n\nimport \"b\"\n\nvar _ = b.Foo\n");
    write(
        root,
        "src/b/b.go",
        "package b\n\nfunc Foo() {}\n\ntype S struct {\n\tX int\n}\n",
    );
}

#[test]
fn test_end_to_end_two_packages() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    two_package_tree(root);

    let mut obfuscator = obfuscator(root);
    let summary = obfuscator.run().unwrap();

    assert!(root.join("src/a_obf/a.go").is_file());
    assert!(root.join("src/b_obf/b.go").is_file());
    assert!(!root.join("src/a").exists());

    let engine = obfuscator.engine();
    assert_eq!(
        engine.moves,
        vec![
            ("a".to_string(), "a_obf".to_string()),
            ("b".to_string(), "b_obf".to_string())
        ]
    );
    // Field before the shorter names, all in the moved package
    assert_eq!(engine.renamed_names()[0], "X");
    assert!(engine.renames.iter().all(|(old, _)| old.package == "b_obf"));
    let mut renamed = engine.renamed_names();
    renamed.sort();
    assert_eq!(renamed, vec!["Foo", "S", "X"]);

    let written: BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(root.join("map.json")).unwrap()).unwrap();
    let expected: BTreeMap<String, String> = [("Foo_obf", "Foo"), ("S_obf", "S"), ("X_obf", "X")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(written, expected);

    assert_eq!(summary.packages_moved, 2);
    assert_eq!(summary.symbols_renamed, 3);
    assert_eq!(summary.symbols_failed, 0);
}

#[test]
fn test_moves_are_depth_ordered() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/z/z.go", "package z\n");
    write(root, "src/a/inner/deep/d.go", "package deep\n");
    write(root, "src/a/inner/i.go", "package inner\n");
    write(root, "src/a/a.go", "package a\n");

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_package_names().unwrap();

    let moves: Vec<_> = obfuscator
        .engine()
        .moves
        .iter()
        .map(|(from, to)| format!("{} -> {}", from, to))
        .collect();
    assert_eq!(
        moves,
        vec![
            "a -> a_obf",
            "z -> z_obf",
            "a_obf/inner -> a_obf/inner_obf",
            "a_obf/inner_obf/deep -> a_obf/inner_obf/deep_obf",
        ]
    );
    let depths: Vec<_> = obfuscator
        .engine()
        .moves
        .iter()
        .map(|(from, _)| from.split('/').count())
        .collect();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_directories_without_go_files_are_not_moved() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/example.org/tool/t.go", "package tool\n");

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_package_names().unwrap();

    assert_eq!(
        obfuscator.engine().moves,
        vec![("example.org/tool".to_string(), "example.org/tool_obf".to_string())]
    );
    assert!(root.join("src/example.org/tool_obf/t.go").is_file());
}

#[test]
fn test_entry_point_keeps_main_after_move() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/cmd/tool/main.go", "package main\n\nfunc main() {}\n");
    write(root, "src/cmd/tool/flags.go", "package main\n\nvar verbose bool\n");
    write(root, "src/lib/lib.go", "package lib\n");

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_package_names().unwrap();

    // `cmd` holds no Go files, so only `tool` moves
    let moved = root.join("src/cmd/tool_obf");
    for unit in ["main.go", "flags.go"] {
        let content = fs::read_to_string(moved.join(unit)).unwrap();
        assert!(content.starts_with("package main\n"), "{}: {}", unit, content);
    }
    // Not an entry point: keeps the clause the move gave it
    let lib = fs::read_to_string(root.join("src/lib_obf/lib.go")).unwrap();
    assert!(lib.starts_with("package lib_obf"));
}

#[test]
fn test_foreign_bridge_package_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/native/n.go",
        "package native\n\n// #include <stdlib.h>\nimport \"C\"\n\nfunc Exported(size int) {}\n",
    );
    write(root, "src/plain/p.go", "package plain\n\nfunc Helper() {}\n");

    let mut obfuscator = obfuscator(root);
    let summary = obfuscator.run().unwrap();

    let engine = obfuscator.engine();
    assert!(root.join("src/native/n.go").is_file());
    assert!(engine.moves.iter().all(|(from, _)| from != "native"));
    assert!(engine.renames.iter().all(|(old, _)| old.package != "native"));
    assert_eq!(engine.renamed_names(), vec!["Helper"]);
    assert_eq!(summary.packages_skipped, 1);
}

#[test]
fn test_variant_duplicates_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/sys/page_linux.go",
        "// +build linux\n\npackage sys\n\nconst pageSize = 4096\n",
    );
    write(
        root,
        "src/sys/page_windows.go",
        "// +build windows\n\npackage sys\n\nconst pageSize = 4096\n",
    );
    write(root, "src/sys/sys.go", "package sys\n\nfunc Open() {}\n");

    let mut obfuscator = obfuscator(root);
    let summary = obfuscator.obfuscate_symbols().unwrap();

    assert_eq!(obfuscator.engine().renamed_names(), vec!["Open"]);
    assert_eq!(summary.candidates_dropped, 1);
}

#[test]
fn test_interface_method_names_never_renamed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/contracts/c.go",
        "package contracts\n\ntype Barer interface {\n\tBar() int\n}\n",
    );
    write(
        root,
        "src/shapes/s.go",
        r#"package shapes

type Box struct{}

func (b *Box) Bar() int {
	n := 1
	return n
}

func (b *Box) Area() int {
	w := 2
	return w
}
"#,
    );

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_symbols().unwrap();

    let engine = obfuscator.engine();
    let methods: Vec<_> = engine
        .renames
        .iter()
        .filter(|(old, _)| matches!(old.scope, Scope::Method { .. }))
        .map(|(old, _)| old.name.as_str())
        .collect();
    assert_eq!(methods, vec!["Area"]);
    // Nothing inside an excluded method is touched either
    assert!(!engine.renamed_names().contains(&"n"));
    assert!(engine.renamed_names().contains(&"w"));
    assert!(!engine.renamed_names().contains(&"Bar"));
}

#[test]
fn test_method_locals_renamed_before_their_method() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/shapes/s.go",
        r#"package shapes

type Box struct{}

func (b *Box) Area() int {
	w := 2
	return w
}
"#,
    );

    let mut obfuscator = obfuscator(root);
    obfuscator
        .run_pass(SymbolPass::MethodsAndLocals, &ExclusionSet::new())
        .unwrap();

    let engine = obfuscator.engine();
    let applied: Vec<String> = engine.renames.iter().map(|(old, _)| old.to_string()).collect();
    assert_eq!(
        applied,
        vec!["(*\"shapes\".Box).Area::w", "(*\"shapes\".Box).Area"]
    );
    assert_eq!(obfuscator.summary().symbols_failed, 0);
}

#[test]
fn test_reserved_functions_never_proposed() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/app/app.go",
        "package app\n\nfunc init() {}\n\nfunc main() {}\n\nfunc run(args []string) {}\n",
    );

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_symbols().unwrap();

    let names = obfuscator.engine().renamed_names();
    assert!(!names.contains(&"main"));
    assert!(!names.contains(&"init"));
    assert_eq!(names, vec!["run", "args"]);
}

#[test]
fn test_rejected_rename_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    two_package_tree(root);

    let mut obfuscator = Obfuscator::new(
        root,
        ObfuscatorConfig::default(),
        SuffixHasher::new("_obf"),
        DiskEngine::new(root).rejecting("S"),
    )
    .unwrap();
    let summary = obfuscator.obfuscate_symbols().unwrap();

    assert_eq!(summary.symbols_failed, 1);
    assert_eq!(summary.symbols_renamed, 2);
    assert_eq!(obfuscator.reverse_map().get("S_obf"), None);
    assert_eq!(obfuscator.reverse_map().get("Foo_obf"), Some("Foo"));
}

#[test]
fn test_generated_file_is_neutralized() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/gen/gen.go",
        "// Code generated by stringer. DO NOT EDIT.\n\npackage gen\n",
    );

    let mut obfuscator = obfuscator(root);
    obfuscator.obfuscate_symbols().unwrap();

    let content = fs::read_to_string(root.join("src/gen/gen.go")).unwrap();
    assert!(content.contains("XXXXXXXXXXX"));
    assert!(!content.contains("DO NOT EDIT"));
}

#[test]
fn test_malformed_unit_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/bad/bad.go", "package bad\n\nfunc broken( {\n");

    let mut obfuscator = obfuscator(root);
    let err = obfuscator.obfuscate_symbols().unwrap_err();
    assert!(matches!(err, crate::error::ObfuscateError::Parse { .. }));
}
