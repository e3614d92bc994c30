//! Tests for fat-jar assembly

use jarsmith_api::{ClasspathElement, JarManifest};
use jarsmith_core::archive::{Assembler, BasePrecedence, EntryFilter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

fn create_jar(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

fn fixture(temp: &Path) -> Vec<ClasspathElement> {
    let a = temp.join("a-1.0.jar");
    create_jar(
        &a,
        &[
            ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\r\n"),
            ("META-INF/SIGNER.SF", b"sig"),
            ("META-INF/SIGNER.RSA", b"sig"),
            ("META-INF/LICENSE.txt", b"license"),
            ("module-info.class", b"mod"),
            ("com/a/A.class", b"a"),
            ("shared.properties", b"from-a"),
        ],
    );
    let b = temp.join("b-2.0.jar");
    create_jar(
        &b,
        &[
            ("META-INF/versions/11/module-info.class", b"mod"),
            ("META-INF/NOTICE", b"notice"),
            ("com/b/B.class", b"b"),
            ("shared.properties", b"from-b"),
        ],
    );
    vec![ClasspathElement::Archive(a), ClasspathElement::Archive(b)]
}

fn manifest() -> JarManifest {
    JarManifest {
        implementation_title: Some("signal-cli".to_string()),
        implementation_version: Some("0.13.0".to_string()),
        main_class: Some("org.asamk.signal.Main".to_string()),
        enable_native_access: Some("ALL-UNNAMED".to_string()),
    }
}

#[test]
fn test_metadata_dropped_and_first_wins() {
    let temp = TempDir::new().unwrap();
    let classpath = fixture(temp.path());
    let output = temp.path().join("out/app-all.jar");

    let report = Assembler::new()
        .with_manifest(manifest())
        .assemble(&classpath, None, &output)
        .unwrap();

    let names = entry_names(&output);
    assert_eq!(
        names,
        vec![
            "META-INF/",
            "META-INF/MANIFEST.MF",
            "com/a/A.class",
            "shared.properties",
            "com/b/B.class",
        ]
    );
    assert_eq!(read_entry(&output, "shared.properties"), "from-a");

    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].path, "shared.properties");
    assert!(report.duplicates[0].discarded_from.ends_with("b-2.0.jar"));
    assert_eq!(report.excluded, 7);
}

#[test]
fn test_generated_manifest_attributes() {
    let temp = TempDir::new().unwrap();
    let classpath = fixture(temp.path());
    let output = temp.path().join("app-all.jar");

    Assembler::new()
        .with_manifest(manifest())
        .assemble(&classpath, None, &output)
        .unwrap();

    let content = read_entry(&output, "META-INF/MANIFEST.MF");
    assert!(content.starts_with("Manifest-Version: 1.0\r\n"));
    assert!(content.contains("Main-Class: org.asamk.signal.Main\r\n"));
    assert!(content.contains("Enable-Native-Access: ALL-UNNAMED\r\n"));
}

#[test]
fn test_base_precedence() {
    let temp = TempDir::new().unwrap();
    let classpath = fixture(temp.path());
    let base = temp.path().join("app-0.13.0.jar");
    create_jar(
        &base,
        &[("org/asamk/Main.class", b"main"), ("shared.properties", b"from-base")],
    );

    let last = temp.path().join("last.jar");
    Assembler::new()
        .assemble(&classpath, Some(&base), &last)
        .unwrap();
    assert_eq!(read_entry(&last, "shared.properties"), "from-a");

    let first = temp.path().join("first.jar");
    Assembler::new()
        .with_base_precedence(BasePrecedence::First)
        .assemble(&classpath, Some(&base), &first)
        .unwrap();
    assert_eq!(read_entry(&first, "shared.properties"), "from-base");
}

#[test]
fn test_byte_identical_across_runs() {
    let temp = TempDir::new().unwrap();
    let mut classpath = fixture(temp.path());
    let classes = temp.path().join("classes");
    std::fs::create_dir_all(classes.join("org/asamk")).unwrap();
    std::fs::write(classes.join("org/asamk/Main.class"), b"main").unwrap();
    classpath.insert(0, ClasspathElement::Directory(classes));

    let assembler = Assembler::new().with_manifest(manifest());
    let one = temp.path().join("one.jar");
    let two = temp.path().join("two.jar");
    assembler.assemble(&classpath, None, &one).unwrap();
    assembler.assemble(&classpath, None, &two).unwrap();

    assert_eq!(std::fs::read(&one).unwrap(), std::fs::read(&two).unwrap());
}

#[test]
fn test_extra_exclusions() {
    let temp = TempDir::new().unwrap();
    let classpath = fixture(temp.path());
    let output = temp.path().join("app-all.jar");

    let filter = EntryFilter::metadata_with(["com/b/**"].as_slice()).unwrap();
    Assembler::new()
        .with_filter(filter)
        .assemble(&classpath, None, &output)
        .unwrap();

    assert!(!entry_names(&output).contains(&"com/b/B.class".to_string()));
}

#[test]
fn test_unreadable_element_leaves_no_output() {
    let temp = TempDir::new().unwrap();
    let broken = temp.path().join("broken.jar");
    std::fs::write(&broken, b"not a zip").unwrap();
    let output = temp.path().join("app-all.jar");

    let result = Assembler::new().assemble(&[ClasspathElement::Archive(broken)], None, &output);

    assert!(result.is_err());
    assert!(!output.exists());
}
