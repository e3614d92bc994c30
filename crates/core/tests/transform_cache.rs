//! Tests for the artifact transform and its cache

use jarsmith_api::{ExclusionRule, ExclusionRules};
use jarsmith_core::archive::{ArtifactTransform, TransformCache, TransformOutcome};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
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

fn read_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (entry.name().to_string(), content)
        })
        .collect()
}

fn libsignal_rules() -> ExclusionRules {
    ExclusionRules::new(vec![ExclusionRule::new(
        "libsignal-client",
        [
            "libsignal_jni_testing_amd64.so",
            "signal_jni_testing_amd64.dll",
            "libsignal_jni_testing_amd64.dylib",
            "libsignal_jni_testing_aarch64.dylib",
        ],
    )])
}

fn libsignal_jar(dir: &Path) -> PathBuf {
    let jar = dir.join("libsignal-client-0.52.5.jar");
    create_jar(
        &jar,
        &[
            ("libsignal_jni_amd64.so", b"prod"),
            ("libsignal_jni_testing_amd64.so", b"test"),
            ("signal_jni_testing_amd64.dll", b"test"),
            ("org/signal/libsignal/Native.class", b"\xCA\xFE\xBA\xBE"),
        ],
    );
    jar
}

#[test]
fn test_excluded_entries_removed() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());

    let cache = TransformCache::new(temp.path().join("cache"), libsignal_rules());
    let outcome = cache.get_or_transform(&jar).unwrap();

    let TransformOutcome::Rewritten(output) = outcome else {
        panic!("expected a rewrite");
    };
    assert!(output.starts_with(temp.path().join("cache")));
    assert_eq!(output.file_name().unwrap(), "libsignal-client-0.52.5.jar");

    let names: Vec<String> = read_entries(&output).into_keys().collect();
    assert_eq!(
        names,
        vec![
            "libsignal_jni_amd64.so".to_string(),
            "org/signal/libsignal/Native.class".to_string(),
        ]
    );
}

#[test]
fn test_transform_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());
    let transform = ArtifactTransform::new(libsignal_rules());

    let once = transform
        .transform(&jar, &temp.path().join("once"))
        .unwrap()
        .into_path();
    let twice = transform
        .transform(&once, &temp.path().join("twice"))
        .unwrap()
        .into_path();

    assert_eq!(read_entries(&once), read_entries(&twice));
}

#[test]
fn test_transform_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());
    let transform = ArtifactTransform::new(libsignal_rules());

    let a = transform.transform(&jar, &temp.path().join("a")).unwrap();
    let b = transform.transform(&jar, &temp.path().join("b")).unwrap();

    assert_eq!(
        std::fs::read(a.path()).unwrap(),
        std::fs::read(b.path()).unwrap()
    );
}

#[test]
fn test_cache_survives_new_instance() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());
    let base = temp.path().join("cache");

    let first = TransformCache::new(base.clone(), libsignal_rules());
    let output = first.get_or_transform(&jar).unwrap().into_path();
    let modified = std::fs::metadata(&output).unwrap().modified().unwrap();

    let second = TransformCache::new(base, libsignal_rules());
    let again = second.get_or_transform(&jar).unwrap().into_path();

    assert_eq!(output, again);
    assert_eq!(second.rewrites(), 0);
    assert_eq!(second.hits(), 1);
    assert_eq!(std::fs::metadata(&again).unwrap().modified().unwrap(), modified);
}

#[test]
fn test_changed_rule_is_new_entry() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());
    let base = temp.path().join("cache");

    let a = TransformCache::new(base.clone(), libsignal_rules());
    let b = TransformCache::new(
        base,
        ExclusionRules::new(vec![ExclusionRule::new(
            "libsignal-client",
            ["libsignal_jni_amd64.so"],
        )]),
    );

    let out_a = a.get_or_transform(&jar).unwrap().into_path();
    let out_b = b.get_or_transform(&jar).unwrap().into_path();

    assert_ne!(out_a, out_b);
    assert_eq!(b.stats().total_entries, 2);
}

#[test]
fn test_concurrent_requests_rewrite_once() {
    let temp = TempDir::new().unwrap();
    let jar = libsignal_jar(temp.path());
    let cache = Arc::new(TransformCache::new(
        temp.path().join("cache"),
        libsignal_rules(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let jar = jar.clone();
            std::thread::spawn(move || cache.get_or_transform(&jar).unwrap())
        })
        .collect();

    let outcomes: Vec<TransformOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(outcomes.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(cache.rewrites(), 1);
    assert_eq!(cache.hits(), 7);
}

#[test]
fn test_transform_all_isolates_failures() {
    let temp = TempDir::new().unwrap();
    let good = libsignal_jar(temp.path());
    let broken = temp.path().join("libsignal-client-broken.jar");
    std::fs::write(&broken, b"not a zip").unwrap();
    let untouched = temp.path().join("slf4j-api-2.0.9.jar");
    create_jar(&untouched, &[("org/slf4j/Logger.class", b"x")]);

    let cache = TransformCache::new(temp.path().join("cache"), libsignal_rules());
    let results = cache.transform_all(&[good.clone(), broken.clone(), untouched.clone()]);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].0, good);
    assert!(matches!(results[0].1, Ok(TransformOutcome::Rewritten(_))));
    assert_eq!(results[1].0, broken);
    assert!(results[1].1.is_err());
    assert_eq!(
        results[2].1.as_ref().unwrap(),
        &TransformOutcome::Unchanged(untouched)
    );
}
