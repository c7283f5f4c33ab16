//! End-to-end pipeline tests against a stub toolchain.
//!
//! A small shell script stands in for the Go toolchain: it honors the `-o`
//! flag and either writes a fake binary or fails for selected targets, so
//! the orchestration loop, partial-failure policy and composite merging can
//! be exercised without Go installed.

#![cfg(unix)]

use std::fs::File;
use std::io::Read;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use gowheel::builder::{Classification, PlatformOutcome, WheelBuilder};
use gowheel::error::{Error, FatalError};
use gowheel::platform::PlatformCatalog;
use gowheel::settings::SettingsBuilder;

/// Stub toolchain that writes `binary <GOOS> <GOARCH>` to the `-o` path.
const STUB_GO_OK: &str = r#"#!/bin/sh
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
printf 'binary %s %s' "$GOOS" "$GOARCH" > "$out"
"#;

/// Stub toolchain that fails for darwin targets only.
const STUB_GO_FAIL_DARWIN: &str = r#"#!/bin/sh
if [ "$GOOS" = "darwin" ]; then
  echo "unsupported target: $GOOS/$GOARCH" >&2
  exit 1
fi
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  prev="$arg"
done
printf 'binary %s %s' "$GOOS" "$GOARCH" > "$out"
"#;

/// Stub toolchain that always fails.
const STUB_GO_FAIL_ALL: &str = r#"#!/bin/sh
echo "compiler exploded" >&2
exit 1
"#;

/// Stub merge utility that concatenates the input slices.
const STUB_LIPO: &str = r#"#!/bin/sh
out=""
take=0
files=""
for arg in "$@"; do
  if [ "$take" = "1" ]; then out="$arg"; take=0; continue; fi
  case "$arg" in
    -output) take=1 ;;
    -create) ;;
    *) files="$files $arg" ;;
  esac
done
cat $files > "$out"
"#;

fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn write_go_module(dir: &Path) -> PathBuf {
    let module_dir = dir.join("mytool");
    std::fs::create_dir_all(&module_dir).unwrap();
    std::fs::write(
        module_dir.join("go.mod"),
        "module example.com/mytool\n\ngo 1.22\n",
    )
    .unwrap();
    std::fs::write(
        module_dir.join("main.go"),
        "package main\n\nfunc main() {}\n",
    )
    .unwrap();
    module_dir
}

fn dist_entries(output_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn both_platforms_succeed_end_to_end() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_OK);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .version("1.0.0")
        .platforms(vec!["linux-amd64".into(), "darwin-arm64".into()])
        .output_dir(&output_dir)
        .go_binary(&go)
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();

    assert_eq!(summary.classify(), Classification::FullSuccess);
    assert_eq!(summary.built_count(), 2);
    assert_eq!(
        dist_entries(&output_dir),
        vec![
            "mytool-1.0.0-py3-none-macosx_11_0_arm64.whl".to_string(),
            "mytool-1.0.0-py3-none-manylinux_2_17_x86_64.whl".to_string(),
        ]
    );

    // The bundled binary carries what the toolchain produced for the target.
    let wheel = output_dir.join("mytool-1.0.0-py3-none-macosx_11_0_arm64.whl");
    let mut archive = zip::ZipArchive::new(File::open(wheel).unwrap()).unwrap();
    let mut binary = String::new();
    archive
        .by_name("mytool/bin/mytool")
        .unwrap()
        .read_to_string(&mut binary)
        .unwrap();
    assert_eq!(binary, "binary darwin arm64");
}

#[tokio::test]
async fn one_broken_target_does_not_block_the_others() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_FAIL_DARWIN);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .version("1.0.0")
        .platforms(vec![
            "linux-amd64".into(),
            "darwin-amd64".into(),
            "linux-arm64".into(),
        ])
        .output_dir(&output_dir)
        .go_binary(&go)
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();

    assert_eq!(summary.classify(), Classification::PartialSuccess);
    assert_eq!(summary.built_count(), 2);
    assert_eq!(summary.attempted(), 3);
    assert_eq!(dist_entries(&output_dir).len(), 2);

    // The diagnostic text is carried verbatim.
    let failed = summary
        .outcomes()
        .iter()
        .find(|o| !o.is_built())
        .unwrap();
    assert_eq!(failed.specifier(), "darwin-amd64");
    match failed {
        PlatformOutcome::Failed { reason, .. } => {
            assert!(reason.contains("unsupported target: darwin/amd64"));
        }
        PlatformOutcome::Built { .. } => unreachable!(),
    }
}

#[tokio::test]
async fn all_targets_failing_produces_no_wheels() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_FAIL_ALL);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .platforms(vec!["linux-amd64".into(), "windows-amd64".into()])
        .output_dir(&output_dir)
        .go_binary(&go)
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();

    assert_eq!(summary.classify(), Classification::AllFailed);
    assert_eq!(summary.built_count(), 0);
    assert!(dist_entries(&output_dir).is_empty());
}

#[tokio::test]
async fn unknown_platform_fails_before_any_compilation() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    // A stub that records being invoked at all.
    let marker = work.path().join("invoked");
    let script = format!("#!/bin/sh\ntouch {}\n", marker.display());
    let go = write_stub(work.path(), "go", &script);

    let settings = SettingsBuilder::new(&module_dir)
        .platforms(vec!["linux-amd64".into(), "plan9-mips".into()])
        .output_dir(work.path().join("dist"))
        .go_binary(&go)
        .build()
        .unwrap();

    let err = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Fatal(FatalError::UnknownPlatform { ref specifier }) if specifier == "plan9-mips"
    ));
    assert!(!marker.exists(), "no toolchain may run after a fatal input error");
}

#[tokio::test]
async fn directory_without_go_mod_is_rejected() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = work.path().join("not-a-module");
    std::fs::create_dir_all(&module_dir).unwrap();
    let go = write_stub(work.path(), "go", STUB_GO_OK);

    let settings = SettingsBuilder::new(&module_dir)
        .go_binary(&go)
        .build()
        .unwrap();
    let err = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fatal(FatalError::NotAGoModule { .. })));
}

#[tokio::test]
async fn invalid_version_is_rejected_before_compilation() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_OK);

    let settings = SettingsBuilder::new(&module_dir)
        .version("1.0-beta")
        .go_binary(&go)
        .build()
        .unwrap();
    let err = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fatal(FatalError::InvalidVersion { .. })));
}

#[tokio::test]
async fn universal_target_merges_both_slices() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_OK);
    let lipo = write_stub(work.path(), "lipo", STUB_LIPO);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .version("1.0.0")
        .platforms(vec!["darwin-universal".into()])
        .output_dir(&output_dir)
        .go_binary(&go)
        .lipo_binary(&lipo)
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();

    assert_eq!(summary.classify(), Classification::FullSuccess);
    assert_eq!(
        dist_entries(&output_dir),
        vec!["mytool-1.0.0-py3-none-macosx_11_0_universal2.whl".to_string()]
    );

    // The stub merge concatenates: amd64 slice first, then arm64.
    let wheel = output_dir.join("mytool-1.0.0-py3-none-macosx_11_0_universal2.whl");
    let mut archive = zip::ZipArchive::new(File::open(wheel).unwrap()).unwrap();
    let mut merged = String::new();
    archive
        .by_name("mytool/bin/mytool")
        .unwrap()
        .read_to_string(&mut merged)
        .unwrap();
    assert_eq!(merged, "binary darwin amd64binary darwin arm64");
}

#[tokio::test]
async fn universal_target_fails_when_the_merge_tool_is_missing() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_OK);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .platforms(vec!["darwin-universal".into()])
        .output_dir(&output_dir)
        .go_binary(&go)
        .lipo_binary(work.path().join("no-such-lipo"))
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();

    assert_eq!(summary.classify(), Classification::AllFailed);
    assert!(dist_entries(&output_dir).is_empty());
}

#[tokio::test]
async fn windows_target_bundles_a_suffixed_binary() {
    let work = tempfile::tempdir().unwrap();
    let module_dir = write_go_module(work.path());
    let go = write_stub(work.path(), "go", STUB_GO_OK);
    let output_dir = work.path().join("dist");

    let settings = SettingsBuilder::new(&module_dir)
        .version("2.0.0")
        .platforms(vec!["windows-arm64".into()])
        .output_dir(&output_dir)
        .go_binary(&go)
        .build()
        .unwrap();

    let builder = WheelBuilder::new(settings, PlatformCatalog::builtin())
        .await
        .unwrap();
    let summary = builder.build_all().await.unwrap();
    assert_eq!(summary.classify(), Classification::FullSuccess);

    let wheel = output_dir.join("mytool-2.0.0-py3-none-win_arm64.whl");
    let mut archive = zip::ZipArchive::new(File::open(wheel).unwrap()).unwrap();
    assert!(archive.by_name("mytool/bin/mytool.exe").is_ok());
}
