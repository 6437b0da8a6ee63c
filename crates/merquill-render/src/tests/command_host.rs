use crate::*;
use futures::executor::block_on;
use serde_json::json;
use std::path::Path;

#[cfg(unix)]
const FAKE_MMDC: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -i) input="$2"; shift ;;
    -o) output="$2"; shift ;;
  esac
  shift
done
if grep -q bogus "$input"; then
  echo "Parse error on line 2: bogus" >&2
  exit 1
fi
printf '<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>' > "$output"
"#;

#[cfg(unix)]
fn write_fake_mmdc(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-mmdc");
    std::fs::write(&path, FAKE_MMDC).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn command_host_renders_through_the_program() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    let host = CommandHost::new(write_fake_mmdc(dir.path())).with_work_dir(work.clone());
    assert!(host.is_presentation_capable());

    block_on(host.configure(&json!({ "theme": "dark" }))).unwrap();
    let written = std::fs::read_to_string(work.join("engine-config.json")).unwrap();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&written).unwrap(),
        json!({ "theme": "dark" })
    );

    let svg = block_on(host.render("c1", "graph TD\n  A-->B\n")).unwrap();
    assert!(svg.starts_with("<svg"), "{svg}");
    assert!(work.join("c1.svg").exists());
    host.remove_container("c1");
    assert!(!work.join("c1.svg").exists());
    assert!(!work.join("c1.mmd").exists());

    let err = block_on(host.render("c2", "graph TD\n  bogus\n")).unwrap_err();
    assert_eq!(
        err,
        HostError::Rejected {
            message: "Parse error on line 2: bogus".to_string()
        }
    );

    let renderer = SafeRenderer::new(host);
    let ok = block_on(renderer.render("pie\n  \"a\": 1\n", Some("pie"), RenderOptions::default()))
        .unwrap();
    assert_eq!(ok.artifact().unwrap().container_id, "pie");

    let failed =
        block_on(renderer.render("flowchart LR\n  bogus", None, RenderOptions::default())).unwrap();
    assert!(failed.fallback().unwrap().contains("Parse error on line 2: bogus"));
}

#[test]
fn missing_program_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let host = CommandHost::new(dir.path().join("no-such-mmdc")).with_work_dir(dir.path());
    let err = block_on(host.render("c1", "graph TD\n  A-->B\n")).unwrap_err();
    assert!(matches!(err, HostError::Unavailable { .. }), "{err:?}");
}

#[test]
fn default_command_host_uses_mmdc() {
    let host = CommandHost::default();
    assert_eq!(host.program(), Path::new(command_host::DEFAULT_PROGRAM));
    assert!(host.work_dir().ends_with("merquill"));
}
