use merquill_core::{DiagramVariant, ValidateOptions, validate};
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn list_fixture_descriptions(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if path
                .extension()
                .is_some_and(|e| e == "json" || e == "yaml" || e == "yml")
            {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn decode(path: &Path, text: &str) -> DiagramVariant {
    let decoded = if path.extension().is_some_and(|e| e == "json") {
        DiagramVariant::from_json_str(text)
    } else {
        DiagramVariant::from_yaml_str(text)
    };
    decoded.unwrap_or_else(|e| panic!("failed to decode {}: {e}", path.display()))
}

#[test]
fn fixtures_match_golden_notation() {
    let fixtures = list_fixture_descriptions(&fixtures_root());
    assert!(
        !fixtures.is_empty(),
        "no fixtures found under {}",
        fixtures_root().display()
    );

    for path in fixtures {
        let text = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        let result = decode(&path, &text).serialize();

        let golden_path = path.with_extension("mmd");
        let golden = std::fs::read_to_string(&golden_path)
            .unwrap_or_else(|_| panic!("missing golden notation {}", golden_path.display()));

        assert_eq!(
            result.definition,
            golden,
            "notation mismatch for {}",
            path.display()
        );
        assert!(result.is_valid, "{} is not valid", path.display());
        assert!(
            validate(&golden, ValidateOptions::strict()).warnings.is_empty(),
            "golden {} has validator warnings",
            golden_path.display()
        );
    }
}
