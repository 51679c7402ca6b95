// Tests for signature discovery and decoding

mod common;

use common::write_file;
use sigbrowse_core::signature::{find_sig_files, id_from_path, parse_sig_file};
use sigbrowse_core::{CheckType, ReconError, Signature, SignatureTable};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Extension filtering
// ============================================================================

#[test]
fn test_find_sig_files_by_extension() {
    let candidates = vec![
        PathBuf::from("sigs/a.yml"),
        PathBuf::from("sigs/b.yaml"),
        PathBuf::from("sigs/c.json"),
        PathBuf::from("sigs/README.md"),
    ];
    let found = find_sig_files(&candidates);
    assert_eq!(
        found,
        vec![PathBuf::from("sigs/a.yml"), PathBuf::from("sigs/b.yaml")]
    );
}

#[test]
fn test_find_sig_files_matches_substring_anywhere() {
    // Containment, not suffix: a directory segment is enough.
    let candidates = vec![PathBuf::from("rules.yaml.d/notes.txt")];
    assert_eq!(find_sig_files(&candidates), candidates);
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_parse_full_signature() {
    let yaml = r#"
id: test1
checks:
  - type: browser
    url:
      - "https://{domain}"
      - "https://{domain}/robots.txt"
    notes: "look for {company} staff"
  - type: google
    search:
      - "site:{domain} filetype:pdf"
  - type: shodan
    search: ["hostname:{hostname}"]
"#;
    let signature = Signature::from_yaml(yaml.as_bytes()).unwrap();

    assert_eq!(signature.id, "test1");
    assert_eq!(signature.checks.len(), 3);
    assert_eq!(signature.checks[0].kind, CheckType::Browser);
    assert_eq!(signature.checks[0].urls.len(), 2);
    assert_eq!(signature.checks[0].notes, "look for {company} staff");
    assert_eq!(signature.checks[1].kind, CheckType::Google);
    assert_eq!(signature.checks[1].searches, vec!["site:{domain} filetype:pdf"]);
    assert_eq!(signature.checks[2].kind, CheckType::Shodan);
}

#[test]
fn test_parse_check_type_defaults() {
    let yaml = r#"
checks:
  - url: ["https://a"]
  - type: ""
    url: ["https://b"]
  - type: browse
    url: ["https://c"]
  - type: whois
"#;
    let signature = Signature::from_yaml(yaml.as_bytes()).unwrap();
    let kinds: Vec<CheckType> = signature.checks.iter().map(|c| c.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            CheckType::Browser,
            CheckType::Browser,
            CheckType::Browser,
            CheckType::Unknown("whois".to_string()),
        ]
    );
}

#[test]
fn test_parse_null_fields() {
    let yaml = "id:\nchecks:\n  - type:\n    url:\n    notes:\n";
    let signature = Signature::from_yaml(yaml.as_bytes()).unwrap();
    assert_eq!(signature.id, "");
    assert_eq!(signature.checks.len(), 1);
    assert_eq!(signature.checks[0].kind, CheckType::Browser);
    assert!(signature.checks[0].urls.is_empty());
}

#[test]
fn test_parse_empty_document() {
    assert_eq!(Signature::from_yaml(b"").unwrap(), Signature::default());
    assert_eq!(Signature::from_yaml(b"  \n").unwrap(), Signature::default());
}

#[test]
fn test_parse_first_document_only() {
    let yaml = "id: x\nchecks:\n  - url: [\"https://a\"]\n---\n";
    let signature = Signature::from_yaml(yaml.as_bytes()).unwrap();
    assert_eq!(signature.id, "x");
    assert_eq!(signature.checks.len(), 1);

    let signature = Signature::from_yaml(b"id: x\n---\nid: y\n").unwrap();
    assert_eq!(signature.id, "x");
}

#[test]
fn test_parse_duplicate_key_is_rejected() {
    assert!(Signature::from_yaml(b"id: x\nid: y\n").is_err());
}

#[test]
fn test_parse_sig_file_decode_error_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.yml", "checks: [unclosed\n");

    match parse_sig_file(&path) {
        Err(ReconError::Decode { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn test_parse_sig_file_read_error_degrades() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.yml");

    let signature = parse_sig_file(&missing).unwrap();
    assert_eq!(signature, Signature::default());
}

// ============================================================================
// Signature table
// ============================================================================

#[test]
fn test_id_from_path() {
    assert_eq!(id_from_path(Path::new("recon/shodan-checks.yaml")), "shodan-checks");
    assert_eq!(id_from_path(Path::new("corp.yml")), "corp");
}

#[test]
fn test_table_derives_missing_ids() {
    let dir = TempDir::new().unwrap();
    let named = write_file(dir.path(), "named.yml", "id: explicit\nchecks: []\n");
    let unnamed = write_file(dir.path(), "recon/shodan-checks.yaml", "checks: []\n");

    let table = SignatureTable::load(&[named.clone(), unnamed.clone()]).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&named).unwrap().id, "explicit");
    assert_eq!(table.get(&unnamed).unwrap().id, "shodan-checks");
}

#[test]
fn test_table_load_aborts_on_decode_error() {
    let dir = TempDir::new().unwrap();
    let good = write_file(dir.path(), "good.yml", "id: good\n");
    let bad = write_file(dir.path(), "bad.yml", "id: [\n");

    assert!(SignatureTable::load(&[good, bad]).is_err());
}

#[test]
fn test_table_keys_are_sorted() {
    let mut table = SignatureTable::default();
    table.insert(PathBuf::from("b.yml"), Signature::default());
    table.insert(PathBuf::from("a.yml"), Signature::default());

    let keys: Vec<&PathBuf> = table.keys().collect();
    assert_eq!(keys, vec![&PathBuf::from("a.yml"), &PathBuf::from("b.yml")]);
}

#[test]
fn test_table_check_count() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.yml", "checks:\n  - url: [x]\n  - url: [y]\n");
    let b = write_file(dir.path(), "b.yml", "checks:\n  - url: [z]\n");

    let table = SignatureTable::load(&[a, b]).unwrap();
    assert_eq!(table.check_count(), 3);
}

#[test]
fn test_bundled_signatures_decode() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../signatures");
    let files = sigbrowse_core::expand_paths(&[root.to_string_lossy().to_string()]).unwrap();
    let table = SignatureTable::load(&find_sig_files(&files)).unwrap();

    assert_eq!(table.len(), 2);
    let ids: Vec<String> = table
        .keys()
        .map(|k| table.get(k).unwrap().id.clone())
        .collect();
    assert!(ids.contains(&"web-presence".to_string()));
    assert!(ids.contains(&"certificates".to_string()));
}
