use skyline_keys::{ImportResult, KeyImporter, KeyStore, KeyType};
use std::fs;
use tempfile::TempDir;

fn title_line(i: usize) -> String {
    format!("{:032x}={:032X}", i, i * 7 + 1)
}

#[test]
fn rejected_file_never_changes_installed_keys() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("title.keys");
    let importer = KeyImporter::new(KeyStore::new(tmp.path().join("keys")));

    fs::write(&source, format!("{}\n", title_line(0))).unwrap();
    assert_eq!(importer.import(&source, KeyType::Title), ImportResult::Success);
    let installed = importer.store().destination(KeyType::Title);
    let last_good = fs::read(&installed).unwrap();

    for valid_prefix in [0, 1, 5, 50] {
        let mut contents: String = (1..=valid_prefix).map(|i| title_line(i) + "\n").collect();
        // 31 hex chars on the left
        contents.push_str(&format!("{:031x}={:032x}\n", 1, 1));
        contents.push_str(&title_line(99));
        fs::write(&source, contents).unwrap();

        assert_eq!(
            importer.import(&source, KeyType::Title),
            ImportResult::InvalidKeys,
            "prefix of {} valid lines",
            valid_prefix
        );
        assert_eq!(fs::read(&installed).unwrap(), last_good);
        assert!(!importer.store().staging(KeyType::Title).exists());
    }
}

#[test]
fn title_and_prod_install_side_by_side() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("dump");
    fs::create_dir(&source).unwrap();
    fs::write(source.join("title.keys"), format!("{}\n", title_line(3))).unwrap();
    fs::write(
        source.join("prod.keys"),
        "; prod\n\nmaster_key_00 = 00112233445566778899aabbccddeeff\nkey_area_key_application_00=ff\n",
    )
    .unwrap();

    let store = KeyStore::new(tmp.path().join("keys"));
    let importer = KeyImporter::new(store.clone());
    let outcomes = importer.import_from_location(&source);

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result == ImportResult::Success));

    let installed = store.installed().unwrap();
    assert_eq!(installed.len(), 2);
    let prod = installed.iter().find(|k| k.key_type == KeyType::Prod).unwrap();
    assert_eq!(prod.entries, 2);
    assert_eq!(
        fs::read_to_string(store.destination(KeyType::Prod)).unwrap(),
        "master_key_00=00112233445566778899aabbccddeeff\nkey_area_key_application_00=ff\n"
    );
}
