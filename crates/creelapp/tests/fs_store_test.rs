use creelapp::model::{CatchRecord, LureType, RecordId, Stored, WeightUnit};
use creelapp::store::backend::StorageBackend;
use creelapp::store::fs::FileStore;
use creelapp::store::fs_backend::FsBackend;
use chrono::{NaiveDate, NaiveTime};
use std::fs;
use tempfile::TempDir;

fn draft(species: &str) -> CatchRecord {
    CatchRecord {
        id: RecordId(0),
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().into(),
        time: NaiveTime::from_hms_opt(6, 30, 0).unwrap().into(),
        species: species.to_string(),
        length_cm: Stored::Value(42.0),
        weight: Stored::Value(1.2),
        weight_unit: WeightUnit::Kg.into(),
        spot: "Le Havre".to_string(),
        lure_type: LureType::Jig.into(),
        lure_name: "X".to_string(),
        conditions: String::new(),
        released: true.into(),
        comment: String::new(),
        photo_file: String::new(),
    }
}

#[test]
fn test_table_written_with_header_and_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());

    store.append(draft("Bar")).unwrap();
    store.append(draft("Bass")).unwrap();

    let text = fs::read_to_string(dir.path().join("catches.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "id;date;time;species;length_cm;weight;weight_unit;spot;lure_type;lure_name;conditions;released;comment;photo_file"
    );
    assert_eq!(lines[1], "1;2024-06-01;06:30;Bar;42.0;1.2;kg;Le Havre;Jig;X;;Yes;;");
    assert!(lines[2].starts_with("2;"));
}

#[test]
fn test_no_tmp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    store.append(draft("Bar")).unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_legacy_table_is_repaired_on_load() {
    let dir = TempDir::new().unwrap();
    // Older layout: French headers, no id, no conditions or photo columns
    fs::write(
        dir.path().join("catches.csv"),
        "date;heure;espece;taille_cm;poids;unite_poids;spot;type_leurre;nom_leurre;remis_a_leau;commentaire\n\
         01/06/2024;6:30;Bar;42;1,2;kg;Le Havre;Jig;X;Oui;\n\
         02/06/2024;7:15;Bass;38;900;g;Etretat;Spinner;Y;Non;big one\n",
    )
    .unwrap();

    let mut store = FileStore::new(dir.path().to_path_buf());
    let records = store.load().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId(1));
    assert_eq!(records[1].id, RecordId(2));
    assert_eq!(records[0].species, "Bar");
    assert_eq!(records[0].released, Stored::Value(true));
    assert_eq!(records[1].weight_unit, Stored::Value(WeightUnit::G));
    // Unknown lure types are kept as written
    assert_eq!(records[1].lure_type, Stored::Raw("Spinner".to_string()));
    assert_eq!(records[1].comment, "big one");
    assert_eq!(records[1].conditions, "");

    let report = store.last_report().unwrap();
    assert_eq!(report.assigned_ids, 2);
    assert!(report.backfilled_columns.contains(&"conditions"));
    assert!(report.backfilled_columns.contains(&"photo_file"));
    // "1,2" is not a number
    assert_eq!(records[0].weight, Stored::Raw("1,2".to_string()));
    assert_eq!(report.unreadable_values, 2);
}

#[test]
fn test_first_write_upgrades_legacy_layout() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("catches.csv"),
        "date;time;species\n2024-06-01;06:30;Bar\n",
    )
    .unwrap();

    let mut store = FileStore::new(dir.path().to_path_buf());
    store.append(draft("Bass")).unwrap();

    let text = fs::read_to_string(dir.path().join("catches.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("id;date;time;species;length_cm"));
    assert_eq!(lines[1], "1;2024-06-01;06:30;Bar;;;;;;;;;;");
    assert!(lines[2].starts_with("2;"));
}

#[test]
fn test_unrelated_write_keeps_legacy_cells() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("catches.csv"),
        "date;heure;espece;taille_cm;type_leurre;remis_a_leau\n;;Bar;;Spinner;\n",
    )
    .unwrap();

    let mut store = FileStore::new(dir.path().to_path_buf());
    store.append(draft("Bass")).unwrap();

    let text = fs::read_to_string(dir.path().join("catches.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // Empty cells stay empty and the unknown lure type is untouched
    assert_eq!(lines[1], "1;;;Bar;;;;;Spinner;;;;;");
    assert!(lines[2].starts_with("2;2024-06-01;06:30;Bass;42.0;1.2;kg;"));

    let records = FileStore::new(dir.path().to_path_buf()).load().unwrap();
    assert!(records[0].date.is_empty());
    assert_eq!(records[0].lure_type, Stored::Raw("Spinner".to_string()));
}

#[test]
fn test_update_and_delete_keep_order() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    for species in ["A", "B", "C"] {
        store.append(draft(species)).unwrap();
    }

    store.update(RecordId(2), draft("Bee")).unwrap();
    store.delete(RecordId(1)).unwrap();

    // A second store sees what the first one wrote
    let mut reopened = FileStore::new(dir.path().to_path_buf());
    let records = reopened.load().unwrap();
    let species: Vec<&str> = records.iter().map(|r| r.species.as_str()).collect();
    assert_eq!(species, vec!["Bee", "C"]);
    assert_eq!(records[0].id, RecordId(2));
}

#[test]
fn test_photos_stored_under_data_dir() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf()).with_photos_dir("pics");

    let reference = backend.write_photo("20240601_070000_bar.jpg", b"jpeg").unwrap();
    assert_eq!(reference, "pics/20240601_070000_bar.jpg");
    assert!(backend.photo_exists(&reference));
    assert_eq!(
        fs::read(dir.path().join("pics").join("20240601_070000_bar.jpg")).unwrap(),
        b"jpeg"
    );
    assert!(!backend.photo_exists("pics/missing.jpg"));
}
