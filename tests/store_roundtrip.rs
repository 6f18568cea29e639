// Whole-table persistence through both backends.
use std::fs;
use std::path::Path;

use library_tracker::{open_store, Book, BookStatus, BookStore};

fn sample_books() -> Vec<Book> {
    let mut issued = Book::new("0101", "Dune", "Frank Herbert");
    issued.status = BookStatus::Issued;
    issued.issued_to = Some("Alice".to_string());

    vec![
        issued,
        Book::new("102", "Emma, a Novel", "Jane Austen"),
        Book::new("102", "Emma (duplicate id)", "Jane Austen"),
        Book::new("A-7", "Quoted \"Title\"", "Anonymous"),
    ]
}

fn assert_round_trip(path: &Path) {
    let store = open_store(path);
    store.initialize().expect("initialize");
    assert!(store.load().expect("empty load").is_empty());

    let books = sample_books();
    store.save(&books).expect("save");
    let loaded = store.load().expect("load");
    assert_eq!(loaded, books);

    store.save(&loaded).expect("save again");
    assert_eq!(store.load().expect("reload"), books);
}

#[test]
fn csv_round_trip_preserves_rows_and_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert_round_trip(&temp.path().join("library_data.csv"));
}

#[test]
fn sqlite_round_trip_preserves_rows_and_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    assert_round_trip(&temp.path().join("library_data.sqlite"));
}

#[test]
fn csv_save_of_unchanged_load_is_byte_identical() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("library_data.csv");
    let original = "BookID,Title,Author,Status,IssuedTo\n\
                    101,Dune,Herbert,Issued,Alice\n\
                    102,Emma,Austen,Available,None\n";
    fs::write(&path, original).expect("seed");

    let store = open_store(&path);
    let books = store.load().expect("load");
    store.save(&books).expect("save");

    assert_eq!(fs::read_to_string(&path).expect("read"), original);
}

#[test]
fn missing_file_loads_empty_without_creating_it() {
    let temp = tempfile::tempdir().expect("tempdir");
    for name in ["absent.csv", "absent.sqlite"] {
        let path = temp.path().join(name);
        let store = open_store(&path);
        assert!(store.load().expect("load").is_empty());
        assert!(!path.exists());
    }
}

#[test]
fn initialize_creates_missing_directories_and_keeps_existing_data() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("dir").join("library_data.csv");
    let store = open_store(&path);

    store.initialize().expect("initialize");
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "BookID,Title,Author,Status,IssuedTo\n"
    );

    store.save(&sample_books()).expect("save");
    store.initialize().expect("initialize again");
    assert_eq!(store.load().expect("load").len(), 4);
}
