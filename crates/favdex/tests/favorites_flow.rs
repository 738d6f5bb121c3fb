use favdex::favorites::{FavoritesIndex, IndexSettings, Toggle};
use favdex::model::{far_future, Tutorial};
use favdex::presenter::{Accessory, EditingStyle, ListPresenter};
use favdex::search::fs::FsIndex;
use favdex::search::memory::{IndexOp, MemIndex};
use favdex::search::SearchIndex;
use favdex::source::{JsonFileSource, TutorialSource};
use favdex::store::fs_backend::FsBackend;
use favdex::store::mem_backend::MemBackend;
use favdex::store::load_persisted;
use std::fs;
use tempfile::TempDir;

fn items() -> Vec<Tutorial> {
    vec![Tutorial::new(0, "A", "a"), Tutorial::new(1, "B", "b")]
}

#[test]
fn favorite_then_unfavorite_scenario() {
    let items = items();
    let mut favs =
        FavoritesIndex::new(MemBackend::new(), MemIndex::new(), IndexSettings::default());

    assert_eq!(favs.toggle_favorite(1, &items[1]).unwrap(), Toggle::Favorited);
    assert_eq!(favs.favorites().positions(), &[1]);

    assert_eq!(
        favs.toggle_favorite(1, &items[1]).unwrap(),
        Toggle::Unfavorited
    );
    assert!(favs.favorites().is_empty());

    let calls = favs.search_index().calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        IndexOp::Index(records) => {
            assert_eq!(records[0].identifier, "1");
            assert_eq!(records[0].title, "B");
            assert_eq!(records[0].description, "b");
            assert_eq!(records[0].expiration, far_future());
        }
        other => panic!("expected upsert, got {:?}", other),
    }
    assert_eq!(calls[1], IndexOp::Delete(vec!["1".to_string()]));

    assert!(load_persisted(favs.backend(), "favorites").is_empty());
}

#[test]
fn persisted_membership_survives_restart() {
    let dir = TempDir::new().unwrap();
    let items = vec![
        Tutorial::new(0, "A", "a"),
        Tutorial::new(1, "B", "b"),
        Tutorial::new(2, "C", "c"),
    ];

    {
        let mut favs = FavoritesIndex::new(
            FsBackend::new(dir.path().to_path_buf()),
            FsIndex::new(dir.path()),
            IndexSettings::default(),
        );
        favs.toggle_favorite(2, &items[2]).unwrap();
        favs.toggle_favorite(0, &items[0]).unwrap();
        favs.toggle_favorite(1, &items[1]).unwrap();
        favs.toggle_favorite(0, &items[0]).unwrap();
    }

    let favs = FavoritesIndex::new(
        FsBackend::new(dir.path().to_path_buf()),
        FsIndex::new(dir.path()),
        IndexSettings::default(),
    );
    assert!(!favs.is_favorite(0));
    assert!(favs.is_favorite(1));
    assert!(favs.is_favorite(2));
    assert_eq!(favs.favorites().len(), 2);

    let mut indexed = favs
        .search_index()
        .indexed_identifiers("com.hackingwithswift")
        .unwrap();
    indexed.sort();
    assert_eq!(indexed, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn custom_settings_flow_into_records_and_storage() {
    let settings = IndexSettings {
        favorites_key: "starred".to_string(),
        domain_identifier: "org.example".to_string(),
        content_type: "public.plain-text".to_string(),
    };
    let mut favs = FavoritesIndex::new(MemBackend::new(), MemIndex::new(), settings);
    favs.toggle_favorite(0, &items()[0]).unwrap();

    assert_eq!(favs.backend().record("starred"), Some(vec![0]));
    assert_eq!(favs.backend().record("favorites"), None);
    let record = favs.search_index().record("0").unwrap();
    assert_eq!(record.domain_identifier, "org.example");
    assert_eq!(record.content_type, "public.plain-text");
}

#[test]
fn presenter_over_json_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tutorials.json");
    fs::write(
        &path,
        r#"[[["Project 1","Storm Viewer"],["Project 2","Guess the Flag"]],[["Project 3","Social Media"]]]"#,
    )
    .unwrap();

    let source = JsonFileSource::new(&path);
    assert_eq!(source.load_items().unwrap().len(), 3);

    let favorites =
        FavoritesIndex::new(MemBackend::new(), MemIndex::new(), IndexSettings::default());
    let mut presenter =
        ListPresenter::from_source(&source, favorites, "https://hackingwithswift.com/read");

    assert_eq!(presenter.editing_style(2), EditingStyle::Insert);
    presenter.commit_edit(2, EditingStyle::Insert).unwrap();

    let rows = presenter.rows();
    assert_eq!(rows[2].accessory, Accessory::Checkmark);
    assert_eq!(rows[2].title, "Project 3");
    assert_eq!(
        presenter.activate(2).unwrap(),
        "https://hackingwithswift.com/read/3"
    );
}

#[test]
fn load_failure_is_an_empty_list() {
    let favorites =
        FavoritesIndex::new(MemBackend::new(), MemIndex::new(), IndexSettings::default());
    let presenter = ListPresenter::from_source(
        &JsonFileSource::new("/nonexistent/tutorials.json"),
        favorites,
        "https://hackingwithswift.com/read",
    );

    assert_eq!(presenter.row_count(), 0);
    for position in 0..5 {
        assert!(!presenter.is_favorite(position));
    }
}
