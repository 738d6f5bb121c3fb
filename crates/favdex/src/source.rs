//! # Tutorial Sources
//!
//! A [`TutorialSource`] produces the ordered tutorial list once, at startup or
//! on reload. Positions are assigned here, in list order, starting at zero.
//!
//! Loading is one-shot and non-streaming, so sources simply return a
//! `Result`. Callers that must keep going regardless use [`load_or_empty`],
//! which turns any failure into an empty list plus a warning.
//!
//! ## JSON Shapes
//!
//! [`JsonFileSource`] accepts either a flat array or an array of sections,
//! and each entry as an object or a two-element array:
//!
//! ```text
//! [{"title": "Project 1", "subtitle": "UITableView"}, ["Project 2", "UIButton"]]
//! [[{"title": "Project 1", "subtitle": "..."}], [["Project 2", "..."]]]
//! ```
//!
//! Sections are flattened in order before positions are assigned.

use crate::error::{FavdexError, Result};
use crate::model::Tutorial;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub trait TutorialSource {
    fn load_items(&self) -> Result<Vec<Tutorial>>;
}

/// Load items, falling back to an empty list when the source fails.
pub fn load_or_empty<S: TutorialSource + ?Sized>(source: &S) -> Vec<Tutorial> {
    match source.load_items() {
        Ok(items) => {
            log::debug!("loaded {} tutorial(s)", items.len());
            items
        }
        Err(e) => {
            log::warn!("failed to load tutorials, continuing with an empty list: {}", e);
            Vec::new()
        }
    }
}

const BUILTIN: [(&str, &str); 8] = [
    (
        "Project 1: Storm Viewer, Constants and Variables",
        "UITableView, UIImageView, FileManager, storyboards",
    ),
    (
        "Project 2: Guess the Flag",
        "@2x and @3x images, asset catalogs, integers, doubles, floats, operators (+= and -=), UIButton, enums, CALayer, UIColor, random numbers, actions, string interpolation, UIAlertController",
    ),
    (
        "Project 3: Social Media",
        "UIBarButtonItem, UIActivityViewController, the Social framework, URL",
    ),
    (
        "Project 4: Easy Browser",
        "loadView(), WKWebView, delegation, classes and structs, URLRequest, UIToolbar, UIProgressView., key-value observing",
    ),
    (
        "Project 5: Word Scramble",
        "Closures, method return values, booleans, NSRange",
    ),
    (
        "Project 6: Auto Layout",
        "Get to grips with Auto Layout using practical examples and code",
    ),
    (
        "Project 7: Whitehouse Petitions",
        "JSON, Data, UITabBarController",
    ),
    (
        "Project 8: 7 Swifty Words",
        "addTarget(), enumerated(), count, index(of:), property observers, range operators.",
    ),
];

/// The compiled-in tutorial list.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSource;

impl TutorialSource for BuiltinSource {
    fn load_items(&self) -> Result<Vec<Tutorial>> {
        Ok(BUILTIN
            .iter()
            .enumerate()
            .map(|(position, (title, subtitle))| Tutorial::new(position, *title, *subtitle))
            .collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Object { title: String, subtitle: String },
    Pair(String, String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Flat(Vec<Entry>),
    Sections(Vec<Vec<Entry>>),
}

/// A tutorial list read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Result<Vec<Tutorial>> {
        let document: Document =
            serde_json::from_str(content).map_err(FavdexError::Serialization)?;
        let entries: Vec<Entry> = match document {
            Document::Flat(entries) => entries,
            Document::Sections(sections) => sections.into_iter().flatten().collect(),
        };
        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| match entry {
                Entry::Object { title, subtitle } | Entry::Pair(title, subtitle) => {
                    Tutorial::new(position, title, subtitle)
                }
            })
            .collect())
    }
}

impl TutorialSource for JsonFileSource {
    fn load_items(&self) -> Result<Vec<Tutorial>> {
        let content = fs::read_to_string(&self.path).map_err(FavdexError::Io)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl TutorialSource for FailingSource {
        fn load_items(&self) -> Result<Vec<Tutorial>> {
            Err(FavdexError::Store("unavailable".to_string()))
        }
    }

    #[test]
    fn builtin_positions_follow_list_order() {
        let items = BuiltinSource.load_items().unwrap();
        assert_eq!(items.len(), 8);
        for (idx, item) in items.iter().enumerate() {
            assert_eq!(item.position, idx);
        }
        assert_eq!(items[6].title, "Project 7: Whitehouse Petitions");
    }

    #[test]
    fn parses_flat_objects() {
        let items =
            JsonFileSource::parse(r#"[{"title":"A","subtitle":"a"},{"title":"B","subtitle":"b"}]"#)
                .unwrap();
        assert_eq!(
            items,
            vec![Tutorial::new(0, "A", "a"), Tutorial::new(1, "B", "b")]
        );
    }

    #[test]
    fn parses_sections_and_pairs() {
        let items =
            JsonFileSource::parse(r#"[[["A","a"]],[{"title":"B","subtitle":"b"},["C","c"]]]"#)
                .unwrap();
        let titles: Vec<_> = items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(items[2].position, 2);
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        assert!(JsonFileSource::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(JsonFileSource::parse(r#"{"title":"A"}"#).is_err());
        assert!(JsonFileSource::parse(r#"[{"title":"A"}]"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let source = JsonFileSource::new("/nonexistent/favdex/tutorials.json");
        assert!(matches!(source.load_items(), Err(FavdexError::Io(_))));
    }

    #[test]
    fn load_or_empty_swallows_failures() {
        assert!(load_or_empty(&FailingSource).is_empty());
        assert_eq!(load_or_empty(&BuiltinSource).len(), 8);
    }
}
