//! Pure rendering of search results into owned fragments.
//!
//! Every function here is a stateless transformation of its inputs: the
//! caller passes the record and the reading lists in and gets a constructed
//! fragment back, so there is no ambient shared state to mutate.

use std::fmt;

use crate::{api::covers::CoverImage, api::open_library::SearchDoc, lists::ReadingLists};

/// The only fields displayed for a search result, in render order.
pub const FIELDS: [(&str, Field); 5] = [
    ("Title", Field::Title),
    ("Author", Field::Author),
    ("Year published", Field::YearPublished),
    ("Genres", Field::Genres),
    ("Number of pages", Field::PageCount),
];

/// A displayable attribute of a [`SearchDoc`].
#[derive(Copy, Clone)]
pub enum Field {
    /// Title of the work.
    Title,
    /// Names of the authors.
    Author,
    /// Year the work was first published.
    YearPublished,
    /// Subject/genre tags, truncated for display.
    Genres,
    /// Median page count across editions.
    PageCount,
}

/// Token rendered for attributes the record does not carry.
const MISSING: &str = "unknown";

/// At most this many genres are displayed per record.
const GENRE_LIMIT: usize = 5;

/// The ordered label/value pairs displayed for a record, driven by [`FIELDS`].
#[must_use]
pub fn details(doc: &SearchDoc) -> Vec<(&'static str, String)> {
    FIELDS
        .iter()
        .map(|&(label, field)| (label, field_value(doc, field)))
        .collect()
}

fn field_value(doc: &SearchDoc, field: Field) -> String {
    match field {
        Field::Title => doc.title.clone().unwrap_or_else(|| MISSING.to_owned()),
        Field::Author => doc
            .author_name
            .as_ref()
            .map_or_else(|| MISSING.to_owned(), |authors| authors.join(", ")),
        Field::YearPublished => doc
            .first_publish_year
            .map_or_else(|| MISSING.to_owned(), |year| year.to_string()),
        Field::Genres => genres(doc.subject.as_deref()),
        Field::PageCount => doc
            .number_of_pages_median
            .map_or_else(|| MISSING.to_owned(), |pages| pages.to_string()),
    }
}

// An absent genre list renders as a literal token instead of an error; a
// present list is truncated.
fn genres(subjects: Option<&[String]>) -> String {
    match subjects {
        Some(subjects) => subjects
            .iter()
            .take(GENRE_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        None => "None".to_owned(),
    }
}

/// One selectable reading list in a rendered selection control.
pub struct ListChoice {
    /// Raw list name, submitted to the service when chosen.
    pub value: String,
    /// Capitalized name shown to the user.
    pub label: String,
}

/// The action cell of a result row.
pub enum ArchiveOptions {
    /// The object already appears in the named list; rendered as a status.
    InList(String),
    /// The object is in none of the lists; rendered as a selection control
    /// with one choice per list.
    AddTo(Vec<ListChoice>),
}

/// Decides the action cell for an object given the user's reading lists.
///
/// The lists are scanned in the map's own order and the first list containing
/// `id` wins.
#[must_use]
pub fn archive_options(id: &str, lists: &ReadingLists) -> ArchiveOptions {
    match lists.find(id) {
        Some(name) => ArchiveOptions::InList(name.to_owned()),
        None => ArchiveOptions::AddTo(
            lists
                .names()
                .map(|name| ListChoice {
                    value: name.to_owned(),
                    label: capitalize(name),
                })
                .collect(),
        ),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// The cover cell of a result row.
pub enum CoverCell {
    /// A real cover image.
    Image(CoverImage),
    /// The endpoint had no cover for this edition; visibly marked.
    Placeholder,
    /// The cover fetch failed; left blank.
    Blank,
}

/// One composed result row: cover cell, labeled details, and action cell.
pub struct Row {
    /// Object identifier of the record.
    pub id: String,
    /// Cover cell.
    pub cover: CoverCell,
    /// Label/value pairs in [`FIELDS`] order.
    pub details: Vec<(&'static str, String)>,
    /// Action cell.
    pub options: ArchiveOptions,
}

/// Composes a result row from a record and the user's reading lists.
#[must_use]
pub fn row(id: &str, cover: CoverCell, doc: &SearchDoc, lists: &ReadingLists) -> Row {
    Row {
        id: id.to_owned(),
        cover,
        details: details(doc),
        options: archive_options(id, lists),
    }
}

impl Row {
    /// The displayed title of this row.
    #[must_use]
    pub fn title(&self) -> &str {
        self.details
            .iter()
            .find(|(label, _)| *label == "Title")
            .map_or(MISSING, |(_, value)| value)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cover {
            CoverCell::Image(_) => writeln!(f, "{} [cover]", self.id)?,
            CoverCell::Placeholder => writeln!(f, "{} [no cover]", self.id)?,
            CoverCell::Blank => writeln!(f, "{}", self.id)?,
        }

        for (label, value) in &self.details {
            writeln!(f, "  {label}: {value}")?;
        }

        match &self.options {
            ArchiveOptions::InList(name) => write!(f, "  Book in {name} list"),
            ArchiveOptions::AddTo(choices) => {
                let labels = choices
                    .iter()
                    .map(|choice| choice.label.as_str())
                    .collect::<Vec<_>>();
                write!(f, "  Add to my list: {}", labels.join(", "))
            }
        }
    }
}
