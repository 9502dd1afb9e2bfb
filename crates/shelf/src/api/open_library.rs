use log::{info, trace};
use serde::Deserialize;

use super::{Client, Error};

const SEARCH_URL: &str = "https://openlibrary.org/search.json?q=";

pub(crate) fn search<C: Client>(query: &str) -> Result<Vec<SearchDoc>, Error> {
    info!("Searching the Open Library catalog for '{query}'");
    let mut url = SEARCH_URL.to_owned();
    // spaces are the only character worth fixing up for this endpoint
    url.push_str(&query.replace(' ', "+"));

    let client = C::default();
    let SearchModel { docs } = client.get_json(&url)?;

    trace!("Request was successful - {} records returned", docs.len());
    Ok(docs)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    docs: Vec<SearchDoc>,
}

/// One record returned by the Open Library search endpoint.
///
/// The record shape is an external contract that this crate does not own or
/// validate, so every attribute is optional and unknown attributes are
/// ignored.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub struct SearchDoc {
    /// Title of the work.
    pub title: Option<String>,
    /// Names of the authors.
    pub author_name: Option<Vec<String>>,
    /// Year the work was first published.
    pub first_publish_year: Option<i64>,
    /// Subject/genre tags.
    pub subject: Option<Vec<String>>,
    /// Median page count across editions.
    pub number_of_pages_median: Option<u64>,
    /// Keys of the known editions of this work.
    pub edition_key: Option<Vec<String>>,
}

impl SearchDoc {
    /// The object identifier of this record: its first edition key.
    ///
    /// Returns [`None`] for records with no edition keys, which cannot be
    /// correlated with reading lists or cover images.
    #[must_use]
    pub fn edition_id(&self) -> Option<&str> {
        self.edition_key
            .as_deref()
            .and_then(<[String]>::first)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{assert_url, impl_text_producer, MockClient};

    impl_text_producer! {
        ValidSearchProducer => Ok(
            include_str!("../../../../tests/data/open_library_search.json").to_owned()
        ),
    }

    #[test]
    fn docs_can_be_derived_from_json() {
        let json = include_str!("../../../../tests/data/open_library_search.json");
        let model: super::SearchModel = serde_json::from_str(json).unwrap();

        let doc = &model.docs[0];
        assert_eq!(Some("The Fellowship of the Ring"), doc.title.as_deref());
        assert_eq!(
            Some("J. R. R. Tolkien"),
            doc.author_name.as_deref().and_then(|a| a.first()).map(String::as_str)
        );
        assert_eq!(Some(1954), doc.first_publish_year);
        assert_eq!(Some(423), doc.number_of_pages_median);
        assert_eq!(Some("OL27702422M"), doc.edition_id());
    }

    #[test]
    fn records_with_missing_attributes_still_deserialize() {
        let json = include_str!("../../../../tests/data/open_library_search.json");
        let model: super::SearchModel = serde_json::from_str(json).unwrap();

        // the last fixture record has no subject and no edition keys
        let doc = model.docs.last().unwrap();
        assert!(doc.subject.is_none());
        assert_eq!(None, doc.edition_id());
    }

    #[test]
    fn search_url_encodes_spaces() {
        let _ = super::search::<MockClient<ValidSearchProducer>>("lord of the rings")
            .expect("ValidSearchProducer always produces a valid search response");

        assert_url!("https://openlibrary.org/search.json?q=lord+of+the+rings");
    }
}
