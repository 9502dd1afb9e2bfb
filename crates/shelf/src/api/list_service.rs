use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::lists::ReadingLists;

use super::{Client, Error};

pub(crate) fn reading_lists<C: Client>(service: &str) -> Result<ReadingLists, Error> {
    let url = format!("{}/books/mybooks", service.trim_end_matches('/'));
    trace!("Fetching the user's reading lists from '{url}'");

    let client = C::default();
    let MyBooksModel { books } = client.get_json(&url)?;

    trace!("Request was successful - {} lists returned", books.len());
    Ok(books)
}

#[derive(Deserialize)]
struct MyBooksModel {
    books: ReadingLists,
}

#[derive(Serialize)]
struct AddRequest<'a> {
    #[serde(rename = "bookId")]
    book_id: &'a str,
    #[serde(rename = "listName")]
    list_name: &'a str,
}

/// The outcome of submitting a list-add to the reading-list service.
pub enum AddOutcome {
    /// The service accepted the request and answered with this JSON body.
    Accepted(serde_json::Value),
    /// The service refused the request because the caller is not signed in.
    NotLoggedIn,
}

pub(crate) fn add<C: Client>(
    service: &str,
    book_id: &str,
    list_name: &str,
) -> Result<AddOutcome, Error> {
    let url = format!("{}/books/add", service.trim_end_matches('/'));
    info!("Adding '{book_id}' to the user's '{list_name}' list");

    let client = C::default();
    let response: serde_json::Value = client.post_json(&url, &AddRequest { book_id, list_name })?;

    if response.get("UserNotLoggedIn").is_some_and(truthy) {
        Ok(AddOutcome::NotLoggedIn)
    } else {
        Ok(AddOutcome::Accepted(response))
    }
}

// JSON truthiness, since the service only promises "a truthy field".
fn truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::api::{assert_url, impl_text_producer, take_body, MockClient};

    impl_text_producer! {
        ValidListsProducer => Ok(
            include_str!("../../../../tests/data/mybooks.json").to_owned()
        ),
        NotLoggedInProducer => Ok(r#"{"UserNotLoggedIn": true}"#.to_owned()),
        SuccessProducer => Ok(r#"{"success": true}"#.to_owned()),
    }

    #[test]
    fn reading_lists_are_fetched_from_the_mybooks_route() {
        let lists = reading_lists::<MockClient<ValidListsProducer>>("http://localhost:8000")
            .expect("ValidListsProducer always produces a valid lists response");

        assert_eq!(4, lists.len());
        assert_url!("http://localhost:8000/books/mybooks");
    }

    #[test]
    fn trailing_slash_on_the_service_url_is_ignored() {
        let _ = reading_lists::<MockClient<ValidListsProducer>>("http://localhost:8000/")
            .expect("ValidListsProducer always produces a valid lists response");

        assert_url!("http://localhost:8000/books/mybooks");
    }

    #[test]
    fn add_posts_the_book_id_and_list_name() {
        let outcome = add::<MockClient<SuccessProducer>>(
            "http://localhost:8000",
            "OL12345M",
            "unread",
        )
        .expect("SuccessProducer always produces a valid response");

        assert!(matches!(outcome, AddOutcome::Accepted(_)));
        assert_url!("http://localhost:8000/books/add");
        assert_eq!(
            Some(serde_json::json!({"bookId": "OL12345M", "listName": "unread"})),
            take_body()
        );
    }

    #[test]
    fn user_not_logged_in_response_maps_to_the_auth_outcome() {
        let outcome = add::<MockClient<NotLoggedInProducer>>(
            "http://localhost:8000",
            "OL12345M",
            "read",
        )
        .expect("NotLoggedInProducer always produces a valid response");

        assert!(matches!(outcome, AddOutcome::NotLoggedIn));
    }

    #[test]
    fn json_truthiness() {
        use serde_json::json;

        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(null)));
    }
}
