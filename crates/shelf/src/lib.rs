#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! # shelf
//!
//! shelf is a library for searching the Open Library catalog and managing a
//! user's reading lists through their reading-list service. A search renders
//! one [`render::Row`] per result into a [`search::ResultPane`], and a result
//! can be added to one of the user's lists with [`add_to_list`].

mod api;
mod error;
pub mod lists;
pub mod render;
pub mod search;

pub use api::covers::CoverImage;
pub use api::list_service::AddOutcome;
pub use api::open_library::SearchDoc;
pub use error::{Error, ErrorKind};

use log::trace;
use search::ResultPane;

type Client = reqwest::blocking::Client;

/// Run an orchestrated search for `query`, rendering one row per result into
/// `pane`.
///
/// The user's reading lists are fetched from `service` and the search results
/// from the Open Library catalog. The two fetches are independent; a failure
/// on either is logged and suppresses rendering rather than being returned.
///
/// # Errors
///
/// An [`Err`] of [`ErrorKind::InvalidQuery`] is returned when `query` is
/// empty after trimming; no network request is made in that case.
#[inline]
pub fn run_search(service: &str, query: &str, pane: &mut ResultPane) -> Result<(), Error> {
    trace!("Run a search for '{query}'");
    search::run_search::<Client>(service, query, pane)
}

/// Fetch the user's reading lists from `service`.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails or the response cannot be
/// parsed into reading lists.
#[inline]
pub fn reading_lists(service: &str) -> Result<lists::ReadingLists, Error> {
    trace!("Fetch the user's reading lists");
    api::list_service::reading_lists::<Client>(service)
}

/// Add the object identified by `book_id` to the user's `list_name` list.
///
/// The outcome distinguishes an accepted update from the service refusing the
/// request because the caller is not signed in.
///
/// # Errors
///
/// An [`Err`] is returned when the request fails or the response is not JSON.
#[inline]
pub fn add_to_list(service: &str, book_id: &str, list_name: &str) -> Result<AddOutcome, Error> {
    trace!("Add '{book_id}' to the '{list_name}' list");
    api::list_service::add::<Client>(service, book_id, list_name)
}
