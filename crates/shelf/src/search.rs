//! The search orchestrator and the pane it renders into.

use log::{debug, error};

use crate::{
    api::{covers, list_service, open_library, Client},
    render::{self, CoverCell, Row},
    Error, ErrorKind,
};

/// Rendered search results guarded by a generation token.
///
/// Starting a new search clears the pane and invalidates the tokens handed
/// out by earlier searches, so rows produced by an overlapping stale search
/// are dropped instead of being appended after the pane has been cleared.
#[derive(Default)]
pub struct ResultPane {
    rows: Vec<Row>,
    generation: u64,
}

/// A token tying rendered rows to the search that produced them.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Generation(u64);

impl ResultPane {
    /// Creates an empty pane.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the pane for a new search and returns its generation token.
    pub fn begin_search(&mut self) -> Generation {
        self.rows.clear();
        self.generation += 1;
        Generation(self.generation)
    }

    /// Appends a row rendered by the search holding `token`.
    ///
    /// Returns `false` and drops the row when `token` belongs to a search
    /// that has since been superseded.
    pub fn push(&mut self, token: Generation, row: Row) -> bool {
        if token.0 == self.generation {
            self.rows.push(row);
            true
        } else {
            debug!("Dropping a row rendered by a superseded search");
            false
        }
    }

    /// The rendered rows of the most recent search.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

pub(crate) fn run_search<C: Client>(
    service: &str,
    query: &str,
    pane: &mut ResultPane,
) -> Result<(), Error> {
    let query = query.trim();
    if query.is_empty() {
        // no network request is made for an empty query
        return Err(Error::new(ErrorKind::InvalidQuery, "A search term is required"));
    }

    let token = pane.begin_search();

    // The two fetches are independent: a failure on either is logged and only
    // suppresses rendering, since every row needs both to have resolved.
    let lists = list_service::reading_lists::<C>(service)
        .map_err(|err| error!("Failed to fetch the user's reading lists: {err}"))
        .ok();
    let docs = open_library::search::<C>(query)
        .map_err(|err| error!("Failed to fetch search results from the Open Library API: {err}"))
        .ok();

    let (lists, docs) = match (lists, docs) {
        (Some(lists), Some(docs)) => (lists, docs),
        _ => return Ok(()),
    };

    for doc in &docs {
        let id = match doc.edition_id() {
            Some(id) => id,
            None => {
                debug!("Skipping a record with no edition key");
                continue;
            }
        };

        let cover = fetch_cover::<C>(id);
        pane.push(token, render::row(id, cover, doc, &lists));
    }

    Ok(())
}

fn fetch_cover<C: Client>(id: &str) -> CoverCell {
    match covers::cover::<C>(id) {
        Ok(image) if image.is_placeholder() => CoverCell::Placeholder,
        Ok(image) => CoverCell::Image(image),
        Err(err) => {
            error!("Failed to fetch the cover image for '{id}': {err}");
            CoverCell::Blank
        }
    }
}
