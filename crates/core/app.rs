use std::{fs, path::Path};

use eyre::{eyre, Context, Result};
use log::{error, info, trace, warn};
use shelf::{
    render::{ArchiveOptions, CoverCell, ListChoice, Row},
    search::ResultPane,
    AddOutcome, ErrorKind,
};

use crate::interact::user_select;

pub fn search(service: &str, query: &str, covers: Option<&Path>, interact: bool) -> Result<()> {
    let mut pane = ResultPane::new();

    if let Err(err) = shelf::run_search(service, query, &mut pane) {
        if err.kind() == ErrorKind::InvalidQuery {
            // inline feedback rather than a hard error, like a search box hint
            println!("Please enter a search term");
            return Ok(());
        }
        return Err(err).wrap_err("Search failed");
    }

    if pane.rows().is_empty() {
        println!("No results");
        return Ok(());
    }

    for row in pane.rows() {
        if let (Some(dir), CoverCell::Image(image)) = (covers, &row.cover) {
            if let Err(err) = save_cover(dir, &row.id, image.as_bytes()) {
                warn!("{err:#}");
            }
        }
        println!("{row}");
        println!();
    }

    if interact {
        offer_add(service, pane.rows())?;
    }

    Ok(())
}

pub fn add(service: &str, book_id: &str, list_name: &str) -> Result<()> {
    submit(service, book_id, list_name)
}

fn save_cover(dir: &Path, id: &str, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Cannot create the cover directory '{}'", dir.display()))?;

    let path = dir.join(id).with_extension("jpg");
    trace!("Writing the cover image to '{}'", path.display());
    fs::write(&path, bytes)
        .wrap_err_with(|| format!("Cannot write the cover image '{}'", path.display()))
}

fn offer_add(service: &str, rows: &[Row]) -> Result<()> {
    let candidates: Vec<(&Row, &[ListChoice])> = rows
        .iter()
        .filter_map(|row| match &row.options {
            ArchiveOptions::AddTo(choices) if !choices.is_empty() => {
                Some((row, choices.as_slice()))
            }
            _ => None,
        })
        .collect();

    if candidates.is_empty() {
        trace!("Every result is already in one of the user's lists");
        return Ok(());
    }

    let mut items: Vec<String> = candidates
        .iter()
        .map(|(row, _)| row.title().to_owned())
        .collect();
    items.push("Skip".to_owned());

    let selection = user_select("Add a result to one of your lists?", &items)?;
    if selection == items.len() - 1 {
        return Ok(());
    }

    let (row, choices) = candidates[selection];
    let labels: Vec<&str> = choices.iter().map(|choice| choice.label.as_str()).collect();
    let choice = &choices[user_select("Add to my list", &labels)?];

    submit(service, &row.id, &choice.value)
}

fn submit(service: &str, book_id: &str, list_name: &str) -> Result<()> {
    let outcome = match shelf::add_to_list(service, book_id, list_name) {
        Ok(outcome) => outcome,
        Err(err) => {
            // a failed submit is logged without any further UI update
            error!("Failed to submit the list update: {err}");
            return Ok(());
        }
    };

    match outcome {
        AddOutcome::NotLoggedIn => Err(eyre!(
            "You must be logged in to add a book to your reading list"
        )),
        AddOutcome::Accepted(response) => {
            info!("List update response: {response}");
            Ok(())
        }
    }
}
