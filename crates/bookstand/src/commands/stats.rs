//! Reading statistics.

use bookstand_core::{Library, Statistics};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(stats: &Statistics) -> String {
    let counts = &stats.counts;
    output::detail_lines(&[
        ("Books", counts.total.to_string()),
        ("Want to read", counts.wanted.to_string()),
        ("Reading", counts.reading.to_string()),
        ("Finished", counts.finished.to_string()),
        ("Favorites", stats.favorites.to_string()),
        ("Rated", stats.rated.to_string()),
        (
            "Average rating",
            stats
                .average_rating
                .map_or_else(|| "-".into(), |r| format!("{r:.1}")),
        ),
        ("Pages read", stats.pages_read.to_string()),
        ("Shelves", stats.shelves.to_string()),
    ])
}

pub fn handle(library: &Library, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = library.snapshot().statistics();
    let out = output::render_single(&global.output, &stats, detail, |s| {
        s.counts.total.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
