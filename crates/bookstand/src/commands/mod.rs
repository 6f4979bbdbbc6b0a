//! Command dispatch: bridges CLI args -> library calls -> output formatting.

pub mod books;
pub mod config_cmd;
pub mod profile;
pub mod render;
pub mod shelves;
pub mod stats;
pub mod util;

use bookstand_core::Library;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a library-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    library: &Library,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Books(args) => books::handle(library, args, global).await,
        Command::Shelves(args) => shelves::handle(library, args, global).await,
        Command::Profile(args) => profile::handle(library, args, global).await,
        Command::Stats => stats::handle(library, global),
        Command::Render(args) => render::handle(library, args, global),
        // Config and Completions never reach the library
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
