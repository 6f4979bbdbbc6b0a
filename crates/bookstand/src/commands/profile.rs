//! Profile command handlers.

use bookstand_core::{Library, Profile, ProfileUpdate, Theme};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(profile: &Profile) -> String {
    output::detail_lines(&[
        ("Name", profile.name.clone()),
        ("Theme", profile.theme.to_string()),
        ("Avatar", profile.avatar.clone().unwrap_or_default()),
    ])
}

pub async fn handle(
    library: &Library,
    args: ProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Show => {
            let snapshot = library.snapshot();
            let out = output::render_single(&global.output, &snapshot.profile, detail, |p| {
                p.name.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProfileCommand::Set { name, theme } => {
            if name.is_none() && theme.is_none() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "pass --name and/or --theme".into(),
                });
            }
            library
                .update_profile(ProfileUpdate {
                    theme: theme.map(Theme::from),
                    name,
                })
                .await?;
            util::report_overlay(library, global.quiet);
            Ok(())
        }

        ProfileCommand::Avatar { path } => {
            let url = library.upload_avatar(&path).await?;
            util::report_overlay(library, global.quiet);
            if !global.quiet {
                println!("{url}");
            }
            Ok(())
        }
    }
}
