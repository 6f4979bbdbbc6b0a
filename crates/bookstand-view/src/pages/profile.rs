// ── Profile page ──

use bookstand_core::Profile;

use super::{PageId, header};
use crate::markup::escape_html;

pub fn render(profile: &Profile) -> String {
    let name = if profile.name.trim().is_empty() {
        "Reader"
    } else {
        profile.name.as_str()
    };
    let avatar = profile
        .avatar
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map_or_else(
            || r#"<span class="material-symbols-outlined text-8xl">account_circle</span>"#.to_owned(),
            |src| {
                format!(
                    r#"<img src="{}" alt="Avatar" class="w-32 h-32 rounded-full">"#,
                    escape_html(src)
                )
            },
        );

    format!(
        r#"<div class="max-w-3xl mx-auto space-y-8">{header}<div class="card-expressive p-6 flex items-center gap-6">{avatar}<div><p class="text-2xl font-bold">{name}</p><p class="text-sm text-neutral-400">Theme: {theme}</p></div></div><form id="avatar-form" class="card-expressive p-6 space-y-4" enctype="multipart/form-data"><label for="avatar-input" class="block font-bold">Change avatar</label><input type="file" id="avatar-input" name="avatar" accept="image/*"><button type="submit" class="btn-expressive btn-primary">Upload</button></form></div>"#,
        header = header(PageId::Profile.label(), profile),
        name = escape_html(name),
        theme = profile.theme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_profile_shows_default_name() {
        let html = render(&Profile::default());
        assert!(html.contains(">Reader<"));
        assert!(html.contains("Theme: dark"));
        assert!(html.contains(r#"name="avatar""#));
    }

    #[test]
    fn name_is_escaped() {
        let profile = Profile {
            name: "<i>Ana</i>".into(),
            ..Profile::default()
        };
        assert!(render(&profile).contains("&lt;i&gt;Ana&lt;/i&gt;"));
    }
}
