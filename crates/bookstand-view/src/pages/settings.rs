// ── Settings page ──

use strum::IntoEnumIterator;

use bookstand_core::{Profile, Theme};

use super::{PageId, header};

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    }
}

pub fn render(profile: &Profile) -> String {
    let mut html = String::from(r#"<div class="max-w-3xl mx-auto space-y-8">"#);
    html.push_str(&header(PageId::Settings.label(), profile));
    html.push_str(
        r#"<section class="card-expressive p-6"><h3 class="text-lg font-bold mb-4">Theme</h3><div class="flex gap-4">"#,
    );
    for theme in Theme::iter() {
        let active = theme == profile.theme;
        html.push_str(&format!(
            r#"<button class="theme-option btn-expressive{}" data-theme="{}"{}>{}</button>"#,
            if active { " active" } else { "" },
            theme.wire_value(),
            if active { r#" aria-pressed="true""# } else { "" },
            theme_label(theme),
        ));
    }
    html.push_str("</div></section></div>");
    html
}
