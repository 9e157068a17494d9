//! Message catalogue for user-facing text.
//!
//! Keys resolve against the requested language first, then English, then fall
//! back to the key itself so a missing translation never panics or produces
//! an empty reply. Templates use `{name}` placeholders filled by [`render`].

mod en;
mod uk;

pub use pitwall_core::types::Lang;

/// Raw template lookup with English fallback.
pub fn text(lang: Lang, key: &str) -> Option<&'static str> {
    let primary = match lang {
        Lang::En => en::lookup(key),
        Lang::Uk => uk::lookup(key),
    };
    primary.or_else(|| en::lookup(key))
}

/// Substitute `{name}` placeholders. Unknown placeholders are left intact.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Look up `key` in `lang` and fill placeholders. Falls back to the key
/// itself when no template exists in any language.
pub fn render(lang: Lang, key: &str, vars: &[(&str, &str)]) -> String {
    match text(lang, key) {
        Some(template) => fill(template, vars),
        None => key.to_string(),
    }
}

/// Render the reminder notification delivered by the scheduler.
pub fn reminder_notification(
    lang: Lang,
    race_name: &str,
    time_left: &str,
    location: &str,
    race_time: &str,
) -> String {
    render(
        lang,
        "reminder_notification",
        &[
            ("race_name", race_name),
            ("time_left", time_left),
            ("location", location),
            ("race_time", race_time),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_replaces_all_placeholders() {
        let out = fill("{a} and {b} and {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x and y and x");
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{who}?", &[]), "{who}?");
    }

    #[test]
    fn uk_render_substitutes_variables() {
        let out = render(Lang::Uk, "timezone_updated", &[("timezone", "Europe/Kyiv")]);
        assert!(out.contains("Europe/Kyiv"));
    }

    #[test]
    fn unknown_key_renders_as_itself() {
        assert_eq!(render(Lang::En, "no_such_key", &[]), "no_such_key");
    }

    #[test]
    fn notification_contains_all_parts() {
        let out = reminder_notification(
            Lang::En,
            "Monaco Grand Prix",
            "one hour",
            "Monte-Carlo, Monaco",
            "May 25, 2025 15:00 Europe/Monaco",
        );
        assert!(out.contains("Monaco Grand Prix"));
        assert!(out.contains("one hour"));
        assert!(out.contains("Monte-Carlo, Monaco"));
        assert!(out.contains("15:00"));
    }

    #[test]
    fn both_languages_have_the_reminder_notification() {
        assert!(text(Lang::En, "reminder_notification").is_some());
        assert!(uk_has("reminder_notification"));
    }

    fn uk_has(key: &str) -> bool {
        // text() falls back to en, so probe the uk table directly via a key
        // that differs between the tables.
        super::uk::lookup(key).is_some()
    }
}
