//! Deterministic local file names for downloaded images.

use crate::constants::{DEFAULT_IMAGE_EXTENSION, MAX_SLUG_LEN};
use crate::normalize::fold_accents;
use crate::ArtRecord;

const KNOWN_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "tif", "tiff"];

/// Lower-case, underscore-joined rendering of `text` that is safe as a path component.
///
/// Accents are folded and only alphanumeric characters survive; apostrophes vanish and every other run of
/// characters becomes one `_`. The result is capped at [`MAX_SLUG_LEN`] characters and
/// is `"unknown"` when nothing alphanumeric is left.
#[must_use]
pub fn slug(text: &str) -> String {
    let words: Vec<String> = fold_accents(text)
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect::<String>()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let joined = words.join("_");
    let capped: String = joined.chars().take(MAX_SLUG_LEN).collect();
    let capped = capped.trim_end_matches('_');
    if capped.is_empty() { "unknown".to_owned() } else { capped.to_owned() }
}

/// Image extension taken from the last path segment of `url`, if it is a known one.
#[must_use]
pub fn image_extension(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    last_segment
        .rsplit_once('.')
        .and_then(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            KNOWN_IMAGE_EXTENSIONS.iter().find(|known| **known == ext).copied()
        })
        .unwrap_or(DEFAULT_IMAGE_EXTENSION)
}

/// Local file name for the image of `record`:
/// `<id>-<slug(title)>-<slug(artist)>-<slug(catalog)>.<ext>`.
///
/// The same record always maps to the same name, so a re-run overwrites rather than
/// duplicates.
#[must_use]
pub fn image_file_name(record: &ArtRecord) -> String {
    format!(
        "{}-{}-{}-{}.{}",
        record.id,
        slug(&record.title),
        slug(&record.artist),
        slug(&record.catalog_source),
        image_extension(&record.url)
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(id: i64, title: &str, artist: &str, url: &str) -> ArtRecord {
        ArtRecord {
            id,
            url: url.to_owned(),
            catalog_source: "Web Gallery of Art".to_owned(),
            license: "unknown".to_owned(),
            artist: artist.to_owned(),
            title: title.to_owned(),
            date: String::new(),
            technique: String::new(),
            location: String::new(),
            form: String::new(),
            art_type: String::new(),
            school: String::new(),
            timeframe: String::new(),
            file_name: None,
            created: Utc::now(),
            modified: Utc::now(),
        }
    }

    #[test]
    fn test_slug_snake_cases_words() {
        assert_eq!(slug("Web Gallery of Art"), "web_gallery_of_art");
        assert_eq!(slug("Self-Portrait (detail)"), "self_portrait_detail");
        assert_eq!(slug("The Artist's Mother"), "the_artists_mother");
    }

    #[test]
    fn test_slug_folds_accents() {
        assert_eq!(slug("Albrecht Dürer"), "albrecht_durer");
    }

    #[test]
    fn test_slug_never_contains_path_separators() {
        let s = slug("../../etc/passwd \\ C:\\Windows");
        assert!(!s.contains('/'));
        assert!(!s.contains('\\'));
        assert!(!s.contains('.'));
        assert_eq!(s, "etc_passwd_c_windows");
    }

    #[test]
    fn test_slug_is_capped() {
        let long = "word ".repeat(40);
        let s = slug(&long);
        assert!(s.chars().count() <= MAX_SLUG_LEN);
        assert!(!s.ends_with('_'));
    }

    #[test]
    fn test_slug_empty_is_unknown() {
        assert_eq!(slug(""), "unknown");
        assert_eq!(slug(" -- "), "unknown");
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://www.wga.hu/art/a/aachen/allegory.jpg"), "jpg");
        assert_eq!(image_extension("https://x.org/art/foo.PNG?size=large"), "png");
        assert_eq!(image_extension("https://x.org/art.d/foo"), "jpg");
        assert_eq!(image_extension("https://x.org/art/foo.html"), "jpg");
    }

    #[test]
    fn test_image_file_name_is_deterministic() {
        let r = record(42, "Allegory", "Hans Von Aachen", "https://www.wga.hu/art/a/aachen/allegory.jpg");
        let name = image_file_name(&r);
        assert_eq!(name, "42-allegory-hans_von_aachen-web_gallery_of_art.jpg");
        assert_eq!(image_file_name(&r), name);
    }

    #[test]
    fn test_image_file_name_differs_by_id() {
        let a = record(1, "Allegory", "Hans Von Aachen", "https://x.org/a.jpg");
        let b = record(2, "Allegory", "Hans Von Aachen", "https://x.org/a.jpg");
        assert_ne!(image_file_name(&a), image_file_name(&b));
    }
}
