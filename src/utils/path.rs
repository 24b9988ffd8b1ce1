//! Path helpers for pattern matching.
//!
//! Rule patterns are written against `/`-separated paths, so Windows
//! separators are normalized before matching.

use std::borrow::Cow;
use std::path::Path;

/// Render a path as a `/`-separated string.
pub fn to_slash(path: &Path) -> Cow<'_, str> {
    let lossy = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' || !lossy.contains('\\') {
        lossy
    } else {
        Cow::Owned(lossy.replace('\\', "/"))
    }
}

/// Split a file name into `(stem, extension)`.
///
/// `app.scss` -> `("app", "scss")`, `LICENSE` -> `("LICENSE", "")`,
/// `.env` -> `(".env", "")`.
pub fn stem_and_ext(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (stem, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_slash_keeps_unix_paths() {
        assert_eq!(to_slash(Path::new("sass/app.scss")), "sass/app.scss");
    }

    #[test]
    fn test_stem_and_ext() {
        assert_eq!(
            stem_and_ext(&PathBuf::from("img/logo.png")),
            ("logo".into(), "png".into())
        );
        assert_eq!(
            stem_and_ext(Path::new("fonts/Inter.woff2")),
            ("Inter".into(), "woff2".into())
        );
        assert_eq!(stem_and_ext(Path::new("LICENSE")), ("LICENSE".into(), String::new()));
        assert_eq!(stem_and_ext(Path::new(".env")), (".env".into(), String::new()));
    }
}
