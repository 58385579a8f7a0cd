use std::path::Path;

/// Map a file path to a language identifier for status display, by
/// lowercased extension. Unknown extensions and pathless documents
/// report `None`.
pub fn detect(path: Option<&Path>) -> Option<&'static str> {
    let ext = path?.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "py" | "pyw" => Some("python"),
        "js" | "mjs" | "cjs" | "jsx" => Some("javascript"),
        "html" | "htm" => Some("html"),
        "css" => Some("css"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_known_extensions() {
        let cases = [
            ("main.py", "python"),
            ("tool.pyw", "python"),
            ("app.js", "javascript"),
            ("mod.mjs", "javascript"),
            ("legacy.cjs", "javascript"),
            ("view.jsx", "javascript"),
            ("index.html", "html"),
            ("old.htm", "html"),
            ("style.css", "css"),
        ];
        for (name, lang) in cases {
            let path = PathBuf::from(name);
            assert_eq!(detect(Some(&path)), Some(lang), "for {name}");
        }
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let path = PathBuf::from("SCRIPT.PY");
        assert_eq!(detect(Some(&path)), Some("python"));
    }

    #[test]
    fn test_detect_unknown_extension() {
        let path = PathBuf::from("notes.txt");
        assert_eq!(detect(Some(&path)), None);
    }

    #[test]
    fn test_detect_no_path_or_no_extension() {
        assert_eq!(detect(None), None);
        let path = PathBuf::from("Makefile");
        assert_eq!(detect(Some(&path)), None);
    }
}
