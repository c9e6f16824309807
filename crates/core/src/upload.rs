//! Upload filename rules.
//!
//! Uploaded files are accepted only with an allowed extension and are stored
//! (and ingested) under a sanitized name that is safe to use as a path
//! component.

/// File extensions accepted for upload, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["log"];

/// Whether `filename` carries one of the [`ALLOWED_EXTENSIONS`].
///
/// The comparison is case-insensitive; a name without a dot is rejected.
pub fn is_allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe, flat name.
///
/// Path separators and whitespace runs become a single `_`, characters other
/// than ASCII letters, digits, `_`, `.` and `-` are dropped, and leading or
/// trailing `.`/`_` are stripped. Returns `None` if nothing is left.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Human-readable confirmation returned after a successful upload.
pub fn upload_message(entries_added: u64) -> String {
    format!("File uploaded successfully. {entries_added} entries added.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_log_extension_any_case() {
        assert!(is_allowed_file("app.log"));
        assert!(is_allowed_file("APP.LOG"));
        assert!(is_allowed_file("archive.2023.log"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_allowed_file("app.txt"));
        assert!(!is_allowed_file("log"));
        assert!(!is_allowed_file("app.log.gz"));
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("server-01.log").as_deref(), Some("server-01.log"));
    }

    #[test]
    fn sanitize_flattens_paths_and_whitespace() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("etc_passwd")
        );
        assert_eq!(
            sanitize_filename("my app  logs.log").as_deref(),
            Some("my_app_logs.log")
        );
        assert_eq!(
            sanitize_filename("C:\\logs\\today.log").as_deref(),
            Some("C_logs_today.log")
        );
    }

    #[test]
    fn sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_filename("räk$smörgås.log").as_deref(), Some("rksmrgs.log"));
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename(""), None);
    }

    #[test]
    fn upload_message_reports_count() {
        assert_eq!(
            upload_message(2),
            "File uploaded successfully. 2 entries added."
        );
    }
}
