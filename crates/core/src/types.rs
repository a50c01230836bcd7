/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Opaque identifier assigned to a generation when it is submitted.
pub type GenerationId = String;

/// `raw` with every character outside `[A-Za-z0-9_-]` replaced by `_`, so
/// the result is safe as a single path component.
pub fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_keeps_safe_characters_only() {
        assert_eq!(sanitize_file_stem("gen_42-a"), "gen_42-a");
        assert_eq!(sanitize_file_stem("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_file_stem("a b.c"), "a_b_c");
    }
}
