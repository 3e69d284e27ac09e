/// Build the display name for a file: `file_name` with one trailing `suffix` removed.
///
/// No other normalization happens, so identical names from different folders
/// stay identical.
pub fn display_name(file_name: &str, suffix: &str) -> String {
    file_name
        .strip_suffix(suffix)
        .unwrap_or(file_name)
        .to_string()
}
