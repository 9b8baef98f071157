//! Reader for the main section of a jar `MANIFEST.MF`.

/// Returns the value of `name` in the manifest's main section.
///
/// The main section ends at the first blank line. A line starting with a
/// single space continues the previous value. Names match case-insensitively.
#[must_use]
pub fn main_attribute(manifest: &str, name: &str) -> Option<String> {
    let mut current: Option<(String, String)> = None;

    for line in manifest.split("\r\n").flat_map(|l| l.split(['\n', '\r'])) {
        if line.is_empty() {
            break;
        }
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(rest);
            }
            continue;
        }
        if let Some((key, value)) = current.take() {
            if key.eq_ignore_ascii_case(name) {
                return Some(value);
            }
        }
        current = line
            .split_once(':')
            .map(|(key, value)| (key.to_string(), value.strip_prefix(' ').unwrap_or(value).to_string()));
    }

    current.filter(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value)
}
