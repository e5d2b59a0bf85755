//! Name De-duplication
//!
//! Titles and names stay unique by appending ` (2)`, ` (3)`, ...

use std::collections::HashSet;

/// Split a trailing ` (n)` counter off a name
fn split_counter(name: &str) -> (&str, u32) {
    if let Some(body) = name.strip_suffix(')') {
        if let Some(open) = body.rfind(" (") {
            let digits = &body[open + 2..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(n) = digits.parse::<u32>() {
                    if n >= 2 {
                        return (&name[..open], n);
                    }
                }
            }
        }
    }
    (name, 1)
}

fn first_free<F>(taken: &HashSet<&str>, start: u32, make: F) -> String
where
    F: Fn(u32) -> String,
{
    let mut n = start;
    loop {
        let candidate = make(n);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

/// Unique title among `existing`
///
/// The desired name is trimmed; an empty one becomes `fallback`.
pub fn unique_name<'a, I>(desired: &str, fallback: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let name = match desired.trim() {
        "" => fallback.trim(),
        trimmed => trimmed,
    };
    if !taken.contains(name) {
        return name.to_string();
    }
    let (base, n) = split_counter(name);
    first_free(&taken, n + 1, |i| format!("{} ({})", base, i))
}

/// Unique file name, counter placed before the extension
pub fn unique_file_name<'a, I>(desired: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let name = match desired.trim() {
        "" => "untitled.txt",
        trimmed => trimmed,
    };
    if !taken.contains(name) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    };
    let (base, n) = split_counter(stem);
    first_free(&taken, n + 1, |i| format!("{} ({}){}", base, i, ext))
}

/// Timestamp-based id that does not collide with `existing`
pub fn fresh_id<'a, I>(prefix: &str, now: i64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let base = format!("{}-{}", prefix, now);
    if !taken.contains(base.as_str()) {
        return base;
    }
    first_free(&taken, 2, |i| format!("{}-{}", base, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_free() {
        assert_eq!(unique_name("Daily", "Layout", ["Other"]), "Daily");
    }

    #[test]
    fn test_unique_name_increments() {
        let existing = ["Daily", "Daily (2)"];
        assert_eq!(unique_name("Daily", "Layout", existing), "Daily (3)");
    }

    #[test]
    fn test_unique_name_strips_existing_counter() {
        let existing = ["A", "A (2)"];
        assert_eq!(unique_name("A (2)", "x", existing), "A (3)");
    }

    #[test]
    fn test_unique_name_fills_gap_after_counter() {
        let existing = ["A", "A (3)"];
        assert_eq!(unique_name("A", "x", existing), "A (2)");
    }

    #[test]
    fn test_unique_name_blank_uses_fallback() {
        assert_eq!(unique_name("   ", "Untitled", Vec::<&str>::new()), "Untitled");
        assert_eq!(unique_name("", "Untitled", ["Untitled"]), "Untitled (2)");
    }

    #[test]
    fn test_unique_name_is_case_sensitive() {
        assert_eq!(unique_name("daily", "x", ["Daily"]), "daily");
    }

    #[test]
    fn test_parenthesised_text_is_not_a_counter() {
        assert_eq!(unique_name("Notes (draft)", "x", ["Notes (draft)"]), "Notes (draft) (2)");
        assert_eq!(unique_name("Top (1)", "x", ["Top (1)"]), "Top (1) (2)");
    }

    #[test]
    fn test_unique_file_name_keeps_extension() {
        let existing = ["notes.txt", "notes (2).txt"];
        assert_eq!(unique_file_name("notes.txt", existing), "notes (3).txt");
        assert_eq!(unique_file_name("notes.md", existing), "notes.md");
    }

    #[test]
    fn test_unique_file_name_dotfile_and_no_ext() {
        assert_eq!(unique_file_name(".env", [".env"]), ".env (2)");
        assert_eq!(unique_file_name("README", ["README"]), "README (2)");
    }

    #[test]
    fn test_fresh_id() {
        assert_eq!(fresh_id("card", 1700, Vec::<&str>::new()), "card-1700");
        assert_eq!(fresh_id("card", 1700, ["card-1700", "card-1700-2"]), "card-1700-3");
    }
}
