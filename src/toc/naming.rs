use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-]+").unwrap());

const STRIPPED_CHARS: [char; 5] = [',', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Turns the descriptive half of a TOC label into an identifier fragment.
///
/// Commas and curly quotes are dropped, then every run of whitespace and
/// hyphens becomes a single underscore.
pub fn sanitize_fragment(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|ch| !STRIPPED_CHARS.contains(ch))
        .collect();

    SEPARATOR_RUN
        .replace_all(stripped.trim(), "_")
        .into_owned()
}

/// Returns the sanitized text after the first colon, if the label has one.
pub fn fragment_from_label(text: &str) -> Option<String> {
    let (_, description) = text.split_once(':')?;
    Some(sanitize_fragment(description.trim()))
}

/// Hands out unique constant names built from a fragment stack.
#[derive(Debug, Default)]
pub struct NameResolver {
    taken: HashSet<String>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a name for the deepest fragment, climbing towards the root
    /// while the candidate is ambiguous.
    ///
    /// Returns `None` when fewer than two fragments are available. Once every
    /// ancestor has been prepended, a numeric suffix keeps the name unique.
    pub fn resolve(&mut self, fragments: &[String]) -> Option<String> {
        if fragments.len() < 2 {
            return None;
        }

        let mut cursor = fragments.len() - 1;
        let mut name = fragments[cursor].clone();

        if !name.contains('_') {
            cursor -= 1;
            name = format!("{}_{name}", fragments[cursor]);
        }

        while self.taken.contains(&name) && cursor > 0 {
            cursor -= 1;
            name = format!("{}_{name}", fragments[cursor]);
        }

        if self.taken.contains(&name) {
            name = self.numbered(&name);
        }

        self.taken.insert(name.clone());
        Some(name)
    }

    fn numbered(&self, base: &str) -> String {
        (2_usize..)
            .map(|index| format!("{base}_{index}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}
