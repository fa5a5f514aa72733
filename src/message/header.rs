use std::borrow::Cow;

/// Insertion-ordered header storage.
///
/// Names compare ASCII case-insensitively. Overwriting a header keeps its
/// original slot and spelling so serialization order stays stable. Names are
/// reduced to RFC 5322 `ftext` (printable ASCII except `:`) before use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HeaderMap {
    entries: Vec<HeaderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
    /// Values are already in wire form and skip encoded-word encoding.
    preformatted: bool,
}

impl HeaderMap {
    pub(crate) fn set(&mut self, name: &str, values: Vec<String>) {
        self.insert(name, values, false);
    }

    /// Stores values that are already ASCII wire text, such as formatted
    /// addresses and dates.
    pub(crate) fn set_preformatted(&mut self, name: &str, values: Vec<String>) {
        self.insert(name, values, true);
    }

    fn insert(&mut self, name: &str, values: Vec<String>, preformatted: bool) {
        let name = sanitize_name(name);
        if name.is_empty() {
            #[cfg(feature = "with-tracing")]
            tracing::warn!("dropping header without a usable name");
            return;
        }
        match self.position(&name) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.values = values;
                entry.preformatted = preformatted;
            }
            None => self.entries.push(HeaderEntry {
                name: name.into_owned(),
                values,
                preformatted,
            }),
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|idx| self.entries[idx].values.as_slice())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// Like [`HeaderMap::iter`], with the preformatted flag of each entry.
    pub(crate) fn wire_entries(&self) -> impl Iterator<Item = (&str, &[String], bool)> {
        self.entries.iter().map(|entry| {
            (
                entry.name.as_str(),
                entry.values.as_slice(),
                entry.preformatted,
            )
        })
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = sanitize_name(name);
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(&name))
    }
}

fn is_ftext(ch: char) -> bool {
    matches!(ch, '!'..='~') && ch != ':'
}

fn sanitize_name(name: &str) -> Cow<'_, str> {
    if name.chars().all(is_ftext) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(name.chars().filter(|ch| is_ftext(*ch)).collect())
    }
}
