use std::collections::HashSet;

use crate::defaults;

/// The two allow-lists a [`crate::Sanitizer`] enforces.
///
/// Both sets hold lowercase names. They are computed once at construction
/// and treated as read-only for the lifetime of the sanitizer; a
/// `Sanitizer` is therefore safe to share across threads without
/// synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowLists {
    /// Permitted element tag names.
    pub elements: HashSet<String>,
    /// Permitted attribute names. `aria-*` and `data-*` prefixed names are
    /// accepted regardless of this set.
    pub attributes: HashSet<String>,
}

impl AllowLists {
    /// Builds allow-lists from caller-supplied name iterators.
    ///
    /// Names are lowercased on the way in so membership checks stay
    /// case-insensitive regardless of what the caller passes.
    pub fn new<E, A>(elements: E, attributes: A) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            elements: lowercase_set(elements),
            attributes: lowercase_set(attributes),
        }
    }
}

impl Default for AllowLists {
    fn default() -> Self {
        Self::new(
            defaults::DEFAULT_ALLOWED_ELEMENTS.iter().copied(),
            defaults::DEFAULT_ALLOWED_ATTRIBUTES.iter().copied(),
        )
    }
}

fn lowercase_set<I>(names: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().to_ascii_lowercase())
        .collect()
}
