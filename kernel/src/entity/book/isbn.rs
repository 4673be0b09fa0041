use vodca::{AsRefln, Fromln};

/// Unique across the catalog; uniqueness is enforced by the record store.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct BookIsbn(String);

impl BookIsbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }
}
