use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Fromln, AsRefln)]
pub struct BookId(i32);

impl BookId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
