use std::fmt;

/// Position of a helix within its topology. Helices derived from a path share the index of the
/// path edge they were built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HelixId(pub usize);

impl HelixId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HelixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "helix #{}", self.0)
    }
}
