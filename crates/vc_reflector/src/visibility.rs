use core::fmt;

use bitflags::bitflags;

// -----------------------------------------------------------------------------
// Visibility

/// The declared visibility tier of a property or method.
///
/// Reflector operations ignore it for access; it only takes part in
/// enumeration through [`VisibilityFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Returns the single-bit filter matching this tier.
    #[inline]
    pub const fn as_filter(self) -> VisibilityFilter {
        match self {
            Self::Public => VisibilityFilter::PUBLIC,
            Self::Protected => VisibilityFilter::PROTECTED,
            Self::Private => VisibilityFilter::PRIVATE,
        }
    }

    #[inline]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        })
    }
}

// -----------------------------------------------------------------------------
// VisibilityFilter

bitflags! {
    /// A combinable mask of visibility tiers used when enumerating members.
    ///
    /// The default is every tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflector::{Visibility, VisibilityFilter};
    ///
    /// let filter = VisibilityFilter::PUBLIC | VisibilityFilter::PROTECTED;
    /// assert!(filter.accepts(Visibility::Protected));
    /// assert!(!filter.accepts(Visibility::Private));
    /// assert_eq!(VisibilityFilter::default(), VisibilityFilter::all());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VisibilityFilter: u8 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
    }
}

impl Default for VisibilityFilter {
    #[inline]
    fn default() -> Self {
        Self::all()
    }
}

impl VisibilityFilter {
    /// Whether a member of the given tier passes this filter.
    #[inline]
    pub const fn accepts(self, visibility: Visibility) -> bool {
        self.contains(visibility.as_filter())
    }
}

impl From<Visibility> for VisibilityFilter {
    #[inline]
    fn from(value: Visibility) -> Self {
        value.as_filter()
    }
}
