//! Resolved font families and a list-backed resolver

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants::GENERIC_SANS_SERIF;
use crate::traits::FamilyResolver;

/// Opaque engine identifier for a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FamilyHandle(pub u64);

/// A named collection of faces, resolved independently of size and style.
///
/// Two families are the same family when their names match; the handle is
/// whatever the resolver's engine uses to refer to it.
#[derive(Debug, Clone)]
pub struct FontFamily {
    name: String,
    handle: FamilyHandle,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, handle: FamilyHandle) -> Self {
        Self { name: name.into(), handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> FamilyHandle {
        self.handle
    }
}

impl PartialEq for FontFamily {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FontFamily {}

impl Hash for FontFamily {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FontFamily: Name={}]", self.name)
    }
}

/// Resolution failure. Never surfaces past font construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Font family not found: {name:?}")]
pub struct FamilyNotFound {
    pub name: String,
}

/// Resolver over a fixed list of installed family names.
///
/// Lookups are case-insensitive and return the installed spelling. Handles
/// are list positions starting at 1; the generic sans serif family always
/// has handle 0.
#[derive(Debug, Clone)]
pub struct InstalledFamilies {
    families: Vec<String>,
    generic: FontFamily,
}

impl InstalledFamilies {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: names.into_iter().map(Into::into).collect(),
            generic: FontFamily::new(GENERIC_SANS_SERIF, FamilyHandle(0)),
        }
    }

    /// Use a different family as the generic sans serif fallback.
    pub fn with_generic(mut self, name: &str) -> Self {
        self.generic = FontFamily::new(name, FamilyHandle(0));
        self
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl FamilyResolver for InstalledFamilies {
    fn resolve(&self, name: &str) -> Result<FontFamily, FamilyNotFound> {
        let wanted = name.trim();
        if wanted.is_empty() {
            return Err(FamilyNotFound { name: name.to_string() });
        }
        if wanted.eq_ignore_ascii_case(self.generic.name()) {
            return Ok(self.generic.clone());
        }
        self.families
            .iter()
            .position(|family| family.eq_ignore_ascii_case(wanted))
            .map(|index| FontFamily::new(self.families[index].clone(), FamilyHandle(index as u64 + 1)))
            .ok_or_else(|| FamilyNotFound { name: name.to_string() })
    }

    fn generic_sans_serif(&self) -> FontFamily {
        self.generic.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolver = InstalledFamilies::new(["Arial", "DejaVu Sans"]);
        let family = resolver.resolve("dejavu sans").unwrap();
        assert_eq!(family.name(), "DejaVu Sans");
        assert_eq!(family.handle(), FamilyHandle(2));
    }

    #[test]
    fn test_resolve_unknown_and_empty() {
        let resolver = InstalledFamilies::new(["Arial"]);
        assert_eq!(
            resolver.resolve("No Such Family"),
            Err(FamilyNotFound { name: "No Such Family".to_string() })
        );
        assert!(resolver.resolve("").is_err());
        assert!(resolver.resolve("   ").is_err());
    }

    #[test]
    fn test_generic_family_resolves_by_name() {
        let resolver = InstalledFamilies::new(Vec::<String>::new()).with_generic("Generic Sans");
        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve("Generic Sans").unwrap(), resolver.generic_sans_serif());
    }

    #[test]
    fn test_family_equality_ignores_handle() {
        assert_eq!(
            FontFamily::new("Arial", FamilyHandle(1)),
            FontFamily::new("Arial", FamilyHandle(7))
        );
        assert_ne!(
            FontFamily::new("Arial", FamilyHandle(1)),
            FontFamily::new("Verdana", FamilyHandle(1))
        );
    }
}
