//! Family resolution through fontconfig

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use fontbridge_core::constants::GENERIC_SANS_SERIF;
use fontbridge_core::{FamilyHandle, FamilyNotFound, FamilyResolver, FontFamily};
use fontconfig::Fontconfig;

/// Resolves names against the fonts fontconfig knows about.
///
/// Fontconfig always answers with its best match; a match under a
/// different name counts as not found so the caller's fallback applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontconfigResolver;

impl FontconfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// True when the fontconfig library could be initialised.
    pub fn available() -> bool {
        Fontconfig::new().is_some()
    }
}

fn family_handle(name: &str) -> FamilyHandle {
    let mut hasher = DefaultHasher::new();
    name.to_lowercase().hash(&mut hasher);
    FamilyHandle(hasher.finish())
}

impl FamilyResolver for FontconfigResolver {
    fn resolve(&self, name: &str) -> Result<FontFamily, FamilyNotFound> {
        let not_found = || FamilyNotFound { name: name.to_string() };
        let wanted = name.trim();
        if wanted.is_empty() {
            return Err(not_found());
        }

        let fc = Fontconfig::new().ok_or_else(not_found)?;
        let font = fc.find(wanted, None).ok_or_else(not_found)?;
        if !font.name.eq_ignore_ascii_case(wanted) {
            tracing::debug!("Fontconfig matched {} for {}", font.name, wanted);
            return Err(not_found());
        }
        Ok(FontFamily::new(font.name.clone(), family_handle(&font.name)))
    }

    fn generic_sans_serif(&self) -> FontFamily {
        Fontconfig::new()
            .and_then(|fc| fc.find("sans-serif", None))
            .map(|font| FontFamily::new(font.name.clone(), family_handle(&font.name)))
            .unwrap_or_else(|| FontFamily::new(GENERIC_SANS_SERIF, FamilyHandle(0)))
    }
}
