//! Value identity of a font descriptor

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::Font;
use crate::constants::{HASH_MULTIPLIER, HASH_SEED};

fn hash_of<T: Hash + ?Sized>(value: &T) -> i32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as i32
}

impl Font {
    /// Identity hash over family, size, style, unit, char set and writing
    /// direction. Computed on first use and memoized.
    pub fn hash_code(&self) -> i32 {
        *self.hash_code.get_or_init(|| {
            let parts = [
                hash_of(self.name()),
                hash_of(&self.family),
                self.size.to_bits() as i32,
                self.unit.code(),
                self.style.code(),
                i32::from(self.char_set),
                i32::from(self.vertical),
            ];
            parts
                .iter()
                .fold(HASH_SEED, |acc, part| acc.wrapping_mul(HASH_MULTIPLIER).wrapping_add(*part))
        })
    }

    /// Compare against an arbitrary value; anything that isn't a font, or
    /// nothing at all, is unequal.
    pub fn equals(&self, other: Option<&dyn Any>) -> bool {
        other
            .and_then(|value| value.downcast_ref::<Font>())
            .is_some_and(|font| self == font)
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.size == other.size
            && self.style == other.style
            && self.unit == other.unit
            && self.char_set == other.char_set
            && self.vertical == other.vertical
    }
}

// Sizes are validated finite at construction
impl Eq for Font {}

impl Hash for Font {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::tests::posix_context;
    use super::*;
    use crate::style::FontStyle;
    use crate::unit::GraphicsUnit;

    #[test]
    fn test_names_outside_identity() {
        let (_, ctx) = posix_context();
        let plain = Font::new(&ctx, "Arial", 12.0).unwrap();
        let system = Font::system_font(&ctx, "arial", 12.0, "MenuFont").unwrap();

        assert_ne!(plain.original_name(), system.original_name());
        assert_eq!(plain, system);
        assert_eq!(plain.hash_code(), system.hash_code());
    }

    #[test]
    fn test_fallback_fonts_are_equal() {
        let (_, ctx) = posix_context();
        let a = Font::new(&ctx, "Missing One", 12.0).unwrap();
        let b = Font::new(&ctx, "Missing Two", 12.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_each_identity_field_matters() {
        let (_, ctx) = posix_context();
        let base = Font::new(&ctx, "Arial", 12.0).unwrap();
        let variants = [
            Font::new(&ctx, "Courier New", 12.0).unwrap(),
            Font::new(&ctx, "Arial", 13.0).unwrap(),
            Font::builder("Arial", 12.0).style(FontStyle::BOLD).build(&ctx).unwrap(),
            Font::builder("Arial", 12.0).unit(GraphicsUnit::Pixel).build(&ctx).unwrap(),
            Font::builder("Arial", 12.0).char_set(0).build(&ctx).unwrap(),
            Font::builder("Arial", 12.0).vertical(true).build(&ctx).unwrap(),
        ];
        for variant in &variants {
            assert_ne!(&base, variant, "{variant}");
        }
    }

    #[test]
    fn test_hash_is_memoized() {
        let (_, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        let first = font.hash_code();
        assert_eq!(font.hash_code.get(), Some(&first));
        assert_eq!(font.hash_code(), first);
    }

    #[test]
    fn test_equals_rejects_other_values() {
        let (_, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        let twin = font.try_clone().unwrap();

        assert!(font.equals(Some(&twin)));
        assert!(!font.equals(Some(&"Arial")));
        assert!(!font.equals(Some(&12.0f32)));
        assert!(!font.equals(None));
    }

    #[test]
    fn test_usable_as_set_key() {
        let (_, ctx) = posix_context();
        let mut set = HashSet::new();
        set.insert(Font::new(&ctx, "Arial", 12.0).unwrap());
        set.insert(Font::new(&ctx, "ARIAL", 12.0).unwrap());
        set.insert(Font::new(&ctx, "Arial", 14.0).unwrap());
        assert_eq!(set.len(), 2);
    }
}
