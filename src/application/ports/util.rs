// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Lowercase, hyphen separated, URL-safe form of `input`. May be empty.
    fn slugify(&self, input: &str) -> String;
}
