use crate::application::ports::util::SlugGenerator;
use slug::slugify;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation_and_case() {
        let generator = DefaultSlugGenerator;
        assert_eq!(generator.slugify("City Hall: Budget 2024!"), "city-hall-budget-2024");
        assert_eq!(generator.slugify("  "), "");
    }
}
