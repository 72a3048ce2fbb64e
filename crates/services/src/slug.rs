//! URL slugs derived from titles.

use domains::Recipe;
use uuid::Uuid;

const SUFFIX_LENGTH: usize = 8;
const FALLBACK_BODY: &str = "recipe";

/// Lowercases `text`, keeps letters and digits, and joins words with single
/// hyphens. Returns an empty string when nothing alphanumeric is left.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-' || c == '_')
            && !slug.is_empty()
            && !slug.ends_with('-')
        {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}

/// A unique recipe slug: the slugified title plus a random 8-character suffix.
pub fn recipe_slug(title: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    with_suffix(title, &suffix[..SUFFIX_LENGTH])
}

fn with_suffix(title: &str, suffix: &str) -> String {
    let max_body = Recipe::MAX_SLUG_LENGTH - SUFFIX_LENGTH - 1;
    let body: String = slugify(title).chars().take(max_body).collect();
    let body = body.trim_end_matches('-');
    if body.is_empty() {
        format!("{FALLBACK_BODY}-{suffix}")
    } else {
        format!("{body}-{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_joins_words_with_single_hyphens() {
        assert_eq!(slugify("  Grandma's Best  Chili! "), "grandmas-best-chili");
        assert_eq!(slugify("one -- two__three"), "one-two-three");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Crème Brûlée"), "crème-brûlée");
    }

    #[test]
    fn symbols_only_fall_back_to_recipe() {
        assert_eq!(with_suffix("!!!", "abcd1234"), "recipe-abcd1234");
    }

    #[test]
    fn recipe_slug_appends_random_hex_suffix() {
        let slug = recipe_slug("Chili");
        let (body, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(body, "chili");
        assert_eq!(suffix.len(), SUFFIX_LENGTH);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(recipe_slug("Chili"), slug);
    }

    #[test]
    fn long_titles_fit_the_slug_column() {
        let title = "word ".repeat(60);
        let slug = with_suffix(&title, "abcd1234");
        assert!(slug.chars().count() <= Recipe::MAX_SLUG_LENGTH);
        assert!(!slug.contains("--"));
        assert!(slug.ends_with("-abcd1234"));
    }
}
