//! URL slug derivation from article titles.

/// Derive a URL slug from a title.
///
/// Lowercases, strips everything outside `[a-z0-9 -]` while keeping
/// accented Latin letters (U+00C0..U+017F), collapses whitespace and
/// hyphen runs to single hyphens and trims leading/trailing hyphens.
/// Deterministic and idempotent: a slug run through again is unchanged.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || *c == ' '
                || *c == '-'
                || ('\u{00C0}'..='\u{017F}').contains(c)
        })
        .collect();

    kept.split(|c: char| c == ' ' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_title() {
        assert_eq!(
            slugify("5 Tips voor een Succesvolle Renovatie"),
            "5-tips-voor-een-succesvolle-renovatie"
        );
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("Duurzaam Bouwen & Renoveren!");
        let twice = slugify(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "duurzaam-bouwen-renoveren");
    }

    #[test]
    fn test_slugify_keeps_accented_letters() {
        assert_eq!(slugify("Rénovatie in Café München"), "rénovatie-in-café-münchen");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Wat kost een dakkapel? (2024)"), "wat-kost-een-dakkapel-2024");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  Veel    spaties   hier  "), "veel-spaties-hier");
    }

    #[test]
    fn test_slugify_no_leading_or_trailing_hyphens() {
        let slug = slugify("!!! Belangrijk nieuws !!!");
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
        assert_eq!(slug, "belangrijk-nieuws");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only_titles() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!???"), "");
    }

    #[test]
    fn test_slugify_keeps_existing_hyphens() {
        assert_eq!(slugify("Co-creatie sessie"), "co-creatie-sessie");
    }

    #[test]
    fn test_slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("vrijdag -- open dag"), "vrijdag-open-dag");
        assert_eq!(slugify("-rand-geval-"), "rand-geval");
    }
}
