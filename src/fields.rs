use crate::config::DEFAULT_LOCALITY;
use crate::normalizer::{Qualifier, QualifierKind, WordClass, classify, trailing_qualifier};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressFields {
    pub locality: String,
    pub street: String,
    pub number: String,
}

/// First letter upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn is_street_end(part: &str) -> bool {
    matches!(
        classify(part),
        WordClass::FusedHouse(_) | WordClass::FusedQualifier(_)
    ) || part == "дом"
        || QualifierKind::from_canonical(part).is_some()
}

/// Accepts both underscore- and space-joined canonical forms.
pub fn extract_fields(canonical: &str) -> AddressFields {
    let parts: Vec<&str> = canonical
        .split(['_', ' '])
        .filter(|p| !p.is_empty())
        .collect();

    let mut locality = String::new();
    let mut street: Vec<String> = Vec::new();
    let mut number = String::new();
    let mut qualifiers: Vec<Qualifier> = Vec::new();

    let mut i = 0;
    while i < parts.len() {
        let part = parts[i];
        if part == "город" && i + 1 < parts.len() {
            locality = capitalize(parts[i + 1]);
            i += 2;
        } else if part == "улица" {
            i += 1;
            while i < parts.len() && !is_street_end(parts[i]) {
                street.push(capitalize(parts[i]));
                i += 1;
            }
        } else if part == "дом" {
            if let Some(next) = parts.get(i + 1) {
                number = next.to_string();
            }
            i += 2;
        } else if let Some(kind) = QualifierKind::from_canonical(part) {
            if let Some(next) = parts.get(i + 1) {
                qualifiers.push(Qualifier {
                    kind,
                    value: next.to_string(),
                });
            }
            i += 2;
        } else {
            match classify(part) {
                WordClass::FusedHouse(n) => number = n,
                WordClass::FusedQualifier(q) => qualifiers.push(q),
                WordClass::Other if !number.is_empty() || !qualifiers.is_empty() => {
                    qualifiers.extend(trailing_qualifier(part));
                }
                _ => {}
            }
            i += 1;
        }
    }

    let mut rendered: Vec<String> = Vec::with_capacity(qualifiers.len() + 1);
    if !number.is_empty() {
        rendered.push(number);
    }
    rendered.extend(
        qualifiers
            .iter()
            .map(|q| format!("{}{}", q.kind.label(), q.value)),
    );

    AddressFields {
        locality: if locality.is_empty() {
            DEFAULT_LOCALITY.to_string()
        } else {
            locality
        },
        street: street.join(" "),
        number: rendered.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_rendered_after_number() {
        let fields = extract_fields("город_москва_улица_мира_дом25_корпус3");
        assert_eq!(fields.locality, "Москва");
        assert_eq!(fields.street, "Мира");
        assert_eq!(fields.number, "25 корп.3");
    }

    #[test]
    fn test_multi_word_street() {
        let fields = extract_fields("город_москва_улица_проспект_мира_дом25");
        assert_eq!(fields.street, "Проспект Мира");
        assert_eq!(fields.number, "25");
    }

    #[test]
    fn test_qualifier_without_house() {
        let fields = extract_fields("город_москва_улица_тверская_строение1");
        assert_eq!(fields.street, "Тверская");
        assert_eq!(fields.number, "стр.1");
    }

    #[test]
    fn test_multi_letter_qualifier_values() {
        let fields = extract_fields("город_москва_улица_мира_дом5_литерааб");
        assert_eq!(fields.street, "Мира");
        assert_eq!(fields.number, "5 лит.аб");

        let fields = extract_fields("город_москва_улица_мира_дом5_корпуса1_строение2");
        assert_eq!(fields.number, "5 корп.а1 стр.2");
    }

    #[test]
    fn test_degenerate_form() {
        let fields = extract_fields("город_москва_улица");
        assert_eq!(
            fields,
            AddressFields {
                locality: "Москва".into(),
                street: String::new(),
                number: String::new(),
            }
        );
    }

    #[test]
    fn test_missing_city_defaults() {
        let fields = extract_fields("улица_арбат_дом1");
        assert_eq!(fields.locality, "Москва");
        assert_eq!(fields.street, "Арбат");
        assert_eq!(fields.number, "1");
    }

    #[test]
    fn test_space_joined_with_detached_house() {
        let fields = extract_fields("город москва улица арбат дом 7 литера а");
        assert_eq!(fields.street, "Арбат");
        assert_eq!(fields.number, "7 лит.а");
    }

    #[test]
    fn test_street_starting_with_dom_is_kept() {
        let fields = extract_fields("город_москва_улица_домодедовская_дом3");
        assert_eq!(fields.street, "Домодедовская");
        assert_eq!(fields.number, "3");
    }
}
