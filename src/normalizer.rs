use crate::config::DEFAULT_CITY;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

pub const CITY_MARKERS: &[&str] = &["г", ".г", "город", "москва", "мск"];

/// Street type markers, keyed by their dot-stripped spelling. `None` marks the
/// plain "street" words, which are dropped; `Some` markers contribute their
/// canonical word as the first street token.
pub const STREET_TYPES: &[(&str, Option<&str>)] = &[
    ("ул", None),
    ("улица", None),
    ("пр-т", Some("проспект")),
    ("пр", Some("проспект")),
    ("проспект", Some("проспект")),
    ("наб", Some("наб")),
    ("набережная", Some("набережная")),
    ("пер", Some("переулок")),
    ("переулок", Some("переулок")),
    ("б-р", Some("бульвар")),
    ("бульвар", Some("бульвар")),
    ("пл", Some("площадь")),
    ("площадь", Some("площадь")),
    ("ш", Some("шоссе")),
    ("шоссе", Some("шоссе")),
    ("проезд", Some("проезд")),
    ("ал", Some("аллея")),
    ("аллея", Some("аллея")),
];

pub const HOUSE_MARKERS: &[&str] = &["д", "дом"];

pub const BUILDING_MARKERS: &[(&str, QualifierKind)] = &[
    ("к", QualifierKind::Corpus),
    ("корп", QualifierKind::Corpus),
    ("корпус", QualifierKind::Corpus),
    ("стр", QualifierKind::Structure),
    ("с", QualifierKind::Structure),
    ("строение", QualifierKind::Structure),
    ("лит", QualifierKind::Litera),
    ("литера", QualifierKind::Litera),
];

lazy_static! {
    static ref CITY_SET: HashSet<&'static str> = CITY_MARKERS.iter().copied().collect();
    static ref STREET_TYPE_MAP: HashMap<&'static str, Option<&'static str>> =
        STREET_TYPES.iter().copied().collect();
    static ref HOUSE_SET: HashSet<&'static str> = HOUSE_MARKERS.iter().copied().collect();
    static ref BUILDING_MAP: HashMap<&'static str, QualifierKind> =
        BUILDING_MARKERS.iter().copied().collect();
    static ref RE_LEADING_CITY_DOT: Regex = Regex::new(r"^\.г\s+").unwrap();
    static ref RE_DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
    static ref RE_FUSED_HOUSE: Regex = Regex::new(r"^дом([0-9]+)$").unwrap();
    static ref RE_FUSED_QUALIFIER: Regex =
        Regex::new(r"^(корпус|строение|литера)([0-9]\S*|\p{L})$").unwrap();
    static ref RE_TRAILING_QUALIFIER: Regex =
        Regex::new(r"^(корпус|строение|литера)(\S+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualifierKind {
    Corpus,
    Structure,
    Litera,
}

impl QualifierKind {
    /// Word used in the canonical form.
    pub fn canonical(self) -> &'static str {
        match self {
            QualifierKind::Corpus => "корпус",
            QualifierKind::Structure => "строение",
            QualifierKind::Litera => "литера",
        }
    }

    /// Short label used when rendering a house number for display.
    pub fn label(self) -> &'static str {
        match self {
            QualifierKind::Corpus => "корп.",
            QualifierKind::Structure => "стр.",
            QualifierKind::Litera => "лит.",
        }
    }

    pub fn from_canonical(word: &str) -> Option<Self> {
        match word {
            "корпус" => Some(QualifierKind::Corpus),
            "строение" => Some(QualifierKind::Structure),
            "литера" => Some(QualifierKind::Litera),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    pub kind: QualifierKind,
    pub value: String,
}

impl Qualifier {
    pub fn segment(&self) -> String {
        format!("{}{}", self.kind.canonical(), self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordClass {
    /// A comma, or a word that is nothing but punctuation.
    Separator,
    City,
    /// Carries the canonical first street token, if the marker has one.
    StreetType(Option<&'static str>),
    HouseMarker,
    BuildingMarker(QualifierKind),
    /// A canonical `дом<number>` segment.
    FusedHouse(String),
    /// A canonical `<kind><value>` segment.
    FusedQualifier(Qualifier),
    Number(String),
    Other,
}

/// A word as it appears after preprocessing, with trailing dots and commas
/// removed, plus its class.
#[derive(Debug, Clone)]
struct Word {
    clean: String,
    class: WordClass,
}

/// Dot-stripped digits, if the word is a bare number (`"25"`, `"25."`).
fn bare_number(clean: &str) -> Option<String> {
    let digits: String = clean.chars().filter(|c| *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}

pub fn classify(clean: &str) -> WordClass {
    if clean.is_empty() {
        return WordClass::Separator;
    }
    if CITY_SET.contains(clean) {
        return WordClass::City;
    }
    if let Some(expansion) = STREET_TYPE_MAP.get(clean) {
        return WordClass::StreetType(*expansion);
    }
    if HOUSE_SET.contains(clean) {
        return WordClass::HouseMarker;
    }
    if let Some(kind) = BUILDING_MAP.get(clean) {
        return WordClass::BuildingMarker(*kind);
    }
    if let Some(caps) = RE_FUSED_HOUSE.captures(clean) {
        return WordClass::FusedHouse(caps[1].to_string());
    }
    if let Some(caps) = RE_FUSED_QUALIFIER.captures(clean) {
        if let Some(kind) = QualifierKind::from_canonical(&caps[1]) {
            return WordClass::FusedQualifier(Qualifier {
                kind,
                value: caps[2].to_string(),
            });
        }
    }
    if let Some(number) = bare_number(clean) {
        return WordClass::Number(number);
    }
    WordClass::Other
}

/// Any `<kind><value>` segment, e.g. `литерааб` or `корпуса1`. Only valid
/// past the house number or an earlier qualifier, where street words such
/// as `литераторов` cannot appear.
pub fn trailing_qualifier(clean: &str) -> Option<Qualifier> {
    let caps = RE_TRAILING_QUALIFIER.captures(clean)?;
    Some(Qualifier {
        kind: QualifierKind::from_canonical(&caps[1])?,
        value: caps[2].to_string(),
    })
}

/// `"д.10"` becomes `"д. 10"`: a space goes after every dot that follows a
/// word character and is not already followed by whitespace.
fn space_after_abbreviation_dots(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c != '.' || i == 0 {
            continue;
        }
        let prev = chars[i - 1];
        let is_word_char = prev.is_alphanumeric() || prev == '_';
        let next_is_space = chars.get(i + 1).is_none_or(|n| n.is_whitespace());
        if is_word_char && !next_is_space {
            out.push(' ');
        }
    }
    out
}

fn split_words(raw: &str) -> Vec<Word> {
    let lowered = raw.nfc().collect::<String>().to_lowercase().replace('_', " ");
    let trimmed = lowered.trim();
    let expanded = RE_LEADING_CITY_DOT.replace(trimmed, "г. ");
    let spaced = space_after_abbreviation_dots(&expanded).replace(',', " , ");

    spaced
        .split_whitespace()
        .map(|w| {
            let clean = w.trim_end_matches(['.', ',']).to_string();
            let class = classify(&clean);
            Word { clean, class }
        })
        .collect()
}

/// Structural fields of a normalized address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub city: String,
    pub street: Vec<String>,
    pub house: Option<String>,
    pub qualifiers: Vec<Qualifier>,
}

impl Default for ParsedAddress {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            street: Vec::new(),
            house: None,
            qualifiers: Vec::new(),
        }
    }
}

impl ParsedAddress {
    /// No street tokens and no house number: nothing to match on.
    pub fn is_degenerate(&self) -> bool {
        self.street.is_empty() && self.house.is_none()
    }

    pub fn to_canonical(&self) -> String {
        let mut parts = vec!["город".to_string(), self.city.clone(), "улица".to_string()];
        if !self.street.is_empty() {
            parts.push(self.street.join("_"));
        }
        if let Some(house) = &self.house {
            parts.push(format!("дом{}", house));
        }
        parts.extend(self.qualifiers.iter().map(Qualifier::segment));
        parts.join("_")
    }

    fn set_house(&mut self, number: &str) {
        if self.house.is_none() {
            self.house = Some(number.to_string());
        }
    }

    /// Words after a street type marker, up to the next house/building
    /// marker or the first bare number while the house is still unknown.
    fn accumulate_street(&mut self, words: &[Word], mut i: usize) -> usize {
        while let Some(word) = words.get(i) {
            match &word.class {
                WordClass::Separator => {}
                WordClass::HouseMarker
                | WordClass::BuildingMarker(_)
                | WordClass::FusedHouse(_)
                | WordClass::FusedQualifier(_) => break,
                WordClass::Number(_) if self.house.is_none() => break,
                _ => self.street.push(word.clean.clone()),
            }
            i += 1;
        }
        i
    }
}

pub fn parse(raw: &str) -> ParsedAddress {
    let words = split_words(raw);
    let mut out = ParsedAddress::default();
    let mut i = 0;

    while i < words.len() {
        let word = &words[i];
        match &word.class {
            WordClass::Separator => i += 1,
            WordClass::City => {
                out.city = DEFAULT_CITY.to_string();
                i += 1;
            }
            WordClass::StreetType(expansion) => {
                if let Some(first) = expansion {
                    out.street.push(first.to_string());
                }
                i = out.accumulate_street(&words, i + 1);
            }
            WordClass::HouseMarker => {
                i += 1;
                let digits = words
                    .get(i)
                    .and_then(|next| RE_DIGITS.find(&next.clean))
                    .map(|m| m.as_str().to_string());
                if let Some(number) = digits {
                    out.set_house(&number);
                    i += 1;
                }
            }
            WordClass::BuildingMarker(kind) => {
                i += 1;
                if let Some(next) = words.get(i).filter(|next| !next.clean.is_empty()) {
                    out.qualifiers.push(Qualifier {
                        kind: *kind,
                        value: next.clean.clone(),
                    });
                    i += 1;
                }
            }
            WordClass::FusedHouse(number) => {
                out.set_house(number);
                i += 1;
            }
            WordClass::FusedQualifier(qualifier) => {
                out.qualifiers.push(qualifier.clone());
                i += 1;
            }
            WordClass::Number(_) | WordClass::Other => {
                let number = match &word.class {
                    WordClass::Number(n) => Some(n),
                    _ => None,
                };

                if let Some(n) = number {
                    if out.house.is_none() && (!out.street.is_empty() || i > 0) {
                        out.house = Some(n.clone());
                        i += 1;
                        continue;
                    }
                }

                if out.house.is_some() || !out.qualifiers.is_empty() {
                    if let Some(qualifier) = trailing_qualifier(&word.clean) {
                        out.qualifiers.push(qualifier);
                        i += 1;
                        continue;
                    }
                }

                // "Ленина улица": a name written before its street type.
                if matches!(words.get(i + 1).map(|w| &w.class), Some(WordClass::StreetType(_))) {
                    out.street.push(word.clean.clone());
                    i += 2;
                    continue;
                }

                if out.house.is_none() && (!out.street.is_empty() || number.is_none()) {
                    out.street.push(word.clean.clone());
                }
                i += 1;
            }
        }
    }

    out
}

/// Canonical token form of `raw`.
pub fn normalize(raw: &str) -> String {
    parse(raw).to_canonical()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_city_markers() {
        for marker in ["г", "город", "москва", "мск"] {
            assert_eq!(classify(marker), WordClass::City, "{}", marker);
        }
    }

    #[test]
    fn test_classify_street_types() {
        assert_eq!(classify("ул"), WordClass::StreetType(None));
        assert_eq!(classify("пр-т"), WordClass::StreetType(Some("проспект")));
        assert_eq!(classify("б-р"), WordClass::StreetType(Some("бульвар")));
        assert_eq!(classify("наб"), WordClass::StreetType(Some("наб")));
    }

    #[test]
    fn test_classify_house_and_building() {
        assert_eq!(classify("д"), WordClass::HouseMarker);
        assert_eq!(classify("корп"), WordClass::BuildingMarker(QualifierKind::Corpus));
        assert_eq!(classify("с"), WordClass::BuildingMarker(QualifierKind::Structure));
        assert_eq!(classify("лит"), WordClass::BuildingMarker(QualifierKind::Litera));
    }

    #[test]
    fn test_classify_fused_segments() {
        assert_eq!(classify("дом25"), WordClass::FusedHouse("25".into()));
        assert_eq!(
            classify("корпус3"),
            WordClass::FusedQualifier(Qualifier {
                kind: QualifierKind::Corpus,
                value: "3".into()
            })
        );
        // Street names that merely start with a marker word stay words.
        assert_eq!(classify("домодедовская"), WordClass::Other);
        assert_eq!(classify("литераторов"), WordClass::Other);
    }

    #[test]
    fn test_trailing_qualifier_takes_any_value() {
        assert_eq!(
            trailing_qualifier("литерааб"),
            Some(Qualifier {
                kind: QualifierKind::Litera,
                value: "аб".into()
            })
        );
        assert_eq!(
            trailing_qualifier("корпуса1").map(|q| q.value),
            Some("а1".to_string())
        );
        assert_eq!(trailing_qualifier("литера"), None);
        assert_eq!(trailing_qualifier("мира"), None);
    }

    #[test]
    fn test_letter_qualifier_after_house() {
        let canonical = normalize("ул. Мира д. 5 лит. АБ");
        assert_eq!(canonical, "город_москва_улица_мира_дом5_литерааб");
        assert_eq!(normalize(&canonical), canonical);
    }

    #[test]
    fn test_street_named_like_qualifier_stays_street() {
        assert_eq!(
            normalize("ул. Литераторов, д. 4"),
            "город_москва_улица_литераторов_дом4"
        );
    }

    #[test]
    fn test_abbreviation_dots_get_spaced() {
        assert_eq!(space_after_abbreviation_dots("д.10"), "д. 10");
        assert_eq!(space_after_abbreviation_dots("д. 10"), "д. 10");
        assert_eq!(space_after_abbreviation_dots("д.к.3"), "д. к. 3");
    }

    #[test]
    fn test_prospekt_with_corpus() {
        assert_eq!(
            normalize("пр-т Мира д 25 к.3"),
            "город_москва_улица_проспект_мира_дом25_корпус3"
        );
    }

    #[test]
    fn test_leading_dot_city_marker() {
        assert_eq!(
            normalize(".г Москва, ул. Тверская, д. 10, стр. 1"),
            "город_москва_улица_тверская_дом10_строение1"
        );
    }

    #[test]
    fn test_name_before_street_type() {
        assert_eq!(
            normalize("Ленина улица, дом 5, корпус 2"),
            "город_москва_улица_ленина_дом5_корпус2"
        );
    }

    #[test]
    fn test_bare_number_becomes_house() {
        assert_eq!(normalize("Мира 25"), "город_москва_улица_мира_дом25");
    }

    #[test]
    fn test_first_house_number_wins() {
        assert_eq!(
            normalize("ул. Тверская д. 10 д. 12"),
            "город_москва_улица_тверская_дом10"
        );
    }

    #[test]
    fn test_empty_input_degenerates() {
        let parsed = parse("");
        assert!(parsed.is_degenerate());
        assert_eq!(parsed.to_canonical(), "город_москва_улица");
    }
}
