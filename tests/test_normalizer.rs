use rugeo::fields::extract_fields;
use rugeo::normalizer::{QualifierKind, normalize, parse};

const SAMPLES: &[&str] = &[
    "пр-т Мира д 25 к.3",
    ".г Москва, ул. Тверская, д. 10, стр. 1",
    "Ленина улица, дом 5, корпус 2",
    "Москва, Садовая ул, д.5, с.1",
    "наб. Фонтанки, дом 10 лит. А",
    "Мира 25",
    "ул. Домодедовская, д. 3",
    "г. Москва, Кутузовский пр-т, 30",
    "б-р Яна Райниса д.4 корп.1 стр.2",
    "к. 3",
    "",
    "ул. Мира д. 5 лит. АБ",
    "ул. Мира д. 5 корп. А1",
    "ул. Мира стр. 1 лит. АБ",
    "ул. Литераторов, д. 4",
];

#[test]
fn test_spec_scenarios() {
    assert_eq!(
        normalize("пр-т Мира д 25 к.3"),
        "город_москва_улица_проспект_мира_дом25_корпус3"
    );
    assert_eq!(
        normalize(".г Москва, ул. Тверская, д. 10, стр. 1"),
        "город_москва_улица_тверская_дом10_строение1"
    );
}

#[test]
fn test_normalization_is_deterministic() {
    for raw in SAMPLES {
        assert_eq!(normalize(raw), normalize(raw), "input: {:?}", raw);
    }
}

#[test]
fn test_renormalizing_keeps_structure() {
    for raw in SAMPLES {
        let once = normalize(raw);
        assert_eq!(parse(&once), parse(raw), "input: {:?} -> {}", raw, once);
        assert_eq!(normalize(&once), once, "input: {:?}", raw);
    }
}

#[test]
fn test_litera_value_kept_verbatim() {
    assert_eq!(
        normalize("наб. Фонтанки, дом 10 лит. А"),
        "город_москва_улица_наб_фонтанки_дом10_литераа"
    );
}

#[test]
fn test_qualifiers_keep_encounter_order() {
    let parsed = parse("б-р Яна Райниса д.4 стр.2 корп.1 стр.2");
    let kinds: Vec<QualifierKind> = parsed.qualifiers.iter().map(|q| q.kind).collect();
    assert_eq!(
        kinds,
        vec![
            QualifierKind::Structure,
            QualifierKind::Corpus,
            QualifierKind::Structure
        ]
    );
    assert_eq!(parsed.street, vec!["бульвар", "яна", "райниса"]);
    assert_eq!(parsed.house.as_deref(), Some("4"));
}

#[test]
fn test_house_number_keeps_only_digits() {
    let parsed = parse("ул. Арбат, д. 26а");
    assert_eq!(parsed.house.as_deref(), Some("26"));
}

#[test]
fn test_stray_leading_number_is_not_street() {
    // A number in first position with no street context is dropped.
    assert_eq!(normalize("12"), "город_москва_улица");
}

#[test]
fn test_extract_after_normalize() {
    let fields = extract_fields(&normalize("Москва, Садовая ул, д.5, с.1"));
    assert_eq!(fields.locality, "Москва");
    assert_eq!(fields.street, "Садовая");
    assert_eq!(fields.number, "5 стр.1");
}

#[test]
fn test_extract_spec_round_trip() {
    let fields = extract_fields("город_москва_улица_мира_дом25_корпус3");
    assert_eq!(fields.locality, "Москва");
    assert_eq!(fields.street, "Мира");
    assert_eq!(fields.number, "25 корп.3");
}

#[test]
fn test_extract_multi_letter_qualifiers() {
    let fields = extract_fields(&normalize("ул. Мира д. 5 лит. АБ"));
    assert_eq!(fields.street, "Мира");
    assert_eq!(fields.number, "5 лит.аб");

    let fields = extract_fields(&normalize("ул. Мира д. 5 корп. А1"));
    assert_eq!(fields.number, "5 корп.а1");
}
