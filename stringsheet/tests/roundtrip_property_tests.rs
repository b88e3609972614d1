use std::collections::BTreeMap;

use proptest::prelude::*;
use stringsheet::formats::{self, Platform};
use stringsheet::sheet::{decode_matrix, encode_matrix};
use stringsheet::traits::Parser;
use stringsheet::types::{LanguageColumn, Project, TranslationRow};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    // Leading and trailing spaces are fair game; every codec keeps them.
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{1,30}").expect("valid value regex")
}

fn lang_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2}(-[A-Z]{2})?").expect("valid language regex")
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 1..8)
}

fn entries(values: &BTreeMap<String, String>) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn project_strategy() -> impl Strategy<Value = Project> {
    (
        prop::collection::btree_set(lang_strategy(), 1..4),
        prop::collection::btree_map(
            key_strategy(),
            prop::collection::vec(value_strategy(), 3),
            1..8,
        ),
    )
        .prop_map(|(languages, data)| {
            let columns: Vec<LanguageColumn> = languages
                .iter()
                .map(|code| {
                    let mut column = LanguageColumn::new(code.clone());
                    column.android_file = "strings.xml".to_string();
                    column.android_dir = format!("values-{code}/");
                    column
                })
                .collect();
            let rows = data
                .iter()
                .map(|(key, values)| {
                    let mut row = TranslationRow::new(key.clone());
                    for (column, value) in columns.iter().zip(values) {
                        row.set_value(&column.code, value.clone());
                    }
                    // Languages beyond the generated value count get empty
                    // strings so every cell is set, as spreadsheet decoding
                    // guarantees.
                    for column in columns.iter().skip(values.len()) {
                        row.set_value(&column.code, "");
                    }
                    row
                })
                .collect();
            Project::new(columns, rows)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn android_codec_roundtrip(values in dataset_strategy()) {
        let entries = entries(&values);
        let text = formats::encode(Platform::Android, "en", &entries);
        let decoded = formats::decode(Platform::Android, &text).unwrap();
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn arb_codec_roundtrip(values in dataset_strategy()) {
        let entries = entries(&values);
        let text = formats::encode(Platform::Flutter, "en-US", &entries);
        let decoded = formats::decode(Platform::Flutter, &text).unwrap();
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn apple_strings_codec_roundtrip(values in dataset_strategy()) {
        // Holds because generated values contain no quotes or newlines.
        let entries = entries(&values);
        let text = formats::encode(Platform::Ios, "en", &entries);
        let decoded = formats::decode(Platform::Ios, &text).unwrap();
        prop_assert_eq!(decoded, entries);
    }

    #[test]
    fn spreadsheet_matrix_roundtrip(project in project_strategy()) {
        let decoded = decode_matrix(&encode_matrix(&project)).unwrap();
        prop_assert_eq!(decoded, project);
    }

    #[test]
    fn spreadsheet_csv_roundtrip(project in project_strategy()) {
        let text = project.to_text().unwrap();
        let decoded = Project::from_str(&text).unwrap();
        prop_assert_eq!(decoded, project);
    }

    #[test]
    fn export_then_import_reproduces_nonempty_pairs(project in project_strategy()) {
        let tree = stringsheet::ResourceTree::from_project(&project);
        for (column, file) in project.columns.iter().zip(&tree.files) {
            let decoded = formats::decode(Platform::Android, &file.content).unwrap();
            let expected: Vec<(String, String)> = project
                .language_entries(&column.code)
                .into_iter()
                .filter(|(_, v)| !v.is_empty())
                .collect();
            prop_assert_eq!(decoded, expected);
        }
    }
}
