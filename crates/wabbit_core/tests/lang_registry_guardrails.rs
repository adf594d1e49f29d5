use std::collections::HashSet;

use wabbit_core::lang::{keywords, operators, punctuation, runtime, types};

#[test]
fn keyword_table_is_indexed_by_id() {
    for (i, info) in keywords::KEYWORDS.iter().enumerate() {
        assert_eq!(info.id as usize, i, "KEYWORDS out of order at {:?}", info.id);
    }
}

#[test]
fn operator_table_is_indexed_by_id() {
    for (i, info) in operators::OPERATORS.iter().enumerate() {
        assert_eq!(info.id as usize, i, "OPERATORS out of order at {:?}", info.id);
    }
}

#[test]
fn punctuation_table_is_indexed_by_id() {
    for (i, info) in punctuation::PUNCTUATION.iter().enumerate() {
        assert_eq!(info.id as usize, i, "PUNCTUATION out of order at {:?}", info.id);
    }
}

#[test]
fn type_and_runtime_tables_are_indexed_by_id() {
    for (i, info) in types::PRIMITIVE_TYPES.iter().enumerate() {
        assert_eq!(info.id as usize, i, "PRIMITIVE_TYPES out of order at {:?}", info.id);
    }
    for (i, info) in runtime::PRINT_FUNCTIONS.iter().enumerate() {
        assert_eq!(info.id as usize, i, "PRINT_FUNCTIONS out of order at {:?}", info.id);
    }
}

#[test]
fn spellings_are_unique_across_registries() {
    let mut seen: HashSet<&'static str> = HashSet::new();
    let spellings = keywords::KEYWORDS
        .iter()
        .map(|k| k.canonical)
        .chain(operators::OPERATORS.iter().map(|o| o.spelling))
        .chain(punctuation::PUNCTUATION.iter().map(|p| p.spelling))
        .chain(types::PRIMITIVE_TYPES.iter().map(|t| t.canonical));
    for s in spellings {
        assert!(seen.insert(s), "duplicate spelling {s:?}");
    }
}

#[test]
fn every_primitive_type_has_a_print_function() {
    let mut symbols = HashSet::new();
    for t in types::PRIMITIVE_TYPES {
        let f = runtime::for_type(t.id);
        assert!(symbols.insert(runtime::info_for(f).symbol));
    }
    assert_eq!(symbols.len(), runtime::PRINT_FUNCTIONS.len());
}
