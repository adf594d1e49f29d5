#![no_main]

use libfuzzer_sys::fuzz_target;

// Anything that resolves must also format to the same tree, and the formatted text must resolve again.
fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if wabbit::frontend::check_source(source).is_err() {
        return;
    }
    let formatted = wabbit::format_source(source).expect("resolved source must format");
    let original = wabbit::parser::parse_source(source).expect("resolved source must parse");
    let reparsed = wabbit::parser::parse_source(&formatted).expect("formatted source must parse");
    assert_eq!(reparsed.without_spans(), original.without_spans(), "formatting changed the syntax tree");
    let program = wabbit::frontend::check_source(&formatted).expect("formatted source must resolve");
    wabbit::backend::generate(&program, "fuzz.wb").expect("resolved program must lower");
});
