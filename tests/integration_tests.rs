use laskin::{Context, ErrorKind};

/// Executes a complete program against a fresh context, returning the
/// context and everything the program wrote to its output sink.
fn run(source: &str) -> (Context, String) {
    let mut context = Context::new();
    let mut out = Vec::new();

    context
        .execute(source, 1, &mut out)
        .unwrap_or_else(|e| panic!("execute: {e}"));

    (context, String::from_utf8(out).unwrap())
}

fn output_of(source: &str) -> String {
    run(source).1
}

fn error_of(source: &str) -> laskin::Error {
    let mut context = Context::new();
    let mut out = Vec::new();

    context.execute(source, 1, &mut out).unwrap_err()
}

#[test]
fn addition_prints_the_sum() {
    assert_eq!(output_of("1 2 + ."), "3\n");
}

#[test]
fn mass_addition_renormalizes_to_kilograms() {
    assert_eq!(output_of("500g 600g + ."), "1.1kg\n");
}

#[test]
fn mapping_a_square_quote_over_a_vector() {
    assert_eq!(output_of("[1, 2, 3] (dup *) vector:map ."), "1, 4, 9\n");
}

#[test]
fn upper_casing_a_string() {
    assert_eq!(output_of("\"hello\" string:upper-case ."), "HELLO\n");
}

#[test]
fn definitions_bind_values() {
    assert_eq!(output_of("5 -> x  x x * ."), "25\n");
}

#[test]
fn leap_year_test_on_a_date_literal() {
    assert_eq!(output_of("2020-02-29 date:leap-year? ."), "true\n");
}

#[test]
fn definitions_bind_quotes_as_words() {
    assert_eq!(output_of("(dup *) -> sq  3 sq ."), "9\n");
}

#[test]
fn popping_an_empty_stack_is_a_range_error() {
    assert_eq!(error_of("drop").kind(), ErrorKind::Range);
}

#[test]
fn lone_open_bracket_cites_the_missing_closer() {
    let error = error_of("[");

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert!(error.message().contains("]"), "{}", error.message());
}

#[test]
fn adding_meters_to_kilograms_names_both_quantities() {
    let error = error_of("1m 1kg +");

    assert_eq!(error.kind(), ErrorKind::Unit);
    assert!(error.message().contains("length"), "{}", error.message());
    assert!(error.message().contains("mass"), "{}", error.message());
}

#[test]
fn adding_a_vector_to_a_string_is_a_type_error() {
    let error = error_of("\"abc\" [1] +");

    assert_eq!(error.kind(), ErrorKind::Type);
    assert!(error.message().contains("string"), "{}", error.message());
    assert!(error.message().contains("vector"), "{}", error.message());
}

#[test]
fn log_of_zero_is_a_domain_error() {
    assert_eq!(error_of("0 number:log").kind(), ErrorKind::Domain);
}

#[test]
fn division_by_zero_is_a_range_error() {
    assert_eq!(error_of("1 0 /").kind(), ErrorKind::Range);
}

#[test]
fn addition_is_commutative_within_a_quantity() {
    assert_eq!(output_of("2km 350m + ."), output_of("350m 2km + ."));
}

#[test]
fn date_offsets_invert() {
    assert_eq!(output_of("2020-02-29 146097 + 146097 - ."), "2020-02-29\n");
    assert_eq!(output_of("2020-02-29 1000000 + 1000000 - ."), "2020-02-29\n");
}

#[test]
fn mapping_the_identity_preserves_the_vector() {
    assert_eq!(
        output_of("[1, \"two\", [3], true] () vector:map >source ."),
        "[1, \"two\", [3], true]\n"
    );
}

#[test]
fn stack_preview_shows_at_most_ten_entries() {
    let output = output_of("1 2 3 4 5 6 7 8 9 10 11 12 .s");

    assert_eq!(output.lines().count(), 10);
    assert!(output.starts_with("12: 12\n"));
    assert!(output.ends_with("3: 3\n"));
}

#[test]
fn dup_drop_and_swap_swap_are_stack_identities() {
    let (context, _) = run("7 dup drop");

    assert_eq!(context.depth(), 1);

    let (context, _) = run("1 2 swap swap");

    assert_eq!(context.depth(), 2);
    assert_eq!(context.data()[0].to_source(), "1");
    assert_eq!(context.data()[1].to_source(), "2");
}

#[test]
fn compose_behaves_like_sequential_calls() {
    assert_eq!(
        output_of("2 (3 *) (4 +) quote:compose quote:call ."),
        output_of("2 (3 *) quote:call (4 +) quote:call .")
    );
}

/// Values survive a `to-source` round trip: rendering a value and parsing
/// the rendering back produces an equal value.
#[test]
fn to_source_round_trips_for_plain_values() {
    let sources = [
        "42",
        "-1.25",
        "1.1kg",
        "\"hello \\\"world\\\"\"",
        "[1, 2, [3, \"x\"]]",
        "{\"a\": 1, \"b\": [true, false]}",
        "2020-02-29",
        "12:30:45",
        "(dup * swap)",
        "[(1 +), (2 -)]",
    ];

    for source in sources {
        let (mut context, _) = run(source);
        let value = context.pop().unwrap();
        let (mut reparsed_context, _) = run(&value.to_source());
        let reparsed = reparsed_context.pop().unwrap();

        assert!(
            value.equals(&reparsed).unwrap(),
            "{source} did not round trip: {} vs {}",
            value.to_source(),
            reparsed.to_source()
        );
    }
}

/// Scripts survive a `to-source` round trip: re-parsing the rendering of a
/// parsed script produces the same rendering.
#[test]
fn parsed_scripts_round_trip_through_to_source() {
    let sources = [
        "1 2 + .",
        "[1, 2, 3] (dup *) vector:map .",
        "5 -> x x x * .",
        "{\"k\": [1, 2]} record:keys .",
        "\"a b\" 'c' + .",
    ];

    for source in sources {
        let rendered = laskin::parser::parse(source, 1).unwrap().to_source();
        // The rendering wraps the statement sequence in parentheses; the
        // text between them is itself a parseable script.
        let inner = &rendered[1..rendered.len() - 1];

        assert_eq!(laskin::parser::parse(inner, 1).unwrap().to_source(), rendered);
    }
}

#[test]
fn while_loop_counts() {
    assert_eq!(
        output_of("0 (dup 5 <) (dup . 1 +) while drop"),
        "0\n1\n2\n3\n4\n"
    );
}

#[test]
fn shadowing_a_builtin_by_rebinding_the_plain_key() {
    assert_eq!(output_of("(drop drop 42) -> + 1 2 + ."), "42\n");
}

#[test]
fn typed_words_win_over_plain_words() {
    assert_eq!(
        output_of("(drop \"number\") -> number:describe (\"other\") -> describe 5 describe ."),
        "number\n"
    );
}

#[test]
fn errors_carry_positions_from_the_parser() {
    let error = error_of("1 2\n  bogus-word");

    assert_eq!(error.kind(), ErrorKind::Name);
    assert_eq!(error.line(), 2);
    assert_eq!(error.column(), 3);
}

#[test]
fn interpreter_state_survives_errors() {
    let mut context = Context::new();
    let mut out = Vec::new();

    assert!(context.execute("1 2 3 no-such", 1, &mut out).is_err());
    assert_eq!(context.depth(), 3);

    // The host is free to clear and continue.
    context.clear();
    assert!(context.execute("4 5 + .", 1, &mut out).is_ok());
}

#[test]
fn include_runs_a_file_in_the_same_context() {
    let dir = std::env::temp_dir();
    let path = dir.join("laskin_include_test.lsk");

    std::fs::write(&path, "2 * .").unwrap();

    let source = format!("21 \"{}\" include", path.display());

    assert_eq!(output_of(&source), "42\n");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn comparisons_convert_between_units() {
    assert_eq!(output_of("1km 999m > ."), "true\n");
    assert_eq!(output_of("1h 3600s = ."), "true\n");
    assert_eq!(output_of("1kg 1000g <> ."), "false\n");
}

#[test]
fn time_quantities_renormalize_after_arithmetic() {
    assert_eq!(output_of("30min 30min + ."), "1h\n");
    assert_eq!(output_of("500ms 400ms + ."), "0.9s\n");
}
