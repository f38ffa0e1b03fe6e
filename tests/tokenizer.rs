// ABOUTME: Integration tests for msdeploy argument splitting.
// ABOUTME: Covers quoting rules, escapes, and a join/split property.

use proptest::prelude::*;
use webdeploy::msdeploy::split_args;

#[test]
fn quoted_group_is_single_argument() {
    assert_eq!(split_args(r#"a "b c" d"#), vec!["a", "b c", "d"]);
}

#[test]
fn escaped_quote_is_literal() {
    assert_eq!(split_args(r#""a\"b""#), vec![r#"a"b"#]);
}

#[test]
fn consecutive_spaces_collapse() {
    assert_eq!(split_args("  -verb:sync    -dest:auto  "), vec!["-verb:sync", "-dest:auto"]);
}

#[test]
fn pending_escape_does_not_leak_into_next_argument() {
    // The backslash escapes the quote, so the run stays quoted until the next one.
    assert_eq!(split_args(r#""a\" b" c"#), vec![r#"a" b"#, "c"]);
    // A backslash before a plain char is emitted and the escape ends there.
    assert_eq!(split_args(r#""a\b" "c""#), vec![r"a\b", "c"]);
}

#[test]
fn credentials_clause_survives_tokenizing() {
    let line = r#" -dest:contentPath="'myapp'",ComputerName="'https://host/msdeploy.axd?site=myapp'",UserName="'$myapp'",Password="'p w'",AuthType="'Basic'""#;
    assert_eq!(
        split_args(line),
        vec![
            "-dest:contentPath='myapp',ComputerName='https://host/msdeploy.axd?site=myapp',UserName='$myapp',Password='p w',AuthType='Basic'"
        ]
    );
}

#[test]
fn unbalanced_quote_degrades_gracefully() {
    assert_eq!(split_args(r#"-a "-b -c"#), vec!["-a", "-b -c"]);
}

proptest! {
    #[test]
    fn join_then_split_round_trips(args in prop::collection::vec("[A-Za-z0-9:=/._,?'-]{1,16}", 0..10)) {
        let line = args.join(" ");
        prop_assert_eq!(split_args(&line), args);
    }

    #[test]
    fn quoting_any_plain_argument_preserves_it(arg in "[A-Za-z0-9 :=/._-]{1,24}") {
        let trimmed = arg.trim();
        prop_assume!(!trimmed.is_empty());
        let line = format!("-x \"{}\" -y", trimmed);
        prop_assert_eq!(split_args(&line), vec!["-x".to_string(), trimmed.to_string(), "-y".to_string()]);
    }
}
