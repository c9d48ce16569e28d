//! Focused unit tests covering argument parsing and configuration resolution.

use super::*;
use gotest_core::{RunFilter, assemble_args};
use rstest::rstest;

fn args_with_run(run: Option<&str>) -> GotestArgs {
    GotestArgs {
        run: run.map(str::to_owned),
        ..GotestArgs::default()
    }
}

#[rstest]
fn converting_without_run_errors() {
    let err = GotestConfig::try_from(args_with_run(None)).expect_err("missing run should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RUN);
            assert_eq!(env, ENV_RUN);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::empty("")]
#[case::separators_only(", ,")]
fn blank_run_lists_error(#[case] raw: &str) {
    let err = GotestConfig::try_from(args_with_run(Some(raw))).expect_err("blank run list");
    match err {
        CliError::NoSourceFiles { raw: reported } => assert_eq!(reported, raw),
        other => panic!("expected NoSourceFiles, found {other:?}"),
    }
}

#[rstest]
fn run_list_is_split_in_order() {
    let config = GotestConfig::try_from(args_with_run(Some(" b_test.go, ,a_test.go")))
        .expect("config should build");
    assert_eq!(
        config.sources,
        vec![
            Utf8PathBuf::from("b_test.go"),
            Utf8PathBuf::from("a_test.go")
        ]
    );
}

#[rstest]
fn defaults_fill_prefix_binary_and_options() {
    let config =
        GotestConfig::try_from(args_with_run(Some("a_test.go"))).expect("config should build");
    assert_eq!(config.prefix, "Test");
    assert_eq!(config.go_binary, "go");
    assert_eq!(config.options, TestOptions::default());
}

#[rstest]
fn go_style_flags_parse_into_options() {
    let args = parse_args([
        "gotest",
        "-run=a_test.go,b_test.go",
        "-v",
        "-tags=integration",
        "-race",
        "-p=4",
        "-coverprofile=cover.out",
        "-coverpkg=./...",
        "-shuffle",
        "--",
        "-count=1",
    ])
    .expect("arguments should parse");
    let config = GotestConfig::try_from(args).expect("config should build");

    assert_eq!(
        config.sources,
        vec![
            Utf8PathBuf::from("a_test.go"),
            Utf8PathBuf::from("b_test.go")
        ]
    );
    assert_eq!(
        config.options,
        TestOptions {
            verbose: true,
            tags: Some("integration".to_owned()),
            race: true,
            parallelism: 4,
            coverprofile: Some(Utf8PathBuf::from("cover.out")),
            coverpkg: Some("./...".to_owned()),
            shuffle: true,
            passthrough: vec!["-count=1".to_owned()],
        }
    );
}

#[rstest]
fn double_dash_flags_parse_too() {
    let args = parse_args([
        "gotest",
        "--run",
        "a_test.go",
        "--prefix",
        "Example",
        "--go",
        "/usr/local/go/bin/go",
    ])
    .expect("arguments should parse");
    let config = GotestConfig::try_from(args).expect("config should build");
    assert_eq!(config.prefix, "Example");
    assert_eq!(config.go_binary, "/usr/local/go/bin/go");
}

#[rstest]
fn positional_arguments_are_forwarded() {
    let args = parse_args(["gotest", "-run=a_test.go", "./pkg/...", "-count=1"])
        .expect("arguments should parse");
    assert_eq!(args.passthrough, vec!["./pkg/...", "-count=1"]);
}

#[rstest]
fn unparsable_parallelism_is_an_argument_error() {
    let err = parse_args(["gotest", "-run=a_test.go", "-p=many"]).expect_err("bad number");
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
fn go_test_parallel_flag_is_not_package_parallelism() {
    let args = parse_args(["gotest", "-run=a_test.go", "-parallel=8"]).expect("parse");
    let config = GotestConfig::try_from(args).expect("config should build");
    assert_eq!(config.options.parallelism, 0);
    assert_eq!(config.options.passthrough, vec!["-parallel=8"]);

    let filter = RunFilter::from_names(&["TestA"]).expect("filter");
    assert_eq!(
        assemble_args(&filter, &config.options),
        vec!["test", "-parallel=8", "-run=TestA$"]
    );
}

#[rstest]
fn long_parallel_spelling_is_not_accepted() {
    let err = parse_args(["gotest", "-run=a_test.go", "--parallel=8"]).expect_err("no such flag");
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
#[case::explicit_true(&["-race=true", "-shuffle=true"], true)]
#[case::explicit_false(&["-race=false", "-shuffle=false"], false)]
fn boolean_flags_take_go_style_values(#[case] flags: &[&str], #[case] expected: bool) {
    let argv = ["gotest", "-run=a_test.go"].iter().chain(flags).copied();
    let args = parse_args(argv).expect("boolean values should parse");
    let config = GotestConfig::try_from(args).expect("config should build");
    assert_eq!(config.options.race, expected);
    assert_eq!(config.options.shuffle, expected);
    assert!(config.options.passthrough.is_empty());
}

#[rstest]
fn resolve_config_layers_cli_values() {
    let args = parse_args(["gotest", "-run=a_test.go", "-tags=unit"]).expect("parse");
    let config = resolve_config(args).expect("config should resolve");
    assert_eq!(config.sources, vec![Utf8PathBuf::from("a_test.go")]);
    assert_eq!(config.options.tags.as_deref(), Some("unit"));
}
