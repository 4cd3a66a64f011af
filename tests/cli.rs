//! 명령행 파싱과 실행 결과 확인.
use clap::Parser;
use psychrometric_toolbox::app::{ascii_delimiter, execute, AppError, Cli, Command, ModeArg};
use psychrometric_toolbox::config::Config;
use psychrometric_toolbox::units::TemperatureUnit;

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).expect("parse");
    let mut out = Vec::new();
    execute(cli.command, &Config::default(), &mut out).expect("execute");
    String::from_utf8(out).unwrap()
}

#[test]
fn state_command_prints_all_properties() {
    let text = run(&["psychrometric_toolbox", "state", "-z", "0", "-t", "25", "-r", "50"]);
    assert!(text.contains("대기압: 101.3250 kPa"), "{text}");
    assert!(text.contains("이슬점"));
    assert!(text.contains("습구온도: 17.96"), "{text}");
}

#[test]
fn fahrenheit_input_is_converted() {
    let text = run(&[
        "psychrometric_toolbox",
        "state",
        "-z",
        "0",
        "-t",
        "77",
        "-r",
        "0.5",
        "--unit",
        "f",
    ]);
    assert!(text.contains("건구온도: 25.00 °C"), "{text}");
}

#[test]
fn negative_temperatures_parse() {
    let cli = Cli::try_parse_from(["psychrometric_toolbox", "state", "-t", "-5", "-r", "80"])
        .unwrap();
    match cli.command {
        Command::State {
            dry_bulb,
            elevation,
            unit,
            ..
        } => {
            assert_eq!(dry_bulb, -5.0);
            assert_eq!(elevation, None);
            assert_eq!(unit, TemperatureUnit::Celsius);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn batch_mode_flag_parses() {
    let cli = Cli::try_parse_from([
        "psychrometric_toolbox",
        "batch",
        "data.csv",
        "--mode",
        "wet-bulb",
        "--delimiter",
        ";",
    ])
    .unwrap();
    match cli.command {
        Command::Batch {
            mode, delimiter, ..
        } => {
            assert_eq!(mode, ModeArg::WetBulb);
            assert_eq!(delimiter, Some(';'));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn wet_bulb_command_reports_implied_humidity() {
    let text = run(&[
        "psychrometric_toolbox",
        "wet-bulb",
        "-z",
        "0",
        "-t",
        "20",
        "-w",
        "20",
    ]);
    assert!(text.contains("상대습도: 100.00 %"), "{text}");
    assert!(text.contains("습구온도: 20.000 °C (측정값)"), "{text}");
}

#[test]
fn out_of_range_sample_is_reported_as_error() {
    let cli = Cli::try_parse_from(["psychrometric_toolbox", "state", "-t", "250", "-r", "50"])
        .unwrap();
    let mut out = Vec::new();
    let err = execute(cli.command, &Config::default(), &mut out).unwrap_err();
    assert!(err.to_string().contains("250"));
}

#[test]
fn chart_command_writes_grid_rows() {
    let text = run(&["psychrometric_toolbox", "chart", "-z", "2250"]);
    // 헤더 + 상대습도 10개 × 건구온도 9개
    assert_eq!(text.lines().count(), 1 + 10 * 9);
}

#[test]
fn non_ascii_delimiter_is_rejected() {
    assert_eq!(ascii_delimiter(';').unwrap(), b';');
    assert_eq!(ascii_delimiter('\t').unwrap(), b'\t');
    assert!(matches!(
        ascii_delimiter('é'),
        Err(AppError::InvalidArgument(_))
    ));
}
