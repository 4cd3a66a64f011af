//! 측정 파일 읽기/일괄 계산/CSV 쓰기 테스트. 파일 대신 메모리 버퍼를 쓴다.
use psychrometric_toolbox::air::WetBulbOptions;
use psychrometric_toolbox::batch::{
    read_samples, run_batch, write_results, ColumnLayout, ColumnSynonyms, HumidityInput,
    InputMode, COLUMNS,
};

fn read(text: &str, mode: InputMode) -> psychrometric_toolbox::batch::ReadOutcome {
    read_samples(text.as_bytes(), mode, &ColumnSynonyms::default(), None).expect("read")
}

#[test]
fn named_columns_skip_header_and_bad_rows() {
    let out = read("Tbs,HR\n20,50\n25,abc\n30,40\n22\n", InputMode::RelativeHumidity);
    assert_eq!(
        out.layout,
        ColumnLayout::Named {
            dry_bulb: 0,
            humidity: 1
        }
    );
    assert_eq!(out.delimiter, b',');
    assert_eq!(out.rows.len(), 2);
    assert_eq!(out.skipped, 2);
    assert_eq!(out.rows[0].line, 2);
    assert_eq!(out.rows[0].dry_bulb_c, 20.0);
    assert_eq!(out.rows[1].humidity, HumidityInput::RelativeHumidity(40.0));
}

#[test]
fn header_match_is_case_insensitive_and_order_free() {
    let out = read("Humedad , TBS\n55,21.5\n", InputMode::RelativeHumidity);
    assert_eq!(
        out.layout,
        ColumnLayout::Named {
            dry_bulb: 1,
            humidity: 0
        }
    );
    assert_eq!(out.rows[0].dry_bulb_c, 21.5);
    assert_eq!(out.rows[0].humidity, HumidityInput::RelativeHumidity(55.0));
}

#[test]
fn semicolon_and_tab_delimiters_are_sniffed() {
    let semi = read("temp;phi%\n20;0.5\n", InputMode::RelativeHumidity);
    assert_eq!(semi.delimiter, b';');
    assert_eq!(semi.rows.len(), 1);

    let tab = read("Tbs\tHR\n20\t50\n", InputMode::RelativeHumidity);
    assert_eq!(tab.delimiter, b'\t');
    assert_eq!(tab.rows.len(), 1);
}

#[test]
fn unknown_header_falls_back_to_positional_columns() {
    let out = read("a,b\n20,50\n25,60\n", InputMode::RelativeHumidity);
    assert_eq!(out.layout, ColumnLayout::Positional);
    assert_eq!(out.rows.len(), 2);
    // 헤더 행은 숫자가 아니므로 건너뛴 행으로 센다
    assert_eq!(out.skipped, 1);

    let bare = read("20,50\n25,60\n", InputMode::RelativeHumidity);
    assert_eq!(bare.layout, ColumnLayout::Positional);
    assert_eq!(bare.rows.len(), 2);
    assert_eq!(bare.skipped, 0);
}

#[test]
fn wet_bulb_mode_uses_wet_bulb_synonyms() {
    let out = read("tbs,tbh\n25,17.9\n", InputMode::WetBulb);
    assert!(matches!(out.layout, ColumnLayout::Named { .. }));
    assert_eq!(out.rows[0].humidity, HumidityInput::WetBulb(17.9));
}

#[test]
fn custom_synonyms_are_honoured() {
    let synonyms = ColumnSynonyms {
        dry_bulb: vec!["air_temp".into()],
        relative_humidity: vec!["moisture".into()],
        wet_bulb: vec![],
    };
    let out = read_samples(
        "x,air_temp,moisture\n1,20,50\n".as_bytes(),
        InputMode::RelativeHumidity,
        &synonyms,
        None,
    )
    .unwrap();
    assert_eq!(
        out.layout,
        ColumnLayout::Named {
            dry_bulb: 1,
            humidity: 2
        }
    );
    assert_eq!(out.rows[0].dry_bulb_c, 20.0);
}

#[test]
fn failing_row_does_not_abort_batch() {
    let out = read("Tbs,HR\n20,50\n250,50\n30,40\n", InputMode::RelativeHumidity);
    let records = run_batch(&out.rows, 0.0, &WetBulbOptions::default());
    assert_eq!(records.len(), 3);
    assert!(records[0].outcome.is_ok());
    assert!(records[1].outcome.is_err());
    assert!(records[2].outcome.is_ok());
    assert_eq!(records[2].input.line, 4);
}

#[test]
fn wet_bulb_rows_are_derived_through_inversion() {
    let out = read("tbs,tbh\n25,17.889342084527\n20,22\n", InputMode::WetBulb);
    let records = run_batch(&out.rows, 0.0, &WetBulbOptions::default());
    let state = records[0].outcome.as_ref().unwrap();
    assert!((state.sample.relative_humidity - 0.5).abs() < 1e-5);
    assert_eq!(state.wet_bulb_c, 17.889342084527);
    // 습구 > 건구
    assert!(records[1].outcome.is_err());
}

#[test]
fn writer_emits_fixed_columns_and_blank_optionals() {
    let out = read("Tbs,HR\n25,50\n80,10\n250,10\n", InputMode::RelativeHumidity);
    let records = run_batch(&out.rows, 0.0, &WetBulbOptions::default());

    let mut buf = Vec::new();
    let written = write_results(&mut buf, &records).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COLUMNS.join(","));

    let hot: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(hot.len(), COLUMNS.len());
    assert_eq!(hot[0].parse::<f64>().unwrap(), 80.0);
    assert_eq!(hot[1].parse::<f64>().unwrap(), 0.1);
    // 70°C 이상은 이슬점 상관식 범위 밖
    assert_eq!(hot[11], "");
}

#[test]
fn empty_input_yields_no_rows() {
    let out = read("", InputMode::RelativeHumidity);
    assert!(out.rows.is_empty());
    assert_eq!(out.layout, ColumnLayout::Positional);
}
