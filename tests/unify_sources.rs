use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use workshop_data_processing::ingestion::{expand_patterns, load, unify, unify_to_csv, LoadOptions, SourceConfig};
use workshop_data_processing::WorkshopEngine;

fn tmp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("workshop-data-processing-unify-{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_sheets(dir: &PathBuf) {
    fs::write(
        dir.join("a_servico.csv"),
        "\u{feff}Dia,Servico,Preco,Tipo,Unnamed: 4\n01/02/2024,Alinhamento,\"90,00\",Suspensão,\n",
    )
    .unwrap();
    fs::write(
        dir.join("b_pecas.csv"),
        "Dia,Serviço,Peça\n03/02/2024,Troca de filtro,Filtro de óleo\n,,\n",
    )
    .unwrap();
    fs::write(dir.join("notes.txt"), "not a sheet").unwrap();
}

#[test]
fn unify_concatenates_matched_sheets_with_column_union() {
    let dir = tmp_dir();
    write_sheets(&dir);
    let pattern = dir.join("*.csv");
    let pattern = pattern.to_str().unwrap();

    let table = unify(&[(pattern, LoadOptions::default())]).unwrap();

    assert_eq!(table.headers, vec!["Dia", "Serviço", "Preço", "Tipo", "Peça"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0][2].as_deref(), Some("90,00"));
    assert_eq!(table.rows[0][4], None);
    assert_eq!(table.rows[1][1].as_deref(), Some("Troca de filtro"));
    assert_eq!(table.rows[1][2], None);

    let engine = WorkshopEngine::from_raw(&table);
    assert_eq!(engine.table().row_count(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn repeated_patterns_load_each_file_once() {
    let dir = tmp_dir();
    write_sheets(&dir);
    let a = dir.join("a_*.csv");
    let all = dir.join("*.csv");

    let paths = expand_patterns(&[a.to_str().unwrap(), all.to_str().unwrap()]).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_servico.csv", "b_pecas.csv"]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unify_to_csv_writes_a_reloadable_sheet() {
    let dir = tmp_dir();
    write_sheets(&dir);
    let pattern = dir.join("*.csv");
    let out = dir.join("unified").with_extension("out");

    let merged = unify_to_csv(&[(pattern.to_str().unwrap(), LoadOptions::default())], &out).unwrap();
    let reloaded = load(out.as_path(), &LoadOptions::default()).unwrap();
    assert_eq!(reloaded, merged);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unmatched_pattern_yields_empty_table() {
    let dir = tmp_dir();
    let pattern = dir.join("*.csv");
    let table = unify(&[(pattern.to_str().unwrap(), LoadOptions::default())]).unwrap();
    assert_eq!(table.row_count(), 0);
    assert!(table.headers.is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn invalid_pattern_is_an_error() {
    let err = unify(&[("[unclosed", LoadOptions::default())]).unwrap_err();
    assert!(err.to_string().contains("invalid pattern"));
}

#[test]
fn unify_reads_each_pattern_with_its_own_config() {
    let dir = tmp_dir();
    fs::write(
        dir.join("pecas.csv"),
        "\u{feff}Dia,Serviço,Peça\n03/02/2024,Troca de filtro,Filtro de óleo\n",
    )
    .unwrap();
    let parts = dir.join("*.csv");

    let table = unify(&[
        (
            "tests/fixtures/servico.csv",
            LoadOptions::with_config(SourceConfig::service_sheet()),
        ),
        (parts.to_str().unwrap(), LoadOptions::default()),
    ])
    .unwrap();

    assert_eq!(table.headers, vec!["Dia", "Mês", "Serviço", "Preço", "Tipo", "Peça"]);
    assert_eq!(table.row_count(), 10);
    assert_eq!(table.rows[1][4].as_deref(), Some("Suspensão"));
    assert_eq!(table.rows[9][2].as_deref(), Some("Troca de filtro"));
    assert_eq!(table.rows[9][5].as_deref(), Some("Filtro de óleo"));
    assert_eq!(table.rows[9][3], None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn first_matching_pattern_decides_the_config() {
    let dir = tmp_dir();
    fs::write(dir.join("servico.csv"), b"Dia;Servi\xe7o\n01/02/2024;Freio\n").unwrap();
    let sheet = dir.join("servico.csv");
    let all = dir.join("*.csv");

    let table = unify(&[
        (
            sheet.to_str().unwrap(),
            LoadOptions::with_config(SourceConfig::service_sheet()),
        ),
        (all.to_str().unwrap(), LoadOptions::default()),
    ])
    .unwrap();

    assert_eq!(table.headers, vec!["Dia", "Serviço"]);
    assert_eq!(table.row_count(), 1);

    let _ = fs::remove_dir_all(&dir);
}
