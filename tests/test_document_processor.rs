//! Batch processing from source files to written outputs.

use chrono::{DateTime, Local, TimeZone};
use doc_segmenter::config::OutputFormat;
use doc_segmenter::core::writer::JsonWriter;
use doc_segmenter::utils::document_processor::DocumentProcessor;
use doc_segmenter::utils::naming::TimestampNameGenerator;
use doc_segmenter::{Segmenter, SegmenterConfig};
use std::fs;

fn fixed_clock() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

fn processor(format: OutputFormat) -> DocumentProcessor {
    let config = SegmenterConfig {
        format,
        ..SegmenterConfig::default()
    };
    DocumentProcessor::new(Segmenter::new(config))
        .with_name_generator(Box::new(TimestampNameGenerator::with_clock(fixed_clock)))
}

#[test]
fn test_process_markup_file_to_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("notes.md");
    fs::write(&source, "# Intro\n\nHello world\n## Details\nMore text\nstill more\n").unwrap();
    let out_dir = tmp.path().join("out");

    let report = processor(OutputFormat::Flat).process_file(&source, &out_dir).unwrap();

    let output = report.output.clone().unwrap();
    assert_eq!(output, out_dir.join("notes_chunk_2024_01_02_03_04_05.csv"));
    assert_eq!(report.segments, 4);
    assert_eq!(report.titles, 1);
    assert_eq!(report.dropped, 0);
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "Segment Type,Importance,Text\n\
         title,2.0,Intro\n\
         paragraph,1.0,Hello world\n\
         subtitle,1.8,Details\n\
         paragraph,1.0,More text still more\n"
    );
}

#[test]
fn test_hierarchical_output_reports_dropped_nodes() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("orphan.md");
    fs::write(&source, "## Orphan\nBody\n# Main\ntext\n").unwrap();

    let report = processor(OutputFormat::Hierarchical)
        .process_file(&source, tmp.path())
        .unwrap();
    assert_eq!(report.dropped, 2);

    let output = report.output.unwrap();
    assert_eq!(output.extension().unwrap(), "json");
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "title": "Main", "paragraphs": ["text"], "subtitles": [] }])
    );
}

#[test]
fn test_directory_batch_continues_after_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("a.txt"), "one\ntwo\n").unwrap();
    fs::write(input.join("b.words.json"), r#"[{"text": "Big", "height": 20}, {"text": "small", "height": 9}]"#).unwrap();
    fs::write(input.join("c.words.json"), "not json").unwrap();
    fs::write(input.join("ignored.odt"), b"PK").unwrap();
    let out_dir = tmp.path().join("out");

    let reports = processor(OutputFormat::Flat)
        .with_writer(Box::new(JsonWriter))
        .process_directory(&input, &out_dir)
        .unwrap();

    assert_eq!(reports.len(), 3);
    assert!(reports[0].is_ok());
    assert_eq!(reports[0].segments, 2);
    assert!(reports[1].is_ok());
    assert_eq!(reports[1].titles, 1);
    assert!(!reports[2].is_ok());
    assert!(reports[2].output.is_none());

    let written = fs::read_dir(&out_dir).unwrap().count();
    assert_eq!(written, 2);
}

#[test]
fn test_process_path_single_file() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("plain.txt");
    fs::write(&source, "alpha\n\nbeta\n").unwrap();

    let reports = processor(OutputFormat::Flat)
        .process_path(source.as_path(), tmp.path())
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].segments, 2);
}

#[test]
fn test_directory_batch_keeps_dotted_names_apart() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("minutes.2024-01.txt"), "january\n").unwrap();
    fs::write(input.join("minutes.2024-02.txt"), "february\n").unwrap();
    let out_dir = tmp.path().join("out");

    let reports = processor(OutputFormat::Flat)
        .process_directory(&input, &out_dir)
        .unwrap();

    let outputs: Vec<_> = reports.iter().map(|r| r.output.clone().unwrap()).collect();
    assert_eq!(
        outputs,
        vec![
            out_dir.join("minutes.2024-01_chunk_2024_01_02_03_04_05.csv"),
            out_dir.join("minutes.2024-02_chunk_2024_01_02_03_04_05.csv"),
        ]
    );
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 2);
}

#[test]
fn test_directory_batch_suffixes_colliding_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("report.md"), "# Markup\n").unwrap();
    fs::write(input.join("report.txt"), "plain\n").unwrap();
    let out_dir = tmp.path().join("out");

    let reports = processor(OutputFormat::Flat)
        .process_directory(&input, &out_dir)
        .unwrap();

    assert!(reports.iter().all(|r| r.is_ok()));
    assert_eq!(
        reports[0].output.as_deref(),
        Some(out_dir.join("report_chunk_2024_01_02_03_04_05.csv").as_path())
    );
    assert_eq!(
        reports[1].output.as_deref(),
        Some(out_dir.join("report_chunk_2024_01_02_03_04_05_2.csv").as_path())
    );
    assert_eq!(
        fs::read_to_string(reports[0].output.as_ref().unwrap()).unwrap(),
        "Segment Type,Importance,Text\ntitle,2.0,Markup\n"
    );
    assert_eq!(
        fs::read_to_string(reports[1].output.as_ref().unwrap()).unwrap(),
        "Segment Type,Importance,Text\nparagraph,1.0,plain\n"
    );
}
