use std::fs;
use std::io::Write;
use std::path::Path;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;
use zip::write::{SimpleFileOptions, ZipWriter};

use feedstage::domain::CadenceDirs;
use feedstage::error::FeedError;
use feedstage::extract::ArchiveExtractor;

fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    for (name, bytes) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap();
}

fn staging_dir(temp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

#[test]
fn full_archive_extracts_into_weekly() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_full_v2_3.zip").as_std_path(),
        &[("prices_2021.txt", b"p1\n"), ("other.txt", b"x\n")],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let files = extractor
        .extract("prices_full_v2_3.zip", &["prices_2021.txt"], &dest)
        .unwrap();

    assert_eq!(files, vec!["prices_2021.txt"]);
    let staged = dest.join("weekly").join("prices_2021.txt");
    assert_eq!(fs::read(staged.as_std_path()).unwrap(), b"p1\n");
    assert!(!dest.join("daily").join("prices_2021.txt").as_std_path().exists());
}

#[test]
fn non_full_archive_extracts_into_daily() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_v2_3.zip").as_std_path(),
        &[("prices_2021.txt", b"p1\n")],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let files = extractor
        .extract("prices_v2_3.zip", &["prices_2021.txt"], &dest)
        .unwrap();

    assert_eq!(files, vec!["prices_2021.txt"]);
    assert!(dest.join("daily").join("prices_2021.txt").as_std_path().exists());
}

#[test]
fn txt_suffix_is_stripped_before_matching() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_v2_3.zip").as_std_path(),
        &[("prices_2021_amended.csv", b"p1\n")],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let files = extractor
        .extract("prices_v2_3.zip", &["prices_2021.txt"], &dest)
        .unwrap();

    // `prices_2021.txt` matches as the base name `prices_2021`; the staged
    // file keeps the member's own name.
    assert_eq!(files, vec!["prices_2021_amended.csv"]);
}

#[test]
fn member_matching_two_base_names_is_copied_twice() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_v2_3.zip").as_std_path(),
        &[("prices_and_rates.txt", b"p1\n")],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let files = extractor
        .extract("prices_v2_3.zip", &["prices", "rates"], &dest)
        .unwrap();

    assert_eq!(files, vec!["prices_and_rates.txt", "prices_and_rates.txt"]);
}

#[test]
fn members_are_recorded_in_scan_order() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_v2_3.zip").as_std_path(),
        &[
            ("prices_a.txt", b"a\n"),
            ("skipped.txt", b"s\n"),
            ("prices_b.txt", b"b\n"),
        ],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let files = extractor
        .extract("prices_v2_3.zip", &["prices"], &dest)
        .unwrap();

    assert_eq!(files, vec!["prices_a.txt", "prices_b.txt"]);
}

#[test]
fn custom_cadence_dirs_are_used() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);
    write_zip(
        dest.join("prices_full_v2_3.zip").as_std_path(),
        &[("prices_2021.txt", b"p1\n")],
    );

    let extractor = ArchiveExtractor::new(CadenceDirs {
        weekly: "wk".to_string(),
        daily: "dy".to_string(),
    });
    extractor
        .extract("prices_full_v2_3.zip", &["prices_2021.txt"], &dest)
        .unwrap();

    assert!(dest.join("wk").join("prices_2021.txt").as_std_path().exists());
}

#[test]
fn missing_archive_fails_to_open() {
    let temp = tempfile::tempdir().unwrap();
    let dest = staging_dir(&temp);

    let extractor = ArchiveExtractor::new(CadenceDirs::default());
    let err = extractor
        .extract("prices_v2_3.zip", &["prices"], &dest)
        .unwrap_err();

    assert_matches!(err, FeedError::ArchiveOpenFailed { .. });
}
