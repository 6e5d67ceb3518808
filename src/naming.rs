use chrono::{Local, NaiveDate};

/// Derives the storage-key suffix for a staged file: cadence partition plus
/// the upload-day date. The date is taken at call time, so a file extracted
/// one day and uploaded the next is partitioned by the upload day.
pub fn destination_key(file_name: &str, archive: &str) -> String {
    destination_key_on(file_name, archive, Local::now().date_naive())
}

fn destination_key_on(file_name: &str, archive: &str, date: NaiveDate) -> String {
    if archive.is_empty() {
        return archive.to_string();
    }
    let cadence = if archive.contains("full") {
        "Weekly"
    } else {
        "Daily"
    };
    format!("{cadence}/{}/{file_name}", date.format("%Y-%m-%d"))
}
