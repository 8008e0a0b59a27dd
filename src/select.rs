use crate::data::Error;
use regex::Regex;
use std::sync::LazyLock;

static RECORD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{8})\.rcd$").expect("static"));

/// Date prefix of a record file name: 8 ASCII digits then `.rcd`, nothing more.
fn record_date(name: &str) -> Option<u32> {
    RECORD_NAME.captures(name)?.get(1)?.as_str().parse().ok()
}

/// Picks the record files out of a directory listing, oldest first, and
/// checks that consecutive dates never skip a number.
pub(crate) fn select_record_files<I>(names: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut records: Vec<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| record_date(name).is_some())
        .collect();
    // fixed-width dates: lexicographic order is chronological
    records.sort();

    for pair in records.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        // both names went through `record_date` above
        let former = record_date(previous).unwrap_or_default();
        let latter = record_date(next).unwrap_or_default();
        if latter != former + 1 {
            return Err(Error::NonSequentialRecordFiles {
                previous: previous.clone(),
                next: next.clone(),
            });
        }
    }
    Ok(records)
}
