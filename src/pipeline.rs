use crate::{
    compute::Sales,
    data::{Error, Mode},
    read::{load_registry, split_lines, Store},
    select::select_record_files,
    write::render_summary,
};
use log::info;

/// Runs the whole job over `store`: load the registries, pick the record
/// files, accumulate them, then write one summary per registry. The first
/// failure stops everything, and nothing is written unless every step
/// before the writes succeeded.
pub(crate) fn run<S: Store>(store: &mut S, mode: Mode) -> Result<Sales, Error> {
    let registries = mode
        .kinds()
        .iter()
        .map(|&kind| load_registry(&*store, kind))
        .collect::<Result<Vec<_>, _>>()?;
    let mut sales = Sales::new(mode, registries);

    let records = select_record_files(store.file_names()?)?;
    info!("{} record files selected", records.len());

    for file in &records {
        let text = store.read(file)?;
        sales.add_record(file, &split_lines(&text))?;
    }

    let summaries = sales
        .registries
        .iter()
        .map(|registry| {
            render_summary(registry).map(|contents| (registry.kind.summary_file(), contents))
        })
        .collect::<Result<Vec<_>, _>>()?;
    for (file, contents) in summaries {
        store.write(file, &contents)?;
        info!("{file} written");
    }
    Ok(sales)
}
