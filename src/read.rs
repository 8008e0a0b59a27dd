use crate::data::{Entity, Error, Registry, RegistryKind};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything the pipeline needs from the outside world, addressed by plain
/// file names inside one directory. Implemented over a real directory by
/// `DirStore`, and in memory by the tests.
pub(crate) trait Store {
    fn exists(&self, name: &str) -> bool;
    fn read(&self, name: &str) -> Result<String, Error>;
    /// Names of the regular files only, in no particular order.
    fn file_names(&self) -> Result<Vec<String>, Error>;
    fn write(&mut self, name: &str, contents: &[u8]) -> Result<(), Error>;
}

/// `Store` backed by a directory on disk.
pub(crate) struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
        }
    }
}

impl Store for DirStore {
    fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    fn read(&self, name: &str) -> Result<String, Error> {
        Ok(fs::read_to_string(self.dir.join(name))?)
    }

    fn file_names(&self) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            // follows symlinks; anything that can't be looked at (a dangling
            // link for one) is not a file
            if !matches!(fs::metadata(entry.path()), Ok(meta) if meta.is_file()) {
                continue;
            }
            // a name that isn't valid UTF-8 can't be a record file anyway
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn write(&mut self, name: &str, contents: &[u8]) -> Result<(), Error> {
        fs::write(self.dir.join(name), contents)?;
        Ok(())
    }
}

/// Splits text into lines ended by `\n`, `\r\n` or a lone `\r`. A final
/// terminator does not open an extra empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                lines.push(&rest[..end]);
                let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Builds a registry out of a definition file. Each line is `code,name`;
/// anything else rejects the whole file.
pub(crate) fn parse_registry(kind: RegistryKind, text: &str) -> Result<Registry, Error> {
    // the CSV reader skips blank lines, which are malformed definitions here
    if split_lines(text).iter().any(|line| line.is_empty()) {
        return Err(Error::DefinitionFormatInvalid(kind));
    }
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut registry = Registry::new(kind);
    for result in rdr.records() {
        let record = result?;
        if record.len() != 2 {
            return Err(Error::DefinitionFormatInvalid(kind));
        }
        let (code, name) = (&record[0], &record[1]);
        if !kind.is_valid_code(code) || name.is_empty() {
            return Err(Error::DefinitionFormatInvalid(kind));
        }
        let entity = Entity {
            name: name.to_owned(),
            total: 0,
        };
        if let Some(previous) = registry.entities.insert(code.to_owned(), entity) {
            warn!(
                "{} code {code} defined twice, {:?} replaced by {name:?}",
                kind.label(),
                previous.name
            );
        }
    }
    Ok(registry)
}

/// Loads the definition file of `kind` out of `store`.
pub(crate) fn load_registry<S: Store>(store: &S, kind: RegistryKind) -> Result<Registry, Error> {
    let file = kind.definition_file();
    if !store.exists(file) {
        return Err(Error::MissingDefinitionFile(kind));
    }
    let registry = parse_registry(kind, &store.read(file)?)?;
    info!(
        "{} registry loaded from {file}: {} codes",
        kind.label(),
        registry.entities.len()
    );
    Ok(registry)
}
