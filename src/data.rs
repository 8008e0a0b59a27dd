use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};
use thiserror::Error;

/// Running totals must stay strictly below this: ten digits at most.
pub const TOTAL_CEILING: u64 = 10_000_000_000;

static BRANCH_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("static"));
static COMMODITY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{8}$").expect("static"));

/// The two code families. Each one has its own definition file, its own
/// summary file and its own format rule for codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Branch,
    Commodity,
}

impl RegistryKind {
    /// Human-readable name used in messages
    pub fn label(self) -> &'static str {
        match self {
            RegistryKind::Branch => "branch",
            RegistryKind::Commodity => "commodity",
        }
    }

    pub fn definition_file(self) -> &'static str {
        match self {
            RegistryKind::Branch => "branch.lst",
            RegistryKind::Commodity => "commodity.lst",
        }
    }

    pub fn summary_file(self) -> &'static str {
        match self {
            RegistryKind::Branch => "branch.out",
            RegistryKind::Commodity => "commodity.out",
        }
    }

    /// Branch codes are exactly 3 ASCII digits, commodity codes exactly
    /// 8 ASCII alphanumerics.
    pub fn is_valid_code(self, code: &str) -> bool {
        match self {
            RegistryKind::Branch => BRANCH_CODE.is_match(code),
            RegistryKind::Commodity => COMMODITY_CODE.is_match(code),
        }
    }
}

/// Which registries are in scope for a run. This also fixes the shape of
/// every record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    BranchOnly,
    #[default]
    Dual,
}

impl Mode {
    pub fn kinds(self) -> &'static [RegistryKind] {
        match self {
            Mode::BranchOnly => &[RegistryKind::Branch],
            Mode::Dual => &[RegistryKind::Branch, RegistryKind::Commodity],
        }
    }

    /// One line per code in scope, then the amount.
    pub fn record_lines(self) -> usize {
        self.kinds().len() + 1
    }
}

/// A known code: its display name and what has been sold under it so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub total: u64,
}

/// Every code of one family, in ascending code order. Names are fixed once
/// loaded; only totals move afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    pub kind: RegistryKind,
    pub entities: BTreeMap<String, Entity>,
}

impl Registry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            entities: BTreeMap::new(),
        }
    }

    pub fn total(&self, code: &str) -> Option<u64> {
        self.entities.get(code).map(|entity| entity.total)
    }
}

/// Everything that can stop a run. The `Display` text is the message shown
/// to the user, so some variants carry more context than they print.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("An unexpected error occurred")]
    Unknown(String),
    #[error("{} definition file does not exist", .0.label())]
    MissingDefinitionFile(RegistryKind),
    #[error("{} definition file has an invalid format", .0.label())]
    DefinitionFormatInvalid(RegistryKind),
    #[error("Sales file names are not sequential")]
    NonSequentialRecordFiles { previous: String, next: String },
    #[error("{0} has an invalid format")]
    RecordShapeInvalid(String),
    #[error("{0} has an invalid branch code")]
    UnknownBranchCode(String),
    #[error("{0} has an invalid commodity code")]
    UnknownCommodityCode(String),
    // Reported like any unexpected condition; the file only goes to the log.
    #[error("An unexpected error occurred")]
    AmountNotNumeric(String),
    #[error("Total amount exceeded 10 digits")]
    AmountOverflow(String),
}

impl Error {
    pub fn unknown_code(kind: RegistryKind, file: &str) -> Self {
        match kind {
            RegistryKind::Branch => Error::UnknownBranchCode(file.to_owned()),
            RegistryKind::Commodity => Error::UnknownCommodityCode(file.to_owned()),
        }
    }

    /// Process exit status for this failure; 0 is reserved for success.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Unknown(_) => 1,
            Error::MissingDefinitionFile(_) => 2,
            Error::DefinitionFormatInvalid(_) => 3,
            Error::NonSequentialRecordFiles { .. } => 4,
            Error::RecordShapeInvalid(_) => 5,
            Error::UnknownBranchCode(_) => 6,
            Error::UnknownCommodityCode(_) => 7,
            Error::AmountNotNumeric(_) => 8,
            Error::AmountOverflow(_) => 9,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Unknown(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Unknown(e.to_string())
    }
}
