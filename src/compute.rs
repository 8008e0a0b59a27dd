use crate::data::{Error, Mode, Registry, TOTAL_CEILING};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static"));

/// The registries of a run, in record-line order: branch first, then
/// commodity when it is in scope. Totals only ever move through
/// `add_record`.
#[derive(Debug)]
pub(crate) struct Sales {
    mode: Mode,
    pub registries: Vec<Registry>,
}

impl Sales {
    /// `registries` must follow `mode.kinds()` order.
    pub fn new(mode: Mode, registries: Vec<Registry>) -> Self {
        debug_assert_eq!(mode.kinds().len(), registries.len());
        Self { mode, registries }
    }

    /// Validates one record file and adds its amount to every code it names.
    /// Either all totals move or none does.
    pub fn add_record<S: AsRef<str>>(&mut self, file: &str, lines: &[S]) -> Result<(), Error> {
        if lines.len() != self.mode.record_lines() {
            return Err(Error::RecordShapeInvalid(file.to_owned()));
        }
        let (amount, codes) = lines
            .split_last()
            .ok_or_else(|| Error::RecordShapeInvalid(file.to_owned()))?;

        for (registry, code) in self.registries.iter().zip(codes) {
            if !registry.entities.contains_key(code.as_ref()) {
                return Err(Error::unknown_code(registry.kind, file));
            }
        }

        let amount = amount.as_ref();
        if !AMOUNT.is_match(amount) {
            return Err(Error::AmountNotNumeric(file.to_owned()));
        }
        // all digits, so the only way to fail parsing is to be far too large
        let amount: u64 = amount
            .parse()
            .map_err(|_| Error::AmountOverflow(file.to_owned()))?;

        // compute everything before touching any registry
        let mut pending = Vec::with_capacity(codes.len());
        for (registry, code) in self.registries.iter().zip(codes) {
            let total = registry.total(code.as_ref()).unwrap_or_default();
            match total.checked_add(amount) {
                Some(total) if total < TOTAL_CEILING => pending.push(total),
                _ => return Err(Error::AmountOverflow(file.to_owned())),
            }
        }

        for ((registry, code), total) in self.registries.iter_mut().zip(codes).zip(pending) {
            if let Some(entity) = registry.entities.get_mut(code.as_ref()) {
                entity.total = total;
            }
        }
        debug!("{file}: {amount} added");
        Ok(())
    }
}
