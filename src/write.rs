use crate::data::{Error, Registry};
use serde::Serialize;

/// One line of a summary file: `code,name,total`.
#[derive(Serialize)]
struct SummaryRow<'a> {
    code: &'a str,
    name: &'a str,
    total: u64,
}

/// Basic CSV exporter for a `Registry`, one row per known code in ascending
/// code order. Names go out verbatim, never quoted.
pub(crate) fn render_summary(registry: &Registry) -> Result<Vec<u8>, Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for (code, entity) in &registry.entities {
        wtr.serialize(SummaryRow {
            code: code.as_str(),
            name: &entity.name,
            total: entity.total,
        })?;
    }
    wtr.into_inner()
        .map_err(|e| Error::Unknown(e.error().to_string()))
}

#[cfg(test)]
mod tests {
    use super::render_summary;
    use crate::{
        data::{Registry, RegistryKind::*},
        read::parse_registry,
    };

    #[test]
    fn ascending_codes() {
        let mut registry =
            parse_registry(Branch, "002,Osaka\n001,Tokyo\n010,\"Naha\"\n").unwrap();
        registry.entities.get_mut("002").unwrap().total = 9_999_999_999;
        assert_eq!(
            String::from_utf8(render_summary(&registry).unwrap()).unwrap(),
            "001,Tokyo,0\n002,Osaka,9999999999\n010,\"Naha\",0\n"
        );
    }

    #[test]
    fn empty_registry() {
        assert!(render_summary(&Registry::new(Commodity)).unwrap().is_empty());
    }
}
