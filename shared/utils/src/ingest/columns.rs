//! Column Resolver
//!
//! Maps normalized input headers onto the logical schema. Each field has an
//! ordered list of candidate names. A field resolves to the first header
//! equal to any candidate; failing that, to the first header containing any
//! candidate as a substring.

use shelfwatch_models::{ColumnMapping, LogicalField};
use tracing::info;

use crate::error::{ShelfwatchError, ShelfwatchResult};

/// Candidate header names per logical field, in priority order.
pub static COLUMN_SYNONYMS: &[(LogicalField, &[&str])] = &[
    (LogicalField::Quantity, &["QT", "QUANTIDADE", "QUANTITY", "QTD"]),
    (LogicalField::ProductCode, &["CODPROD", "COD_PROD", "PRODUTO", "CODIGO", "COD"]),
    (LogicalField::Description, &["DESCRICAO", "PRODUTO", "NOME", "DESCR"]),
    (LogicalField::ExpirationDate, &["DTVAL", "VALIDADE", "VENCIMENTO", "DATA"]),
    (LogicalField::Weight, &["PESOLIQUN", "PESO", "PESO_LIQUIDO"]),
    (LogicalField::SupplierCode, &["CODFORNEC", "FORNECEDOR_COD", "COD_FORNECEDOR"]),
    (LogicalField::SupplierName, &["FORNECEDOR", "FORNEC", "FORNECEDOR_NOME"]),
    (LogicalField::AddressCode, &["CODENDERECO", "ENDERECO", "LOCAL"]),
    (LogicalField::Warehouse, &["DEPOSITO", "DEPOSITO_COD"]),
    (LogicalField::Aisle, &["RUA", "RUA_COD"]),
    (LogicalField::Section, &["PREDIO", "PREDIO_COD"]),
    (LogicalField::Level, &["NIVEL", "NIVEL_COD"]),
    (LogicalField::Slot, &["APTO", "APARTAMENTO"]),
    (LogicalField::Status, &["STATUS", "STATUS_PROD"]),
    (LogicalField::PackagingFactor, &["FATOR", "FATOR_EMB"]),
    (LogicalField::Unit, &["UNIDADE", "UNID_MED"]),
    (LogicalField::Capacity, &["CAPACIDADE", "CAPAC"]),
    (LogicalField::PalletTotalQuantity, &["QTTOTPAL", "TOTAL_PALETE"]),
    (LogicalField::TotalWeight, &["PESOTOTAL", "PESO_TOTAL"]),
    (LogicalField::Lot, &["EST", "ESTOQUE", "LOTE"]),
];

/// First header exactly equal to one of `candidates`.
pub fn exact_match<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| candidates.contains(&header.as_str()))
        .map(String::as_str)
}

/// First header containing one of `candidates` as a substring.
pub fn substring_match<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| candidates.iter().any(|candidate| header.contains(candidate)))
        .map(String::as_str)
}

pub fn resolve_field<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    exact_match(headers, candidates).or_else(|| substring_match(headers, candidates))
}

/// Resolve every logical field against `headers` (already trimmed and
/// uppercased). Optional fields may stay unresolved.
pub fn resolve_columns(headers: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for (field, candidates) in COLUMN_SYNONYMS {
        let header = resolve_field(headers, candidates).map(str::to_string);
        mapping.set(*field, header);
    }
    mapping
}

/// Fail with `MissingColumn` unless every mandatory field resolved.
pub fn require_mandatory(mapping: &ColumnMapping) -> ShelfwatchResult<()> {
    match mapping.missing_mandatory().first() {
        Some(field) => Err(ShelfwatchError::missing_column(field.as_str())),
        None => Ok(()),
    }
}

/// Resolve columns and enforce the mandatory ones.
pub fn resolve_required_columns(headers: &[String]) -> ShelfwatchResult<ColumnMapping> {
    let mapping = resolve_columns(headers);
    info!(
        resolved = mapping.iter().filter(|(_, header)| header.is_some()).count(),
        "Columns mapped: {:?}",
        mapping.iter().filter_map(|(field, header)| header.map(|h| (field.as_str(), h))).collect::<Vec<_>>()
    );
    require_mandatory(&mapping)?;
    Ok(mapping)
}
