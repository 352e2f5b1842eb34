//! Required-field and format checks applied before create/update.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fitstock_core::{DomainError, DomainResult};

use crate::field::{Field, ItemFields};
use crate::schema::CategorySchema;

/// Fields that must be present on create and cannot be blanked on update.
///
/// Reorder point and unit price are required alongside name/sku/category/stock so
/// that every stored record has a low-stock threshold and a price.
pub const REQUIRED: [Field; 6] = [
    Field::Name,
    Field::Sku,
    Field::Category,
    Field::Stock,
    Field::ReorderPoint,
    Field::UnitPrice,
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A fully-coerced new record, minus the store-assigned id and restock date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub stock: u32,
    pub reorder_point: u32,
    pub unit_price: Decimal,
    pub supplier: String,
    pub expiry_date: Option<NaiveDate>,
}

/// Coerced partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub reorder_point: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub supplier: Option<String>,
    /// `Some(None)` clears the date.
    pub expiry_date: Option<Option<NaiveDate>>,
}

/// Validate input for a new record.
///
/// Missing required fields are reported together; format problems are reported only
/// once everything required is present. `expiry_date` is collected only when the
/// schema admits it for the given category.
pub fn validate_new(fields: &ItemFields, schema: &CategorySchema) -> DomainResult<ValidatedItem> {
    let missing: Vec<&str> = REQUIRED
        .into_iter()
        .filter(|field| fields.value(*field).is_none())
        .map(Field::label)
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let mut problems = Problems::default();
    let category = text(fields, Field::Category);
    let stock = problems.collect(parse_count(fields, Field::Stock));
    let reorder_point = problems.collect(parse_count(fields, Field::ReorderPoint));
    let unit_price = problems.collect(parse_price(fields));
    let expiry_date = if schema.admits(&category, Field::ExpiryDate) {
        problems.collect(parse_date(fields)).flatten()
    } else {
        None
    };
    problems.finish()?;

    Ok(ValidatedItem {
        name: text(fields, Field::Name),
        sku: text(fields, Field::Sku),
        category,
        stock: stock.unwrap_or_default(),
        reorder_point: reorder_point.unwrap_or_default(),
        unit_price: unit_price.unwrap_or_default(),
        supplier: fields.value(Field::Supplier).unwrap_or_default().to_string(),
        expiry_date,
    })
}

/// Validate a partial update.
///
/// Whether the expiry date survives depends on the record's resulting category, so
/// the schema is applied when the patch is merged, not here.
pub fn validate_patch(fields: &ItemFields) -> DomainResult<ValidatedPatch> {
    let blanked: Vec<&str> = REQUIRED
        .into_iter()
        .filter(|field| fields.raw(*field).is_some() && fields.value(*field).is_none())
        .map(Field::label)
        .collect();
    if !blanked.is_empty() {
        return Err(DomainError::validation(format!(
            "missing required fields: {}",
            blanked.join(", ")
        )));
    }

    let mut problems = Problems::default();
    let stock = problems.collect(optional(fields, Field::Stock, parse_count)).flatten();
    let reorder_point = problems
        .collect(optional(fields, Field::ReorderPoint, parse_count))
        .flatten();
    let unit_price = problems
        .collect(optional(fields, Field::UnitPrice, |f, _| parse_price(f)))
        .flatten();
    let expiry_date = match fields.raw(Field::ExpiryDate) {
        None => None,
        Some(_) => problems.collect(parse_date(fields)),
    };
    problems.finish()?;

    Ok(ValidatedPatch {
        name: fields.value(Field::Name).map(str::to_string),
        sku: fields.value(Field::Sku).map(str::to_string),
        category: fields.value(Field::Category).map(str::to_string),
        stock,
        reorder_point,
        unit_price,
        supplier: fields.raw(Field::Supplier).map(|s| s.trim().to_string()),
        expiry_date,
    })
}

#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn collect<T>(&mut self, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(problem) => {
                self.0.push(problem);
                None
            }
        }
    }

    fn finish(self) -> DomainResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(self.0.join("; ")))
        }
    }
}

fn text(fields: &ItemFields, field: Field) -> String {
    fields.value(field).unwrap_or_default().to_string()
}

fn optional<T>(
    fields: &ItemFields,
    field: Field,
    parse: impl Fn(&ItemFields, Field) -> Result<T, String>,
) -> Result<Option<T>, String> {
    match fields.value(field) {
        None => Ok(None),
        Some(_) => parse(fields, field).map(Some),
    }
}

fn parse_count(fields: &ItemFields, field: Field) -> Result<u32, String> {
    let raw = fields.value(field).unwrap_or_default();
    raw.parse::<u32>()
        .map_err(|_| format!("{} must be a non-negative integer (got `{raw}`)", field.label()))
}

fn parse_price(fields: &ItemFields) -> Result<Decimal, String> {
    let raw = fields.value(Field::UnitPrice).unwrap_or_default();
    match Decimal::from_str(raw) {
        Ok(price) if !price.is_sign_negative() => Ok(price),
        _ => Err(format!(
            "unit price must be a non-negative decimal (got `{raw}`)"
        )),
    }
}

/// Blank means "no date".
fn parse_date(fields: &ItemFields) -> Result<Option<NaiveDate>, String> {
    match fields.value(Field::ExpiryDate) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("expiry date must be YYYY-MM-DD (got `{raw}`)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ItemFields {
        ItemFields::new()
            .with(Field::Name, "Lifting Straps")
            .with(Field::Sku, "GF-LS-010")
            .with(Field::Category, "Accessories")
            .with(Field::Stock, "10")
            .with(Field::ReorderPoint, "20")
            .with(Field::UnitPrice, "12.50")
    }

    fn message(err: DomainError) -> String {
        match err {
            DomainError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_input_is_coerced() {
        let item = validate_new(&complete(), &CategorySchema::default()).unwrap();
        assert_eq!(item.stock, 10);
        assert_eq!(item.reorder_point, 20);
        assert_eq!(item.unit_price, Decimal::new(1250, 2));
        assert_eq!(item.supplier, "");
        assert_eq!(item.expiry_date, None);
    }

    #[test]
    fn all_missing_fields_are_listed() {
        let fields = ItemFields::new().with(Field::Name, "x").with(Field::Sku, "  ");
        let msg = message(validate_new(&fields, &CategorySchema::default()).unwrap_err());
        assert_eq!(
            msg,
            "missing required fields: sku, category, stock, reorder point, unit price"
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let fields = complete()
            .with(Field::Stock, "-3")
            .with(Field::UnitPrice, "cheap");
        let msg = message(validate_new(&fields, &CategorySchema::default()).unwrap_err());
        assert!(msg.contains("stock must be a non-negative integer"));
        assert!(msg.contains("unit price must be a non-negative decimal"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let fields = complete().with(Field::UnitPrice, "-0.01");
        assert!(validate_new(&fields, &CategorySchema::default()).is_err());
    }

    #[test]
    fn expiry_is_collected_only_where_admitted() {
        let schema = CategorySchema::default();
        let apparel = complete().with(Field::ExpiryDate, "not a date");
        assert_eq!(validate_new(&apparel, &schema).unwrap().expiry_date, None);

        let supplements = complete()
            .with(Field::Category, "Supplements")
            .with(Field::ExpiryDate, "2025-06-30");
        assert_eq!(
            validate_new(&supplements, &schema).unwrap().expiry_date,
            NaiveDate::from_ymd_opt(2025, 6, 30)
        );

        let bad = supplements.with(Field::ExpiryDate, "30/06/2025");
        assert!(validate_new(&bad, &schema).is_err());
    }

    #[test]
    fn patch_keeps_absent_fields_absent() {
        let patch = validate_patch(&ItemFields::new().with(Field::Stock, "7")).unwrap();
        assert_eq!(patch.stock, Some(7));
        assert_eq!(patch.name, None);
        assert_eq!(patch.expiry_date, None);
    }

    #[test]
    fn patch_refuses_to_blank_required_fields() {
        let msg = message(validate_patch(&ItemFields::new().with(Field::Name, "")).unwrap_err());
        assert_eq!(msg, "missing required fields: name");
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let fields = ItemFields::new()
            .with(Field::Supplier, "")
            .with(Field::ExpiryDate, "");
        let patch = validate_patch(&fields).unwrap();
        assert_eq!(patch.supplier.as_deref(), Some(""));
        assert_eq!(patch.expiry_date, Some(None));
    }
}
