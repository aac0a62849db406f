use super::columns::{ColumnMapping, RegisterField};
use crate::valuation::BuildingInput;
use csv::StringRecord;

/// Why a data row did not become a [`BuildingInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowIssue {
    Missing(RegisterField),
    Unparsable { field: RegisterField, value: String },
}

impl RowIssue {
    pub(crate) fn describe(&self) -> String {
        match self {
            RowIssue::Missing(field) => format!("missing {}", field.label()),
            RowIssue::Unparsable { field, value } => {
                format!("could not parse {} from '{}'", field.label(), value)
            }
        }
    }
}

pub(crate) fn parse_row(
    record: &StringRecord,
    mapping: &ColumnMapping,
    row_number: usize,
) -> Result<BuildingInput, RowIssue> {
    let name = required_text(record, mapping, RegisterField::Name)?.to_string();
    let area_m2 = parse_number(required_text(record, mapping, RegisterField::AreaM2)?)
        .ok_or_else(|| unparsable(record, mapping, RegisterField::AreaM2))?;
    let cost_per_m2 = parse_number(required_text(record, mapping, RegisterField::CostPerM2)?)
        .ok_or_else(|| unparsable(record, mapping, RegisterField::CostPerM2))?;
    let construction_year =
        parse_year(required_text(record, mapping, RegisterField::ConstructionYear)?)
            .ok_or_else(|| unparsable(record, mapping, RegisterField::ConstructionYear))?;

    let id = match optional_text(record, mapping, RegisterField::Id) {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| unparsable(record, mapping, RegisterField::Id))?,
        None => row_number as i64,
    };

    let building_type =
        optional_text(record, mapping, RegisterField::BuildingType).map(str::to_string);

    Ok(BuildingInput {
        id,
        name,
        area_m2,
        cost_per_m2,
        construction_year,
        building_type,
    })
}

fn optional_text<'r>(
    record: &'r StringRecord,
    mapping: &ColumnMapping,
    field: RegisterField,
) -> Option<&'r str> {
    mapping
        .position(field)
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn required_text<'r>(
    record: &'r StringRecord,
    mapping: &ColumnMapping,
    field: RegisterField,
) -> Result<&'r str, RowIssue> {
    optional_text(record, mapping, field).ok_or(RowIssue::Missing(field))
}

fn unparsable(record: &StringRecord, mapping: &ColumnMapping, field: RegisterField) -> RowIssue {
    RowIssue::Unparsable {
        field,
        value: optional_text(record, mapping, field)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Parses register numbers such as `1 250,5`, `2 000 €` or `1500.0`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| parse_number(trimmed).map(|value| value.trunc() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_finnish_number_formats() {
        assert_eq!(parse_number("1 250,5"), Some(1250.5));
        assert_eq!(parse_number("2\u{a0}000 €"), Some(2000.0));
        assert_eq!(parse_number("1500.0"), Some(1500.0));
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_year("1994"), Some(1994));
        assert_eq!(parse_year("1994.0"), Some(1994));
    }

    #[test]
    fn falls_back_to_row_number_for_missing_id() {
        let mapping = ColumnMapping::detect(["name", "area_m2", "cost_per_m2", "construction_year"]);
        let record = StringRecord::from(vec!["Koulu", "1500", "2000", "1994"]);

        let building = parse_row(&record, &mapping, 3).expect("row parses");
        assert_eq!(building.id, 3);
        assert_eq!(building.name, "Koulu");
        assert_eq!(building.building_type, None);
    }

    #[test]
    fn reports_unparsable_area() {
        let mapping = ColumnMapping::detect(["name", "area_m2", "cost_per_m2", "construction_year"]);
        let record = StringRecord::from(vec!["Koulu", "iso", "2000", "1994"]);

        let issue = parse_row(&record, &mapping, 1).expect_err("area is not a number");
        assert_eq!(
            issue,
            RowIssue::Unparsable {
                field: RegisterField::AreaM2,
                value: "iso".to_string()
            }
        );
        assert_eq!(issue.describe(), "could not parse area_m2 from 'iso'");
    }
}
