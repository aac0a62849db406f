use std::collections::HashMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RegisterField {
    Id,
    Name,
    AreaM2,
    CostPerM2,
    ConstructionYear,
    BuildingType,
}

impl RegisterField {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::AreaM2 => "area_m2",
            Self::CostPerM2 => "cost_per_m2",
            Self::ConstructionYear => "construction_year",
            Self::BuildingType => "building_type",
        }
    }

    pub(crate) const fn required() -> [Self; 4] {
        [
            Self::Name,
            Self::AreaM2,
            Self::CostPerM2,
            Self::ConstructionYear,
        ]
    }
}

/// Resolved header positions of one register file.
#[derive(Debug, Default)]
pub(crate) struct ColumnMapping {
    positions: HashMap<RegisterField, usize>,
}

impl ColumnMapping {
    /// Matches headers against known English and Finnish names; the first
    /// matching column wins.
    pub(crate) fn detect<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        for (index, header) in headers.into_iter().enumerate() {
            if let Some(field) = field_for_header(header) {
                positions.entry(field).or_insert(index);
            }
        }
        Self { positions }
    }

    pub(crate) fn position(&self, field: RegisterField) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub(crate) fn missing_required(&self) -> Option<RegisterField> {
        RegisterField::required()
            .into_iter()
            .find(|field| !self.positions.contains_key(field))
    }
}

pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Aliases shorter than this only match a header exactly.
const MIN_CONTAINED_ALIAS_LEN: usize = 4;

/// Exact alias first; otherwise the longest alias contained in the header,
/// so `Bruttoala (m2)` maps to area and `Rakennuskustannus €/m2` to cost.
fn field_for_header(header: &str) -> Option<RegisterField> {
    let normalized = normalize_header(header);
    if let Some(field) = header_map().get(&normalized) {
        return Some(*field);
    }

    HEADER_TO_FIELD
        .iter()
        .map(|(alias, field)| (normalize_header(alias), *field))
        .filter(|(alias, _)| {
            alias.chars().count() >= MIN_CONTAINED_ALIAS_LEN
                && normalized.contains(alias.as_str())
        })
        .fold(None, |best: Option<(String, RegisterField)>, candidate| match best {
            Some(current) if current.0.len() >= candidate.0.len() => Some(current),
            _ => Some(candidate),
        })
        .map(|(_, field)| field)
}

const HEADER_TO_FIELD: &[(&str, RegisterField)] = &[
    ("id", RegisterField::Id),
    ("building_id", RegisterField::Id),
    ("tunnus", RegisterField::Id),
    ("rakennustunnus", RegisterField::Id),
    ("name", RegisterField::Name),
    ("building_name", RegisterField::Name),
    ("nimi", RegisterField::Name),
    ("rakennus", RegisterField::Name),
    ("kohde", RegisterField::Name),
    ("area_m2", RegisterField::AreaM2),
    ("area", RegisterField::AreaM2),
    ("pinta_ala", RegisterField::AreaM2),
    ("pinta-ala", RegisterField::AreaM2),
    ("pinta-ala m2", RegisterField::AreaM2),
    ("bruttoala", RegisterField::AreaM2),
    ("brm2", RegisterField::AreaM2),
    ("cost_per_m2", RegisterField::CostPerM2),
    ("cost", RegisterField::CostPerM2),
    ("rakennuskustannus", RegisterField::CostPerM2),
    ("yksikköhinta", RegisterField::CostPerM2),
    ("€/m2", RegisterField::CostPerM2),
    ("eur/m2", RegisterField::CostPerM2),
    ("construction_year", RegisterField::ConstructionYear),
    ("year_built", RegisterField::ConstructionYear),
    ("rakennusvuosi", RegisterField::ConstructionYear),
    ("valmistumisvuosi", RegisterField::ConstructionYear),
    ("building_type", RegisterField::BuildingType),
    ("type", RegisterField::BuildingType),
    ("tyyppi", RegisterField::BuildingType),
    ("käyttötarkoitus", RegisterField::BuildingType),
];

static HEADER_MAP: OnceLock<HashMap<String, RegisterField>> = OnceLock::new();

fn header_map() -> &'static HashMap<String, RegisterField> {
    HEADER_MAP.get_or_init(|| {
        HEADER_TO_FIELD
            .iter()
            .map(|(header, field)| (normalize_header(header), *field))
            .collect()
    })
}
