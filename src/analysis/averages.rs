//! Group-wise averages over measurement rows
//!
//! Each row lands in the Central or Border group of its type and always in
//! the type's All group. Column means skip absent (`NaN`) entries, so every
//! column has its own denominator.

use std::fmt;

use ndarray::{Array2, ArrayView1, Axis};

use crate::analysis::measurement::{ColumnLayout, MeasurementRow};
use crate::io::table::{Field, Table};
use crate::model::identifier::ObjectType;
use crate::model::object::Category;

/// Category part of a group key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupCategory {
    /// Objects not touching the image edge
    Central,
    /// Objects touching the image edge
    Border,
    /// Union of central and border objects
    All,
}

impl GroupCategory {
    /// Whether an object category belongs to this group category
    pub const fn contains(self, category: Category) -> bool {
        matches!(
            (self, category),
            (Self::All, _) | (Self::Central, Category::Central) | (Self::Border, Category::Border)
        )
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Central => "Central",
            Self::Border => "Border",
            Self::All => "All",
        }
    }
}

/// One of the twelve averaging groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    /// Object type of the members
    pub kind: ObjectType,
    /// Category of the members
    pub category: GroupCategory,
}

impl GroupKey {
    /// All groups in output order
    pub const ORDER: [Self; 12] = [
        Self::new(ObjectType::Nucleus, GroupCategory::Central),
        Self::new(ObjectType::Nucleus, GroupCategory::Border),
        Self::new(ObjectType::Nucleus, GroupCategory::All),
        Self::new(ObjectType::Cell, GroupCategory::Central),
        Self::new(ObjectType::Cell, GroupCategory::Border),
        Self::new(ObjectType::Cell, GroupCategory::All),
        Self::new(ObjectType::Cytoplasm, GroupCategory::Central),
        Self::new(ObjectType::Cytoplasm, GroupCategory::Border),
        Self::new(ObjectType::Cytoplasm, GroupCategory::All),
        Self::new(ObjectType::Vessel, GroupCategory::Central),
        Self::new(ObjectType::Vessel, GroupCategory::Border),
        Self::new(ObjectType::Vessel, GroupCategory::All),
    ];

    const fn new(kind: ObjectType, category: GroupCategory) -> Self {
        Self { kind, category }
    }

    /// Display name such as `Central Nuclei`
    pub fn name(&self) -> String {
        format!("{} {}", self.category.label(), self.kind.plural())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Averages of one non-empty group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAverage {
    /// Group the averages belong to
    pub key: GroupKey,
    /// Number of member rows
    pub count: usize,
    /// Column means in numeric column order; `NaN` when no member has a value
    pub means: Vec<f64>,
}

/// Whether a row is a member of a group
///
/// Border-flagged vessel rows leave the vessel groups when
/// `ignore_border_vessels` is set.
pub fn belongs_to(row: &MeasurementRow, key: GroupKey, ignore_border_vessels: bool) -> bool {
    if row.kind != key.kind || !key.category.contains(row.category) {
        return false;
    }
    if row.kind == ObjectType::Vessel && ignore_border_vessels {
        return row.category == Category::Central;
    }
    true
}

/// Averages of every non-empty group, in [`GroupKey::ORDER`]
pub fn group_averages(rows: &[MeasurementRow], ignore_border_vessels: bool) -> Vec<GroupAverage> {
    let width = rows.first().map_or(0, |row| row.values.len());
    let matrix = Array2::from_shape_fn((rows.len(), width), |(r, c)| {
        rows.get(r)
            .and_then(|row| row.values.get(c))
            .copied()
            .unwrap_or(f64::NAN)
    });

    GroupKey::ORDER
        .iter()
        .filter_map(|&key| {
            let members: Vec<usize> = rows
                .iter()
                .enumerate()
                .filter(|(_, row)| belongs_to(row, key, ignore_border_vessels))
                .map(|(position, _)| position)
                .collect();
            if members.is_empty() {
                return None;
            }

            let selected = matrix.select(Axis(0), &members);
            let means = selected.axis_iter(Axis(1)).map(present_mean).collect();
            Some(GroupAverage {
                key,
                count: members.len(),
                means,
            })
        })
        .collect()
}

/// Group-average table: group name, member count, then the column means
pub fn averages_table(averages: &[GroupAverage], layout: &ColumnLayout) -> Table {
    let mut headers = vec!["Group".to_string(), "Count".to_string()];
    headers.extend(layout.numeric_headers());

    let mut table = Table::new(headers);
    for average in averages {
        let mut fields = vec![
            Field::Text(average.key.name()),
            Field::Count(average.count as u64),
        ];
        fields.extend(average.means.iter().map(|&mean| Field::Number(mean)));
        table.push_row(fields);
    }
    table
}

/// Mean over the non-`NaN` entries of a column
fn present_mean(column: ArrayView1<'_, f64>) -> f64 {
    let (sum, count) = column
        .iter()
        .filter(|value| !value.is_nan())
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}
