//! # Pool Export
//!
//! The tabular form of a pool mapping, one [`Sheet`] per pool, as written to a spreadsheet
//! workbook. Every row carries the age and weight category of the competition.
use crate::fixture::sheet_name;
use crate::pools::UNASSIGNED;
use crate::{Participant, Pools};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The column titles of every [`Sheet`].
pub const HEADER: [&str; 4] = ["Name", "District", "Age Category", "Weight Category"];

/// The age and weight category of a competition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category {
    pub age: String,
    pub weight: String,
}

impl Category {
    pub fn new<A, W>(age: A, weight: W) -> Self
    where
        A: Into<String>,
        W: Into<String>,
    {
        Self {
            age: age.into(),
            weight: weight.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    /// The tab name, see [`sheet_name`].
    pub name: String,
    pub rows: Vec<Row>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    pub name: String,
    pub district: String,
    pub age_category: String,
    pub weight_category: String,
}

impl Row {
    /// Returns the cells of this row in [`HEADER`] order.
    pub fn cells(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.district.as_str(),
            self.age_category.as_str(),
            self.weight_category.as_str(),
        ]
    }
}

/// Returns one [`Sheet`] per pool in `pools`, followed by a sheet of all unassigned
/// `participants` if there are any.
pub fn export(participants: &[Participant], pools: &Pools, category: &Category) -> Vec<Sheet> {
    let mut sheets: Vec<Sheet> = pools
        .iter()
        .map(|pool| sheet(&pool.name, &pool.participants(participants), category))
        .collect();

    let unassigned = pools.unassigned(participants);
    if !unassigned.is_empty() {
        sheets.push(sheet(UNASSIGNED, &unassigned, category));
    }

    log::debug!("Exported {} sheets", sheets.len());

    sheets
}

fn sheet(name: &str, participants: &[&Participant], category: &Category) -> Sheet {
    Sheet {
        name: sheet_name(name),
        rows: participants
            .iter()
            .map(|participant| Row {
                name: participant.name.clone(),
                district: participant.district.clone(),
                age_category: category.age.clone(),
                weight_category: category.weight.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{participants, Participant, Pool, Pools};

    use super::{export, Category, HEADER};

    #[test]
    fn test_export() {
        let participants = vec![
            Participant::new("p0", "Kavin Kumar .R", "CBE"),
            Participant::new("p1", "Sriram .V", "NAM"),
            Participant::new("p2", "Prabhu .C", "KPM"),
        ];
        let pools = Pools::from(vec![
            Pool {
                name: String::from("Pool 1"),
                members: vec!["p1".into(), "p0".into()],
            },
            Pool::new("Pool 2"),
        ]);

        let sheets = export(&participants, &pools, &Category::new("Sub Junior", "Under 40kg"));

        assert_eq!(sheets.len(), 3);
        assert_eq!(sheets[0].name, "Pool_1");
        assert_eq!(
            sheets[0].rows[0].cells(),
            ["Sriram .V", "NAM", "Sub Junior", "Under 40kg"]
        );
        assert_eq!(sheets[0].rows[1].name, "Kavin Kumar .R");
        assert!(sheets[1].rows.is_empty());
        assert_eq!(sheets[2].name, "unassigned");
        assert_eq!(sheets[2].rows[0].district, "KPM");
        assert_eq!(HEADER.len(), sheets[2].rows[0].cells().len());
    }

    #[test]
    fn test_export_without_unassigned() {
        let participants = participants!["p0" => "A"];
        let pools = Pools::from_assignments(vec![(participants[0].id.clone(), Some("Pool 1"))]);

        let sheets = export(&participants, &pools, &Category::default());

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows[0].age_category, "");
    }
}
