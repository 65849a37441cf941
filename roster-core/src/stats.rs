//! District representation of a list of participants.
use crate::Participant;

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of districts usually shown in a district summary.
pub const TOP_DISTRICTS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistrictCount {
    pub district: String,
    pub count: usize,
}

impl DistrictCount {
    /// Returns the share of this district in `total` participants, in percent.
    pub fn percent(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

/// Returns the number of participants of every district, largest first. Districts with the same
/// count keep the order they first appear in.
pub fn district_counts(participants: &[Participant]) -> Vec<DistrictCount> {
    let mut counts: Vec<DistrictCount> = Vec::new();
    let mut indexes: HashMap<&str, usize> = HashMap::new();

    for participant in participants {
        let district = participant.district.as_str();

        let index = *indexes.entry(district).or_insert_with(|| {
            counts.push(DistrictCount {
                district: district.to_owned(),
                count: 0,
            });
            counts.len() - 1
        });

        counts[index].count += 1;
    }

    // Stable, so ties keep their first-appearance order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use crate::{participants, Participant};

    use super::{district_counts, DistrictCount, TOP_DISTRICTS};

    #[test]
    fn test_district_counts() {
        let participants = participants![
            "p0" => "TVY", "p1" => "CBE", "p2" => "CBE",
            "p3" => "MDU", "p4" => "CBE", "p5" => "MDU",
        ];

        let counts = district_counts(&participants);

        assert_eq!(
            counts,
            [
                DistrictCount {
                    district: String::from("CBE"),
                    count: 3,
                },
                DistrictCount {
                    district: String::from("MDU"),
                    count: 2,
                },
                DistrictCount {
                    district: String::from("TVY"),
                    count: 1,
                },
            ]
        );
        assert_eq!(counts[0].percent(participants.len()), 50.0);
    }

    #[test]
    fn test_district_counts_ties_and_top() {
        let participants: Vec<_> = (0..12)
            .map(|i| Participant::new(format!("p{}", i), "", format!("D{}", i)))
            .collect();

        let counts = district_counts(&participants);
        let top: Vec<&str> = counts
            .iter()
            .take(TOP_DISTRICTS)
            .map(|count| count.district.as_str())
            .collect();

        assert_eq!(counts.len(), 12);
        assert_eq!(top.first(), Some(&"D0"));
        assert_eq!(top.last(), Some(&"D9"));
    }

    #[test]
    fn test_district_counts_empty() {
        assert!(district_counts(&[]).is_empty());
        assert_eq!(
            DistrictCount {
                district: String::new(),
                count: 0,
            }
            .percent(0),
            0.0
        );
    }
}
