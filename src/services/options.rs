use crate::models::{FormOptionsResponse, Objective};
use std::collections::BTreeMap;

const INDUSTRIES: &[&str] = &[
    "D2C",
    "Apparel",
    "Fitness",
    "Fintech",
    "Education",
    "FMCG",
    "Consumer Electronics",
];

const GEOGRAPHIES: &[(&str, &[&str])] = &[
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur"]),
    ("Delhi NCR", &["Delhi", "Gurgaon", "Noida"]),
    ("Karnataka", &["Bengaluru", "Mysuru"]),
    ("Rajasthan", &["Jaipur", "Udaipur"]),
];

const SPORTS: &[&str] = &[
    "Cricket",
    "Football",
    "Badminton",
    "Swimming",
    "Athletics",
    "Fitness",
    "Basketball",
    "Tennis",
];

const AUDIENCES: &[&str] = &["Students", "Working Professionals", "Women", "Kids/Parents", "Gym-goers"];

const BUDGET_RANGES: &[&str] = &["<$25k", "$25k-$100k", "$100k-$300k", "$300k-$1M", ">$1M"];

const DELIVERABLES: &[&str] = &[
    "Instagram Post/Reel/Story",
    "On-ground Activation",
    "Product Trial/Review",
    "Brand Ambassadorship",
    "Event Appearance",
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Choices offered by the brief form
pub fn form_options() -> FormOptionsResponse {
    FormOptionsResponse {
        industries: owned(INDUSTRIES),
        objectives: Objective::ALL.iter().map(|o| o.as_str().to_string()).collect(),
        geographies: GEOGRAPHIES
            .iter()
            .map(|(state, cities)| (state.to_string(), owned(cities)))
            .collect::<BTreeMap<_, _>>(),
        sports: owned(SPORTS),
        audiences: owned(AUDIENCES),
        budget_ranges: owned(BUDGET_RANGES),
        deliverables: owned(DELIVERABLES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objectives_match_enum() {
        let options = form_options();
        assert_eq!(options.objectives.len(), Objective::ALL.len());
        assert!(options.objectives.contains(&"App Installs".to_string()));
    }

    #[test]
    fn test_geographies_keyed_by_state() {
        let options = form_options();
        assert_eq!(options.geographies["Rajasthan"], vec!["Jaipur", "Udaipur"]);
    }
}
