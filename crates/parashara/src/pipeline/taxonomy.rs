//! Reference taxonomy: where each family of yogas is treated in Brihat
//! Parashara Hora Shastra (chapter numbering of the Santhanam edition).
//! Doshas and Nitya yogas come from later tradition and carry their own codes.

use serde::{Deserialize, Serialize};

use crate::detectors::{bhava, dosha, lords, lunar, mahapurusha, mutual, nabhasa, nitya, sanyas, solar};
use crate::error::YogaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRef {
    pub bphs_category: String,
    pub bphs_section: String,
    pub bphs_reference: String,
}

struct Entry {
    category: &'static str,
    bphs_category: &'static str,
    section: &'static str,
    reference: &'static str,
}

const fn entry(
    category: &'static str,
    bphs_category: &'static str,
    section: &'static str,
    reference: &'static str,
) -> Entry {
    Entry {
        category,
        bphs_category,
        section,
        reference,
    }
}

pub const UNCATEGORIZED: &str = "Uncategorized";

static BY_FAMILY: &[Entry] = &[
    entry(mahapurusha::CATEGORY, "Pancha Mahapurusha Yoga", "Mahapurusha", "BPHS Ch. 75"),
    entry(solar::CATEGORY, "Surya Yoga", "Solar Combinations", "BPHS Ch. 38"),
    entry(lunar::CATEGORY, "Chandra Yoga", "Lunar Combinations", "BPHS Ch. 37"),
    entry(mutual::CATEGORY, "Vividha Yoga", "Miscellaneous Combinations", "BPHS Ch. 36"),
    entry(lords::RAJA_CATEGORY, "Raja Yoga", "Royal Combinations", "BPHS Ch. 39"),
    entry(lords::DHANA_CATEGORY, "Dhana Yoga", "Wealth Combinations", "BPHS Ch. 41"),
    entry(lords::VIPARITA_CATEGORY, "Raja Yoga", "Viparita Raja Yoga", "BPHS Ch. 39"),
    entry(bhava::CATEGORY, "Bhavesha Phala", "Effects of House Lords", "BPHS Ch. 24"),
    entry(bhava::PARIVARTANA_CATEGORY, "Bhavesha Phala", "Exchange of House Lords", "BPHS Ch. 24"),
    entry(nabhasa::CATEGORY, "Nabhasa Yoga", "Nabhasa Combinations", "BPHS Ch. 35"),
    entry(sanyas::CATEGORY, "Pravrajya Yoga", "Ascetic Combinations", "BPHS Ch. 44"),
    entry(nitya::CATEGORY, "Panchanga", "Nitya Yoga", "Muhurta tradition"),
    entry(dosha::CATEGORY, "Dosha", "Afflictions", "Later tradition"),
];

/// Per-name overrides where one family spans several chapters.
static BY_NAME: &[(&str, Entry)] = &[
    (
        "Daridra Yoga",
        entry(lords::DHANA_CATEGORY, "Daridra Yoga", "Combinations for Poverty", "BPHS Ch. 42"),
    ),
    (
        "Neecha Bhanga Raja Yoga",
        entry(lords::RAJA_CATEGORY, "Raja Yoga", "Cancellation of Debility", "BPHS Ch. 39; Phaladeepika Ch. 7"),
    ),
    (
        "Lakshmi Yoga",
        entry(mutual::CATEGORY, "Dhana Yoga", "Wealth Combinations", "BPHS Ch. 41"),
    ),
    (
        "Gaja Kesari Yoga",
        entry(lunar::CATEGORY, "Chandra Yoga", "Lunar Combinations", "BPHS Ch. 36"),
    ),
    (
        "Akhanda Samrajya Yoga",
        entry(lords::RAJA_CATEGORY, "Raja Yoga", "Royal Combinations", "BPHS Ch. 40"),
    ),
];

fn to_ref(e: &Entry) -> TaxonomyRef {
    TaxonomyRef {
        bphs_category: e.bphs_category.to_string(),
        bphs_section: e.section.to_string(),
        bphs_reference: e.reference.to_string(),
    }
}

/// Taxonomy for a canonical name within a detector family.
pub fn taxonomy_for(name: &str, category: &str) -> Result<TaxonomyRef, YogaError> {
    if let Some((_, e)) = BY_NAME
        .iter()
        .find(|(n, e)| *n == name && e.category == category)
    {
        return Ok(to_ref(e));
    }
    BY_FAMILY
        .iter()
        .find(|e| e.category == category)
        .map(to_ref)
        .ok_or_else(|| YogaError::Classification {
            name: name.to_string(),
            message: format!("no taxonomy for category {:?}", category),
        })
}

pub fn uncategorized() -> TaxonomyRef {
    TaxonomyRef {
        bphs_category: UNCATEGORIZED.to_string(),
        bphs_section: UNCATEGORIZED.to_string(),
        bphs_reference: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::registry;

    #[test]
    fn test_every_family_has_taxonomy() {
        for detector in registry() {
            assert!(
                taxonomy_for("", detector.family).is_ok(),
                "{} has no taxonomy",
                detector.family
            );
        }
    }

    #[test]
    fn test_name_override() {
        let t = taxonomy_for("Daridra Yoga", lords::DHANA_CATEGORY).unwrap();
        assert_eq!(t.bphs_reference, "BPHS Ch. 42");
        let t = taxonomy_for("Dhana Yoga (2nd & 11th Lords)", lords::DHANA_CATEGORY).unwrap();
        assert_eq!(t.bphs_reference, "BPHS Ch. 41");
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        assert!(matches!(
            taxonomy_for("X", "Nowhere"),
            Err(YogaError::Classification { .. })
        ));
    }
}
