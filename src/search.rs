//! Free-text filtering of annotated listings.

use crate::directory::DoctorListing;

/// Words that mark a search term as a specialty lookup rather than a clinic
/// name. A term counts if it contains one of these, or is part of one.
static SPECIALTY_TERMS: &[&str] = &[
    "cardiology",
    "cardiac",
    "heart",
    "dermatology",
    "skin",
    "dermat",
    "gynecology",
    "gynecologist",
    "women",
    "maternity",
    "pediatrics",
    "child",
    "kids",
    "neurology",
    "brain",
    "neuro",
    "orthopedics",
    "bone",
    "ortho",
    "general medicine",
    "medicine",
    "general",
    "radiology",
    "scan",
    "imaging",
    "psychiatry",
    "mental",
    "psychology",
    "urology",
    "kidney",
    "dentistry",
    "dental",
    "teeth",
    "tooth",
    "ent",
    "ear",
    "nose",
    "throat",
    "ophthalmology",
    "eye",
    "vision",
    "multi-specialty",
    "hospital",
    "haematology",
    "blood",
    "neonatal",
    "newborn",
    "oncology",
    "cancer",
    "endocrinology",
    "diabetes",
    "thyroid",
    "gastroenterology",
    "stomach",
    "digestive",
    "pulmonology",
    "lung",
    "respiratory",
    "rheumatology",
    "arthritis",
    "nephrology",
    "dialysis",
    "anesthesiology",
    "pain management",
    "emergency",
    "urgent",
    "pathology",
    "lab",
    "physiotherapy",
    "physio",
    "therapy",
];

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `term` names a specialty (as opposed to a clinic).
pub fn is_specialty_term(term: &str) -> bool {
    let term = normalize(term);
    if term.is_empty() {
        return false;
    }
    SPECIALTY_TERMS
        .iter()
        .any(|known| term.contains(known) || known.contains(term.as_str()))
}

/// Listings matching `term`.
///
/// Blank terms keep everything. Specialty terms match against specialty
/// labels in both directions and against the name; other terms match the
/// name only.
pub fn filter_listings<'a>(listings: &'a [DoctorListing], term: &str) -> Vec<&'a DoctorListing> {
    let needle = normalize(term);
    if needle.is_empty() {
        return listings.iter().collect();
    }

    if is_specialty_term(&needle) {
        listings
            .iter()
            .filter(|listing| {
                listing.specialties.iter().any(|specialty| {
                    let specialty = specialty.to_lowercase();
                    specialty.contains(&needle) || needle.contains(&specialty)
                }) || listing.name.to_lowercase().contains(&needle)
            })
            .collect()
    } else {
        filter_by_name(listings, &needle)
    }
}

/// Listings whose name contains `term`, case-insensitively.
pub fn filter_by_name<'a>(listings: &'a [DoctorListing], term: &str) -> Vec<&'a DoctorListing> {
    let needle = normalize(term);
    listings
        .iter()
        .filter(|listing| listing.name.to_lowercase().contains(&needle))
        .collect()
}
