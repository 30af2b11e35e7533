//! Specialty classification for directory places.
//!
//! A place is labelled from two sources: the coarse category tags the
//! directory assigns, and keywords found in its display name. When neither
//! yields anything, a generic label is picked from the tags.

/// Fallback label for places tagged as hospitals with no other signal.
pub const MULTI_SPECIALTY_HOSPITAL: &str = "Multi-specialty Hospital";
/// Fallback label for places tagged as doctors with no other signal.
pub const GENERAL_MEDICINE: &str = "General Medicine";
/// Fallback label for places tagged as dentists with no other signal.
pub const DENTISTRY: &str = "Dentistry";
/// Last-resort label when nothing about the place is recognised.
pub const MEDICAL_CENTER: &str = "Medical Center";

/// Specialty → name keywords. Keywords are lowercase and matched as literal
/// substrings of the lowercased name, so order here is the output order.
static SPECIALTY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Cardiology", &["cardio", "heart", "cardiac", "cardiovascular"]),
    ("Dermatology", &["dermat", "skin", "cosmet", "beauty", "laser"]),
    (
        "Gynecology",
        &["gynec", "women", "maternity", "obstetric", "pregnancy"],
    ),
    (
        "Orthopedics",
        &["ortho", "bone", "joint", "fracture", "spine", "sports"],
    ),
    ("Pediatrics", &["child", "pediatric", "kids", "baby", "infant"]),
    ("Neurology", &["neuro", "brain", "nerve", "stroke", "epilepsy"]),
    (
        "ENT",
        &["otolaryng", "e.n.t", "ear", "nose", "throat", "hearing", "sinus"],
    ),
    (DENTISTRY, &["dental", "tooth", "dentist", "teeth", "oral"]),
    (GENERAL_MEDICINE, &["general", "family", "primary", "physician"]),
    (
        "Ophthalmology",
        &["eye", "vision", "ophthal", "retina", "cataract"],
    ),
    ("Urology", &["urology", "kidney", "urinary", "prostate"]),
    (
        "Psychiatry",
        &["mental", "psychiatric", "psychology", "counseling"],
    ),
    ("Haematology", &["haematol", "blood", "hematol", "anemia"]),
    ("Neonatal", &["neonatal", "newborn", "infant", "premature"]),
    ("Radiology", &["radio", "scan", "imaging", "xray", "mri", "ct"]),
    (
        "Oncology",
        &["cancer", "oncol", "tumor", "chemotherapy", "radiation"],
    ),
    ("Endocrinology", &["diabetes", "thyroid", "hormone", "endocrin"]),
    (
        "Gastroenterology",
        &["gastro", "stomach", "liver", "digestive", "colon"],
    ),
    (
        "Pulmonology",
        &["lung", "respiratory", "asthma", "pulmon", "chest"],
    ),
    (
        "Rheumatology",
        &["arthritis", "joint pain", "rheumat", "autoimmune"],
    ),
    ("Nephrology", &["kidney", "dialysis", "nephro", "renal"]),
    (
        "Anesthesiology",
        &["anesthesia", "pain management", "surgery"],
    ),
    (
        "Emergency Medicine",
        &["emergency", "urgent", "trauma", "critical"],
    ),
    ("Pathology", &["pathology", "lab", "biopsy", "diagnosis"]),
    (
        "Physiotherapy",
        &["physio", "therapy", "rehabilitation", "massage"],
    ),
];

/// Directory category tag → specialties it implies on its own.
///
/// `hospital`, `establishment` and `point_of_interest` say nothing about the
/// specialty and leave the decision to the name (or the fallback chain).
static TAG_SPECIALTIES: &[(&str, &[&str])] = &[
    ("hospital", &[]),
    ("doctor", &[GENERAL_MEDICINE]),
    ("dentist", &[DENTISTRY]),
    ("physiotherapist", &["Physiotherapy"]),
    ("health", &[GENERAL_MEDICINE]),
    ("establishment", &[]),
    ("point_of_interest", &[]),
];

/// Every specialty the classifier can derive from a name, in table order.
pub static SPECIALTY_LABELS: [&str; 25] = [
    "Cardiology",
    "Dermatology",
    "Gynecology",
    "Orthopedics",
    "Pediatrics",
    "Neurology",
    "ENT",
    DENTISTRY,
    GENERAL_MEDICINE,
    "Ophthalmology",
    "Urology",
    "Psychiatry",
    "Haematology",
    "Neonatal",
    "Radiology",
    "Oncology",
    "Endocrinology",
    "Gastroenterology",
    "Pulmonology",
    "Rheumatology",
    "Nephrology",
    "Anesthesiology",
    "Emergency Medicine",
    "Pathology",
    "Physiotherapy",
];

/// Classify a place into the medical specialties it appears to offer.
///
/// Tag mappings are applied first, then every specialty whose keywords occur
/// in the name. Labels keep first-insertion order and never repeat. The
/// result is never empty.
pub fn classify<T: AsRef<str>>(name: &str, tags: &[T]) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();

    for tag in tags {
        let tag = tag.as_ref().to_lowercase();
        if let Some((_, specialties)) = TAG_SPECIALTIES.iter().find(|(t, _)| *t == tag) {
            for specialty in specialties.iter() {
                push_unique(&mut found, *specialty);
            }
        }
    }

    let lower_name = name.to_lowercase();
    for (specialty, keywords) in SPECIALTY_KEYWORDS {
        if keywords.iter().any(|keyword| lower_name.contains(keyword)) {
            push_unique(&mut found, *specialty);
        }
    }

    if found.is_empty() {
        found.push(fallback_for(tags));
    }

    found
}

/// Label used when neither the tags nor the name matched anything.
/// Checked in order: hospital, doctor, dentist.
fn fallback_for<T: AsRef<str>>(tags: &[T]) -> &'static str {
    let has = |wanted: &str| tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(wanted));

    if has("hospital") {
        MULTI_SPECIALTY_HOSPITAL
    } else if has("doctor") {
        GENERAL_MEDICINE
    } else if has("dentist") {
        DENTISTRY
    } else {
        MEDICAL_CENTER
    }
}

fn push_unique(found: &mut Vec<&'static str>, specialty: &'static str) {
    if !found.contains(&specialty) {
        found.push(specialty);
    }
}

/// Join specialty labels into the badge text shown next to a place.
pub fn join_specialties(specialties: &[&str]) -> String {
    if specialties.is_empty() {
        MEDICAL_CENTER.to_string()
    } else {
        specialties.join(", ")
    }
}
