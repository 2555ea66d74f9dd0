//! Built-in Dataset - Gulf, North and Sub-Saharan Africa One-Pagers
//!
//! Literal data rendered when no `--data` file is given.

use crate::records::{CoverPage, Dataset, JurisdictionRecord, RequirementRow};

pub const LAST_VERIFIED: &str = "2025‑08‑09";

/// Markdown one-pager source reproduced by the verbatim renderer.
pub const VERBATIM_SOURCE: &str = include_str!("../assets/onepagers.md");

/// Names shaded by the map procedure, as spelled in the boundary dataset.
pub const MAP_COUNTRIES: [&str; 6] = [
    "United Arab Emirates",
    "Saudi Arabia",
    "Oman",
    "Qatar",
    "Bahrain",
    "Kuwait",
];

pub fn cover() -> CoverPage {
    CoverPage {
        title: "Rouse MEA — Patents & Designs: Country One‑Pagers".to_string(),
        subtitle: "Version 1.0  ·  Prepared: 2025‑08‑09".to_string(),
        scope: "Scope: Minimal one‑page summaries per jurisdiction for patent & design filings. Tables capture document requirements, deadlines, and execution levels.".to_string(),
        last_verified: LAST_VERIFIED.to_string(),
        footer: "Prepared 2025‑08‑09 · Verify formalities with latest office circulars/local counsel before filing.".to_string(),
    }
}

pub fn builtin() -> Dataset {
    Dataset {
        cover: cover(),
        jurisdictions: jurisdictions(),
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    name: &str,
    map_reference: &str,
    population: &str,
    system: &str,
    office: &str,
    languages: &str,
    translation_rule: &str,
    requirements: Vec<RequirementRow>,
    notes: &str,
) -> JurisdictionRecord {
    JurisdictionRecord {
        name: name.to_string(),
        map_reference: map_reference.to_string(),
        population: population.to_string(),
        system: system.to_string(),
        office: office.to_string(),
        languages: languages.to_string(),
        translation_rule: translation_rule.to_string(),
        requirements,
        notes: Some(notes.to_string()),
    }
}

pub fn jurisdictions() -> Vec<JurisdictionRecord> {
    vec![
        record(
            "United Arab Emirates (UAE)",
            "maps/uae.png",
            "10,876,981 (2024)",
            "National (Paris/PCT NP)",
            "UAE Ministry of Economy — Patent Office",
            "Arabic & English",
            "Arabic translation as required (title/abstract at filing; full text by invitation/≈90 days)",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "90 days",
                    "Original",
                    "Notarized",
                    "Practice varies re: legalization; confirm current rule. Conf ~70%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "90 days",
                    "Original",
                    "Notarized",
                    "If applicant ≠ inventor. Conf ~70%.",
                ),
                RequirementRow::new(
                    "Commercial/Trade Licence or Register Extract",
                    "Y/Y",
                    "90 days",
                    "Copy or certified copy",
                    "Often notarized/legalized",
                    "Corporate applicants. Conf ~60%.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "3 months",
                    "Certified copy",
                    "Simple",
                    "PCT NP usually via IB.",
                ),
            ],
            "Missing mandatory docs typically rectifiable within 90 days; late fees/office invitation may apply.",
        ),
        record(
            "Saudi Arabia (KSA)",
            "maps/saudi.png",
            "≈33.9 million (2024 est.)",
            "National (Paris/PCT NP)",
            "Saudi Authority for Intellectual Property (SAIP)",
            "Arabic & English",
            "Arabic components as required; English specs accepted with translations if invited",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "Up to 3 months (by invitation)",
                    "Original",
                    "Apostille or Consular legalization",
                    "Apostille accepted. Conf ~90%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "Up to 3 months",
                    "Original",
                    "Apostille or Consular legalization",
                    "If applicant ≠ inventor. Conf ~85%.",
                ),
                RequirementRow::new(
                    "Commercial/Certificate of Incorporation",
                    "N/N (routine)",
                    "—",
                    "—",
                    "—",
                    "Not routinely required. Conf ~70%.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "~60–90 days",
                    "Certified copy",
                    "Simple",
                    "Translation if requested.",
                ),
            ],
            "Deadlines generally triggered by SAIP invitation; docket buffer recommended.",
        ),
        record(
            "Oman",
            "maps/oman.png",
            "5,049,269 (2023)",
            "National (Paris/PCT NP)",
            "Ministry of Commerce, Industry & Investment Promotion (IP Department)",
            "Arabic & English",
            "Arabic translation required per office timelines",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "60 days",
                    "Original",
                    "Apostille or Consular legalization",
                    "Hard deadline; app may lapse if missed. Conf ~90%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "≤90 days",
                    "Original",
                    "Apostille or Consular legalization",
                    "Conf ~85%.",
                ),
                RequirementRow::new(
                    "Commercial/Certificate of Incorporation",
                    "Y/Y",
                    "≤90 days",
                    "Certified copy",
                    "Apostille or Consular legalization",
                    "Arabic translation typically required. Conf ~85%.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "3 months",
                    "Certified copy",
                    "Simple",
                    "No translation generally required. Conf ~80%.",
                ),
            ],
            "Ensure Arabic translations are scheduled early.",
        ),
        record(
            "Qatar",
            "maps/qatar.png",
            "2,979,082 (2023)",
            "National (Paris/PCT NP)",
            "Ministry of Commerce & Industry — Industrial Property Office",
            "Arabic & English",
            "Key parts in Arabic; translation window up to ~6 months in practice",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "Up to 6 months",
                    "Original",
                    "Consular legalization (Qatar not in Apostille)",
                    "Conf ≥90%.",
                ),
                RequirementRow::new(
                    "Assignment (if applicant changed post‑PCT)",
                    "If applicable",
                    "Within 6 months/by invitation",
                    "Original",
                    "Consular legalization",
                    "Conf ~80%.",
                ),
                RequirementRow::new(
                    "Commercial/Certificate of Incorporation",
                    "N/N (routine)",
                    "—",
                    "—",
                    "—",
                    "Not typically required.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "3 months (practice up to 6)",
                    "Certified copy",
                    "Simple",
                    "Translation if requested.",
                ),
            ],
            "File Arabic title/abstract/claims at filing; full spec timing per office practice.",
        ),
        record(
            "Bahrain",
            "maps/bahrain.png",
            "1,588,670 (2024)",
            "National (Paris/PCT NP)",
            "Ministry of Industry & Commerce — Industrial Property Office",
            "Arabic & English",
            "Arabic translation per office timelines",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "3 months",
                    "Original",
                    "Apostille or Consular legalization",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "3 months",
                    "Original",
                    "Apostille or Consular legalization",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate proof",
                    "Y/Y",
                    "3 months",
                    "Certified copy",
                    "Legalized",
                    "Corporate applicants.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "3 months",
                    "Certified copy",
                    "Simple",
                    "Translation if required.",
                ),
            ],
            "Allow time for legalization and couriering originals.",
        ),
        record(
            "Kuwait",
            "maps/kuwait.png",
            "4,973,861 (2024)",
            "National (Paris/PCT NP)",
            "Kuwait Patent Office (KPO)",
            "Arabic & English",
            "Arabic translation per office practice",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "90 days",
                    "Original",
                    "Consular legalization",
                    "Copy at filing; original follows. Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "90 days",
                    "Original",
                    "Consular legalization",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Commercial/Register Extract",
                    "Y/Y",
                    "90 days",
                    "Certified copy",
                    "Consular legalization",
                    "Corporate applicants.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "~90 days",
                    "Certified copy",
                    "Simple",
                    "Translation if requested.",
                ),
            ],
            "Docket early for consular timeframes.",
        ),
        record(
            "Egypt",
            "maps/egypt.png",
            "116,538,258 (2024)",
            "National (Paris/PCT NP)",
            "Egyptian Patent Office (EGPO), ASRT",
            "Arabic (English accepted with Arabic translation)",
            "Arabic translation is mandatory within office timelines",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "≈4 months",
                    "Original",
                    "Consular legalization (Egyptian Consulate)",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y",
                    "≈4 months",
                    "Original",
                    "Consular legalization",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Commercial/Certificate of Incorporation",
                    "Y/Y",
                    "≈4 months",
                    "Certified copy",
                    "Consular legalization",
                    "Arabic translation required.",
                ),
                RequirementRow::new(
                    "Priority Document (if claimed)",
                    "Y/Y",
                    "~3 months",
                    "Certified copy",
                    "Simple + Arabic translation if needed",
                    "Conf ≥85%.",
                ),
            ],
            "Strict formalities windows; missing documents risk abandonment.",
        ),
        record(
            "South Africa (RSA)",
            "maps/south_africa.png",
            "≈63.1 million (2024 est.)",
            "National (Paris/PCT NP)",
            "Companies and Intellectual Property Commission (CIPC)",
            "English",
            "No translation required (English filing)",
            vec![
                RequirementRow::new(
                    "Power of Attorney (Form P3)",
                    "Y/Y",
                    "Within ~6 months (extendable)",
                    "Original or signed copy",
                    "Simple (no notarization/legalization)",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Proof of entitlement / Assignment",
                    "Y/Y (if applicant ≠ inventor)",
                    "Within ~6 months (pre‑acceptance)",
                    "Signed assignment/affidavit",
                    "Simple",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate docs",
                    "N/N",
                    "—",
                    "—",
                    "—",
                    "Not required.",
                ),
                RequirementRow::new(
                    "Priority Document (if Paris)",
                    "Y/Y",
                    "Within 6 months (extendable)",
                    "Certified copy",
                    "Simple",
                    "PCT NP handled via IB.",
                ),
            ],
            "Deposit system (formalities); docket acceptance deadlines.",
        ),
        record(
            "Nigeria",
            "maps/nigeria.png",
            "232,679,478 (2024)",
            "National (Paris/PCT NP)",
            "Trademarks, Patents & Designs Registry (FMITI)",
            "English",
            "No translation required (English filing)",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "At/soon after filing",
                    "Signed copy/original",
                    "Simple (no notarization)",
                    "Conf ~75%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y (good practice)",
                    "Prompt / by invitation",
                    "Signed assignment",
                    "Simple",
                    "Not always required to proceed.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate docs",
                    "N/N (routine)",
                    "—",
                    "—",
                    "—",
                    "Not typically required.",
                ),
                RequirementRow::new(
                    "Priority Document (if Paris)",
                    "Y/Y",
                    "With/shortly after filing",
                    "Certified copy",
                    "Simple",
                    "PCT NP via IB.",
                ),
            ],
            "Non‑examining system; originals may be invited before grant.",
        ),
        record(
            "Kenya",
            "maps/kenya.png",
            "56,432,944 (2024)",
            "National (Paris/PCT NP) or ARIPO designating KE",
            "Kenya Industrial Property Institute (KIPI)",
            "English",
            "No translation required (English filing)",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "At/after filing (on invitation)",
                    "Signed copy/original",
                    "Simple",
                    "Conf ~80%.",
                ),
                RequirementRow::new(
                    "Assignment (inventor→applicant)",
                    "Y/Y (if applicant ≠ inventor)",
                    "Before grant/recordal",
                    "Signed assignment",
                    "Simple",
                    "Conf ~80%.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate docs",
                    "N/N (routine)",
                    "—",
                    "—",
                    "—",
                    "Not required.",
                ),
                RequirementRow::new(
                    "Priority Document (if Paris)",
                    "Y/Y",
                    "Upon request",
                    "Certified copy",
                    "Simple",
                    "PCT NP via IB.",
                ),
            ],
            "Substantive examination applies; keep PoA on file early.",
        ),
        record(
            "ARIPO (AP) — Regional",
            "maps/aripo.png",
            "— (regional system; 21 member states)",
            "Regional (Paris/PCT regional phase)",
            "African Regional Intellectual Property Organization (Harare)",
            "English (working language)",
            "English required; translate priority docs if non‑EN",
            vec![
                RequirementRow::new(
                    "Power of Attorney (Form 4)",
                    "Y/Y",
                    "If not at entry, within ~2 months after entry",
                    "Signed PoA",
                    "Simple (no legalization)",
                    "Conf ≥85%.",
                ),
                RequirementRow::new(
                    "Assignment / proof of entitlement",
                    "If applicant ≠ inventor",
                    "By invitation / ~4 months",
                    "Signed assignment",
                    "Simple",
                    "Conf ≥80%.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate docs",
                    "N/N",
                    "—",
                    "—",
                    "—",
                    "Not required.",
                ),
                RequirementRow::new(
                    "Priority Document (if Paris)",
                    "Y/Y",
                    "3 months",
                    "Certified copy",
                    "Simple (+ EN translation if needed)",
                    "Conf ≥85%.",
                ),
            ],
            "Grant effective in designated member states without further validation.",
        ),
        record(
            "OAPI (OA) — Regional",
            "maps/oapi.png",
            "— (regional system; 17 member states)",
            "Regional (Paris; direct regional filing)",
            "Organisation Africaine de la Propriété Intellectuelle (Yaoundé)",
            "French (official)",
            "French required; translate priority docs if non‑FR/EN",
            vec![
                RequirementRow::new(
                    "Power of Attorney",
                    "Y/Y",
                    "At filing or short window (~3 months)",
                    "Signed PoA",
                    "Simple (no authentication)",
                    "Conf ~75%.",
                ),
                RequirementRow::new(
                    "Assignment / proof of entitlement",
                    "If applicant ≠ inventor",
                    "Soon after filing",
                    "Original or certified copy",
                    "Simple",
                    "Conf ~75%.",
                ),
                RequirementRow::new(
                    "Commercial/Corporate docs",
                    "N/N",
                    "—",
                    "—",
                    "—",
                    "Not required.",
                ),
                RequirementRow::new(
                    "Priority Document (if Paris)",
                    "Y/Y",
                    "3–6 months",
                    "Certified copy",
                    "Simple (+ FR/EN translation if needed)",
                    "Conf ~75%.",
                ),
            ],
            "Single filing covers all member states; observe strict priority‑doc timeline.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_twelve_jurisdictions() {
        let data = builtin();
        assert_eq!(data.jurisdictions.len(), 12);
        assert_eq!(data.jurisdictions[0].name, "United Arab Emirates (UAE)");
        assert_eq!(data.jurisdictions[11].name, "OAPI (OA) — Regional");
        assert!(data.jurisdictions.iter().all(|j| j.requirements.len() == 4));
    }

    #[test]
    fn test_verbatim_source_ends_with_newline() {
        assert!(VERBATIM_SOURCE.starts_with("# Rouse MEA"));
        assert!(VERBATIM_SOURCE.ends_with("download links.\n"));
    }
}
