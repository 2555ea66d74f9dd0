//! Render Hashes - SHA-256 over Canonical JSON
//!
//! `job_hash` identifies what was asked for (kind, input, style, version);
//! `content_hash` identifies the document model that came out.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compact JSON with object keys in sorted order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    // `Value` maps are ordered by key
    serde_json::to_value(value).and_then(|v| serde_json::to_string(&v))
}

fn hex_digest(hasher: Sha256) -> String {
    format!("{:x}", hasher.finalize())
}

pub fn compute_content_hash<T: Serialize>(document: &T) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json(document)?);
    Ok(hex_digest(hasher))
}

/// Fields are fed NUL-separated so neighbouring values cannot run together.
pub fn compute_job_hash(
    kind: &str,
    input: &impl Serialize,
    style: &impl Serialize,
    generator_version: &str,
) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    for field in [
        kind.to_string(),
        canonical_json(input)?,
        canonical_json(style)?,
        generator_version.to_string(),
    ] {
        hasher.update(field);
        hasher.update([0u8]);
    }
    Ok(hex_digest(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let obj = json!({"z": 1, "a": {"y": [2, {"c": 0, "b": 1}], "x": null}});
        assert_eq!(
            canonical_json(&obj).unwrap(),
            r#"{"a":{"x":null,"y":[2,{"b":1,"c":0}]},"z":1}"#
        );
    }

    #[test]
    fn test_content_hash_is_sha256_of_canonical_form() {
        // sha256("\"abc\"")
        assert_eq!(
            compute_content_hash(&"abc").unwrap(),
            "6cc43f858fbb763301637b5af970e2a46b46f461f27e5a0f41e009c59b827b25"
        );
        assert_eq!(compute_content_hash(&json!({"b": 1, "a": 2})).unwrap().len(), 64);
    }

    #[test]
    fn test_job_hash_depends_on_style() {
        let input = json!({"name": "Kenya"});
        let h1 = compute_job_hash("report", &input, &json!({"shade": "EDEDED"}), "1.0.0").unwrap();
        let h2 = compute_job_hash("report", &input, &json!({"shade": "D9D9D9"}), "1.0.0").unwrap();
        let h3 = compute_job_hash("report", &input, &json!({"shade": "EDEDED"}), "1.0.0").unwrap();
        assert_ne!(h1, h2);
        assert_eq!(h1, h3);
    }

    #[test]
    fn test_job_hash_fields_do_not_run_together() {
        let a = compute_job_hash("ab", &"c", &"", "1").unwrap();
        let b = compute_job_hash("a", &"bc", &"", "1").unwrap();
        assert_ne!(a, b);
    }
}
