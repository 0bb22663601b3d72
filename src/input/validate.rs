use serde::Serialize;
use serde_json::Value;

use crate::input::{
    FIELD_AF, FIELD_CLINICAL_SIGNIFICANCE, FIELD_CONSERVATION, FIELD_GENE, FIELD_IMPACT,
    VariantRecord,
};

pub const BODY_VARIANTS_KEY: &str = "variants";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const STRING_FIELDS: &[&str] = &[FIELD_GENE, FIELD_IMPACT, FIELD_CLINICAL_SIGNIFICANCE];
const UNIT_INTERVAL_FIELDS: &[&str] = &[FIELD_AF, FIELD_CONSERVATION];

pub fn variants_from_body(body: &Value) -> Result<Vec<VariantRecord>, Vec<ValidationIssue>> {
    validated_items(body).map(to_records)
}

// Borrowed view of a validated `variants` array; nothing is copied.
pub fn validated_items(body: &Value) -> Result<&[Value], Vec<ValidationIssue>> {
    let Some(obj) = body.as_object() else {
        return Err(vec![ValidationIssue::new(
            "",
            format!("expected object, received {}", type_name(body)),
        )]);
    };
    match obj.get(BODY_VARIANTS_KEY) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(value) => validate_variants(value),
    }
}

pub fn to_records(items: &[Value]) -> Vec<VariantRecord> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| VariantRecord::from_fields(fields.clone()))
        .collect()
}

pub fn validate_variants(value: &Value) -> Result<&[Value], Vec<ValidationIssue>> {
    let Some(items) = value.as_array() else {
        return Err(vec![ValidationIssue::new(
            BODY_VARIANTS_KEY,
            format!("expected array, received {}", type_name(value)),
        )]);
    };

    let mut issues = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        let base = format!("{BODY_VARIANTS_KEY}[{idx}]");
        let Some(fields) = item.as_object() else {
            issues.push(ValidationIssue::new(
                base,
                format!("expected object, received {}", type_name(item)),
            ));
            continue;
        };

        for &key in STRING_FIELDS {
            if let Some(v) = fields.get(key) {
                if !v.is_string() {
                    issues.push(ValidationIssue::new(
                        format!("{base}.{key}"),
                        format!("expected string, received {}", type_name(v)),
                    ));
                }
            }
        }

        for &key in UNIT_INTERVAL_FIELDS {
            if let Some(v) = fields.get(key) {
                match v.as_f64() {
                    None => issues.push(ValidationIssue::new(
                        format!("{base}.{key}"),
                        format!("expected number, received {}", type_name(v)),
                    )),
                    Some(x) if !(0.0..=1.0).contains(&x) => issues.push(ValidationIssue::new(
                        format!("{base}.{key}"),
                        format!("number must be within [0, 1], received {x}"),
                    )),
                    Some(_) => {}
                }
            }
        }
    }

    if issues.is_empty() {
        Ok(items.as_slice())
    } else {
        Err(issues)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/validate.rs"]
mod tests;
