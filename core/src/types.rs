//! Domain DTOs for the ApiCEP response.
//!
//! # Design
//! The upstream body mixes an envelope (`status`, `ok`) with the address
//! fields. `Envelope` reads the envelope loosely as JSON values so the
//! `status`/`ok` checks can follow the upstream's own loose typing; the
//! address itself is a plain typed record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A resolved address, as shown in the result block of the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub district: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
}

impl Address {
    /// The five labelled lines of the result block, in display order.
    pub fn lines(&self) -> [(&'static str, &str); 5] {
        [
            ("CEP", &self.code),
            ("Rua", &self.address),
            ("Bairro", &self.district),
            ("Cidade", &self.city),
            ("Estado", &self.state),
        ]
    }
}

/// A `null` field reads the same as a missing one.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The `status` / `ok` envelope of an upstream body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub ok: Value,
}

impl Envelope {
    /// `status` as a number, if it is one.
    pub fn status_number(&self) -> Option<f64> {
        self.status.as_f64()
    }

    /// True when the body reports a successful lookup: `status` is exactly
    /// the number 200 and `ok` is truthy.
    pub fn is_found(&self) -> bool {
        self.status_number() == Some(200.0) && truthy(&self.ok)
    }
}

/// Loose truthiness: null, false, zero, NaN and the empty string are falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(v: Value) -> Envelope {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn found_requires_numeric_200_and_truthy_ok() {
        assert!(envelope(json!({"status": 200, "ok": true})).is_found());
        assert!(envelope(json!({"status": 200.0, "ok": 1})).is_found());
        assert!(!envelope(json!({"status": "200", "ok": true})).is_found());
        assert!(!envelope(json!({"status": 404, "ok": true})).is_found());
        assert!(!envelope(json!({"status": 200, "ok": false})).is_found());
        assert!(!envelope(json!({"status": 200})).is_found());
        assert!(!envelope(json!({"status": 200, "ok": ""})).is_found());
        assert!(!envelope(json!({})).is_found());
    }

    #[test]
    fn missing_address_fields_default_to_empty() {
        let addr: Address = serde_json::from_value(json!({"code": "01001000"})).unwrap();
        assert_eq!(addr.code, "01001000");
        assert_eq!(addr.city, "");
    }

    #[test]
    fn null_address_fields_read_as_empty() {
        let addr: Address = serde_json::from_value(json!({
            "code": "69945-000",
            "address": null,
            "district": null,
            "city": "Acrelândia",
            "state": "AC"
        }))
        .unwrap();
        assert_eq!(addr.address, "");
        assert_eq!(addr.district, "");
        assert_eq!(addr.city, "Acrelândia");
    }

    #[test]
    fn lines_are_labelled_in_display_order() {
        let addr = Address {
            code: "01001000".into(),
            address: "Praça da Sé".into(),
            district: "Sé".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
        };
        let labels: Vec<&str> = addr.lines().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["CEP", "Rua", "Bairro", "Cidade", "Estado"]);
        assert_eq!(addr.lines()[1].1, "Praça da Sé");
    }
}
