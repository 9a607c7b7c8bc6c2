//! Form flattening: turning a payload into ordered string key/value pairs.
//!
//! # Design
//! Payload types opt in by implementing `ToFormFields`; there is no global
//! encoder and no runtime reflection. Plain pair lists and maps implement it
//! out of the box, and `SerdeForm` covers any `Serialize` struct by walking
//! its JSON representation:
//!
//! - scalars become one pair, `null` is skipped;
//! - arrays of scalars become one pair per element under the same key;
//! - nested objects are flattened with dotted keys (`address.city`);
//! - anything deeper than that is an `EncodeError::Form`.
//!
//! The same `FormFields` value feeds both the URL-encoded body and the
//! multipart body, so the two encodings always carry identical pairs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::EncodeError;

/// An ordered collection of form fields. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append one pair per value, all under `key`.
    pub fn push_all<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append the pair only when `value` is `Some`.
    pub fn push_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// All values stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` serialization, in field order.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for FormFields {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Conversion of a payload into form fields.
pub trait ToFormFields {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError>;
}

impl ToFormFields for FormFields {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        Ok(self.clone())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ToFormFields for [(K, V)] {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        Ok(self
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .collect())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ToFormFields for Vec<(K, V)> {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        self.as_slice().to_form_fields()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ToFormFields for BTreeMap<K, V> {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        Ok(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())).collect())
    }
}

impl<T: ToFormFields + ?Sized> ToFormFields for &T {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        (**self).to_form_fields()
    }
}

/// Flattens any `Serialize` value whose JSON form is an object.
///
/// Field order follows the struct's declaration order.
#[derive(Debug, Clone)]
pub struct SerdeForm<T>(pub T);

impl<T: Serialize> ToFormFields for SerdeForm<T> {
    fn to_form_fields(&self) -> Result<FormFields, EncodeError> {
        let value = serde_json::to_value(&self.0)?;
        let Value::Object(map) = value else {
            return Err(EncodeError::Form(format!(
                "expected a struct or map at the top level, got {}",
                kind(&value)
            )));
        };
        let mut fields = FormFields::new();
        for (key, value) in map {
            flatten(&key, value, &mut fields)?;
        }
        Ok(fields)
    }
}

fn flatten(key: &str, value: Value, fields: &mut FormFields) -> Result<(), EncodeError> {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        return Err(EncodeError::Form(format!(
                            "field {key:?}: arrays may only hold scalar values, found {}",
                            kind(&item)
                        )));
                    }
                    scalar => {
                        fields.push(key, scalar_to_string(scalar));
                    }
                }
            }
        }
        Value::Object(map) => {
            for (child, value) in map {
                flatten(&format!("{key}.{child}"), value, fields)?;
            }
        }
        scalar => {
            fields.push(key, scalar_to_string(scalar));
        }
    }
    Ok(())
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Serialize)]
    struct Signup {
        name: String,
        age: u32,
        subscribed: bool,
        nickname: Option<String>,
        tags: Vec<String>,
        address: Address,
    }

    fn signup() -> Signup {
        Signup {
            name: "Ada Lovelace".to_string(),
            age: 36,
            subscribed: true,
            nickname: None,
            tags: vec!["math".to_string(), "engines".to_string()],
            address: Address {
                city: "London".to_string(),
                zip: None,
            },
        }
    }

    #[test]
    fn serde_form_flattens_in_declaration_order() {
        let fields = SerdeForm(signup()).to_form_fields().unwrap();
        let pairs: Vec<(&str, &str)> = fields.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("name", "Ada Lovelace"),
                ("age", "36"),
                ("subscribed", "true"),
                ("tags", "math"),
                ("tags", "engines"),
                ("address.city", "London"),
            ]
        );
    }

    #[test]
    fn serde_form_rejects_arrays_of_objects() {
        #[derive(Serialize)]
        struct Order {
            items: Vec<Address>,
        }
        let order = Order {
            items: vec![Address {
                city: "Paris".to_string(),
                zip: None,
            }],
        };
        let err = SerdeForm(order).to_form_fields().unwrap_err();
        assert!(matches!(err, EncodeError::Form(msg) if msg.contains("items")));
    }

    #[test]
    fn serde_form_rejects_non_object_payload() {
        let err = SerdeForm(vec![1, 2, 3]).to_form_fields().unwrap_err();
        assert!(matches!(err, EncodeError::Form(_)));
    }

    #[test]
    fn multi_valued_keys_keep_insertion_order() {
        let mut fields = FormFields::new();
        fields.push("color", "red").push_all("size", ["s", "m"]).push("color", "blue");
        let colors: Vec<&str> = fields.get_all("color").collect();
        assert_eq!(colors, vec!["red", "blue"]);
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn push_opt_skips_none() {
        let mut fields = FormFields::new();
        fields.push_opt("a", Some("1")).push_opt("b", None::<String>);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn urlencoded_escapes_reserved_characters() {
        let fields: FormFields = vec![("q", "rust & go"), ("lang", "en=GB")].into_iter().collect();
        assert_eq!(fields.to_urlencoded(), "q=rust+%26+go&lang=en%3DGB");
    }

    #[test]
    fn pair_lists_and_maps_implement_to_form_fields() {
        let list = vec![("b", "2"), ("a", "1")];
        assert_eq!(list.to_form_fields().unwrap().to_urlencoded(), "b=2&a=1");

        let map: BTreeMap<&str, &str> = list.iter().copied().collect();
        assert_eq!(map.to_form_fields().unwrap().to_urlencoded(), "a=1&b=2");
    }
}
