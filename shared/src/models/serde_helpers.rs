//! Common serde helpers for rows coming back from the hosted backend
//!
//! Backend keys are integers on some tables and UUID strings on others, and
//! boolean flag columns are nullable. The record types normalize both.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Internal helper: accepts a JSON string or integer key
struct FlexibleId(String);

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FlexibleId(value.to_string()))
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// Required id field: `"42"`, `42` and `"3f2c..."` all become a `String`
pub mod id {
    use super::FlexibleId;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleId::deserialize(deserializer).map(|id| id.0)
    }
}

/// Optional id field (foreign keys such as `category_id`)
pub mod option_id {
    use super::FlexibleId;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleId>::deserialize(deserializer).map(|opt| opt.map(|id| id.0))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(with = "super::id")]
        id: String,
        #[serde(default, with = "super::option_id")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "super::bool_false")]
        flag: bool,
    }

    #[test]
    fn test_integer_and_string_ids() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "parent": "abc"}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.parent.as_deref(), Some("abc"));

        let row: Row = serde_json::from_str(r#"{"id": "uuid-1", "parent": 7}"#).unwrap();
        assert_eq!(row.id, "uuid-1");
        assert_eq!(row.parent.as_deref(), Some("7"));
    }

    #[test]
    fn test_null_and_missing_fields() {
        let row: Row = serde_json::from_str(r#"{"id": 1, "parent": null, "flag": null}"#).unwrap();
        assert_eq!(row.parent, None);
        assert!(!row.flag);

        let row: Row = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(row.parent, None);
        assert!(!row.flag);
    }
}
