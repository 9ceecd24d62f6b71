//! Fruit model for Orchard.
//!
//! A fruit has a name and a readiness flag; any other submitted form
//! fields are kept verbatim in a JSON object.

use std::collections::HashMap;

use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Form field carrying the checkbox-style readiness flag.
pub const READY_FIELD: &str = "isReadyToEat";

/// Form field carrying the fruit name.
const NAME_FIELD: &str = "name";

/// Form fields consumed by routing and never stored.
const RESERVED_FIELDS: &[&str] = &["_method"];

/// A stored fruit record.
#[derive(Debug, Clone, PartialEq)]
pub struct Fruit {
    /// Unique fruit ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Whether the fruit is ready to eat.
    pub is_ready_to_eat: bool,
    /// Additional free-form fields.
    pub extra: Map<String, Value>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl<'r> FromRow<'r, SqliteRow> for Fruit {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let extra: String = row.try_get("extra")?;
        let extra = match serde_json::from_str::<Value>(&extra)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            is_ready_to_eat: row.try_get("is_ready_to_eat")?,
            extra,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Submitted fruit fields, after checkbox coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FruitForm {
    /// Name, if the field was submitted.
    pub name: Option<String>,
    /// True only when the readiness field was submitted as `"on"`.
    pub is_ready_to_eat: bool,
    /// Remaining fields.
    pub extra: Map<String, Value>,
}

impl FruitForm {
    /// Build a form from raw submitted fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use orchard::db::FruitForm;
    ///
    /// let mut fields = HashMap::new();
    /// fields.insert("name".to_string(), "Apple".to_string());
    /// fields.insert("isReadyToEat".to_string(), "on".to_string());
    ///
    /// let form = FruitForm::from_fields(fields);
    /// assert_eq!(form.name.as_deref(), Some("Apple"));
    /// assert!(form.is_ready_to_eat);
    /// ```
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let name = fields.remove(NAME_FIELD);
        let is_ready_to_eat = fields.remove(READY_FIELD).as_deref() == Some("on");

        for reserved in RESERVED_FIELDS {
            fields.remove(*reserved);
        }

        let extra = fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        Self {
            name,
            is_ready_to_eat,
            extra,
        }
    }

    /// Create a form with just a name and readiness flag.
    pub fn new(name: impl Into<String>, is_ready_to_eat: bool) -> Self {
        Self {
            name: Some(name.into()),
            is_ready_to_eat,
            extra: Map::new(),
        }
    }

    /// Add a free-form field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), Value::String(value.into()));
        self
    }

    /// Serialize the extra fields as a JSON object string.
    pub(crate) fn extra_json(&self) -> String {
        Value::Object(self.extra.clone()).to_string()
    }
}
