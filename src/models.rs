//! Item records and the request payloads that create, update and page them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::serde_helpers::explicit_null;

/// A stored item, as returned by every read or write endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

/// Create payload. The server assigns `id` when it is absent or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Request a specific id instead of a generated one
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }

    pub(crate) fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Partial update payload.
///
/// Each field is `None` when omitted, `Some(None)` when sent as `null`
/// and `Some(Some(v))` when sent with a value. Only the last form changes
/// the stored item; `null` leaves the field as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(default, with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<f64>>,
}

impl ItemUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(Some(name.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(Some(price));
        self
    }

    /// True when applying this update cannot change anything
    pub fn is_noop(&self) -> bool {
        !matches!(self.name, Some(Some(_)))
            && !matches!(self.description, Some(Some(_)))
            && !matches!(self.price, Some(Some(_)))
    }

    /// Names of fields that were sent as an explicit `null`
    pub fn explicit_nulls(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if matches!(self.name, Some(None)) {
            fields.push("name");
        }
        if matches!(self.description, Some(None)) {
            fields.push("description");
        }
        if matches!(self.price, Some(None)) {
            fields.push("price");
        }
        fields
    }

    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(Some(name)) => validate_name(name),
            _ => Ok(()),
        }
    }

    /// Copy every field that carries a value onto `item`
    pub fn apply_to(self, item: &mut Item) {
        if let Some(Some(name)) = self.name {
            item.name = name;
        }
        if let Some(Some(description)) = self.description {
            item.description = description;
        }
        if let Some(Some(price)) = self.price {
            item.price = price;
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("name must not be empty"));
    }
    Ok(())
}

/// Paging query for the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Body of the root endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub message: String,
}

impl Default for WelcomeMessage {
    fn default() -> Self {
        Self {
            message: "Welcome to the Simple API".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_id_is_optional() {
        let payload: NewItem =
            serde_json::from_str(r#"{"name": "Lamp", "description": "", "price": 12}"#).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.price, 12.0);

        let payload: NewItem = serde_json::from_str(
            r#"{"id": null, "name": "Lamp", "description": "desk", "price": 12.5}"#,
        )
        .unwrap();
        assert_eq!(payload.id, None);

        let payload: NewItem = serde_json::from_str(
            r#"{"id": 9, "name": "Lamp", "description": "desk", "price": 12.5}"#,
        )
        .unwrap();
        assert_eq!(payload.id, Some(9));
    }

    #[test]
    fn test_new_item_requires_fields() {
        assert!(serde_json::from_str::<NewItem>(r#"{"name": "Lamp", "price": 1.0}"#).is_err());
        assert!(
            serde_json::from_str::<NewItem>(r#"{"name": "Lamp", "description": "", "price": "x"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_empty_name_is_invalid() {
        let err = NewItem::new("", "blank", 1.0).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = ItemUpdate::default().name("").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(ItemUpdate::default().price(2.0).validate().is_ok());
    }

    #[test]
    fn test_whitespace_name_is_valid() {
        assert!(NewItem::new("   ", "spaces", 1.0).validate().is_ok());
        assert!(ItemUpdate::default().name(" ").validate().is_ok());
    }

    #[test]
    fn test_update_applies_present_fields_only() {
        let mut item = Item::new(1, "Item 1", "This is item 1", 50.2);
        let update: ItemUpdate =
            serde_json::from_str(r#"{"price": 10.0, "description": null}"#).unwrap();

        assert_eq!(update.explicit_nulls(), vec!["description"]);
        assert!(!update.is_noop());

        update.apply_to(&mut item);
        assert_eq!(item, Item::new(1, "Item 1", "This is item 1", 10.0));
    }

    #[test]
    fn test_null_only_update_is_noop() {
        let update: ItemUpdate =
            serde_json::from_str(r#"{"name": null, "price": null}"#).unwrap();
        assert!(update.is_noop());
        assert_eq!(update.explicit_nulls(), vec!["name", "price"]);
        assert!(ItemUpdate::default().is_noop());
    }

    #[test]
    fn test_list_params_defaults() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ListParams { skip: 0, limit: 10 });
    }
}
