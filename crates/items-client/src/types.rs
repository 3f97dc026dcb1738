//! Wire types for the Items API.

use serde::{Deserialize, Serialize};

/// Server-assigned item identifier.
pub type ItemId = i64;

/// An item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /items/{id}`.
///
/// `None` fields are omitted and left unchanged by the server. The server
/// rejects `null`, so an emptied description is sent as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_without_description_deserializes() {
        let item: Item = serde_json::from_value(json!({"id": 3, "name": "Lamp"})).unwrap();
        assert_eq!(item.description, None);
    }

    #[test]
    fn update_omits_untouched_fields_and_never_sends_null() {
        let rename = UpdateItem {
            name: Some("Gadget".into()),
            description: None,
        };
        assert_eq!(serde_json::to_value(&rename).unwrap(), json!({"name": "Gadget"}));

        let emptied = UpdateItem {
            name: None,
            description: Some(String::new()),
        };
        assert_eq!(
            serde_json::to_value(&emptied).unwrap(),
            json!({"description": ""})
        );
    }
}
