//! Raw HubSpot contact payloads and their normalized projection.

// self
use crate::_prelude::*;

/// Single page of the contacts listing as returned by the resource endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContactPage {
	/// Raw contact records in provider order.
	#[serde(default)]
	pub results: Vec<ContactRecord>,
}

/// One raw contact record exactly as the provider shapes it.
///
/// Every leaf is optional so a sparse record deserializes totally instead of faulting; the
/// projection into [`IntegrationItem`] keeps whatever was absent as `None`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
	/// Provider-assigned record identifier.
	pub id: Option<String>,
	/// Creation timestamp, passed through verbatim.
	pub created_at: Option<String>,
	/// Last-update timestamp, passed through verbatim.
	pub updated_at: Option<String>,
	/// Nested property bag carrying the contact's name and email.
	#[serde(default)]
	pub properties: Option<ContactProperties>,
	/// Whether the provider archived the record.
	#[serde(default)]
	pub archived: bool,
}

/// Name and email properties nested inside a contact record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContactProperties {
	/// Contact first name.
	pub firstname: Option<String>,
	/// Contact last name.
	pub lastname: Option<String>,
	/// Contact email address.
	pub email: Option<String>,
}

/// Normalized, provider-agnostic representation of one fetched contact record.
///
/// A read-only projection with no lifecycle beyond the request that produced it; serializes in
/// the camelCase shape downstream integrations expect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationItem {
	/// Provider-assigned record identifier.
	pub id: Option<String>,
	/// Creation timestamp.
	pub created_at: Option<String>,
	/// Last-update timestamp.
	pub updated_at: Option<String>,
	/// Contact first name.
	pub first_name: Option<String>,
	/// Contact last name.
	pub last_name: Option<String>,
	/// Contact email address.
	pub email: Option<String>,
	/// Whether the provider archived the record.
	pub archived: bool,
}
impl From<ContactRecord> for IntegrationItem {
	fn from(record: ContactRecord) -> Self {
		let ContactRecord { id, created_at, updated_at, properties, archived } = record;
		let properties = properties.unwrap_or_default();

		Self {
			id,
			created_at,
			updated_at,
			first_name: properties.firstname,
			last_name: properties.lastname,
			email: properties.email,
			archived,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn full_records_normalize_field_by_field() {
		let record: ContactRecord = serde_json::from_str(
			r#"{
				"id": "1",
				"createdAt": "t1",
				"updatedAt": "t2",
				"properties": {"firstname": "A", "lastname": "B", "email": "a@b.com"},
				"archived": false
			}"#,
		)
		.expect("Contact record fixture should deserialize.");
		let item = IntegrationItem::from(record);

		assert_eq!(item.id.as_deref(), Some("1"));
		assert_eq!(item.created_at.as_deref(), Some("t1"));
		assert_eq!(item.updated_at.as_deref(), Some("t2"));
		assert_eq!(item.first_name.as_deref(), Some("A"));
		assert_eq!(item.last_name.as_deref(), Some("B"));
		assert_eq!(item.email.as_deref(), Some("a@b.com"));
		assert!(!item.archived);
	}

	#[test]
	fn missing_properties_default_to_null_fields() {
		let record: ContactRecord = serde_json::from_str(r#"{"id": "2", "archived": true}"#)
			.expect("Sparse contact record should deserialize totally.");
		let item = IntegrationItem::from(record);

		assert_eq!(item.id.as_deref(), Some("2"));
		assert_eq!(item.first_name, None);
		assert_eq!(item.last_name, None);
		assert_eq!(item.email, None);
		assert!(item.archived);
	}

	#[test]
	fn items_serialize_in_camel_case() {
		let item = IntegrationItem {
			id: Some("1".into()),
			created_at: Some("t1".into()),
			first_name: Some("A".into()),
			..Default::default()
		};
		let json = serde_json::to_value(&item).expect("Item should serialize.");

		assert_eq!(json["createdAt"], "t1");
		assert_eq!(json["firstName"], "A");
		assert!(json.get("first_name").is_none());
	}
}
