//! Firestore REST client — equality queries, keyed writes, and
//! auto-id collection inserts.

use reqwest::Client;
use serde_json::{json, Map, Value};

use crate::value::{from_firestore_fields, to_firestore_fields};
use crate::{FirebaseError, FirebaseOptions};

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// A document returned from a query, decoded to plain JSON.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    /// Document id (last path segment of the resource name)
    pub id: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct FirestoreClient {
    options: FirebaseOptions,
    http: Client,
}

impl FirestoreClient {
    pub fn new(options: FirebaseOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/(default)/documents",
            self.options.project_id
        )
    }

    /// Run an equality query against one collection.
    pub async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<StoredDocument>, FirebaseError> {
        let url = format!(
            "{}/{}:runQuery?key={}",
            FIRESTORE_URL,
            self.documents_root(),
            self.options.api_key
        );

        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": value },
                    }
                }
            }
        });

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(FirebaseError::from_response(response).await);
        }

        // runQuery streams one JSON object per result; an empty result set is
        // a single object with no "document" key.
        let results: Vec<Value> = response.json().await?;
        let documents = results
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(|doc| {
                let name = doc.get("name").and_then(|n| n.as_str()).unwrap_or("");
                let id = name.rsplit('/').next().unwrap_or("").to_string();
                let fields = doc.get("fields").cloned().unwrap_or(Value::Null);
                StoredDocument {
                    id,
                    fields: from_firestore_fields(&fields),
                }
            })
            .collect();

        Ok(documents)
    }

    /// Write a document under a caller-chosen id.
    ///
    /// When `server_timestamp_field` is set, that field is stamped by
    /// Firestore itself (REQUEST_TIME transform) rather than the client
    /// clock.
    pub async fn write(
        &self,
        collection: &str,
        id: &str,
        doc: &Map<String, Value>,
        server_timestamp_field: Option<&str>,
    ) -> Result<(), FirebaseError> {
        let url = format!(
            "{}/{}:commit?key={}",
            FIRESTORE_URL,
            self.documents_root(),
            self.options.api_key
        );

        let name = format!("{}/{}/{}", self.documents_root(), collection, id);
        let mut write = json!({
            "update": {
                "name": name,
                "fields": to_firestore_fields(doc),
            }
        });
        if let Some(field) = server_timestamp_field {
            write["updateTransforms"] = json!([{
                "fieldPath": field,
                "setToServerValue": "REQUEST_TIME",
            }]);
        }

        let response = self
            .http
            .post(&url)
            .json(&json!({ "writes": [write] }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FirebaseError::from_response(response).await);
        }
        Ok(())
    }

    /// Insert a document with a Firestore-generated id. Returns the id.
    ///
    /// This is how mail is sent: documents added to the `mail` collection
    /// are picked up by the Trigger Email extension.
    pub async fn add(
        &self,
        collection: &str,
        doc: &Map<String, Value>,
    ) -> Result<String, FirebaseError> {
        let url = format!(
            "{}/{}/{}?key={}",
            FIRESTORE_URL,
            self.documents_root(),
            collection,
            self.options.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "fields": to_firestore_fields(doc) }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FirebaseError::from_response(response).await);
        }

        let created: Value = response.json().await?;
        created
            .get("name")
            .and_then(|n| n.as_str())
            .and_then(|name| name.rsplit('/').next())
            .map(String::from)
            .ok_or_else(|| {
                FirebaseError::UnexpectedResponse("created document has no name".to_string())
            })
    }
}
