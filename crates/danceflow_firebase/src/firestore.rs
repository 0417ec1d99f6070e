//! Document store reads.
//!
//! Firestore's REST API wraps every field in a typed envelope
//! (`{"stringValue": ".."}`, `{"mapValue": {"fields": ..}}`). Documents are
//! unwrapped into plain JSON before they reach callers.

use danceflow_common::DanceSchool;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{api_error, FirebaseApp, FirebaseError};

pub const DANCE_SCHOOLS_COLLECTION: &str = "danceSchools";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
    create_time: Option<String>,
    update_time: Option<String>,
}

/// A document with its fields decoded to plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Last segment of the document name
    pub id: String,
    /// Always a JSON object
    pub fields: Value,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let id = raw.name.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            id,
            fields: decode_fields(&raw.fields),
            create_time: raw.create_time,
            update_time: raw.update_time,
        }
    }
}

/// Document-store handle of a [`FirebaseApp`].
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    app: FirebaseApp,
}

impl FirestoreClient {
    pub(crate) fn new(app: FirebaseApp) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.app
    }

    /// Reads one document. A missing document is `Ok(None)`.
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, FirebaseError> {
        let mut url = self.app.firestore_endpoint(&[
            "v1",
            "projects",
            self.app.project_id(),
            "databases",
            "(default)",
            "documents",
            collection,
            id,
        ])?;
        url.query_pairs_mut().append_pair("key", self.app.api_key());

        debug!(collection, id, "Reading document");
        let response = self.app.http().get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let raw: RawDocument = response.json().await?;
        Ok(Some(raw.into()))
    }

    /// Reads a school profile from the `danceSchools` collection.
    ///
    /// `id` comes from the document name; `createdAt` and `updatedAt` fall
    /// back to the document's own timestamps when the fields are absent.
    pub async fn get_dance_school(&self, id: &str) -> Result<Option<DanceSchool>, FirebaseError> {
        let Some(document) = self.get_document(DANCE_SCHOOLS_COLLECTION, id).await? else {
            return Ok(None);
        };
        Ok(Some(school_from_document(document)?))
    }
}

fn school_from_document(document: Document) -> Result<DanceSchool, FirebaseError> {
    let Document {
        id,
        mut fields,
        create_time,
        update_time,
    } = document;

    if let Value::Object(map) = &mut fields {
        map.insert("id".to_string(), Value::String(id));
        if let Some(created) = create_time {
            map.entry("createdAt").or_insert(Value::String(created));
        }
        if let Some(updated) = update_time {
            map.entry("updatedAt").or_insert(Value::String(updated));
        }
    }

    Ok(serde_json::from_value(fields)?)
}

fn decode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), decode_value(value)))
            .collect(),
    )
}

/// Unwraps one typed Firestore value into plain JSON.
///
/// `integerValue` arrives as a string and becomes a number. Timestamps,
/// references and bytes stay strings. Unknown envelopes pass through.
pub fn decode_value(value: &Value) -> Value {
    let Some((tag, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return value.clone();
    };

    match tag.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" | "referenceValue"
        | "bytesValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| inner.clone()),
            other => other.clone(),
        },
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_else(|| Value::Object(Map::new())),
        _ => value.clone(),
    }
}
