use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::error::AppError;

/// A stored patient record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    pub symptoms: JsonValue,
    /// Any other fields the client sent (assessment, history, ...)
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Client payload for a new patient record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientRecord {
    #[serde(default)]
    pub patient_id: Option<JsonValue>,
    #[serde(default)]
    pub symptoms: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl NewPatientRecord {
    /// Check required fields and stamp the record with an id and timestamp
    pub fn into_record(mut self) -> Result<PatientRecord, AppError> {
        let patient_id = match self.patient_id.take() {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => s,
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => return Err(AppError::BadRequest("Missing required fields".to_string())),
        };

        let symptoms = match self.symptoms.take() {
            Some(JsonValue::Null) | None => {
                return Err(AppError::BadRequest("Missing required fields".to_string()));
            }
            Some(JsonValue::String(s)) if s.trim().is_empty() => {
                return Err(AppError::BadRequest("Missing required fields".to_string()));
            }
            Some(symptoms) => symptoms,
        };

        // Server-assigned fields win over anything the client sent
        self.extra.remove("id");
        self.extra.remove("timestamp");

        Ok(PatientRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            patient_id,
            symptoms,
            extra: self.extra,
        })
    }
}

/// Storage for patient records
pub trait PatientRecordRepository: Send + Sync {
    /// Store a record and return it
    fn append(&self, record: PatientRecord) -> Result<PatientRecord, AppError>;

    /// All records, oldest first
    fn list(&self) -> Result<Vec<PatientRecord>, AppError>;

    /// A record by id
    fn get(&self, id: Uuid) -> Result<Option<PatientRecord>, AppError>;
}

/// Process-lifetime record store
#[derive(Default)]
pub struct InMemoryPatientRecords {
    records: RwLock<Vec<PatientRecord>>,
}

impl InMemoryPatientRecords {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("Patient record store lock poisoned".to_string())
}

impl PatientRecordRepository for InMemoryPatientRecords {
    fn append(&self, record: PatientRecord) -> Result<PatientRecord, AppError> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<PatientRecord>, AppError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.clone())
    }

    fn get(&self, id: Uuid) -> Result<Option<PatientRecord>, AppError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }
}
