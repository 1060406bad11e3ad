mod repository;

pub use repository::{
    InMemoryPatientRecords, NewPatientRecord, PatientRecord, PatientRecordRepository,
};
