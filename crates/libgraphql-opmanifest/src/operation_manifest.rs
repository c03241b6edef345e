use crate::OperationRecord;

/// The ordered list of [`OperationRecord`]s produced by an
/// [`OperationManifestBuilder`](crate::OperationManifestBuilder).
///
/// Serializes as a plain JSON array of records, which is the format a
/// downstream request router loads and indexes by `operationName`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct OperationManifest {
    pub(crate) records: Vec<OperationRecord>,
}

impl OperationManifest {
    pub fn get(&self, operation_name: &str) -> Option<&OperationRecord> {
        self.records
            .iter()
            .find(|record| record.operation_name == operation_name)
    }

    pub fn into_records(self) -> Vec<OperationRecord> {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
