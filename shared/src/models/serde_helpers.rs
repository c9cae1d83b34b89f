//! Serde helpers for lenient employee payloads
//!
//! Clients send `null` for absent strings and lists, and direct reports as
//! either a bare identifier or a full nested employee snapshot.

use serde::{Deserialize, Deserializer};

/// Deserialize a string that treats null as empty
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a list that treats null as empty
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Direct reports as `[{"employeeId": "..."}]`
///
/// Only the identifier of each nested snapshot is kept; the rest of the
/// snapshot is never trusted as current.
pub mod report_refs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct ReportRefOut<'a> {
        employee_id: &'a str,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ReportRefIn {
        Id(String),
        Snapshot {
            #[serde(default, rename = "employeeId")]
            employee_id: Option<String>,
        },
    }

    impl ReportRefIn {
        fn into_id(self) -> String {
            match self {
                Self::Id(id) => id,
                Self::Snapshot { employee_id } => employee_id.unwrap_or_default(),
            }
        }
    }

    pub fn serialize<S>(ids: &[String], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_seq(ids.iter().map(|id| ReportRefOut { employee_id: id }))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let refs = Option::<Vec<ReportRefIn>>::deserialize(d)?.unwrap_or_default();
        Ok(refs.into_iter().map(ReportRefIn::into_id).collect())
    }
}
