//! Student models as exchanged with the alunos API.
//!
//! The alunos service formats birth dates as `dd-MM-yyyy`, unlike the ISO
//! dates used elsewhere; see [`dia_mes_ano`].

use chrono::NaiveDate;
use distrischool_core::id::AlunoId;
use distrischool_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// A student as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    /// Student id.
    pub id: AlunoId,
    /// Full name.
    pub nome: String,
    /// Enrollment number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricula: Option<String>,
    /// Class (turma).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turma: Option<String>,
    /// Contact (phone or e-mail).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contato: Option<String>,
    /// Birth date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "dia_mes_ano::option"
    )]
    pub data_nascimento: Option<NaiveDate>,
    /// Home address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endereco: Option<Endereco>,
}

/// Postal address embedded in a student record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Endereco {
    /// Street.
    #[serde(default)]
    pub rua: String,
    /// House number.
    #[serde(default)]
    pub numero: String,
    /// Postal code.
    #[serde(default)]
    pub cep: String,
    /// City.
    #[serde(default)]
    pub cidade: String,
    /// State.
    #[serde(default)]
    pub estado: String,
}

/// Request payload for creating or replacing a student.
///
/// The API validates the whole record on both `POST` and `PUT`, so the same
/// payload serves both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlunoRequest {
    /// Full name.
    pub nome: String,
    /// Enrollment number; assigned by the server when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matricula: Option<String>,
    /// Class.
    pub turma: String,
    /// Contact (12 to 50 characters).
    pub contato: String,
    /// Birth date, must be in the past.
    #[serde(with = "dia_mes_ano")]
    pub data_nascimento: NaiveDate,
    /// Home address.
    pub endereco: Endereco,
}

/// Filters accepted by the student search endpoint.
///
/// The server applies `nome` first (case-insensitive substring) and only
/// falls back to `turma` when no name is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlunoFilter {
    /// Name substring.
    pub nome: Option<String>,
    /// Class name, matched case-insensitively.
    pub turma: Option<String>,
}

impl AlunoFilter {
    /// Filter by name.
    #[must_use]
    pub fn by_nome(nome: impl Into<String>) -> Self {
        Self {
            nome: Some(nome.into()),
            ..Self::default()
        }
    }

    /// Filter by class.
    #[must_use]
    pub fn by_turma(turma: impl Into<String>) -> Self {
        Self {
            turma: Some(turma.into()),
            ..Self::default()
        }
    }

    /// Convert the filter to query parameters, skipping empty values.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("nome", self.nome.as_deref().filter(|v| !v.is_empty()));
        params.push_opt("turma", self.turma.as_deref().filter(|v| !v.is_empty()));
        params
    }
}

/// Serde adapter for `dd-MM-yyyy` dates.
pub mod dia_mes_ano {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d-%m-%Y";

    /// Serialize a date as `dd-MM-yyyy`.
    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    /// Deserialize a `dd-MM-yyyy` date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    /// Same format for optional dates.
    pub mod option {
        use super::FORMAT;
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serialize an optional date as `dd-MM-yyyy`.
        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.collect_str(&date.format(FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional `dd-MM-yyyy` date.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| NaiveDate::parse_from_str(&raw, FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}
