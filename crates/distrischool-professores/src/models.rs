//! Professor models as exchanged with the professores API.

use chrono::NaiveDate;
use distrischool_core::id::ProfessorId;
use serde::{Deserialize, Serialize};

/// A professor as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    /// Professor id.
    pub id: ProfessorId,
    /// Full name.
    pub nome: String,
    /// Contact e-mail, unique per professor.
    pub email: String,
    /// Subject or area of expertise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    /// Hiring date (ISO `yyyy-mm-dd`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_contratacao: Option<NaiveDate>,
}

/// Request payload for creating a professor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessorRequest {
    /// Full name.
    pub nome: String,
    /// Contact e-mail.
    pub email: String,
    /// Subject or area of expertise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    /// Hiring date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_contratacao: Option<NaiveDate>,
}

impl CreateProfessorRequest {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(nome: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            email: email.into(),
            especialidade: None,
            data_contratacao: None,
        }
    }

    /// Set the area of expertise.
    #[must_use]
    pub fn with_especialidade(mut self, especialidade: impl Into<String>) -> Self {
        self.especialidade = Some(especialidade.into());
        self
    }

    /// Set the hiring date.
    #[must_use]
    pub const fn with_data_contratacao(mut self, date: NaiveDate) -> Self {
        self.data_contratacao = Some(date);
        self
    }
}

/// Request payload for updating a professor. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfessorRequest {
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Area of expertise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
    /// Hiring date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_contratacao: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn professor_uses_camel_case() {
        let professor: Professor = serde_json::from_value(json!({
            "id": 1,
            "nome": "Carla Souza",
            "email": "carla@escola.br",
            "especialidade": "Matemática",
            "dataContratacao": "2021-02-01"
        }))
        .unwrap();

        assert_eq!(professor.id.get(), 1);
        assert_eq!(
            professor.data_contratacao,
            NaiveDate::from_ymd_opt(2021, 2, 1)
        );
    }

    #[test]
    fn create_request_skips_missing_fields() {
        let request = CreateProfessorRequest::new("Carla", "carla@escola.br");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"nome": "Carla", "email": "carla@escola.br"})
        );
    }
}
