//! Reqwest-backed consultation API client.

use serde::{Deserialize, Serialize};

use pronto_ficha_core::format;
use pronto_ficha_core::gateway::{
    ConsultationGateway, ConsultationRequest, ConsultationResult, GatewayError, Specialty,
};

/// Fixed production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-tcc-node-js-1.onrender.com/v1/pas";

/// HTTP client for the consultation API.
pub struct ConsultationClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl ConsultationClient {
    /// Create a client against a base URL (trailing slash tolerated).
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Production endpoint with a 30 second timeout.
    pub fn default_remote() -> Self {
        Self::new(DEFAULT_BASE_URL, 30)
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Unreachable(format!(
                "request timed out after {}s",
                self.timeout_secs
            ))
        } else {
            GatewayError::Unreachable(e.to_string())
        }
    }
}

/// GET /unidades/{id} response envelope. Unknown fields are ignored.
#[derive(Deserialize)]
struct UnitsResponse {
    #[serde(rename = "unidadesDeSaude")]
    unidades_de_saude: Vec<UnitWire>,
}

#[derive(Deserialize)]
struct UnitWire {
    especialidades: SpecialtiesWrapper,
}

#[derive(Deserialize)]
struct SpecialtiesWrapper {
    especialidades: Vec<SpecialtyWire>,
}

#[derive(Deserialize)]
struct SpecialtyWire {
    id: i64,
    nome: String,
    #[serde(default)]
    tempo_espera: serde_json::Value,
}

/// POST /consulta body. Every value goes over the wire as a string.
#[derive(Serialize)]
struct ConsultationWire {
    tempo_entrada: String,
    tempo_saida: String,
    id_unidade_saude: String,
    id_especialidade: String,
}

impl From<&ConsultationRequest> for ConsultationWire {
    fn from(request: &ConsultationRequest) -> Self {
        Self {
            tempo_entrada: format::api_timestamp(request.entry_time),
            tempo_saida: format::api_timestamp(request.exit_time),
            id_unidade_saude: request.health_unit_id.to_string(),
            id_especialidade: request.specialty_id.to_string(),
        }
    }
}

impl ConsultationGateway for ConsultationClient {
    fn list_specialties(&self, health_unit_id: i64) -> Result<Vec<Specialty>, GatewayError> {
        let url = format!("{}/unidades/{}", self.base_url, health_unit_id);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GatewayError::BadResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::BadResponse(format!(
                "specialty listing failed with status {}",
                status.as_u16()
            )));
        }

        decode_specialties(&body)
    }

    fn submit_consultation(
        &self,
        request: &ConsultationRequest,
    ) -> Result<ConsultationResult, GatewayError> {
        let url = format!("{}/consulta", self.base_url);
        let wire = ConsultationWire::from(request);

        let response = self
            .client
            .post(&url)
            .json(&wire)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .map_err(|e| GatewayError::BadResponse(e.to_string()))?;

        let decoded = decode_consultation_body(content_type.as_deref(), &body);

        if !status.is_success() {
            let message = decoded
                .as_ref()
                .ok()
                .and_then(|r| r.message().map(str::to_owned))
                .unwrap_or_else(|| {
                    format!("check-out rejected with status {}", status.as_u16())
                });
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        decoded
    }
}

/// Flatten the nested unit envelope into the specialty list, preserving
/// order.
fn decode_specialties(body: &str) -> Result<Vec<Specialty>, GatewayError> {
    let parsed: UnitsResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::BadResponse(e.to_string()))?;

    Ok(parsed
        .unidades_de_saude
        .into_iter()
        .flat_map(|unit| unit.especialidades.especialidades)
        .map(|s| Specialty {
            id: s.id,
            name: s.nome,
            estimated_wait: wait_label(&s.tempo_espera),
        })
        .collect())
}

/// The API reports waits as either text or a bare number.
fn wait_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Decode a check-out response body.
///
/// An empty body is a success with an empty result object. Non-empty bodies
/// are parsed as JSON whatever the content type says; the API is known to
/// answer with JSON under a text content type.
fn decode_consultation_body(
    content_type: Option<&str>,
    body: &str,
) -> Result<ConsultationResult, GatewayError> {
    if body.trim().is_empty() {
        return Ok(ConsultationResult::default());
    }

    let declared_json = content_type
        .map(|c| c.contains("application/json"))
        .unwrap_or(false);
    if !declared_json {
        tracing::debug!(content_type, "decoding consultation response as text");
    }

    serde_json::from_str(body)
        .map(ConsultationResult)
        .map_err(|e| GatewayError::BadResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ConsultationClient::new("https://example.com/v1/pas/", 30);
        assert_eq!(client.base_url, "https://example.com/v1/pas");
    }

    #[test]
    fn test_default_remote_uses_fixed_base() {
        let client = ConsultationClient::default_remote();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn test_wire_body_coerces_everything_to_strings() {
        let request = ConsultationRequest {
            entry_time: chrono::Local.with_ymd_and_hms(2024, 5, 3, 9, 5, 7).unwrap(),
            exit_time: chrono::Local.with_ymd_and_hms(2024, 5, 3, 10, 0, 0).unwrap(),
            health_unit_id: 1,
            specialty_id: 7,
        };
        let wire = ConsultationWire::from(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "tempo_entrada": "2024-05-03 09:05:07",
                "tempo_saida": "2024-05-03 10:00:00",
                "id_unidade_saude": "1",
                "id_especialidade": "7",
            })
        );
    }

    #[test]
    fn test_decode_specialties_flattens_units() {
        let body = r#"{
            "status": true,
            "unidadesDeSaude": [
                {
                    "especialidades": {
                        "especialidades": [
                            {"id": 1, "nome": "Cardiologia", "tempo_espera": "40 min"},
                            {"id": 2, "nome": "Pediatria", "tempo_espera": 25}
                        ]
                    }
                },
                {
                    "especialidades": {
                        "especialidades": [
                            {"id": 9, "nome": "Ortopedia"}
                        ]
                    }
                }
            ]
        }"#;

        let specialties = decode_specialties(body).unwrap();
        assert_eq!(specialties.len(), 3);
        assert_eq!(specialties[0].name, "Cardiologia");
        assert_eq!(specialties[0].estimated_wait, "40 min");
        assert_eq!(specialties[1].estimated_wait, "25");
        assert_eq!(specialties[2].id, 9);
        assert_eq!(specialties[2].estimated_wait, "");
    }

    #[test]
    fn test_decode_specialties_malformed_is_bad_response() {
        let result = decode_specialties("{\"unexpected\": true}");
        assert!(matches!(result, Err(GatewayError::BadResponse(_))));
    }

    #[test]
    fn test_decode_empty_body_is_success() {
        let result = decode_consultation_body(None, "").unwrap();
        assert_eq!(result, ConsultationResult::default());

        let result = decode_consultation_body(Some("text/plain"), "  ").unwrap();
        assert_eq!(result, ConsultationResult::default());
    }

    #[test]
    fn test_decode_json_body() {
        let result =
            decode_consultation_body(Some("application/json"), r#"{"message": "ok"}"#).unwrap();
        assert_eq!(result.message(), Some("ok"));
    }

    #[test]
    fn test_decode_json_under_text_content_type() {
        let result =
            decode_consultation_body(Some("text/html"), r#"{"message": "ok"}"#).unwrap();
        assert_eq!(result.message(), Some("ok"));
    }

    #[test]
    fn test_decode_garbage_is_bad_response() {
        let result = decode_consultation_body(Some("text/plain"), "definitely not json");
        assert!(matches!(result, Err(GatewayError::BadResponse(_))));
    }
}
