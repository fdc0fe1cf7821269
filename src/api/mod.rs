use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://client-9dq3.onrender.com/api/cliente";

const USER_AGENT: &str = concat!("clientele/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error en la solicitud: {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid api url '{0}'")]
    InvalidUrl(String),
    #[error("invalid header '{0}', expected 'Key: Value'")]
    InvalidHeader(String),
}

impl ApiError {
    /// Prefixes the failure with the action that triggered it, keeping the
    /// numeric status code visible for HTTP-level failures.
    pub fn with_context(&self, context: &str) -> String {
        match self {
            ApiError::Status { status } => format!("{context}: {status}"),
            other => format!("{context}: {other}"),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

// The backing store is loosely typed: ids and discounts arrive as JSON
// numbers from some deployments and as strings from others.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireText {
    Text(String),
    Int(i64),
    Float(f64),
    Flag(bool),
}

impl WireText {
    fn into_text(self) -> String {
        match self {
            WireText::Text(value) => value,
            WireText::Int(value) => value.to_string(),
            WireText::Float(value) => value.to_string(),
            WireText::Flag(value) => value.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireText>::deserialize(deserializer)?
        .map(WireText::into_text)
        .unwrap_or_default())
}

fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireText>::deserialize(deserializer)?.map(WireText::into_text))
}

/// One customer record as returned by the remote API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Customer {
    #[serde(rename = "id_cliente", default, deserialize_with = "text")]
    pub id: String,
    #[serde(rename = "nombre", default, deserialize_with = "opt_text")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default, deserialize_with = "opt_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    #[serde(rename = "telefono", default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default, deserialize_with = "opt_text")]
    pub address: Option<String>,
    #[serde(rename = "comida_favorita", default, deserialize_with = "opt_text")]
    pub favorite_food: Option<String>,
    #[serde(rename = "descuento_navideno", default, deserialize_with = "opt_text")]
    pub holiday_discount: Option<String>,
}

/// Full-record update payload. All seven editable fields are sent on every
/// update, matching what the remote endpoint expects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CustomerUpdate {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "comida_favorita")]
    pub favorite_food: String,
    #[serde(rename = "descuento_navideno")]
    pub holiday_discount: String,
}

#[derive(Clone, Debug)]
pub struct ApiOptions {
    pub base_url: String,
    pub timeout_seconds: usize,
    pub header: Option<String>,
    pub proxy: Option<String>,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 10,
            header: None,
            proxy: None,
        }
    }
}

/// Typed client over the four remote customer endpoints.
pub struct CustomerApi {
    client: reqwest::Client,
    base_url: String,
}

impl CustomerApi {
    pub fn new(options: &ApiOptions) -> Result<Self, ApiError> {
        let raw = options.base_url.trim();
        let parsed = reqwest::Url::parse(raw).map_err(|_| ApiError::InvalidUrl(raw.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidUrl(raw.to_string()));
        }

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        if let Some(raw_header) = options.header.as_deref() {
            let (header_key, header_value) = match raw_header.split_once(':') {
                Some(parts) => parts,
                None => return Err(ApiError::InvalidHeader(raw_header.to_string())),
            };
            let key = reqwest::header::HeaderName::from_bytes(header_key.trim().as_bytes())
                .map_err(|_| ApiError::InvalidHeader(raw_header.to_string()))?;
            let value = reqwest::header::HeaderValue::from_str(header_value.trim())
                .map_err(|_| ApiError::InvalidHeader(raw_header.to_string()))?;
            headers.insert(key, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(options.timeout_seconds as u64));
        if let Some(proxy) = options.proxy.as_deref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        let client = builder.build()?;

        let mut base_url = raw.to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(CustomerApi { client, base_url })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        let url = self.endpoint("obtclientes");
        debug!(%url, "fetching customer list");
        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json::<Vec<Customer>>().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Customer, ApiError> {
        let url = self.endpoint(&format!("clientes/{id}"));
        debug!(%url, "fetching customer");
        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json::<Customer>().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("elimclientes/{id}"));
        debug!(%url, "deleting customer");
        let response = self.client.delete(&url).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    pub async fn update(&self, id: &str, update: &CustomerUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("actclientes/{id}"));
        debug!(%url, "updating customer");
        let response = self.client.put(&url).json(update).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}
