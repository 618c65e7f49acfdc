//! Client for the card form. Posts the form fields to `/agregar_tarjeta` and
//! turns the reply into the text and color shown in the status area.
//!
//! The reply uses `mensaje`/`error`, unlike the `/add` route of this server,
//! so the two do not talk to each other.

use log::debug;
use reqwest::multipart::Form;
use serde_json::Value;
use thiserror::Error;

use crate::models::FormResponse;

pub const SUBMIT_PATH: &str = "/agregar_tarjeta";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not reach {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("reply was not valid JSON: {0}")]
    Decode(reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
}

impl StatusColor {
    pub fn css(self) -> &'static str {
        match self {
            StatusColor::Success => "green",
            StatusColor::Error => "red",
        }
    }
}

/// What ends up in the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub color: StatusColor,
}

pub fn render_response(response: &FormResponse) -> StatusMessage {
    match response.mensaje.as_ref().filter(|mensaje| is_truthy(mensaje)) {
        Some(mensaje) => StatusMessage {
            text: display_value(mensaje),
            color: StatusColor::Success,
        },
        None => {
            let error = match &response.error {
                Some(Value::Null) | None => "desconocido".to_owned(),
                Some(error) => display_value(error),
            };
            StatusMessage {
                text: format!("Error: {}", error),
                color: StatusColor::Error,
            }
        }
    }
}

/// `null`, `false`, `0` and `""` do not count as a message.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings as they are, anything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub struct FormSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl FormSubmitter {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        FormSubmitter {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SUBMIT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `fields` as multipart form data. The body is decoded whatever the
    /// HTTP status is.
    pub async fn submit<'a, I>(&self, fields: I) -> Result<StatusMessage, ClientError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name.to_owned(), value.to_owned())
            });

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        debug!("{} answered {}", self.endpoint, response.status());

        let body: FormResponse = response.json().await.map_err(ClientError::Decode)?;
        Ok(render_response(&body))
    }
}
