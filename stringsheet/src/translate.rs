//! Translation-fill client: batch-translates missing cells of one language
//! column through a chat-completions style HTTP API.
//!
//! The core pipeline never depends on this module; its absence (no
//! credential) only disables auto-fill. Selection of what to translate
//! ([`pending_translations`]) and application of the result
//! ([`apply_translations`]) are pure and independently testable; only
//! [`Translator::translate_batch`] performs I/O.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Map, Value, json};

use crate::{error::Error, types::Project};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const TIMEOUT_SECS: u64 = 60;

/// Explicit translator configuration. The credential is supplied by the
/// surrounding application; nothing here is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl TranslatorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        TranslatorConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// One key awaiting translation, paired with the source-column text it
/// should be translated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRequest {
    pub key: String,
    pub source_text: String,
}

/// Selects the rows to send for a target language: the first column is the
/// source of truth, and a row qualifies when its source value is non-empty
/// and its target cell is unset, empty, or whitespace-only.
pub fn pending_translations(project: &Project, target_language: &str) -> Vec<FillRequest> {
    let Some(source_language) = project.source_language() else {
        return Vec::new();
    };
    project
        .rows
        .iter()
        .filter_map(|row| {
            let source_text = row.value(source_language)?;
            if source_text.is_empty() {
                return None;
            }
            if row.value(target_language).unwrap_or("").trim().is_empty() {
                Some(FillRequest {
                    key: row.key.clone(),
                    source_text: source_text.to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Pure application of a translation batch: fills only keys present in the
/// mapping and never overwrites a cell that already has a value.
pub fn apply_translations(
    project: &Project,
    target_language: &str,
    translations: &HashMap<String, String>,
) -> Project {
    let mut updated = project.clone();
    for row in &mut updated.rows {
        if let Some(translated) = translations.get(&row.key) {
            if !row.has_value(target_language) {
                row.set_value(target_language, translated.clone());
            }
        }
    }
    updated
}

/// Blocking HTTP client for the batch translation contract.
#[derive(Debug)]
pub struct Translator {
    client: Client,
    config: TranslatorConfig,
}

impl Translator {
    /// Fails up front when the credential is missing, before any I/O.
    pub fn new(config: TranslatorConfig) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::external_service_error("missing API credential"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::ExternalService(e.to_string()))?;
        Ok(Translator { client, config })
    }

    /// Sends one batch and returns a key→translation mapping for as many
    /// keys as the service produced. Keys absent from the result are left
    /// unfilled by the caller. No retries: failures propagate.
    pub fn translate_batch(
        &self,
        target_language: &str,
        requests: &[FillRequest],
    ) -> Result<HashMap<String, String>, Error> {
        if requests.is_empty() {
            return Ok(HashMap::new());
        }

        let body = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are a professional translator for mobile applications."
                },
                { "role": "user", "content": build_prompt(target_language, requests) }
            ],
            "temperature": 0.3,
            "response_format": { "type": "json_object" }
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::ExternalService(extract_error_message(
                status.as_u16(),
                &text,
            )));
        }

        let envelope: Value = serde_json::from_str(&text)
            .map_err(|_| Error::external_service_error("invalid JSON from translation service"))?;
        let content = envelope
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::external_service_error(
                    "invalid response: missing choices[0].message.content",
                )
            })?;

        parse_translation_mapping(content)
    }
}

fn build_prompt(target_language: &str, requests: &[FillRequest]) -> String {
    let source: Map<String, Value> = requests
        .iter()
        .map(|r| (r.key.clone(), Value::String(r.source_text.clone())))
        .collect();

    format!(
        "Translate the values of the following JSON object into {target_language}.\n\
         Keep the keys exactly as they are.\n\
         Do not translate technical placeholders like %s, {{0}}, or @string/.\n\
         Respond with a single JSON object mapping every key to its translation.\n\n{}",
        Value::Object(source)
    )
}

/// Parses the model's JSON payload, tolerating a `{"translations": {...}}`
/// wrapper. Non-string values are dropped.
fn parse_translation_mapping(content: &str) -> Result<HashMap<String, String>, Error> {
    let parsed: Value = serde_json::from_str(content)
        .map_err(|_| Error::external_service_error("translation payload is not valid JSON"))?;

    let object = parsed
        .get("translations")
        .and_then(Value::as_object)
        .or_else(|| parsed.as_object())
        .ok_or_else(|| {
            Error::external_service_error("translation payload is not a JSON object")
        })?;

    Ok(object
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect())
}

fn extract_error_message(status: u16, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return format!("HTTP {status}: {msg}");
        }
        if let Some(msg) = v.get("message").and_then(Value::as_str) {
            return format!("HTTP {status}: {msg}");
        }
    }

    let trimmed = body_text.trim();
    let snippet: String = trimmed.chars().take(400).collect();
    format!("HTTP {status}: {snippet}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LanguageColumn, TranslationRow};

    fn fill_project() -> Project {
        let columns = vec![LanguageColumn::new("en-US"), LanguageColumn::new("zh-CN")];

        let mut translated = TranslationRow::new("app_name");
        translated.set_value("en-US", "My App");
        translated.set_value("zh-CN", "我的应用");

        let mut missing = TranslationRow::new("welcome");
        missing.set_value("en-US", "Welcome back");

        let mut whitespace = TranslationRow::new("bye");
        whitespace.set_value("en-US", "Goodbye");
        whitespace.set_value("zh-CN", "   ");

        let mut no_source = TranslationRow::new("orphan");
        no_source.set_value("zh-CN", "孤儿");

        Project::new(columns, vec![translated, missing, whitespace, no_source])
    }

    #[test]
    fn test_pending_translations_selection() {
        let pending = pending_translations(&fill_project(), "zh-CN");
        assert_eq!(
            pending,
            vec![
                FillRequest {
                    key: "welcome".to_string(),
                    source_text: "Welcome back".to_string(),
                },
                FillRequest {
                    key: "bye".to_string(),
                    source_text: "Goodbye".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_pending_translations_empty_project() {
        let project = Project::new(Vec::new(), Vec::new());
        assert!(pending_translations(&project, "zh-CN").is_empty());
    }

    #[test]
    fn test_apply_translations_fills_only_missing() {
        let project = fill_project();
        let mut translations = HashMap::new();
        translations.insert("welcome".to_string(), "欢迎回来".to_string());
        translations.insert("app_name".to_string(), "不应覆盖".to_string());

        let updated = apply_translations(&project, "zh-CN", &translations);

        assert_eq!(
            updated.find_row("welcome").unwrap().value("zh-CN"),
            Some("欢迎回来")
        );
        // Existing non-empty values are never overwritten.
        assert_eq!(
            updated.find_row("app_name").unwrap().value("zh-CN"),
            Some("我的应用")
        );
        // Keys not returned by the service stay unfilled.
        assert_eq!(updated.find_row("bye").unwrap().value("zh-CN"), Some("   "));
        // The input project is untouched.
        assert_eq!(project.find_row("welcome").unwrap().value("zh-CN"), None);
    }

    #[test]
    fn test_translator_requires_credential() {
        let err = Translator::new(TranslatorConfig::new("")).unwrap_err();
        assert!(err.to_string().contains("missing API credential"));
    }

    #[test]
    fn test_parse_translation_mapping_plain_and_wrapped() {
        let plain = parse_translation_mapping(r#"{"welcome": "欢迎回来"}"#).unwrap();
        assert_eq!(plain.get("welcome").unwrap(), "欢迎回来");

        let wrapped =
            parse_translation_mapping(r#"{"translations": {"welcome": "欢迎回来"}}"#).unwrap();
        assert_eq!(wrapped.get("welcome").unwrap(), "欢迎回来");

        assert!(parse_translation_mapping("not json").is_err());
    }

    #[test]
    fn test_build_prompt_contains_pairs_and_target() {
        let requests = vec![FillRequest {
            key: "welcome".to_string(),
            source_text: "Welcome back".to_string(),
        }];
        let prompt = build_prompt("zh-CN", &requests);
        assert!(prompt.contains("zh-CN"));
        assert!(prompt.contains("\"welcome\""));
        assert!(prompt.contains("Welcome back"));
    }

    #[test]
    fn test_extract_error_message() {
        let msg = extract_error_message(401, r#"{"error": {"message": "bad key"}}"#);
        assert_eq!(msg, "HTTP 401: bad key");

        let msg = extract_error_message(500, "oops");
        assert_eq!(msg, "HTTP 500: oops");
    }
}
