//! Wire types for the two backend endpoints (`PUT /upload`, `POST /prompt`).

use serde::{Deserialize, Serialize};

/// Response envelope shared by both endpoints.
///
/// The backend wraps every response as `{success, message, data}` and keeps
/// HTTP 200 even for some application-level failures, so `success` is the
/// authoritative flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning a failure envelope or a missing `data`
    /// field into the error message the UI shows inline.
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        if !self.success {
            return Err(self.message.unwrap_or_else(|| fallback.to_string()));
        }
        self.data.ok_or_else(|| fallback.to_string())
    }
}

/// Payload of a successful `PUT /upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadData {
    pub session_id: String,
    pub filename: String,
    pub size: u64,
}

/// Body of `POST /prompt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub session_id: String,
    pub prompt: String,
}

/// `source_file` arrives either as a single string or as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceRefs {
    One(String),
    Many(Vec<String>),
}

impl SourceRefs {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SourceRefs::One(s) => vec![s],
            SourceRefs::Many(v) => v,
        }
    }
}

/// Inner answer object of the current backend (`data.response`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptAnswer {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub source_file: Option<SourceRefs>,
}

/// Payload of a successful `POST /prompt`.
///
/// Older backend revisions put `answer`/`source_file` directly in `data`;
/// the current one nests them under `response`. Both shapes are accepted,
/// with the nested one taking precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptData {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub source_file: Option<SourceRefs>,
    #[serde(default)]
    pub response: Option<PromptAnswer>,
}

impl PromptData {
    pub fn answer_text(&self) -> Option<String> {
        self.response
            .as_ref()
            .and_then(|r| r.answer.clone())
            .or_else(|| self.answer.clone())
    }

    pub fn sources(&self) -> Vec<String> {
        self.response
            .as_ref()
            .and_then(|r| r.source_file.clone())
            .or_else(|| self.source_file.clone())
            .map(SourceRefs::into_vec)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_envelope_success() {
        let json = r#"{
            "success": true,
            "message": "File uploaded successfully",
            "data": {"session_id": "abc", "filename": "doc.pdf", "size": 12345}
        }"#;
        let envelope: ApiEnvelope<UploadData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data("Upload failed").unwrap();
        assert_eq!(data.session_id, "abc");
        assert_eq!(data.filename, "doc.pdf");
        assert_eq!(data.size, 12345);
    }

    #[test]
    fn test_upload_envelope_failure_keeps_message() {
        let json = r#"{
            "success": false,
            "message": "Invalid PDF provided",
            "data": {"session_id": "", "filename": "doc.pdf", "size": 10}
        }"#;
        let envelope: ApiEnvelope<UploadData> = serde_json::from_str(json).unwrap();
        let err = envelope.into_data("Upload failed").unwrap_err();
        assert_eq!(err, "Invalid PDF provided");
    }

    #[test]
    fn test_failure_envelope_without_message_uses_fallback() {
        let json = r#"{"success": false}"#;
        let envelope: ApiEnvelope<UploadData> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_data("Upload failed").unwrap_err(), "Upload failed");
    }

    #[test]
    fn test_prompt_nested_response_shape() {
        let json = r#"{
            "success": true,
            "message": "Prompt processed successfully",
            "data": {
                "session_id": "abc",
                "response": {"answer": "42", "source_file": ["doc.pdf"]}
            }
        }"#;
        let envelope: ApiEnvelope<PromptData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data("Prompt failed").unwrap();
        assert_eq!(data.answer_text().as_deref(), Some("42"));
        assert_eq!(data.sources(), vec!["doc.pdf".to_string()]);
    }

    #[test]
    fn test_prompt_flat_shape() {
        let json = r#"{
            "success": true,
            "data": {"answer": "yes", "source_file": "report.pdf"}
        }"#;
        let envelope: ApiEnvelope<PromptData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data("Prompt failed").unwrap();
        assert_eq!(data.answer_text().as_deref(), Some("yes"));
        assert_eq!(data.sources(), vec!["report.pdf".to_string()]);
    }

    #[test]
    fn test_prompt_nested_takes_precedence_over_flat() {
        let json = r#"{
            "success": true,
            "data": {
                "answer": "old",
                "response": {"answer": "new", "source_file": []}
            }
        }"#;
        let envelope: ApiEnvelope<PromptData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data("Prompt failed").unwrap();
        assert_eq!(data.answer_text().as_deref(), Some("new"));
        assert!(data.sources().is_empty());
    }

    #[test]
    fn test_prompt_without_answer() {
        let json = r#"{"success": true, "data": {"session_id": "abc"}}"#;
        let envelope: ApiEnvelope<PromptData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data("Prompt failed").unwrap();
        assert_eq!(data.answer_text(), None);
        assert!(data.sources().is_empty());
    }

    #[test]
    fn test_prompt_request_serializes_expected_body() {
        let req = PromptRequest {
            session_id: "abc".to_string(),
            prompt: "What is this about?".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"session_id": "abc", "prompt": "What is this about?"})
        );
    }
}
