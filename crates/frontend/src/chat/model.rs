//! API functions for the two backend endpoints.

use std::rc::Rc;

use contracts::api::{ApiEnvelope, PromptData, PromptRequest, UploadData};
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

use crate::shared::api_utils::api_url;

/// Client-side gate for the upload widget: only PDFs go on the wire.
pub fn is_pdf_mime(mime: &str) -> bool {
    mime == "application/pdf"
}

fn parse_upload_response(xhr: &XmlHttpRequest) -> Result<UploadData, String> {
    let status = xhr.status().unwrap_or(0);
    let text = xhr
        .response_text()
        .ok()
        .flatten()
        .unwrap_or_default();
    let envelope: ApiEnvelope<UploadData> = serde_json::from_str(&text)
        .map_err(|_| format!("Unexpected server response (HTTP {})", status))?;
    if status >= 400 {
        return Err(envelope
            .message
            .unwrap_or_else(|| format!("HTTP {}", status)));
    }
    envelope.into_data("Upload failed")
}

/// Upload a document as multipart `PUT /upload`.
///
/// Goes through `XmlHttpRequest` rather than `fetch` because only XHR exposes
/// upload progress; `on_progress` receives the fraction of bytes sent.
/// `on_complete` fires once, with either the session payload or an inline
/// error message.
pub fn upload_document(
    file: web_sys::File,
    on_progress: impl Fn(f64) + 'static,
    on_complete: impl Fn(Result<UploadData, String>) + 'static,
) {
    let on_complete: Rc<dyn Fn(Result<UploadData, String>)> = Rc::new(on_complete);

    let xhr = match XmlHttpRequest::new() {
        Ok(xhr) => xhr,
        Err(e) => {
            on_complete(Err(format!("{e:?}")));
            return;
        }
    };
    if let Err(e) = xhr.open("PUT", &api_url("/upload")) {
        on_complete(Err(format!("{e:?}")));
        return;
    }

    if let Ok(upload) = xhr.upload() {
        let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
            if ev.length_computable() && ev.total() > 0.0 {
                on_progress(ev.loaded() / ev.total());
            }
        });
        upload.set_onprogress(Some(progress.as_ref().unchecked_ref()));
        progress.forget(); // Keep the closure alive
    }

    {
        let xhr_done = xhr.clone();
        let done = on_complete.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            done(parse_upload_response(&xhr_done));
        });
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    }
    {
        let done = on_complete.clone();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            done(Err("Network error while uploading".to_string()));
        });
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    let form = match FormData::new() {
        Ok(form) => form,
        Err(e) => {
            on_complete(Err(format!("{e:?}")));
            return;
        }
    };
    if let Err(e) = form.append_with_blob("file", &file) {
        on_complete(Err(format!("{e:?}")));
        return;
    }
    if let Err(e) = xhr.send_with_opt_form_data(Some(&form)) {
        on_complete(Err(format!("{e:?}")));
    }
}

/// Ask a question about the ingested document via `POST /prompt`.
pub async fn send_prompt(session_id: &str, prompt: &str) -> Result<PromptData, String> {
    let body = PromptRequest {
        session_id: session_id.to_string(),
        prompt: prompt.to_string(),
    };

    let response = Request::post(&api_url("/prompt"))
        .json(&body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    let status = response.status();
    let envelope: ApiEnvelope<PromptData> = response
        .json()
        .await
        .map_err(|_| format!("Unexpected server response (HTTP {})", status))?;

    if status >= 400 {
        return Err(envelope
            .message
            .unwrap_or_else(|| format!("HTTP {}", status)));
    }
    envelope.into_data("Prompt failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_mime() {
        assert!(is_pdf_mime("application/pdf"));
        assert!(!is_pdf_mime("application/msword"));
        assert!(!is_pdf_mime("text/plain"));
        assert!(!is_pdf_mime(""));
    }
}
