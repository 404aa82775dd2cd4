use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, ReadableStreamDefaultReader, Request, RequestInit, RequestMode, Response};

use super::config::api_config;
use super::stream::ReaderSource;
use crate::chat::ChatCompletionRequest;
use crate::error::{describe_http_status, ApiError};
use crate::models::{BaseModel, Document, Task};

/// Payload attached to a request.
pub enum RequestBody<'a> {
    Empty,
    Json(&'a str),
    Form(&'a FormData),
}

/// Rewrite `http://` to `https://` when the page itself is served over
/// HTTPS, to avoid mixed-content blocking. Host and path are unchanged.
pub fn upgrade_scheme(url: &str, page_protocol: &str) -> String {
    if page_protocol == "https:" && url.starts_with("http://") {
        url.replacen("http://", "https://", 1)
    } else {
        url.to_string()
    }
}

// REST client for the fine-tuning service
pub struct ApiClient;

impl ApiClient {
    pub async fn list_tasks() -> Result<Vec<Task>, ApiError> {
        Self::get_json(&api_config().tasks_url()).await
    }

    pub async fn get_task(task_id: &str) -> Result<Task, ApiError> {
        Self::get_json(&api_config().task_url(task_id)).await
    }

    pub async fn list_documents(task_id: &str) -> Result<Vec<Document>, ApiError> {
        Self::get_json(&api_config().documents_url(task_id)).await
    }

    pub async fn list_base_models() -> Result<Vec<BaseModel>, ApiError> {
        Self::get_json(&api_config().base_models_url()).await
    }

    /// Upload a `.pdf` or `.zip` of source material as multipart field `file`.
    pub async fn upload_sample(task_id: &str, file: &web_sys::File) -> Result<(), ApiError> {
        let form = FormData::new().map_err(ApiError::request)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(ApiError::request)?;
        Self::send(&api_config().samples_url(task_id), "POST", RequestBody::Form(&form)).await?;
        Ok(())
    }

    pub async fn start_fine_tune(task_id: &str, base_model: &str) -> Result<(), ApiError> {
        Self::send(&api_config().fine_tunes_url(task_id, base_model), "POST", RequestBody::Empty).await?;
        Ok(())
    }

    pub async fn deploy(task_id: &str) -> Result<(), ApiError> {
        Self::send(&api_config().deployments_url(task_id), "POST", RequestBody::Empty).await?;
        Ok(())
    }

    /// Start a streamed chat completion and hand back a reader over its body.
    pub async fn open_chat_stream(task_id: &str, request: &ChatCompletionRequest) -> Result<ReaderSource, ApiError> {
        let body = serde_json::to_string(request)?;
        let resp = Self::send(&api_config().chat_completions_url(task_id), "POST", RequestBody::Json(&body)).await?;
        let stream = resp.body().ok_or(ApiError::MissingBody)?;
        let reader: ReadableStreamDefaultReader = stream.get_reader().unchecked_into();
        Ok(ReaderSource::new(reader))
    }

    async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
        let text = Self::fetch_json(url, "GET", None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Perform a request and return the body as text; the caller decodes JSON.
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, ApiError> {
        let body = body.map(RequestBody::Json).unwrap_or(RequestBody::Empty);
        let resp = Self::send(url, method, body).await?;
        let promise = resp.text().map_err(ApiError::network)?;
        let text = JsFuture::from(promise).await.map_err(ApiError::network)?;
        Ok(text.as_string().unwrap_or_default())
    }

    async fn send(url: &str, method: &str, body: RequestBody<'_>) -> Result<Response, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Request("no global window".into()))?;

        let protocol = window.location().protocol().unwrap_or_default();
        let effective_url = upgrade_scheme(url, &protocol);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(ApiError::request)?;
        match body {
            RequestBody::Empty => {}
            RequestBody::Json(data) => {
                opts.set_body(&JsValue::from_str(data));
                headers.append("Content-Type", "application/json").map_err(ApiError::request)?;
            }
            // The browser sets the multipart boundary header itself.
            RequestBody::Form(form) => opts.set_body(form.as_ref()),
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&effective_url, &opts).map_err(ApiError::request)?;
        log::debug!("{} {}", method, effective_url);

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(ApiError::network)?;
        let resp: Response = resp_value.dyn_into().map_err(ApiError::network)?;

        if !resp.ok() {
            let status = resp.status();
            let error_text = match resp.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            let message = describe_http_status(status, &resp.status_text(), &error_text);
            log::error!("{} {} failed: {} {}", method, effective_url, status, error_text);
            return Err(ApiError::Http { status, message });
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_only_on_https_pages() {
        assert_eq!(upgrade_scheme("http://api/x", "https:"), "https://api/x");
        assert_eq!(upgrade_scheme("http://api/x", "http:"), "http://api/x");
        assert_eq!(upgrade_scheme("/api/x", "https:"), "/api/x");
        assert_eq!(upgrade_scheme("https://api/x", "https:"), "https://api/x");
    }
}
