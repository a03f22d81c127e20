//! Catalog provider backed by the browser's `fetch` API.

use crate::error::{describe_js_value, WasmError};
use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    CatalogEntry, CatalogProvider,
};
use js_sys::Uint8Array;
use tracing::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response, Window};

/// Fetches the catalog listing (a JSON array of `{name, artist, url}`).
pub struct FetchCatalogProvider {
    window: Window,
    listing_url: String,
}

impl FetchCatalogProvider {
    /// Create a provider bound to the current browser window.
    pub fn new(listing_url: impl Into<String>) -> BridgeResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WasmError::Unavailable("window".to_string()))?;
        Ok(Self {
            window,
            listing_url: listing_url.into(),
        })
    }

    fn build_request(&self) -> BridgeResult<Request> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::Cors);

        let headers = web_sys::Headers::new().map_err(|err| js_error("create headers", err))?;
        headers
            .set("Accept", "application/json")
            .map_err(|err| js_error("set header", err))?;
        init.set_headers(&headers);

        Request::new_with_str_and_init(&self.listing_url, &init)
            .map_err(|err| js_error("build request", err))
    }

    async fn read_body(response: &Response) -> BridgeResult<Vec<u8>> {
        let promise = response
            .array_buffer()
            .map_err(|err| js_error("response.array_buffer", err))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|err| js_error("response buffer", err))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

#[async_trait(?Send)]
impl CatalogProvider for FetchCatalogProvider {
    async fn get_files(&self) -> BridgeResult<Vec<CatalogEntry>> {
        debug!(url = %self.listing_url, "Fetching catalog");
        let request = self.build_request()?;
        let value = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(|err| js_error("fetch", err))?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| BridgeError::OperationFailed("fetch returned non-Response".into()))?;

        if !response.ok() {
            return Err(BridgeError::OperationFailed(format!(
                "HTTP {} error",
                response.status()
            )));
        }

        let body = Self::read_body(&response).await?;
        let files: Vec<CatalogEntry> = serde_json::from_slice(&body)?;
        info!(tracks = files.len(), "Catalog fetched");
        Ok(files)
    }
}

fn js_error(context: &str, err: wasm_bindgen::JsValue) -> BridgeError {
    BridgeError::OperationFailed(format!("{context}: {}", describe_js_value(&err)))
}
