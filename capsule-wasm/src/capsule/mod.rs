pub mod content;
pub mod feed;
pub mod unlock;

use js_sys::Error;
use serde::{de::DeserializeOwned, Serialize};
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;

pub type JsResult<T> = Result<T, js_sys::Error>;

fn from_js<T: DeserializeOwned>(value: JsValue) -> JsResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::new(&format!("{e}")))
}

fn to_js<T: Serialize>(value: &T) -> JsResult<JsValue> {
    let serializer = Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| Error::new(&format!("{e}")))
}
