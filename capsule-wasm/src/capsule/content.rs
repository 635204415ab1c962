use crate::capsule::{from_js, to_js, JsResult};
use ::capsule::{codec, CapsuleContent as RsCapsuleContent};
use js_sys::Error;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(typescript_custom_section)]
const CAPSULE_CONTENT: &'static str = r#"
interface Attachment {
    id: number | string,
    name: string,
    size: number,
    type: "image" | "video" | "audio" | "document",
    preview?: string
}

interface CapsuleContent {
    title?: string,
    message?: string,
    type?: "message" | "prediction" | "art" | "secret",
    mediaUri?: string,
    predictionConfidence?: number,
    predictionMetadata?: {
        confidenceLevel: number,
        category: string
    },
    secretCategory?: string,
    secretMetadata?: {
        category: string,
        isEncrypted: boolean
    },
    attachments?: Attachment[],
    createdAt?: string,
    creator?: string,
    version?: string,
    network?: string
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "CapsuleContent")]
    pub type CapsuleContent;
}

/// Encode capsule content as a `data:` URI ready to be minted
#[wasm_bindgen(js_name = "encodeContent")]
pub fn encode_content(content: CapsuleContent) -> JsResult<String> {
    let content: RsCapsuleContent = from_js(content.into())?;

    codec::encode(&content).map_err(|e| Error::new(&format!("{e}")))
}

/// Decode a stored content URI. Unreadable URIs decode to placeholder
/// content rather than failing.
#[wasm_bindgen(js_name = "decodeContent")]
pub fn decode_content(uri: String) -> JsResult<CapsuleContent> {
    let value = to_js(&codec::decode(&uri))?;

    Ok(CapsuleContent { obj: value })
}

/// Decode a stored content URI, failing on anything unreadable
#[wasm_bindgen(js_name = "tryDecodeContent")]
pub fn try_decode_content(uri: String) -> JsResult<CapsuleContent> {
    let content = codec::try_decode(&uri).map_err(|e| Error::new(&format!("{e}")))?;
    let value = to_js(&content)?;

    Ok(CapsuleContent { obj: value })
}
