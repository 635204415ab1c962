use crate::capsule::{from_js, to_js, JsResult};
use ::capsule::{time::now, CapsuleRecord as RsCapsuleRecord};
use wasm_bindgen::{prelude::wasm_bindgen, JsCast};

#[wasm_bindgen(typescript_custom_section)]
const CAPSULE_RECORD: &'static str = r#"
interface CapsuleRecord {
    id: number,
    creator: string,
    recipient: string,
    unlockTime: number,
    encryptedURI: string,
    lockType: 0 | 1,
    visibility: 0 | 1,
    isOpened: boolean
}

type UnlockStatus =
    | { status: "opened" }
    | { status: "ready" }
    | { status: "locked", remaining: number }
    | { status: "contractGoverned" }
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "CapsuleRecord")]
    pub type CapsuleRecord;

    #[wasm_bindgen(typescript_type = "UnlockStatus")]
    pub type UnlockStatus;
}

/// Where a capsule stands with respect to its unlock condition right now
#[wasm_bindgen(js_name = "unlockStatus")]
pub fn unlock_status(record: CapsuleRecord) -> JsResult<UnlockStatus> {
    let record: RsCapsuleRecord = from_js(record.into())?;
    let value = to_js(&record.unlock_status(now()))?;

    Ok(UnlockStatus { obj: value })
}

/// Returns true if an unlock may be submitted for the capsule
#[wasm_bindgen(js_name = "isUnlockable")]
pub fn is_unlockable(record: CapsuleRecord) -> JsResult<bool> {
    let record: RsCapsuleRecord = from_js(record.into())?;

    Ok(record.unlock_status(now()).is_unlockable())
}

/// Decode the content of a capsule record
#[wasm_bindgen(js_name = "recordContent")]
pub fn record_content(record: CapsuleRecord) -> JsResult<super::content::CapsuleContent> {
    let record: RsCapsuleRecord = from_js(record.into())?;
    let value = to_js(&record.content())?;

    Ok(value.unchecked_into())
}
