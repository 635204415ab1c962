use crate::capsule::{from_js, to_js, JsResult};
use ::capsule::{
    feed::{demo_posts, posts_from_records},
    time::now,
    CapsuleRecord,
};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(typescript_custom_section)]
const POST: &'static str = r#"
interface Post {
    id: string,
    type: "mint" | "unlock" | "vote" | "gift" | "community" | "achievement" | "prediction",
    title: string,
    content: string,
    user: { address: string, name: string },
    timestamp: string,
    blockNumber?: number,
    capsuleId?: number,
    capsuleTitle?: string,
    transactionHash?: string,
    likes: number,
    comments: number,
    shares: number,
    isLiked: boolean,
    tags: string[],
    metadata: {
        amount?: string,
        recipient?: string,
        votes?: number,
        totalVotes?: number,
        rarity?: "common" | "rare" | "legendary" | "mythic",
        rewards?: string[]
    }
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "CapsuleRecord[]")]
    pub type CapsuleRecords;

    #[wasm_bindgen(typescript_type = "Post[]")]
    pub type Posts;
}

/// Turn capsule records into feed posts, optionally followed by the bundled
/// demo posts
#[wasm_bindgen(js_name = "feedPosts")]
pub fn feed_posts(records: CapsuleRecords, with_demo_posts: bool) -> JsResult<Posts> {
    let records: Vec<CapsuleRecord> = from_js(records.into())?;

    let mut posts = posts_from_records(&records, now());
    if with_demo_posts {
        posts.extend(demo_posts());
    }

    Ok(Posts { obj: to_js(&posts)? })
}
