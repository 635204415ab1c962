use crate::{
    builder::{confidence_label, estimated_mint_fee_wei, format_file_size, CapsuleContentBuilder},
    content::{
        Attachment, AttachmentId, AttachmentKind, CapsuleContent, CapsuleKind, MediaKind,
        SecretCategory, CONTENT_VERSION,
    },
    error::ValidationError,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test;

fn attachment(id: u64) -> Attachment {
    Attachment {
        id: id.into(),
        name: format!("file-{id}.mp3"),
        size: 1024 * id,
        kind: AttachmentKind::Audio,
        preview: None,
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_builds_a_plain_message() {
    let content = CapsuleContentBuilder::default()
        .titled("Dear future me")
        .with_message("Did you learn Rust?")
        .build()
        .unwrap();

    assert_eq!(content.kind, Some(CapsuleKind::Message));
    assert_eq!(content.version.as_deref(), Some(CONTENT_VERSION));
    assert!(content.created_at.is_some());
    assert_eq!(content.prediction_confidence, None);
    assert_eq!(content.secret_category, None);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_requires_a_media_uri_for_art() {
    let builder = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Art)
        .with_media_uri("   ");

    assert_eq!(builder.build(), Err(ValidationError::MissingMediaUri));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_requires_a_statement_for_predictions_and_secrets() {
    let prediction = CapsuleContentBuilder::default().of_kind(CapsuleKind::Prediction);
    let secret = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Secret)
        .with_message("\n\t");

    assert_eq!(prediction.build(), Err(ValidationError::MissingPrediction));
    assert_eq!(secret.build(), Err(ValidationError::MissingSecret));
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_rejects_confidence_above_one_hundred() {
    let builder = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Prediction)
        .with_message("It will rain tomorrow")
        .with_prediction_confidence(101);

    assert_eq!(
        builder.validate(),
        Err(ValidationError::ConfidenceOutOfRange(101))
    );
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_only_carries_fields_for_the_chosen_kind() {
    let prediction = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Prediction)
        .with_message("ETH flips BTC")
        .with_prediction_confidence(85)
        .with_secret_category(SecretCategory::Dream)
        .build()
        .unwrap();

    assert_eq!(prediction.prediction_confidence, Some(85));
    let metadata = prediction.prediction_metadata.unwrap();
    assert_eq!(metadata.confidence_level, 85);
    assert_eq!(metadata.category, "future_prediction");
    assert_eq!(prediction.secret_category, None);
    assert_eq!(prediction.secret_metadata, None);

    let secret = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Secret)
        .with_message("shh")
        .with_prediction_confidence(85)
        .with_secret_category(SecretCategory::Wish)
        .build()
        .unwrap();

    assert_eq!(secret.prediction_confidence, None);
    assert_eq!(secret.secret_category, Some(SecretCategory::Wish));
    assert!(secret.secret_metadata.unwrap().is_encrypted);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_adds_and_removes_attachments() {
    let content = CapsuleContentBuilder::default()
        .with_attachment(attachment(1))
        .with_attachment(attachment(2))
        .with_attachment(attachment(3))
        .without_attachment(&AttachmentId::from(2))
        .build()
        .unwrap();

    let names: Vec<&str> = content
        .attachments()
        .iter()
        .map(|attachment| attachment.name.as_str())
        .collect();

    assert_eq!(names, vec!["file-1.mp3", "file-3.mp3"]);
    assert_eq!(content.attachments_size(), 4096);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_labels_confidence_levels() {
    assert_eq!(confidence_label(100), "Very Confident");
    assert_eq!(confidence_label(80), "Very Confident");
    assert_eq!(confidence_label(79), "Confident");
    assert_eq!(confidence_label(50), "Somewhat Confident");
    assert_eq!(confidence_label(39), "Not Very Confident");
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_formats_file_sizes() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_estimates_mint_fees() {
    assert_eq!(estimated_mint_fee_wei(0), 25_000_000_000_000_000);
    assert_eq!(estimated_mint_fee_wei(3), 55_000_000_000_000_000);
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
#[cfg_attr(not(target_arch = "wasm32"), test)]
fn it_tells_images_from_videos_by_extension() {
    assert_eq!(MediaKind::of_uri("https://cdn.example/sunset.PNG"), MediaKind::Image);
    assert_eq!(MediaKind::of_uri("ipfs://bafy/clip.webm"), MediaKind::Video);
    assert_eq!(MediaKind::of_uri("https://cdn.example/sunset.png?w=200"), MediaKind::Unknown);
    assert_eq!(MediaKind::of_uri("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26"), MediaKind::Unknown);

    let art = CapsuleContentBuilder::default()
        .of_kind(CapsuleKind::Art)
        .with_media_uri("https://cdn.example/loop.mov")
        .build()
        .unwrap();
    assert_eq!(art.media_kind(), Some(MediaKind::Video));
    assert_eq!(CapsuleContent::default().media_kind(), None);
}
