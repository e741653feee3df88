//! The sticker-pack EXIF block understood by messaging clients.
//!
//! Layout: a little-endian TIFF header, one IFD with a single entry (tag
//! `0x5741`, type UNDEFINED) whose value is a JSON document, and the JSON
//! itself starting at offset 22.

use serde::{Deserialize, Serialize};
use sk_core::{Error, Result, StickerMetadata};
use uuid::Uuid;

/// Private tag holding the JSON payload.
const STICKER_TAG: u16 = 0x5741;
/// TIFF type code for UNDEFINED (raw bytes).
const TYPE_UNDEFINED: u16 = 7;
/// Offset of the JSON payload from the start of the TIFF header.
const PAYLOAD_OFFSET: u32 = 22;

/// Namespace for deriving pack ids from pack name and author.
const PACK_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a5e_8d1b_4c7a_9e3f_5b2d_7a41_c0de);

/// JSON document stored in the EXIF entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PackPayload {
    #[serde(rename = "sticker-pack-id")]
    pack_id: String,
    #[serde(rename = "sticker-pack-name")]
    pack_name: String,
    #[serde(
        rename = "sticker-pack-publisher",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    publisher: Option<String>,
    #[serde(rename = "emojis", default, skip_serializing_if = "Option::is_none")]
    emojis: Option<Vec<String>>,
}

/// Stable id for a pack: the same name and author always map to the same id,
/// so stickers made separately still group into one pack.
pub fn derive_pack_id(pack_name: &str, author: Option<&str>) -> String {
    let key = format!("{pack_name}\u{0}{}", author.unwrap_or_default());
    Uuid::new_v5(&PACK_NAMESPACE, key.as_bytes()).to_string()
}

/// Build the EXIF block for `metadata`.
pub fn build(metadata: &StickerMetadata) -> Result<Vec<u8>> {
    let payload = PackPayload {
        pack_id: metadata
            .pack_id
            .clone()
            .unwrap_or_else(|| derive_pack_id(&metadata.pack_name, metadata.author.as_deref())),
        pack_name: metadata.pack_name.clone(),
        publisher: metadata.author.clone(),
        emojis: metadata.categories.clone(),
    };
    let json = serde_json::to_vec(&payload)
        .map_err(|e| Error::Metadata(format!("failed to serialize sticker metadata: {e}")))?;
    let len = u32::try_from(json.len())
        .map_err(|_| Error::Metadata("sticker metadata too large".into()))?;

    let mut exif = Vec::with_capacity(PAYLOAD_OFFSET as usize + json.len());
    exif.extend_from_slice(b"II\x2A\x00"); // little-endian TIFF
    exif.extend_from_slice(&8u32.to_le_bytes()); // first IFD offset
    exif.extend_from_slice(&1u16.to_le_bytes()); // entry count
    exif.extend_from_slice(&STICKER_TAG.to_le_bytes());
    exif.extend_from_slice(&TYPE_UNDEFINED.to_le_bytes());
    exif.extend_from_slice(&len.to_le_bytes());
    exif.extend_from_slice(&PAYLOAD_OFFSET.to_le_bytes());
    exif.extend_from_slice(&json);
    Ok(exif)
}

/// Parse sticker metadata back out of an EXIF block, if it carries one.
pub fn parse(exif: &[u8]) -> Result<Option<StickerMetadata>> {
    if exif.len() < 8 || &exif[0..4] != b"II\x2A\x00" {
        return Err(Error::Metadata("EXIF block is not little-endian TIFF".into()));
    }

    let ifd = u32_at(exif, 4)? as usize;
    let count = u16_at(exif, ifd)?;
    for i in 0..usize::from(count) {
        let entry = ifd + 2 + i * 12;
        if u16_at(exif, entry)? != STICKER_TAG {
            continue;
        }
        let len = u32_at(exif, entry + 4)? as usize;
        let offset = u32_at(exif, entry + 8)? as usize;
        let json = offset
            .checked_add(len)
            .and_then(|end| exif.get(offset..end))
            .ok_or_else(|| Error::Metadata("sticker payload out of bounds".into()))?;

        let payload: PackPayload = serde_json::from_slice(json)
            .map_err(|e| Error::Metadata(format!("malformed sticker payload: {e}")))?;
        return Ok(Some(StickerMetadata {
            pack_name: payload.pack_name,
            author: payload.publisher,
            categories: payload.emojis,
            pack_id: Some(payload.pack_id),
        }));
    }
    Ok(None)
}

fn u16_at(b: &[u8], at: usize) -> Result<u16> {
    b.get(at..at + 2)
        .map(|s| u16::from_le_bytes([s[0], s[1]]))
        .ok_or_else(|| Error::Metadata("truncated EXIF block".into()))
}

fn u32_at(b: &[u8], at: usize) -> Result<u32> {
    b.get(at..at + 4)
        .map(|s| u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
        .ok_or_else(|| Error::Metadata("truncated EXIF block".into()))
}
