//! Whole-store snapshots.
//!
//! File layout:
//! ```text
//! ERPSNAP1\n
//! <64 hex chars: SHA-256 of the JSON payload>\n
//! <LZ4 frame of the JSON payload>
//! ```

use crate::db::Store;
use crate::domain::record::ID_FIELD;
use crate::domain::{Document, RecordId};
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use tracing::info;

pub const MAGIC: &[u8] = b"ERPSNAP1\n";
/// Version 2 added `lastIds`. Version 1 files still load; their counters
/// come from the highest restored id.
pub const FORMAT_VERSION: u32 = 2;

/// Largest decompressed payload [`decode`] accepts.
pub const MAX_PAYLOAD_BYTES: u64 = 256 * 1024 * 1024;

const DIGEST_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub format_version: u32,
    pub taken_at: DateTime<Utc>,
    /// Collection name → documents in id order.
    pub collections: BTreeMap<String, Vec<Document>>,
    /// Collection name → highest id ever assigned, deleted ids included.
    #[serde(default)]
    pub last_ids: BTreeMap<String, i64>,
}

impl Snapshot {
    pub fn document_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub collections: usize,
    pub documents: usize,
}

/// Read every collection of `store`.
pub async fn take_snapshot(store: &dyn Store) -> StoreResult<Snapshot> {
    let mut collections = BTreeMap::new();
    let mut last_ids = BTreeMap::new();
    for name in store.collections().await? {
        let docs = store.scan(&name).await?;
        last_ids.insert(name.clone(), store.last_id(&name).await?);
        collections.insert(name, docs);
    }
    let snapshot = Snapshot {
        format_version: FORMAT_VERSION,
        taken_at: Utc::now(),
        collections,
        last_ids,
    };
    info!(
        collections = snapshot.collections.len(),
        documents = snapshot.document_count(),
        "Took snapshot"
    );
    Ok(snapshot)
}

fn digest_hex(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

pub fn encode(snapshot: &Snapshot) -> StoreResult<Vec<u8>> {
    let payload = serde_json::to_vec(snapshot)?;

    let mut encoder = lz4_flex::frame::FrameEncoder::new(Vec::new());
    encoder
        .write_all(&payload)
        .map_err(|e| StoreError::Backup(format!("lz4 encode: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| StoreError::Backup(format!("lz4 encode: {}", e)))?;

    let mut out = Vec::with_capacity(MAGIC.len() + DIGEST_HEX_LEN + 1 + compressed.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(digest_hex(&payload).as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Parse and verify a snapshot file.
///
/// # Errors
/// [`StoreError::Backup`] for a wrong magic header, a digest mismatch, a
/// corrupt LZ4 frame, a payload over [`MAX_PAYLOAD_BYTES`], or an
/// unsupported format version.
pub fn decode(bytes: &[u8]) -> StoreResult<Snapshot> {
    decode_with_limit(bytes, MAX_PAYLOAD_BYTES)
}

fn decode_with_limit(bytes: &[u8], max_payload: u64) -> StoreResult<Snapshot> {
    let rest = bytes
        .strip_prefix(MAGIC)
        .ok_or_else(|| StoreError::Backup("not a snapshot file".to_string()))?;
    if rest.len() <= DIGEST_HEX_LEN || rest[DIGEST_HEX_LEN] != b'\n' {
        return Err(StoreError::Backup("truncated snapshot header".to_string()));
    }
    let expected = std::str::from_utf8(&rest[..DIGEST_HEX_LEN])
        .map_err(|_| StoreError::Backup("digest is not hex".to_string()))?;

    let decoder = lz4_flex::frame::FrameDecoder::new(&rest[DIGEST_HEX_LEN + 1..]);
    let mut payload = Vec::new();
    decoder
        .take(max_payload.saturating_add(1))
        .read_to_end(&mut payload)
        .map_err(|e| StoreError::Backup(format!("lz4 decode: {}", e)))?;
    if payload.len() as u64 > max_payload {
        return Err(StoreError::Backup(format!(
            "payload exceeds {} bytes",
            max_payload
        )));
    }

    let actual = digest_hex(&payload);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(StoreError::Backup(format!(
            "digest mismatch: expected {}, got {}",
            expected, actual
        )));
    }

    let snapshot: Snapshot = serde_json::from_slice(&payload)?;
    if !(1..=FORMAT_VERSION).contains(&snapshot.format_version) {
        return Err(StoreError::Backup(format!(
            "unsupported format version {}",
            snapshot.format_version
        )));
    }
    Ok(snapshot)
}

/// Write every document back under its original id.
///
/// Existing documents with the same id are replaced; others are left alone.
/// Id counters move forward to the snapshot's values and are never lowered.
pub async fn restore(store: &dyn Store, snapshot: &Snapshot) -> StoreResult<RestoreSummary> {
    let mut summary = RestoreSummary::default();
    for (collection, last_id) in &snapshot.last_ids {
        store.advance_counter(collection, *last_id).await?;
    }
    for (collection, docs) in &snapshot.collections {
        for doc in docs {
            let id = doc
                .get(ID_FIELD)
                .and_then(RecordId::from_value)
                .ok_or_else(|| {
                    StoreError::Backup(format!("document without an id in {}", collection))
                })?;
            store.put(collection, id, doc.clone()).await?;
            summary.documents += 1;
        }
        summary.collections += 1;
    }
    info!(
        collections = summary.collections,
        documents = summary.documents,
        "Restored snapshot"
    );
    Ok(summary)
}
