// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request fingerprints (SHA256 cache keys).

use crate::types::QuoteRequest;
use sha2::{Digest, Sha256};

/// Derive the cache key for a quote request.
///
/// Covers every quote-affecting parameter: file name and size, material,
/// quality, infill, rotation and scale. The file body itself is identified
/// by name and size rather than hashed; re-uploading a different file under
/// the same name and size is indistinguishable by design, matching the
/// upload widget which renames on collision.
pub fn request_fingerprint(request: &QuoteRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.file_name.as_bytes());
    hasher.update([0u8]);
    hasher.update((request.file_bytes.len() as u64).to_le_bytes());
    hasher.update(request.material_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.quality_mm.to_le_bytes());
    hasher.update(u64::from(request.infill_percent).to_le_bytes());
    for component in request.rotation {
        hasher.update(component.to_le_bytes());
    }
    hasher.update(request.scale_factor.to_le_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn request() -> QuoteRequest {
        QuoteRequest {
            file_name: "bracket.stl".to_string(),
            file_bytes: Bytes::from_static(b"not a real stl"),
            material_id: "PLA".to_string(),
            quality_mm: 0.2,
            infill_percent: 15,
            rotation: [0.0, 0.0, 0.0],
            scale_factor: 1.0,
        }
    }

    #[test]
    fn test_identical_requests_share_fingerprint() {
        assert_eq!(request_fingerprint(&request()), request_fingerprint(&request()));
    }

    #[test]
    fn test_each_parameter_changes_fingerprint() {
        let base = request_fingerprint(&request());

        let mut changed = request();
        changed.file_name = "bracket_v2.stl".into();
        assert_ne!(request_fingerprint(&changed), base);

        let mut changed = request();
        changed.file_bytes = Bytes::from_static(b"a longer payload than before");
        assert_ne!(request_fingerprint(&changed), base);

        let mut changed = request();
        changed.material_id = "PETG".into();
        assert_ne!(request_fingerprint(&changed), base);

        let mut changed = request();
        changed.quality_mm = 0.12;
        assert_ne!(request_fingerprint(&changed), base);

        let mut changed = request();
        changed.infill_percent = 40;
        assert_ne!(request_fingerprint(&changed), base);

        let mut changed = request();
        changed.scale_factor = 0.76;
        assert_ne!(request_fingerprint(&changed), base);
    }

    #[test]
    fn test_same_size_different_bytes_collide() {
        // Deliberate: content is identified by (name, size) only
        let a = request();
        let mut b = request();
        b.file_bytes = Bytes::from_static(b"14 bytes here!");
        assert_eq!(b.file_bytes.len(), a.file_bytes.len());
        assert_eq!(request_fingerprint(&a), request_fingerprint(&b));
    }
}
