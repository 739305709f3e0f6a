//! Tests for the codec
//!
//! Error mapping from molecule verification, the governance membership table,
//! and the builders the fixtures rely on.

#[cfg(test)]
mod tests {
    use molecule::error::VerificationResult;
    use molecule::prelude::{Builder, Entity, Reader};

    use crate::codec::{
        BytesVec, BytesVecReader, CodecError, GovernanceMembers, GovernanceMembersReader,
        NUMBER_SIZE, SCRIPT_CODE_HASH_OFFSET, SCRIPT_HASH_TYPE_OFFSET, ScriptReader,
        build_config_cell_data, build_governance_members, build_script, pack_bytes,
    };

    const CODE_HASH: [u8; 32] = [7u8; 32];

    fn codec_error<T>(result: VerificationResult<T>) -> CodecError {
        match result {
            Ok(_) => panic!("verification unexpectedly passed"),
            Err(err) => err.into(),
        }
    }

    /// Table layout from already-serialized fields.
    fn table(fields: &[&[u8]]) -> Vec<u8> {
        let header = NUMBER_SIZE * (fields.len() + 1);
        let total = header + fields.iter().map(|field| field.len()).sum::<usize>();
        let mut out = (total as u32).to_le_bytes().to_vec();
        let mut offset = header;
        for field in fields {
            out.extend_from_slice(&(offset as u32).to_le_bytes());
            offset += field.len();
        }
        for field in fields {
            out.extend_from_slice(field);
        }
        out
    }

    #[test]
    fn test_script_accessors_after_verify() {
        let script = build_script(&CODE_HASH, 1, b"owner-args");
        let bytes = script.as_slice();
        let reader = ScriptReader::from_slice(bytes).unwrap();

        assert_eq!(reader.code_hash().raw_data(), &CODE_HASH);
        assert_eq!(reader.hash_type().as_slice(), &[1]);
        assert_eq!(reader.args().raw_data(), b"owner-args");

        // The scanner reads the raw offsets without a reader.
        assert_eq!(&bytes[SCRIPT_CODE_HASH_OFFSET..SCRIPT_HASH_TYPE_OFFSET], &CODE_HASH);
        assert_eq!(bytes[SCRIPT_HASH_TYPE_OFFSET], 1);
    }

    #[test]
    fn test_total_size_mismatch() {
        let mut script = build_script(&CODE_HASH, 1, b"abc").as_slice().to_vec();
        script.push(0);
        assert_eq!(codec_error(ScriptReader::verify(&script, false)), CodecError::TotalSize);
    }

    #[test]
    fn test_short_span_is_header_error() {
        assert_eq!(codec_error(ScriptReader::verify(&[1, 0], false)), CodecError::Header);
        assert_eq!(
            codec_error(ScriptReader::verify(&[6, 0, 0, 0, 0, 0], false)),
            CodecError::Header
        );
    }

    #[test]
    fn test_malformed_offsets() {
        let items = BytesVec::new_builder()
            .push(pack_bytes(b"abcd"))
            .push(pack_bytes(b"b"))
            .build();

        // First offset 12 -> 13
        let mut unaligned = items.as_slice().to_vec();
        unaligned[4] = 13;
        assert_eq!(codec_error(BytesVecReader::verify(&unaligned, false)), CodecError::Offset);

        // Second offset points before the first one
        let mut decreasing = items.as_slice().to_vec();
        decreasing[8..12].copy_from_slice(&8u32.to_le_bytes());
        assert_eq!(codec_error(BytesVecReader::verify(&decreasing, false)), CodecError::Offset);
    }

    #[test]
    fn test_nested_item_error_surfaces() {
        // One item claiming 5 bytes but carrying 1
        let vec = [13u8, 0, 0, 0, 8, 0, 0, 0, 5, 0, 0, 0, 9];
        assert_eq!(codec_error(BytesVecReader::verify(&vec, false)), CodecError::TotalSize);
    }

    #[test]
    fn test_strict_and_compatible_field_count() {
        let code_hash = CODE_HASH;
        let args = pack_bytes(b"args");
        let future = pack_bytes(b"future field");
        let extended = table(&[&code_hash[..], &[1u8][..], args.as_slice(), future.as_slice()]);

        assert_eq!(codec_error(ScriptReader::verify(&extended, false)), CodecError::FieldCount);
        let reader = ScriptReader::from_compatible_slice(&extended).unwrap();
        assert_eq!(reader.args().raw_data(), b"args");

        let truncated = table(&[&code_hash[..], &[1u8][..]]);
        assert_eq!(codec_error(ScriptReader::verify(&truncated, true)), CodecError::FieldCount);
    }

    #[test]
    fn test_empty_vector() {
        let empty = BytesVec::default();
        let reader = BytesVecReader::from_slice(empty.as_slice()).unwrap();
        assert_eq!(reader.len(), 0);
        assert!(reader.is_empty());
        assert!(reader.get(0).is_none());
    }

    #[test]
    fn test_governance_members_round_trip() {
        let record = build_governance_members(b"parent", &[&[1u8; 20][..], &[2u8; 20][..]], &[0, 1, 2], b"lock");
        let reader = GovernanceMembersReader::from_slice(record.as_slice()).unwrap();

        assert_eq!(reader.field_count(), GovernanceMembersReader::FIELD_COUNT);
        assert!(!reader.has_extra_fields());
        assert_eq!(reader.parent_id().raw_data(), b"parent");
        assert_eq!(reader.members().len(), 2);
        assert_eq!(reader.members().get(1).unwrap().raw_data(), &[2u8; 20]);
        assert_eq!(reader.multisig_args().raw_data(), &[0, 1, 2]);
        assert_eq!(reader.lock_args().raw_data(), b"lock");

        let entity = GovernanceMembers::from_slice(record.as_slice()).unwrap();
        assert_eq!(entity.total_size(), record.as_slice().len());
        assert_eq!(entity.lock_args().as_slice(), pack_bytes(b"lock").as_slice());
        assert_eq!(entity.as_builder().build().as_slice(), record.as_slice());
    }

    #[test]
    fn test_default_governance_members_verify() {
        let record = GovernanceMembers::default();
        let reader = GovernanceMembersReader::from_slice(record.as_slice()).unwrap();
        assert!(reader.lock_args().raw_data().is_empty());
        assert!(reader.members().is_empty());
    }

    #[test]
    fn test_governance_members_extra_field() {
        let parent = pack_bytes(b"");
        let members = BytesVec::default();
        let multisig = pack_bytes(b"");
        let lock = pack_bytes(b"args");
        let extra = pack_bytes(b"appended later");
        let record = table(&[
            parent.as_slice(),
            members.as_slice(),
            multisig.as_slice(),
            lock.as_slice(),
            extra.as_slice(),
        ]);

        assert_eq!(
            codec_error(GovernanceMembersReader::verify(&record, false)),
            CodecError::FieldCount
        );
        let reader = GovernanceMembersReader::from_compatible_slice(&record).unwrap();
        assert!(reader.has_extra_fields());
        assert_eq!(reader.lock_args().raw_data(), b"args");
    }

    #[test]
    fn test_governance_members_bad_nested_vector() {
        let empty = pack_bytes(b"");
        let not_a_vector = pack_bytes(b"not a vector");
        let lock = pack_bytes(b"args");
        let record = table(&[empty.as_slice(), not_a_vector.as_slice(), empty.as_slice(), lock.as_slice()]);

        assert_eq!(
            codec_error(GovernanceMembersReader::verify(&record, false)),
            CodecError::TotalSize
        );
    }

    #[test]
    fn test_raw_script_offsets_agree_with_reader_under_mutation() {
        let script = build_script(&CODE_HASH, 1, b"some args").as_slice().to_vec();
        for position in 0..script.len() {
            for flip in [0x01u8, 0x80, 0xff] {
                let mut mutated = script.clone();
                mutated[position] ^= flip;
                if let Ok(reader) = ScriptReader::from_slice(&mutated) {
                    assert_eq!(
                        reader.code_hash().raw_data(),
                        &mutated[SCRIPT_CODE_HASH_OFFSET..SCRIPT_HASH_TYPE_OFFSET]
                    );
                    assert_eq!(reader.hash_type().as_slice()[0], mutated[SCRIPT_HASH_TYPE_OFFSET]);
                }
            }
        }
    }

    #[test]
    fn test_truncated_governance_members_never_verify() {
        let record = build_governance_members(b"parent", &[&[1u8; 20][..]], &[0, 1, 1], b"lock");
        let bytes = record.as_slice();
        for len in 0..bytes.len() {
            assert!(GovernanceMembersReader::verify(&bytes[..len], true).is_err(), "len = {}", len);
        }
    }

    #[test]
    fn test_config_cell_data_layout() {
        let data = build_config_cell_data(0, &[(0, &[0xaa; 2]), (5, &[0xbb; 32])]);
        assert_eq!(data[0], 0);

        let table = BytesVecReader::from_slice(&data[1..]).unwrap();
        assert_eq!(table.len(), 2);
        let second = table.get(1).unwrap().raw_data();
        assert_eq!(&second[..NUMBER_SIZE], &5u32.to_le_bytes());
        assert_eq!(&second[NUMBER_SIZE..], &[0xbb; 32]);
    }
}
