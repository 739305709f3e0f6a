//! Tests for config slot resolution
//!
//! Covers the singleton rule, the self-check header, and full-table decoding.

#[cfg(test)]
mod tests {
    use crate::codec::{CodecError, build_config_cell_data};
    use crate::config_cell::{ConfigEntry, ConfigResolver, parse_config_table};
    use crate::tx::MockTransaction;
    use crate::tx::fixtures::{
        CONFIG_CELL_TYPE_ID, GOVERNANCE_TYPE_ID, OMNI_LOCK_TYPE_ID, config_cell, plain_lock,
        slot_value,
    };
    use crate::tx::MockCell;
    use crate::types::{ConfigSlot, ValidationError};

    fn tx_with_config_data(data: Vec<u8>) -> MockTransaction {
        MockTransaction::new().cell_dep(config_cell().with_data(data))
    }

    #[test]
    fn test_resolves_every_slot() {
        let tx = MockTransaction::new()
            .cell_dep(MockCell::new(plain_lock()))
            .cell_dep(config_cell());
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);

        assert_eq!(resolver.locate(), Ok(1));
        for slot in ConfigSlot::ALL {
            assert_eq!(resolver.type_id(slot), Ok(slot_value(slot)), "slot {:?}", slot);
        }
        assert_eq!(
            resolver.type_id(ConfigSlot::GovernanceMemberCellTypeId),
            Ok(GOVERNANCE_TYPE_ID)
        );
        assert_eq!(resolver.type_id(ConfigSlot::OmniLockTypeId), Ok(OMNI_LOCK_TYPE_ID));
    }

    #[test]
    fn test_config_cell_must_be_singleton() {
        let tx = MockTransaction::new();
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);
        assert_eq!(
            resolver.type_id(ConfigSlot::OmniLockTypeId),
            Err(ValidationError::ConfigCellCount(0))
        );

        let tx = MockTransaction::new().cell_dep(config_cell()).cell_dep(config_cell());
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);
        assert_eq!(
            resolver.type_id(ConfigSlot::OmniLockTypeId),
            Err(ValidationError::ConfigCellCount(2))
        );
    }

    #[test]
    fn test_header_mismatch_is_encoding_error() {
        let value = [0x42u8; 32];
        // Slot 1 carries header 2
        let data = build_config_cell_data(0, &[(0, &[0u8; 32]), (2, &value)]);
        let tx = tx_with_config_data(data);
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);

        let err = resolver.type_id(ConfigSlot::GovernanceMemberCellTypeId).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Encoding(CodecError::HeaderMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(err.code(), -2);
    }

    #[test]
    fn test_round_trip_returns_payload_unchanged() {
        let value: Vec<u8> = (0u8..32).collect();
        let data = build_config_cell_data(0, &[(0, &[0u8; 32]), (1, &value)]);
        let tx = tx_with_config_data(data);
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);

        let type_id = resolver.type_id(ConfigSlot::GovernanceMemberCellTypeId).unwrap();
        assert_eq!(type_id.to_vec(), value);
    }

    #[test]
    fn test_missing_slot_and_short_value() {
        let data = build_config_cell_data(0, &[(0, &[0u8; 32]), (1, &[1u8; 8])]);
        let tx = tx_with_config_data(data);
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);

        assert_eq!(
            resolver.type_id(ConfigSlot::TickCellTypeId),
            Err(ValidationError::Encoding(CodecError::IndexOutOfBound))
        );
        assert_eq!(
            resolver.type_id(ConfigSlot::GovernanceMemberCellTypeId),
            Err(ValidationError::Encoding(CodecError::TotalSize))
        );
    }

    #[test]
    fn test_malformed_vector_and_empty_data() {
        let tx = tx_with_config_data(vec![0, 9, 9, 9]);
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);
        assert!(matches!(
            resolver.type_id(ConfigSlot::SystemStatus),
            Err(ValidationError::Encoding(_))
        ));

        let tx = tx_with_config_data(vec![]);
        let resolver = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID);
        assert_eq!(
            resolver.type_id(ConfigSlot::SystemStatus),
            Err(ValidationError::Encoding(CodecError::Header))
        );
    }

    #[test]
    fn test_parse_table_skips_unknown_keys() {
        let data = build_config_cell_data(0, &[(0, &[1]), (99, &[2, 2]), (11, &[3; 32])]);
        let entries = parse_config_table(&data).unwrap();

        assert_eq!(
            entries,
            vec![
                ConfigEntry {
                    slot: ConfigSlot::SystemStatus,
                    value: vec![1],
                },
                ConfigEntry {
                    slot: ConfigSlot::OmniLockTypeId,
                    value: vec![3; 32],
                },
            ]
        );
    }

    #[test]
    fn test_parse_table_rejects_unknown_version() {
        let data = build_config_cell_data(1, &[(0, &[1])]);
        assert_eq!(parse_config_table(&data), Err(ValidationError::NotSupported));
        assert_eq!(
            parse_config_table(&[]),
            Err(ValidationError::Encoding(CodecError::Header))
        );
    }

    #[test]
    fn test_resolver_entries_match_fixture() {
        let tx = MockTransaction::new().cell_dep(config_cell());
        let entries = ConfigResolver::new(&tx, CONFIG_CELL_TYPE_ID).entries().unwrap();

        assert_eq!(entries.len(), ConfigSlot::ALL.len());
        for entry in entries {
            assert_eq!(entry.value, slot_value(entry.slot).to_vec());
        }
    }
}
