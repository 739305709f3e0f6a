use molecule::prelude::Reader;
use tracing::warn;

use crate::codec::{CodecError, GovernanceMembersReader};
use crate::types::{GOVERNANCE_CELL_CURRENT_VERSION, ValidationError};

/// Decodes governance member cell data: `[version][GovernanceMembers]`.
///
/// Any version other than the current one is a hard rejection. Fields appended
/// by newer record layouts are tolerated.
pub fn parse_governance_data(data: &[u8]) -> Result<GovernanceMembersReader<'_>, ValidationError> {
    let (&version, record) = data.split_first().ok_or(CodecError::Header)?;
    if version > GOVERNANCE_CELL_CURRENT_VERSION {
        warn!(version, "unsupported governance cell version");
        return Err(ValidationError::GovernanceVersion(version));
    }
    Ok(GovernanceMembersReader::from_compatible_slice(record)?)
}
