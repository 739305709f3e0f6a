//! `GovernanceMembers` table, laid out the way molecule's generated schemas are:
//!
//! ```mol
//! table GovernanceMembers {
//!     parent_id: Bytes,
//!     members: BytesVec,
//!     multisig_args: Bytes,
//!     lock_args: Bytes,
//! }
//! ```

use ckb_gen_types::packed::{Bytes, BytesReader, BytesVec, BytesVecReader};
use molecule::error::{VerificationError, VerificationResult};
use molecule::prelude::{Builder, Entity, Reader};
use molecule::{NUMBER_SIZE, Number, pack_number, unpack_number};

#[derive(Debug, Clone)]
pub struct GovernanceMembers(molecule::bytes::Bytes);

impl Default for GovernanceMembers {
    fn default() -> Self {
        GovernanceMembersBuilder::default().build()
    }
}

impl GovernanceMembers {
    pub const FIELD_COUNT: usize = 4;

    pub fn total_size(&self) -> usize {
        unpack_number(self.as_slice()) as usize
    }

    pub fn field_count(&self) -> usize {
        field_count(self.as_slice())
    }

    pub fn has_extra_fields(&self) -> bool {
        Self::FIELD_COUNT != self.field_count()
    }

    pub fn parent_id(&self) -> Bytes {
        Bytes::new_unchecked(self.field(0))
    }

    pub fn members(&self) -> BytesVec {
        BytesVec::new_unchecked(self.field(1))
    }

    pub fn multisig_args(&self) -> Bytes {
        Bytes::new_unchecked(self.field(2))
    }

    pub fn lock_args(&self) -> Bytes {
        Bytes::new_unchecked(self.field(3))
    }

    pub fn as_reader(&self) -> GovernanceMembersReader<'_> {
        GovernanceMembersReader::new_unchecked(self.as_slice())
    }

    fn field(&self, index: usize) -> molecule::bytes::Bytes {
        let (start, end) = field_range(self.as_slice(), index);
        self.0.slice(start..end)
    }
}

impl Entity for GovernanceMembers {
    type Builder = GovernanceMembersBuilder;
    const NAME: &'static str = "GovernanceMembers";

    fn new_unchecked(data: molecule::bytes::Bytes) -> Self {
        GovernanceMembers(data)
    }

    fn as_bytes(&self) -> molecule::bytes::Bytes {
        self.0.clone()
    }

    fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    fn from_slice(slice: &[u8]) -> VerificationResult<Self> {
        GovernanceMembersReader::from_slice(slice).map(|reader| reader.to_entity())
    }

    fn from_compatible_slice(slice: &[u8]) -> VerificationResult<Self> {
        GovernanceMembersReader::from_compatible_slice(slice).map(|reader| reader.to_entity())
    }

    fn new_builder() -> Self::Builder {
        Default::default()
    }

    fn as_builder(self) -> Self::Builder {
        Self::new_builder()
            .parent_id(self.parent_id())
            .members(self.members())
            .multisig_args(self.multisig_args())
            .lock_args(self.lock_args())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GovernanceMembersReader<'r>(&'r [u8]);

impl<'r> GovernanceMembersReader<'r> {
    pub const FIELD_COUNT: usize = 4;

    pub fn field_count(&self) -> usize {
        field_count(self.0)
    }

    pub fn has_extra_fields(&self) -> bool {
        Self::FIELD_COUNT != self.field_count()
    }

    pub fn parent_id(&self) -> BytesReader<'r> {
        BytesReader::new_unchecked(self.field(0))
    }

    pub fn members(&self) -> BytesVecReader<'r> {
        BytesVecReader::new_unchecked(self.field(1))
    }

    pub fn multisig_args(&self) -> BytesReader<'r> {
        BytesReader::new_unchecked(self.field(2))
    }

    /// Lock args a presented credential must carry to act as governance.
    pub fn lock_args(&self) -> BytesReader<'r> {
        BytesReader::new_unchecked(self.field(3))
    }

    fn field(&self, index: usize) -> &'r [u8] {
        let (start, end) = field_range(self.0, index);
        &self.0[start..end]
    }
}

impl<'r> Reader<'r> for GovernanceMembersReader<'r> {
    type Entity = GovernanceMembers;
    const NAME: &'static str = "GovernanceMembersReader";

    fn to_entity(&self) -> Self::Entity {
        GovernanceMembers::new_unchecked(self.as_slice().to_owned().into())
    }

    fn new_unchecked(slice: &'r [u8]) -> Self {
        GovernanceMembersReader(slice)
    }

    fn as_slice(&self) -> &'r [u8] {
        self.0
    }

    fn verify(slice: &[u8], compatible: bool) -> VerificationResult<()> {
        let slice_len = slice.len();
        if slice_len < NUMBER_SIZE {
            return Err(VerificationError::HeaderIsBroken(Self::NAME.to_owned(), NUMBER_SIZE, slice_len));
        }
        let total_size = unpack_number(slice) as usize;
        if slice_len != total_size {
            return Err(VerificationError::TotalSizeNotMatch(Self::NAME.to_owned(), total_size, slice_len));
        }
        if slice_len < NUMBER_SIZE * 2 {
            return Err(VerificationError::HeaderIsBroken(Self::NAME.to_owned(), NUMBER_SIZE * 2, slice_len));
        }

        let offset_first = unpack_number(&slice[NUMBER_SIZE..]) as usize;
        if offset_first % NUMBER_SIZE != 0 || offset_first < NUMBER_SIZE * 2 {
            return Err(VerificationError::OffsetsNotMatch(Self::NAME.to_owned()));
        }
        if slice_len < offset_first {
            return Err(VerificationError::HeaderIsBroken(Self::NAME.to_owned(), offset_first, slice_len));
        }

        let field_count = offset_first / NUMBER_SIZE - 1;
        if field_count < Self::FIELD_COUNT || (!compatible && field_count > Self::FIELD_COUNT) {
            return Err(VerificationError::FieldCountNotMatch(
                Self::NAME.to_owned(),
                Self::FIELD_COUNT,
                field_count,
            ));
        }

        let mut offsets: Vec<usize> = slice[NUMBER_SIZE..offset_first]
            .chunks_exact(NUMBER_SIZE)
            .map(|number| unpack_number(number) as usize)
            .collect();
        offsets.push(total_size);
        if offsets.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(VerificationError::OffsetsNotMatch(Self::NAME.to_owned()));
        }

        BytesReader::verify(&slice[offsets[0]..offsets[1]], compatible)?;
        BytesVecReader::verify(&slice[offsets[1]..offsets[2]], compatible)?;
        BytesReader::verify(&slice[offsets[2]..offsets[3]], compatible)?;
        BytesReader::verify(&slice[offsets[3]..offsets[4]], compatible)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct GovernanceMembersBuilder {
    pub(crate) parent_id: Bytes,
    pub(crate) members: BytesVec,
    pub(crate) multisig_args: Bytes,
    pub(crate) lock_args: Bytes,
}

impl GovernanceMembersBuilder {
    pub const FIELD_COUNT: usize = 4;

    pub fn parent_id(mut self, v: Bytes) -> Self {
        self.parent_id = v;
        self
    }

    pub fn members(mut self, v: BytesVec) -> Self {
        self.members = v;
        self
    }

    pub fn multisig_args(mut self, v: Bytes) -> Self {
        self.multisig_args = v;
        self
    }

    pub fn lock_args(mut self, v: Bytes) -> Self {
        self.lock_args = v;
        self
    }

    fn fields(&self) -> [&[u8]; 4] {
        [
            self.parent_id.as_slice(),
            self.members.as_slice(),
            self.multisig_args.as_slice(),
            self.lock_args.as_slice(),
        ]
    }
}

impl Builder for GovernanceMembersBuilder {
    type Entity = GovernanceMembers;
    const NAME: &'static str = "GovernanceMembersBuilder";

    fn expected_length(&self) -> usize {
        NUMBER_SIZE * (Self::FIELD_COUNT + 1) + self.fields().iter().map(|field| field.len()).sum::<usize>()
    }

    fn write<W: molecule::io::Write>(&self, writer: &mut W) -> molecule::io::Result<()> {
        let fields = self.fields();
        let mut total_size = NUMBER_SIZE * (Self::FIELD_COUNT + 1);
        let mut offsets = Vec::with_capacity(Self::FIELD_COUNT);
        for field in fields {
            offsets.push(total_size);
            total_size += field.len();
        }

        writer.write_all(&pack_number(total_size as Number))?;
        for offset in offsets {
            writer.write_all(&pack_number(offset as Number))?;
        }
        for field in fields {
            writer.write_all(field)?;
        }
        Ok(())
    }

    fn build(&self) -> Self::Entity {
        let mut inner = Vec::with_capacity(self.expected_length());
        self.write(&mut inner)
            .unwrap_or_else(|_| panic!("{} build should be ok", Self::NAME));
        GovernanceMembers::new_unchecked(inner.into())
    }
}

/// Field count of a verified table.
fn field_count(slice: &[u8]) -> usize {
    if unpack_number(slice) as usize == NUMBER_SIZE {
        0
    } else {
        unpack_number(&slice[NUMBER_SIZE..]) as usize / NUMBER_SIZE - 1
    }
}

/// Byte range of field `index` in a verified table; trailing extra fields are excluded.
fn field_range(slice: &[u8], index: usize) -> (usize, usize) {
    let start = unpack_number(&slice[NUMBER_SIZE * (index + 1)..]) as usize;
    let end = if index + 1 < field_count(slice) {
        unpack_number(&slice[NUMBER_SIZE * (index + 2)..]) as usize
    } else {
        slice.len()
    };
    (start, end)
}
