//! In-memory transaction described as JSON.
//!
//! Scripts are held structurally and serialized with the codec builders on
//! every load, the same bytes a host would hand out. The group sources are the
//! inputs/outputs whose type script equals `script_group`.
//!
//! ```json
//! {
//!   "cell_deps": [{ "lock": { "code_hash": "0x..", "args": "0x" }, "type": { .. }, "data": "0x.." }],
//!   "inputs": [{ "since": 0, "lock": { .. }, "data": "0x.." }],
//!   "outputs": [{ "lock": { .. }, "data": "0x.." }],
//!   "witnesses": ["0x", "0x00726571756573745f6d696e74"],
//!   "script_group": { "code_hash": "0x..", "hash_type": "type", "args": "0x.." }
//! }
//! ```

use molecule::prelude::Entity;
use serde::{Deserialize, Serialize};

use super::{TransactionData, partial_copy};
use crate::codec::build_script;
use crate::types::{Byte32, CellField, ScriptHashType, Source, SysError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockScript {
    #[serde(with = "hex_byte32")]
    pub code_hash: Byte32,
    #[serde(default)]
    pub hash_type: ScriptHashType,
    #[serde(default, with = "hex_bytes")]
    pub args: Vec<u8>,
}

impl MockScript {
    pub fn new(code_hash: Byte32, hash_type: ScriptHashType, args: impl Into<Vec<u8>>) -> Self {
        Self {
            code_hash,
            hash_type,
            args: args.into(),
        }
    }

    /// Serialized form, as returned for the lock/type cell fields.
    pub fn to_bytes(&self) -> Vec<u8> {
        build_script(&self.code_hash, self.hash_type.as_byte(), &self.args)
            .as_slice()
            .to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockCell {
    #[serde(default)]
    pub capacity: u64,
    pub lock: MockScript,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<MockScript>,
    #[serde(default, with = "hex_bytes")]
    pub data: Vec<u8>,
}

impl MockCell {
    pub fn new(lock: MockScript) -> Self {
        Self {
            capacity: 0,
            lock,
            type_: None,
            data: Vec::new(),
        }
    }

    pub fn with_type(mut self, type_: MockScript) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockInput {
    #[serde(default)]
    pub since: u64,
    #[serde(flatten)]
    pub cell: MockCell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockTransaction {
    #[serde(default)]
    pub cell_deps: Vec<MockCell>,
    #[serde(default)]
    pub inputs: Vec<MockInput>,
    #[serde(default)]
    pub outputs: Vec<MockCell>,
    #[serde(default, with = "hex_list")]
    pub witnesses: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_group: Option<MockScript>,
}

impl MockTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_script_group(mut self, script: MockScript) -> Self {
        self.script_group = Some(script);
        self
    }

    pub fn cell_dep(mut self, cell: MockCell) -> Self {
        self.cell_deps.push(cell);
        self
    }

    pub fn input(mut self, cell: MockCell) -> Self {
        self.inputs.push(MockInput { since: 0, cell });
        self
    }

    pub fn output(mut self, cell: MockCell) -> Self {
        self.outputs.push(cell);
        self
    }

    pub fn witness(mut self, witness: impl Into<Vec<u8>>) -> Self {
        self.witnesses.push(witness.into());
        self
    }

    fn in_group(&self, cell: &MockCell) -> bool {
        match &self.script_group {
            Some(group) => cell.type_.as_ref() == Some(group),
            None => false,
        }
    }

    /// Position in `inputs` of the `index`-th group input.
    fn group_input_position(&self, index: usize) -> Option<usize> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| self.in_group(&input.cell))
            .nth(index)
            .map(|(position, _)| position)
    }

    fn group_output_position(&self, index: usize) -> Option<usize> {
        self.outputs
            .iter()
            .enumerate()
            .filter(|(_, cell)| self.in_group(cell))
            .nth(index)
            .map(|(position, _)| position)
    }

    fn cell(&self, index: usize, source: Source) -> Result<&MockCell, SysError> {
        let cell = match source {
            Source::Input => self.inputs.get(index).map(|input| &input.cell),
            Source::Output => self.outputs.get(index),
            Source::CellDep => self.cell_deps.get(index),
            Source::GroupInput => self
                .group_input_position(index)
                .map(|position| &self.inputs[position].cell),
            Source::GroupOutput => self
                .group_output_position(index)
                .map(|position| &self.outputs[position]),
        };
        cell.ok_or(SysError::IndexOutOfBound)
    }
}

impl TransactionData for MockTransaction {
    fn load_cell_field(
        &self,
        buf: &mut [u8],
        index: usize,
        source: Source,
        field: CellField,
    ) -> Result<usize, SysError> {
        let cell = self.cell(index, source)?;
        let bytes = match field {
            CellField::Capacity => cell.capacity.to_le_bytes().to_vec(),
            CellField::Lock => cell.lock.to_bytes(),
            CellField::Type => cell.type_.as_ref().ok_or(SysError::ItemMissing)?.to_bytes(),
        };
        Ok(partial_copy(buf, &bytes))
    }

    fn load_cell_data(&self, buf: &mut [u8], index: usize, source: Source) -> Result<usize, SysError> {
        let cell = self.cell(index, source)?;
        Ok(partial_copy(buf, &cell.data))
    }

    fn load_witness(&self, buf: &mut [u8], index: usize, source: Source) -> Result<usize, SysError> {
        let position = match source {
            Source::Input | Source::Output => Some(index),
            Source::GroupInput => self.group_input_position(index),
            Source::GroupOutput => self.group_output_position(index),
            Source::CellDep => None,
        };
        let witness = position
            .and_then(|position| self.witnesses.get(position))
            .ok_or(SysError::IndexOutOfBound)?;
        Ok(partial_copy(buf, witness))
    }

    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, SysError> {
        let position = match source {
            Source::Input => Some(index),
            Source::GroupInput => self.group_input_position(index),
            _ => None,
        };
        position
            .and_then(|position| self.inputs.get(position))
            .map(|input| input.since)
            .ok_or(SysError::IndexOutOfBound)
    }
}

fn decode_hex(value: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value))
}

fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_hex(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::decode_hex(&value).map_err(de::Error::custom)
    }
}

mod hex_byte32 {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::types::{Byte32, byte32_from_hex};

    pub fn serialize<S: Serializer>(bytes: &Byte32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode_hex(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Byte32, D::Error> {
        let value = String::deserialize(deserializer)?;
        byte32_from_hex(&value).map_err(de::Error::custom)
    }
}

mod hex_list {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&super::encode_hex(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let values = Vec::<String>::deserialize(deserializer)?;
        values
            .iter()
            .map(|value| super::decode_hex(value).map_err(de::Error::custom))
            .collect()
    }
}
