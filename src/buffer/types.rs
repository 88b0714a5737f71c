//! Buffer envelope wire types.

use serde::{Deserialize, Serialize};

/// Element byte order of a buffer payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
}

impl ByteOrder {
    /// Byte order of the running machine.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }
}

/// By-reference payload: `{"$ref": "<id>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferRef {
    /// Opaque id of the referenced buffer.
    #[serde(rename = "$ref")]
    pub id: String,
}

/// Payload of a [`BufferEnvelope`]: inline base64 or a reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BufferData {
    /// Base64-encoded element bytes.
    Inline(String),
    /// Reference to a buffer carried out of band.
    Reference(BufferRef),
}

/// Wire description of a binary array transfer.
///
/// ```json
/// {"array": "AACAPwAAAEA=", "shape": [2], "dtype": "float32", "order": "little"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferEnvelope {
    /// Element bytes (base64) or a reference to them.
    pub array: BufferData,
    /// Array shape.
    pub shape: Vec<usize>,
    /// dtype tag, e.g. `float32`.
    pub dtype: String,
    /// Byte order of the elements.
    pub order: ByteOrder,
}
