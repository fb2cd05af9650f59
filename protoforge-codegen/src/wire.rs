//! Wire-format framing constants.
//!
//! A field occurrence on the wire is framed by a single varint tag that
//! packs the declared field number together with a wire type. The wire
//! type is fully determined by the field's kind; encode and decode share
//! this table so the two sides cannot drift apart.

/// Wire type selector, the low three bits of a framing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WireType {
    /// Varint-coded payload.
    Varint = 0,
    /// Eight fixed bytes.
    Fixed64 = 1,
    /// Varint length prefix followed by that many bytes.
    LengthDelimited = 2,
    /// Group start marker; fields follow until the matching end marker.
    StartGroup = 3,
    /// Group end marker.
    EndGroup = 4,
    /// Four fixed bytes.
    Fixed32 = 5,
}

impl WireType {
    /// Returns the numeric selector value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

/// Number of bits the field number is shifted past the wire type.
pub const TAG_TYPE_BITS: u32 = 3;

/// Builds the framing tag for a field number and wire type.
#[must_use]
pub const fn make_tag(field_number: u32, wire_type: WireType) -> u32 {
    (field_number << TAG_TYPE_BITS) | wire_type.value()
}
