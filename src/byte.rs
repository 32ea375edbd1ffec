use thiserror::Error;

/// A byte that was expected to carry a leading 0 bit but didn't.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a valid data byte (0-127)")]
pub struct DataByteError(pub u32);

#[doc = r#"
A 7-bit value as found in the data bytes of a channel message.

Notes and velocities are both data bytes. The leading bit of
a data byte is always 0, which is what separates it from a status byte.

# Example
```rust
# use neuro_midi::prelude::*;
let byte = DataByte::new(64).unwrap();
assert_eq!(byte.value(), 64);

assert!(DataByte::new(128).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// The largest representable data byte.
    pub const MAX: Self = Self(127);

    /// Checks for correctness (leading 0 bit).
    pub const fn new(byte: u8) -> Result<Self, DataByteError> {
        if byte > 127 {
            return Err(DataByteError(byte as u32));
        }
        Ok(Self(byte))
    }

    /// Does not check the leading bit. Only masks it off.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Returns the underlying value
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = DataByteError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u32> for DataByte {
    type Error = DataByteError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DataByteError(value))
            .and_then(Self::new)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

#[test]
fn data_byte_bounds() {
    assert_eq!(DataByte::new(0).unwrap().value(), 0);
    assert_eq!(DataByte::new(127).unwrap(), DataByte::MAX);
    assert_eq!(DataByte::new(128), Err(DataByteError(128)));
    assert_eq!(DataByte::try_from(300u32), Err(DataByteError(300)));
}

#[test]
fn unchecked_masks_leading_bit() {
    assert_eq!(DataByte::new_unchecked(0x80 | 5).value(), 5);
}
