use crate::{DataByte, DataByteError};

#[doc = r#"
The velocity of a note-on or note-off message, 0-127.

The converter emits every note of a recording at the same velocity.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity(DataByte);

impl Velocity {
    /// Velocity used when nothing else is asked for.
    pub const DEFAULT: Self = Self(DataByte(64));

    /// Checks for correctness (leading 0 bit).
    pub fn new<B>(rep: B) -> Result<Self, DataByteError>
    where
        B: TryInto<DataByte, Error = DataByteError>,
    {
        rep.try_into().map(Self)
    }

    /// Returns the underlying byte
    pub const fn byte(&self) -> u8 {
        self.0.0
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn velocity_bounds() {
    assert_eq!(Velocity::default().byte(), 64);
    assert_eq!(Velocity::new(127u8).unwrap().byte(), 127);
    assert!(Velocity::new(200u8).is_err());
}
