/// Read length capacity used when none is configured.
pub const DEFAULT_MAX_LENGTH: usize = 100_000;

pub const NUM_BASES: usize = 5;
pub const NUM_QUALS: usize = 256;

pub type BaseHist = [u64; NUM_BASES];
pub type QualHist = [u64; NUM_QUALS];

/// Sequence alphabet. Discriminants are the dense counter indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
    N = 4,
}

impl Base {
    /// Maps a sequence byte to its base; lowercase is folded to uppercase.
    #[inline]
    pub fn from_byte(b: u8) -> Option<Base> {
        match b & 0xDF {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            b'N' => Some(Base::N),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhredOffset {
    Sanger,
    Illumina15,
}

impl PhredOffset {
    pub fn value(self) -> u8 {
        match self {
            PhredOffset::Sanger => 33,
            PhredOffset::Illumina15 => 64,
        }
    }
}

/// Nearest integer, ties away from zero.
#[inline]
pub fn round_half_away(v: f64) -> i64 {
    v.round() as i64
}
