use bitflags::bitflags;

bitflags! {
    /// Set of fraction precisions referenced by a pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FractionUnits: u8 {
        const MILLISECOND = 1 << 0;
        const MICROSECOND = 1 << 1;
        const NANOSECOND = 1 << 2;
    }
}

/// Two-character marker that introduces a fraction token.
pub const FRACTION_MARKER: &str = "%f";

/// Digit width and nanosecond divisor per precision class, indexed by
/// `Precision::index`.
pub const PRECISION_TABLE: [(usize, u32); 3] = [(3, 1_000_000), (6, 1_000), (9, 1)];

pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Marker returned in place of a failed render when errors are not thrown.
pub const DEFAULT_INVALID: &str = "######";

/// Upper bound for the strftime output buffer.
pub const MAX_RENDER_BUFFER: usize = 64 * 1024;
