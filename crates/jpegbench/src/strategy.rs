use std::fmt;

/// A decoding path compared by the benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Deserialize a previously stored image array. Lower bound, no JPEG decoding involved.
    ArrayLoad,
    /// Decode with the reference imaging library. Baseline for speed and correctness.
    Reference,
    /// Decode into a caller supplied buffer.
    ZeroCopy,
    /// Decode into a newly allocated buffer.
    Copying,
    /// Reduced accuracy decode into a newly allocated buffer.
    Fast,
    /// Decode into the same caller supplied buffer on every iteration.
    ZeroCopyReuse,
}

impl Strategy {
    /// All strategies, in execution order.
    pub const ALL: [Strategy; 6] = [
        Strategy::ArrayLoad,
        Strategy::Reference,
        Strategy::ZeroCopy,
        Strategy::Copying,
        Strategy::Fast,
        Strategy::ZeroCopyReuse,
    ];

    /// Human readable name used in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ArrayLoad => "array load (bincode)",
            Strategy::Reference => "image crate (reference)",
            Strategy::ZeroCopy => "zero-copy decode",
            Strategy::Copying => "copying decode",
            Strategy::Fast => "fast decode",
            Strategy::ZeroCopyReuse => "zero-copy + buffer reuse",
        }
    }

    /// Whether this strategy is the baseline every other one is compared against.
    pub fn is_baseline(&self) -> bool {
        matches!(self, Strategy::Reference)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
