pub const WRAPPED_MINT: &[u8]          = b"wrapped_mint";

pub const DEFAULT_PROGRAM_ID: &str      = "3WyacwnCNiz4Q1PedWyuwodYpLFu75jrhgRTZp69UcA9";

pub const MAX_DECIMALS: u8              = 19; // 10^19 is the largest power of ten in a u64
