/// Widest integer the decoder produces, in bytes.
pub const MAX_INT_WIDTH: usize = 8;
