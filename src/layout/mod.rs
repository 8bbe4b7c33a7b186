//! Symbol geometry shared by generation and scanning: which modules are
//! reserved, where format and version info live, and the order data bits
//! are placed in.

pub mod format;
pub mod function_mask;
pub mod mask;
pub mod version_info;
pub mod zigzag;

pub use function_mask::{FunctionMask, alignment_pattern_centers, alignment_pattern_positions};
pub use mask::apply_mask;
pub use zigzag::Zigzag;
