use super::{BitMatrix, ECLevel, MaskPattern, Version};

/// A finished QR symbol: masked module grid plus the parameters it was built with.
///
/// Built fresh by each encode call and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: BitMatrix,
}

impl Symbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        modules: BitMatrix,
    ) -> Self {
        debug_assert_eq!(modules.width(), version.size());
        Self {
            version,
            ec_level,
            mask,
            modules,
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Modules per side (17 + 4 * version)
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Error correction level written in the format information
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data region
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Module grid (true = dark)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }
}
