//! Indentation unit for generated HCL.

/// One level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// 2-space indentation, what `terraform fmt` produces.
    pub const HCL: Self = Self("  ");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::HCL
    }
}
