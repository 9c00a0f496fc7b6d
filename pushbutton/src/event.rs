/// Classification of a completed button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Released after debouncing but before the long press threshold
    Short,
    /// Held until the long press threshold was reached
    Long,
}

impl Press {
    pub fn is_short(&self) -> bool {
        matches!(self, Press::Short)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Press::Long)
    }
}
