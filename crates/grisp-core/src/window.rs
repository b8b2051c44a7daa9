/// A trailing window of years ending at a fixed reference year.
///
/// The reference year is configuration, never wall-clock time, so adapter
/// output stays reproducible. The window is inclusive on both ends:
/// `reference_year - years ..= reference_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    pub reference_year: i32,
    pub years: u32,
}

impl TrailingWindow {
    #[must_use]
    pub fn new(reference_year: i32, years: u32) -> Self {
        Self {
            reference_year,
            years,
        }
    }

    /// First year included in the window.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.reference_year
            .saturating_sub(i32::try_from(self.years).unwrap_or(i32::MAX))
    }

    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        (self.start_year()..=self.reference_year).contains(&year)
    }
}
