use capsule_types::HydrateableType;

/// Per-type transform requests for hydrateable types.
///
/// On encode, a requested transform turns the value into text and tags the
/// envelope. On decode, it rebuilds the typed value from a tagged payload.
/// The two sides are independent: a tagged payload read without the flag
/// stays as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub date: bool,
}

impl TransformOptions {
    /// No transforms.
    pub const fn none() -> Self {
        Self { date: false }
    }

    /// Every transform.
    pub const fn all() -> Self {
        Self { date: true }
    }

    pub const fn with_date(mut self, date: bool) -> Self {
        self.date = date;
        self
    }

    /// Whether the transform for `ty` was requested.
    pub fn transforms(&self, ty: HydrateableType) -> bool {
        match ty {
            HydrateableType::Date => self.date,
        }
    }
}
