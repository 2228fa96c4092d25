//! Fixed tables turning small integer codes into scout-facing labels.

/// Labels indexed by code; codes past the end take the last label.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable(&'static [&'static str]);

pub const DEFENSE_QUALITY: CodeTable = CodeTable(&[
    "No Defense",
    "Negligible",
    "Weak",
    "Effective",
    "Unbreakable",
]);

pub const ENDGAME: CodeTable = CodeTable(&["On Field", "Parked", "Hanged"]);

impl CodeTable {
    /// Label for `code`. Negative codes have no label.
    pub fn label(&self, code: i64) -> Option<&'static str> {
        let index = usize::try_from(code).ok()?;
        self.0.get(index.min(self.0.len() - 1)).copied()
    }
}

/// The integer code of a (possibly averaged) metric, rounding halves up.
pub fn code_of(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
