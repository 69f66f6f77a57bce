//! Category Mapping Module
//! Static answer → ordinal code tables for the two survey questions.

/// Lookup table from a free-text survey answer to an ordinal code.
#[derive(Debug, Clone, Copy)]
pub struct CategoryMapping {
    pub name: &'static str,
    entries: &'static [(&'static str, i64)],
    /// Display labels, indexed by `code - first_code`
    labels: &'static [&'static str],
    first_code: i64,
}

/// How often do you exercise? → 0..=3
pub const EXERCISE_FREQUENCY_MAPPING: CategoryMapping = CategoryMapping {
    name: "exercise frequency",
    entries: &[
        ("Never", 0),
        ("1 to 2 times a week", 1),
        ("2 to 3 times a week", 1),
        ("3 to 4 times a week", 2),
        ("5 to 6 times a week", 3),
        ("5 or more times a week", 3),
        ("Everyday", 3),
    ],
    labels: &["Never", "1-3x/week", "3-4x/week", "5+ times/week"],
    first_code: 0,
};

/// How do you describe your current level of fitness? → 1..=5
pub const FITNESS_LEVEL_MAPPING: CategoryMapping = CategoryMapping {
    name: "fitness level",
    entries: &[
        ("Unfit", 1),
        ("Not very good", 2),
        ("Average", 2),
        ("Good", 3),
        ("Very good", 4),
        ("Perfect", 5),
        ("Excellent", 5),
    ],
    labels: &["Unfit", "Average", "Good", "Very Good", "Excellent"],
    first_code: 1,
};

impl CategoryMapping {
    /// Exact, case-sensitive lookup. Unknown answers map to `None`.
    pub fn lookup(&self, answer: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == answer)
            .map(|&(_, code)| code)
    }

    /// Display label for a code.
    pub fn label(&self, code: i64) -> Option<&'static str> {
        let idx = usize::try_from(code - self.first_code).ok()?;
        self.labels.get(idx).copied()
    }

    /// All codes on the scale with their labels, ascending.
    pub fn ticks(&self) -> Vec<(i64, &'static str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, &label)| (self.first_code + i as i64, label))
            .collect()
    }
}
