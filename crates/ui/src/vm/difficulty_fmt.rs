// (difficulty, text color, background)
type DifficultyStyle = (&'static str, &'static str, &'static str);

static DIFFICULTY_STYLES: [DifficultyStyle; 3] = [
    ("easy", "text-green-600", "bg-green-100"),
    ("medium", "text-yellow-600", "bg-yellow-100"),
    ("hard", "text-red-600", "bg-red-100"),
];

const DEFAULT_COLOR: &str = "text-gray-600";
const DEFAULT_BACKGROUND: &str = "bg-gray-100";

fn lookup(difficulty: Option<&str>) -> Option<&'static DifficultyStyle> {
    let difficulty = difficulty?.trim();
    DIFFICULTY_STYLES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(difficulty))
}

/// Text color token for a difficulty label, case-insensitive.
#[must_use]
pub fn difficulty_color(difficulty: Option<&str>) -> &'static str {
    lookup(difficulty).map_or(DEFAULT_COLOR, |&(_, color, _)| color)
}

/// Background token for a difficulty label, case-insensitive.
#[must_use]
pub fn difficulty_bg_color(difficulty: Option<&str>) -> &'static str {
    lookup(difficulty).map_or(DEFAULT_BACKGROUND, |&(_, _, bg)| bg)
}
