use serde::Serialize;

/// Display label and style tokens for a problem status badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub text: String,
    pub color_class: &'static str,
    pub background_class: &'static str,
}

struct StatusStyle {
    status: &'static str,
    text: &'static str,
    color_class: &'static str,
    background_class: &'static str,
}

const STATUS_STYLES: [StatusStyle; 3] = [
    StatusStyle {
        status: "Mastered",
        text: "Well known",
        color_class: "text-green-700",
        background_class: "bg-green-100",
    },
    StatusStyle {
        status: "Revisiting",
        text: "Revisiting",
        color_class: "text-amber-700",
        background_class: "bg-amber-100",
    },
    StatusStyle {
        status: "Pending",
        text: "New problem",
        color_class: "text-blue-700",
        background_class: "bg-blue-100",
    },
];

const DEFAULT_COLOR: &str = "text-gray-700";
const DEFAULT_BACKGROUND: &str = "bg-gray-100";

/// Look up the badge for a status label (exact match).
///
/// Missing status shows as "Unknown"; unknown labels are shown verbatim.
#[must_use]
pub fn status_info(status: Option<&str>) -> StatusInfo {
    let Some(status) = status else {
        return fallback("Unknown");
    };

    STATUS_STYLES
        .iter()
        .find(|style| style.status == status)
        .map_or_else(
            || fallback(status),
            |style| StatusInfo {
                text: style.text.to_string(),
                color_class: style.color_class,
                background_class: style.background_class,
            },
        )
}

fn fallback(text: &str) -> StatusInfo {
    StatusInfo {
        text: text.to_string(),
        color_class: DEFAULT_COLOR,
        background_class: DEFAULT_BACKGROUND,
    }
}
