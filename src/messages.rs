use crate::ui::rgb;
use rand::prelude::*;
use std::sync::LazyLock;

#[derive(Clone)]
pub struct ColoredMessage {
    pub text: String,
    pub color: (u8, u8, u8),
}

static WAITING_MESSAGES: LazyLock<Vec<ColoredMessage>> = LazyLock::new(|| {
    vec![
        ColoredMessage {
            text: "🔎 Deep search grounding...".to_string(),
            color: rgb::ACCENT_CYAN,
        },
        ColoredMessage {
            text: "📑 Scanning technical datasheets...".to_string(),
            color: rgb::BRIGHT_CYAN,
        },
        ColoredMessage {
            text: "⚡ Computing intel...".to_string(),
            color: rgb::AMBER,
        },
        ColoredMessage {
            text: "🔋 Weighing battery packs and charge curves...".to_string(),
            color: rgb::EMERALD,
        },
        ColoredMessage {
            text: "🛵 Test-riding both scooters around the block...".to_string(),
            color: rgb::ORANGE,
        },
        ColoredMessage {
            text: "📊 Lining up the spec sheets side by side...".to_string(),
            color: rgb::DEEP_BLUE,
        },
    ]
});

pub fn get_waiting_message() -> ColoredMessage {
    let mut rng = rand::rng();
    WAITING_MESSAGES
        .choose(&mut rng)
        .cloned()
        .unwrap_or_else(|| ColoredMessage {
            text: "Analyzing...".to_string(),
            color: rgb::ACCENT_CYAN,
        })
}
