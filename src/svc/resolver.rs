use crate::hal::indicator::Color;

// Case-sensitive, exact match. An unknown token resolves to nothing, which
// callers treat as "leave the output alone", distinct from "off".
pub fn resolve(token: &str) -> Option<Color> {
    match token {
        "red" => Some(Color::from(0xFF0000)),
        "green" => Some(Color::from(0x00FF00)),
        "blue" => Some(Color::from(0x0000FF)),
        "off" => Some(Color::OFF),
        _ => None,
    }
}
