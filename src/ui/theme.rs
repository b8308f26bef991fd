use ratatui::style::Color;

pub const NIXIE_LIT: Color = Color::Rgb(0xff, 0x9a, 0x2e);
pub const NIXIE_FLUX: Color = Color::Rgb(0xb8, 0x5e, 0x14);
pub const NIXIE_GHOST: Color = Color::Rgb(0x33, 0x1e, 0x0e);
pub const GLITCH: Color = Color::Rgb(0x6f, 0xe3, 0xff);
pub const GLOBAL_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const HEADER_SEPARATOR: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const STATUS_OK: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const STATUS_PENDING: Color = Color::Rgb(0xea, 0xb3, 0x08);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const CONTROL_ACTIVE: Color = Color::Rgb(0xdc, 0x26, 0x26);
pub const CONTROL_DISABLED: Color = Color::Rgb(0x52, 0x52, 0x52);
