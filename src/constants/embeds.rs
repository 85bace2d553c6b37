use serenity::all::{Colour, CreateEmbed};

/// Primary brand color - Deep blue
pub const PRIMARY_COLOR: Colour = Colour::from_rgb(59, 130, 246);

/// Success color - Emerald green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(16, 185, 129);

/// Error color - Rose red
pub const ERROR_COLOR: Colour = Colour::from_rgb(244, 63, 94);

/// Info/neutral color - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

/// Create a standard/primary embed
pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an error embed
pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

/// Create an info embed
pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}
