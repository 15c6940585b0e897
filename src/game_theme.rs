use ratatui::style::Color;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameTheme {
    #[default]
    Monokai,
    Solarized,
    Dracula,
    Nord,
    HighContrast,
}

pub struct ThemeColors {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub accent: Color,
    pub paddle: Color,
    pub ball: Color,
    /// Ball color while the bounce effect plays.
    pub ball_flash: Color,
    /// Table border color while the fall effect plays.
    pub border_flash: Color,
}

impl GameTheme {
    pub const ALL: [GameTheme; 5] = [
        GameTheme::Monokai,
        GameTheme::Solarized,
        GameTheme::Dracula,
        GameTheme::Nord,
        GameTheme::HighContrast,
    ];

    pub fn next(self) -> GameTheme {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            GameTheme::Monokai => "Monokai",
            GameTheme::Solarized => "Solarized",
            GameTheme::Dracula => "Dracula",
            GameTheme::Nord => "Nord",
            GameTheme::HighContrast => "High Contrast",
        }
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            GameTheme::Monokai => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(249, 38, 114),       // pink
                text: Color::Rgb(248, 248, 242),        // foreground
                accent: Color::Rgb(166, 226, 46),       // green
                paddle: Color::Rgb(102, 217, 239),      // cyan
                ball: Color::Rgb(255, 95, 135),         // light pink
                ball_flash: Color::Rgb(230, 219, 116),  // yellow
                border_flash: Color::Rgb(253, 151, 31), // orange
            },
            GameTheme::Solarized => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(38, 139, 210),
                text: Color::Rgb(101, 123, 131),
                accent: Color::Rgb(42, 161, 152),
                paddle: Color::Rgb(133, 153, 0),
                ball: Color::Rgb(220, 50, 47),
                ball_flash: Color::Rgb(181, 137, 0),
                border_flash: Color::Rgb(203, 75, 22),
            },
            GameTheme::Dracula => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(255, 121, 198),
                text: Color::Rgb(248, 248, 242),
                accent: Color::Rgb(189, 147, 249),
                paddle: Color::Rgb(80, 250, 123),
                ball: Color::Rgb(255, 85, 85),
                ball_flash: Color::Rgb(241, 250, 140),
                border_flash: Color::Rgb(255, 184, 108),
            },
            GameTheme::Nord => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(136, 192, 208),
                text: Color::Rgb(216, 222, 233),
                accent: Color::Rgb(143, 188, 187),
                paddle: Color::Rgb(94, 129, 172),
                ball: Color::Rgb(191, 97, 106),
                ball_flash: Color::Rgb(235, 203, 139),
                border_flash: Color::Rgb(208, 135, 112),
            },
            GameTheme::HighContrast => ThemeColors {
                background: Color::Black,
                border: Color::White,
                text: Color::White,
                accent: Color::Yellow,
                paddle: Color::Rgb(0, 255, 255),
                ball: Color::Rgb(255, 0, 0),
                ball_flash: Color::Rgb(0, 255, 0),
                border_flash: Color::Rgb(255, 0, 255),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_every_theme() {
        let mut theme = GameTheme::Monokai;
        for _ in 0..GameTheme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, GameTheme::Monokai);
        assert_eq!(GameTheme::HighContrast.next(), GameTheme::Monokai);
    }
}
