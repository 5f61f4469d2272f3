//! Parrot/neon theme tokens for the Muhtasib dashboard
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, headings)
//! - **Positive**: Neon green (gains, buys)
//! - **Negative**: Hot pink (losses, sells)
//! - **Equity**: Signal red (the equity line)
//! - **Warning**: Neon orange (destructive actions)
//! - **Muted**: Steel blue (hints, axes)

use ratatui::style::{Color, Modifier, Style};

use muhtasib_core::OrderSide;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (positive values, buys)
    pub positive: Color,
    /// Hot pink (negative values, sells)
    pub negative: Color,
    /// Red equity curve
    pub equity_line: Color,
    /// Neon orange (destructive actions)
    pub warning: Color,
    /// Cool purple (selection)
    pub neutral: Color,
    /// Steel blue (muted text, axes)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            equity_line: Color::Rgb(255, 59, 48),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Get color for a signed value (positive = green, negative = pink)
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn side_color(&self, side: OrderSide) -> Color {
        match side {
            OrderSide::Buy => self.positive,
            OrderSide::Sell => self.negative,
        }
    }

    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn value(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.neutral)
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }
}
