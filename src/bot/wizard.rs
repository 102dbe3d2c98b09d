//! Linear conversation that collects one [`RenderParams`] field per state.
//!
//! The wizard knows nothing about the chat transport: it consumes [`Input`]s and answers with
//! [`Step`]s carrying prompt text and optional button rows.

use crate::assets::color::{palette_by_name, palette_names, parse_hex};
use crate::assets::fonts::{font_by_name, font_names};
use crate::engine::RenderParams;
use crate::foundation::core::{HAlign, VAlign};

/// Button label that switches the palette step to typed hex colors.
pub const CUSTOM_COLORS: &str = "Custom Colors...";

/// What the user sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// A typed message.
    Text(String),
    /// A pressed button, carrying its label.
    Choice(String),
}

/// Rows of button labels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// Lay `items` out left to right, `columns` per row.
    pub fn grid<I, S>(items: I, columns: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let rows = items
            .chunks(columns.max(1))
            .map(<[String]>::to_vec)
            .collect();
        Self { rows }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Prompt {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Result of feeding one input to the wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Input accepted; ask for the next field.
    Next(Prompt),
    /// Input rejected; the state is unchanged.
    Retry(Prompt),
    /// Every field is collected.
    Finished(RenderParams),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardState {
    AwaitingText,
    AwaitingFont,
    AwaitingPalette,
    AwaitingCustomColor1,
    AwaitingCustomColor2,
    AwaitingVAlign,
    AwaitingHAlign,
    Done,
}

#[derive(Clone, Debug)]
pub struct Wizard {
    state: WizardState,
    params: RenderParams,
}

impl Wizard {
    /// A fresh wizard and its opening prompt.
    pub fn start() -> (Self, Prompt) {
        let wizard = Self {
            state: WizardState::AwaitingText,
            params: RenderParams::default(),
        };
        let prompt = Prompt::text(
            "Ok, let's create an image! First, send me the text you want to put on it.",
        );
        (wizard, prompt)
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Whether this state is answered with a button press rather than a typed message.
    pub fn expects_choice(&self) -> bool {
        matches!(
            self.state,
            WizardState::AwaitingFont
                | WizardState::AwaitingPalette
                | WizardState::AwaitingVAlign
                | WizardState::AwaitingHAlign
        )
    }

    pub fn advance(&mut self, input: Input) -> Step {
        use WizardState as S;

        match (self.state, input) {
            (S::AwaitingText, Input::Text(text)) => {
                tracing::info!(chars = text.chars().count(), "received text");
                self.params.text = text;
                self.goto(S::AwaitingFont)
            }
            (S::AwaitingFont, Input::Choice(font)) if font_by_name(&font).is_some() => {
                tracing::info!(%font, "received font");
                self.params.font = font;
                self.goto(S::AwaitingPalette)
            }
            (S::AwaitingPalette, Input::Choice(c)) if c == CUSTOM_COLORS => {
                self.goto(S::AwaitingCustomColor1)
            }
            (S::AwaitingPalette, Input::Choice(palette)) if palette_by_name(&palette).is_some() => {
                tracing::info!(%palette, "received palette");
                self.params.palette = Some(palette);
                self.params.custom_color1 = None;
                self.params.custom_color2 = None;
                self.goto(S::AwaitingVAlign)
            }
            (S::AwaitingCustomColor1, Input::Text(hex)) => {
                if parse_hex(&hex).is_err() {
                    return Step::Retry(Prompt::text(
                        "That doesn't look like a valid hex code. Please try again (e.g., #FF5733).",
                    ));
                }
                self.params.custom_color1 = Some(hex.trim().to_owned());
                self.goto(S::AwaitingCustomColor2)
            }
            (S::AwaitingCustomColor2, Input::Text(hex)) => {
                if parse_hex(&hex).is_err() {
                    return Step::Retry(Prompt::text(
                        "That doesn't look like a valid hex code. Try again (e.g., #C70039).",
                    ));
                }
                self.params.custom_color2 = Some(hex.trim().to_owned());
                self.params.palette = Some("Custom".to_owned());
                tracing::info!(
                    top = ?self.params.custom_color1,
                    bottom = ?self.params.custom_color2,
                    "received custom colors"
                );
                self.goto(S::AwaitingVAlign)
            }
            (S::AwaitingVAlign, Input::Choice(c)) => match c.parse::<VAlign>() {
                Ok(v) => {
                    tracing::info!(valign = v.label(), "received vertical alignment");
                    self.params.v_align = v.label().to_ascii_lowercase();
                    self.goto(S::AwaitingHAlign)
                }
                Err(_) => self.retry(),
            },
            (S::AwaitingHAlign, Input::Choice(c)) => match c.parse::<HAlign>() {
                Ok(h) => {
                    tracing::info!(halign = h.label(), "received horizontal alignment");
                    self.params.h_align = h.label().to_ascii_lowercase();
                    self.state = S::Done;
                    Step::Finished(self.params.clone())
                }
                Err(_) => self.retry(),
            },
            (S::Done, _) => Step::Retry(Prompt::text(
                "This image is already done. Send /create to make another one.",
            )),
            _ => self.retry(),
        }
    }

    fn goto(&mut self, next: WizardState) -> Step {
        self.state = next;
        Step::Next(self.prompt_for(next, true))
    }

    fn retry(&self) -> Step {
        Step::Retry(self.prompt_for(self.state, false))
    }

    fn prompt_for(&self, state: WizardState, fresh: bool) -> Prompt {
        use WizardState as S;

        let choose = |fresh_text: &str, retry_text: &str, kb: Keyboard| {
            Prompt::with_keyboard(if fresh { fresh_text } else { retry_text }, kb)
        };

        match state {
            S::AwaitingText => Prompt::text("Please send the text for your image as a message."),
            S::AwaitingFont => choose(
                "Great! Now, choose a font for your text:",
                "Please pick one of the fonts below:",
                Keyboard::grid(font_names(), 2),
            ),
            S::AwaitingPalette => choose(
                "Awesome. Now pick a color palette:",
                "Please pick one of the palettes below:",
                Keyboard::grid(palette_names().chain([CUSTOM_COLORS]), 2),
            ),
            S::AwaitingCustomColor1 => Prompt::text(if fresh {
                "Okay, send me the first hex color code for the gradient's top (e.g., #1A2B3C)."
            } else {
                "Please type the first hex color code (e.g., #1A2B3C)."
            }),
            S::AwaitingCustomColor2 => Prompt::text(if fresh {
                "Got it. Now send me the second hex color code for the gradient's bottom."
            } else {
                "Please type the second hex color code (e.g., #C70039)."
            }),
            S::AwaitingVAlign => {
                let text = if !fresh {
                    "Please pick a vertical alignment:"
                } else if self.params.custom_color2.is_some() {
                    "Perfect! Now choose the vertical text alignment:"
                } else {
                    "Next, choose the vertical text alignment:"
                };
                Prompt::with_keyboard(text, Keyboard::grid(VAlign::ALL.map(VAlign::label), 3))
            }
            S::AwaitingHAlign => choose(
                "And now the horizontal alignment:",
                "Please pick a horizontal alignment:",
                Keyboard::grid(HAlign::ALL.map(HAlign::label), 3),
            ),
            S::Done => Prompt::text("Send /create to make another one."),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bot/wizard.rs"]
mod tests;
