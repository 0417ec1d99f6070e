//! Styled button.
//!
//! Rendering is a pure function of the button's fields. Children are
//! inserted as markup, unescaped.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

type ClickHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button type: {0}")]
pub struct UnknownButtonType(pub String);

impl FromStr for ButtonType {
    type Err = UnknownButtonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "button" => Ok(ButtonType::Button),
            "submit" => Ok(ButtonType::Submit),
            "reset" => Ok(ButtonType::Reset),
            _ => Err(UnknownButtonType(s.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct Button {
    children: String,
    on_click: Option<ClickHandler>,
    button_type: ButtonType,
    /// `None` renders as `primary`
    variant: Option<String>,
    full_width: bool,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("children", &self.children)
            .field("on_click", &self.on_click.is_some())
            .field("button_type", &self.button_type)
            .field("variant", &self.variant)
            .field("full_width", &self.full_width)
            .finish()
    }
}

impl Button {
    pub fn new(children: impl Into<String>) -> Self {
        Self {
            children: children.into(),
            on_click: None,
            button_type: ButtonType::default(),
            variant: None,
            full_width: false,
        }
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn button_type(mut self, button_type: ButtonType) -> Self {
        self.button_type = button_type;
        self
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn variant_name(&self) -> &str {
        self.variant.as_deref().unwrap_or("primary")
    }

    /// Class list: `btn`, then the variant class, then `btn-full-width`.
    /// Unknown variants contribute no class.
    pub fn class_name(&self) -> String {
        let mut classes = vec!["btn"];
        match self.variant_name() {
            "primary" => classes.push("btn-primary"),
            "secondary" => classes.push("btn-secondary"),
            _ => {}
        }
        if self.full_width {
            classes.push("btn-full-width");
        }
        classes.join(" ")
    }

    pub fn render(&self) -> String {
        format!(
            r#"<button type="{}" class="{}">{}</button>"#,
            self.button_type,
            self.class_name(),
            self.children
        )
    }

    /// Runs the click handler, if any. Returns whether one ran.
    pub fn click(&self) -> bool {
        match &self.on_click {
            Some(handler) => {
                trace!(variant = self.variant_name(), "Button clicked");
                handler();
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
