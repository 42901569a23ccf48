use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::LayoutError;

static CSS_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[0-9]*\.)?[0-9]+)([^0-9]*)$").expect("css length pattern compiles")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Px,
    Em,
    Rem,
    Vh,
    Vw,
    Vmin,
    Vmax,
}

impl Unit {
    fn parse(raw: &str) -> Option<Self> {
        Some(match raw {
            "" | "px" => Unit::Px,
            "em" => Unit::Em,
            "rem" => Unit::Rem,
            "vh" => Unit::Vh,
            "vw" => Unit::Vw,
            "vmin" => Unit::Vmin,
            "vmax" => Unit::Vmax,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Em => "em",
            Unit::Rem => "rem",
            Unit::Vh => "vh",
            Unit::Vw => "vw",
            Unit::Vmin => "vmin",
            Unit::Vmax => "vmax",
        }
    }
}

/// A `width` or `height` attribute as the AMP layout algorithm sees it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssLength {
    /// The attribute is absent.
    Unset,
    Auto,
    Fluid,
    Length { value: f64, unit: Unit },
}

impl CssLength {
    pub const fn px(value: f64) -> Self {
        CssLength::Length {
            value,
            unit: Unit::Px,
        }
    }

    pub fn parse(
        input: Option<&str>,
        allow_auto: bool,
        allow_fluid: bool,
    ) -> Result<Self, LayoutError> {
        let Some(input) = input else {
            return Ok(CssLength::Unset);
        };
        match input {
            "auto" if allow_auto => Ok(CssLength::Auto),
            "auto" => Err(LayoutError::AutoNotAllowed),
            "fluid" if allow_fluid => Ok(CssLength::Fluid),
            "fluid" => Err(LayoutError::FluidNotAllowed),
            _ => {
                let captures = CSS_LENGTH
                    .captures(input)
                    .ok_or_else(|| LayoutError::InvalidLength(input.to_string()))?;
                let value: f64 = captures[1]
                    .parse()
                    .map_err(|_| LayoutError::InvalidLength(input.to_string()))?;
                let unit = Unit::parse(&captures[2])
                    .ok_or_else(|| LayoutError::InvalidUnit(captures[2].to_string()))?;
                Ok(CssLength::Length { value, unit })
            }
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, CssLength::Unset)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, CssLength::Auto)
    }

    pub fn is_fluid(&self) -> bool {
        matches!(self, CssLength::Fluid)
    }

    /// `dimension:value;` for inline styles. Empty when unset.
    pub fn style(&self, dimension: &str) -> String {
        match self {
            CssLength::Unset => String::new(),
            CssLength::Auto => format!("{dimension}:auto;"),
            CssLength::Fluid => format!("{dimension}:fluid;"),
            CssLength::Length { value, unit } => format!("{dimension}:{value}{unit};"),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
