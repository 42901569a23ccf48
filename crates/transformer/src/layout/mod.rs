//! Static AMP layout: the subset of the runtime's layout pass that can run on the server.
//!
//! [`apply_layout`] resolves the effective layout of one AMP element from its `layout`,
//! `width`, `height`, `sizes` and `heights` attributes, then writes the classes, inline sizing
//! and `<i-amphtml-sizer>` the runtime would otherwise add after load.

mod css_length;

pub use css_length::{CssLength, Unit};

use html::{Attribute, Dom, NodeId};
use std::fmt;

use crate::amphtml::{self, I_AMPHTML_LAYOUT};

const LAYOUT_SIZE_DEFINED_CLASS: &str = "i-amphtml-layout-size-defined";
const SIZER_ELEMENT: &str = "i-amphtml-sizer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Unknown,
    Nodisplay,
    Fixed,
    FixedHeight,
    Responsive,
    Container,
    Fill,
    FlexItem,
    Fluid,
    Intrinsic,
}

impl Layout {
    /// Parses a `layout` attribute value; unrecognized values are [`Layout::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().replace('_', "-").as_str() {
            "nodisplay" => Layout::Nodisplay,
            "fixed" => Layout::Fixed,
            "fixed-height" => Layout::FixedHeight,
            "responsive" => Layout::Responsive,
            "container" => Layout::Container,
            "fill" => Layout::Fill,
            "flex-item" => Layout::FlexItem,
            "fluid" => Layout::Fluid,
            "intrinsic" => Layout::Intrinsic,
            _ => Layout::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Unknown => "",
            Layout::Nodisplay => "nodisplay",
            Layout::Fixed => "fixed",
            Layout::FixedHeight => "fixed-height",
            Layout::Responsive => "responsive",
            Layout::Container => "container",
            Layout::Fill => "fill",
            Layout::FlexItem => "flex-item",
            Layout::Fluid => "fluid",
            Layout::Intrinsic => "intrinsic",
        }
    }

    /// Whether the server can render this layout.
    pub fn is_supported(self) -> bool {
        !matches!(self, Layout::Unknown | Layout::Fluid | Layout::Intrinsic)
    }

    pub fn has_size_definition(self) -> bool {
        !matches!(
            self,
            Layout::Unknown | Layout::Nodisplay | Layout::Container
        )
    }

    fn class(self) -> String {
        format!("{I_AMPHTML_LAYOUT}-{}", self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    UnsupportedLayout(Layout),
    InvalidLength(String),
    InvalidUnit(String),
    AutoNotAllowed,
    FluidNotAllowed,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnsupportedLayout(layout) => {
                write!(f, "layout {:?} is not supported", layout)
            }
            LayoutError::InvalidLength(input) => write!(f, "invalid css length: {input:?}"),
            LayoutError::InvalidUnit(unit) => write!(f, "unit is not valid: {unit:?}"),
            LayoutError::AutoNotAllowed => write!(f, "auto is not allowed here"),
            LayoutError::FluidNotAllowed => write!(f, "fluid is not allowed here"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: CssLength,
    pub height: CssLength,
}

fn default_width(tag: &str, layout: Layout) -> CssLength {
    if !matches!(layout, Layout::Unknown | Layout::Fixed) {
        return CssLength::Unset;
    }
    match tag {
        "amp-analytics" | "amp-pixel" => CssLength::px(1.0),
        "amp-social-share" => CssLength::px(60.0),
        _ => CssLength::Unset,
    }
}

fn default_height(tag: &str, layout: Layout) -> CssLength {
    if !matches!(
        layout,
        Layout::Unknown | Layout::Fixed | Layout::FixedHeight
    ) {
        return CssLength::Unset;
    }
    match tag {
        "amp-analytics" | "amp-pixel" => CssLength::px(1.0),
        "amp-social-share" => CssLength::px(44.0),
        _ => CssLength::Unset,
    }
}

/// Parses `width`/`height`, filling tag-specific defaults when the attribute is absent.
pub fn normalized_dimensions(
    tag: &str,
    width: Option<&str>,
    height: Option<&str>,
    layout: Layout,
) -> Result<Dimensions, LayoutError> {
    let tag = tag.to_ascii_lowercase();
    let mut width = CssLength::parse(width, true, false)?;
    if !width.is_set() {
        width = default_width(&tag, layout);
    }
    let mut height = CssLength::parse(height, true, layout == Layout::Fluid)?;
    if !height.is_set() {
        height = default_height(&tag, layout);
    }
    Ok(Dimensions { width, height })
}

/// Picks the effective layout. An explicit layout wins; otherwise it is inferred from the
/// dimensions and the presence of `sizes`/`heights`.
pub fn normalized_layout(
    layout: Layout,
    dimensions: &Dimensions,
    has_sizes_or_heights: bool,
) -> Result<Layout, LayoutError> {
    let Dimensions { width, height } = dimensions;
    let result = if layout != Layout::Unknown {
        layout
    } else if !width.is_set() && !height.is_set() {
        Layout::Container
    } else if height.is_fluid() || width.is_fluid() {
        Layout::Fluid
    } else if height.is_set() && (!width.is_set() || width.is_auto()) {
        Layout::FixedHeight
    } else if height.is_set() && width.is_set() && has_sizes_or_heights {
        Layout::Responsive
    } else {
        Layout::Fixed
    };
    if !result.is_supported() {
        return Err(LayoutError::UnsupportedLayout(result));
    }
    Ok(result)
}

/// Applies the static layout to `id`.
///
/// Non-AMP elements, `amp-audio` and anything inside `<template>` are left alone. On error the
/// element has not been modified.
pub fn apply_layout(dom: &mut Dom, id: NodeId) -> Result<(), LayoutError> {
    let Some(element) = dom.element(id) else {
        return Ok(());
    };
    if !amphtml::is_amp_custom_element(element)
        || element.is(amphtml::AMP_AUDIO)
        || html::dom_utils::is_descendant_of(dom, id, "template")
    {
        return Ok(());
    }

    let input_layout = element
        .attr("layout")
        .map_or(Layout::Unknown, Layout::parse);
    let dimensions = normalized_dimensions(
        &element.name,
        element.attr("width"),
        element.attr("height"),
        input_layout,
    )?;
    let has_sizes_or_heights = element.has_attr("sizes") || element.has_attr("heights");
    let layout = normalized_layout(input_layout, &dimensions, has_sizes_or_heights)?;
    apply(dom, id, layout, &dimensions);
    Ok(())
}

fn apply(dom: &mut Dom, id: NodeId, layout: Layout, dimensions: &Dimensions) {
    let Some(element) = dom.element_mut(id) else {
        return;
    };
    let mut class = layout.class();
    if layout.has_size_definition() {
        class.push(' ');
        class.push_str(LAYOUT_SIZE_DEFINED_CLASS);
    }
    element.append_attr_value("class", &class, " ");

    let styles = match layout {
        Layout::Nodisplay => {
            element.set_attr("hidden", "hidden");
            String::new()
        }
        Layout::Fixed | Layout::FlexItem => {
            dimensions.width.style("width") + &dimensions.height.style("height")
        }
        Layout::FixedHeight => dimensions.height.style("height"),
        _ => String::new(),
    };
    // Appended so the computed sizes win over author styles.
    if !styles.is_empty() {
        element.append_attr_value("style", &styles, ";");
    }
    if element.attr("style") == Some("") {
        element.remove_attr("style");
    }
    element.set_attr(I_AMPHTML_LAYOUT, layout.name());

    if layout != Layout::Responsive {
        return;
    }
    let (
        CssLength::Length {
            value: width,
            unit: width_unit,
        },
        CssLength::Length {
            value: height,
            unit: height_unit,
        },
    ) = (dimensions.width, dimensions.height)
    else {
        return;
    };
    if width == 0.0 || width_unit != height_unit {
        return;
    }
    let padding = height / width * 100.0;
    let sizer = dom.create_element(
        SIZER_ELEMENT,
        vec![Attribute::new(
            "style",
            format!("display:block;padding-top:{padding:.4}%;"),
        )],
    );
    dom.prepend_child(id, sizer);
}
