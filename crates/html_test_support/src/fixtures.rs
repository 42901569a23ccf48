//! Markup snippets shared by transformer tests.
//!
//! Attribute values are written the way the serializer prints them so expectations can be
//! compared as strings after normalization.

pub const DOCTYPE: &str = "<!doctype html>";

pub const LINK_CANONICAL: &str = "<link href=self.html rel=canonical>";
pub const LINK_FAVICON: &str = "<link href=https://example.com/favicon.ico rel=icon>";
pub const LINK_GOOGLE_FONT: &str =
    "<link href=https://fonts.googleapis.com/css?family=Roboto rel=stylesheet>";
pub const LINK_GOOGLE_FONT_PRECONNECT: &str =
    "<link crossorigin href=https://fonts.gstatic.com rel=\"dns-prefetch preconnect\">";
pub const LINK_STYLESHEET: &str = "<link href=https://example.com/site.css rel=stylesheet>";

pub const META_CHARSET: &str = "<meta charset=utf-8>";
pub const META_VIEWPORT: &str =
    "<meta content=\"width=device-width,minimum-scale=1,initial-scale=1\" name=viewport>";

pub const NOSCRIPT_AMP_BOILERPLATE: &str = "<noscript><style amp-boilerplate>body{-webkit-animation:none;-moz-animation:none;-ms-animation:none;animation:none}</style></noscript>";

pub const SCRIPT_AMP_AD: &str = "<script async custom-element=amp-ad src=https://cdn.ampproject.org/v0/amp-ad-0.1.js></script>";
pub const SCRIPT_AMP_ANALYTICS: &str = "<script async custom-element=amp-analytics src=https://cdn.ampproject.org/v0/amp-analytics-0.1.js></script>";
pub const SCRIPT_AMP_AUDIO: &str = "<script async custom-element=amp-audio src=https://cdn.ampproject.org/v0/amp-audio-0.1.js></script>";
pub const SCRIPT_AMP_DYNAMIC_CSS_CLASSES: &str = "<script async custom-element=amp-dynamic-css-classes src=https://cdn.ampproject.org/v0/amp-dynamic-css-classes-0.1.js></script>";
pub const SCRIPT_AMP_EXPERIMENT: &str = "<script async custom-element=amp-experiment src=https://cdn.ampproject.org/v0/amp-experiment-0.1.js></script>";
pub const SCRIPT_AMP_FORM: &str = "<script async custom-element=amp-form src=https://cdn.ampproject.org/v0/amp-form-0.1.js></script>";
pub const SCRIPT_AMP_MUSTACHE: &str = "<script async custom-template=amp-mustache src=https://cdn.ampproject.org/v0/amp-mustache-0.1.js></script>";
pub const SCRIPT_AMP_RUNTIME: &str = "<script async src=https://cdn.ampproject.org/v0.js></script>";
pub const SCRIPT_AMP_VIEWER_RUNTIME: &str = "<script async src=https://cdn.ampproject.org/v0/amp-viewer-integration-0.1.js></script>";
pub const SCRIPT_AMP4ADS_RUNTIME: &str =
    "<script async src=https://cdn.ampproject.org/amp4ads-v0.js></script>";
pub const SCRIPT_AMP_STORY: &str = "<script async custom-element=amp-story src=https://cdn.ampproject.org/v0/amp-story-0.1.js></script>";

pub const STYLE_AMP4ADS_BOILERPLATE: &str =
    "<style amp4ads-boilerplate>body{visibility:hidden}</style>";
pub const STYLE_AMP4EMAIL_BOILERPLATE: &str =
    "<style amp4email-boilerplate>body{visibility:hidden}</style>";
pub const STYLE_AMP_BOILERPLATE: &str = "<style amp-boilerplate>body{-webkit-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-moz-animation:-amp-start 8s steps(1,end) 0s 1 normal both;-ms-animation:-amp-start 8s steps(1,end) 0s 1 normal both;animation:-amp-start 8s steps(1,end) 0s 1 normal both}@-webkit-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-moz-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-ms-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@-o-keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}@keyframes -amp-start{from{visibility:hidden}to{visibility:visible}}</style>";
pub const STYLE_AMP_CUSTOM: &str = "<style amp-custom>#lemur { color: #adaaad }</style>";
pub const STYLE_AMP_RUNTIME: &str = "<style amp-runtime></style>";

pub const TITLE: &str = "<title>Hello AMP</title>";

pub fn concat(parts: &[&str]) -> String {
    parts.concat()
}
