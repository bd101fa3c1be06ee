//! Configuration types for background removal requests
//!
//! Every closed vendor enumeration is a Rust enum whose `FromStr` impl is the
//! validation boundary: a value outside the allowed set fails with
//! [`RemoveBgError::InvalidArgument`] before any network call is attempted.
//! `Display` produces the exact wire value expected by the API.

use crate::error::{RemoveBgError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Output resolution requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// Highest available resolution
    Auto,
    /// Low-resolution preview
    Preview,
    /// Up to 0.25 megapixels
    Small,
    /// Up to 0.25 megapixels (legacy alias of `small`)
    Regular,
    /// Up to 1.5 megapixels
    Medium,
    /// Up to 4 megapixels
    Hd,
    /// Original resolution
    Full,
    /// Up to 4k resolution
    #[serde(rename = "4k")]
    FourK,
}

impl OutputSize {
    const ALLOWED: &'static [&'static str] = &[
        "auto", "preview", "small", "regular", "medium", "hd", "full", "4k",
    ];

    /// The exact value sent in the `size` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Preview => "preview",
            Self::Small => "small",
            Self::Regular => "regular",
            Self::Medium => "medium",
            Self::Hd => "hd",
            Self::Full => "full",
            Self::FourK => "4k",
        }
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::Regular
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = RemoveBgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "preview" => Ok(Self::Preview),
            "small" => Ok(Self::Small),
            "regular" => Ok(Self::Regular),
            "medium" => Ok(Self::Medium),
            "hd" => Ok(Self::Hd),
            "full" => Ok(Self::Full),
            "4k" => Ok(Self::FourK),
            other => Err(RemoveBgError::unknown_value("size", other, Self::ALLOWED)),
        }
    }
}

/// Foreground subject classification hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForegroundType {
    /// Let the API detect the subject
    Auto,
    Person,
    Product,
    Animal,
    Car,
    CarInterior,
    CarPart,
    Transportation,
    Graphics,
    Other,
}

impl ForegroundType {
    const ALLOWED: &'static [&'static str] = &[
        "auto",
        "person",
        "product",
        "animal",
        "car",
        "car_interior",
        "car_part",
        "transportation",
        "graphics",
        "other",
    ];

    /// The exact value sent in the `type` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Person => "person",
            Self::Product => "product",
            Self::Animal => "animal",
            Self::Car => "car",
            Self::CarInterior => "car_interior",
            Self::CarPart => "car_part",
            Self::Transportation => "transportation",
            Self::Graphics => "graphics",
            Self::Other => "other",
        }
    }
}

impl Default for ForegroundType {
    fn default() -> Self {
        Self::Auto
    }
}

impl std::fmt::Display for ForegroundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForegroundType {
    type Err = RemoveBgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "person" => Ok(Self::Person),
            "product" => Ok(Self::Product),
            "animal" => Ok(Self::Animal),
            "car" => Ok(Self::Car),
            "car_interior" => Ok(Self::CarInterior),
            "car_part" => Ok(Self::CarPart),
            "transportation" => Ok(Self::Transportation),
            "graphics" => Ok(Self::Graphics),
            "other" => Ok(Self::Other),
            other => Err(RemoveBgError::unknown_value("type", other, Self::ALLOWED)),
        }
    }
}

/// Classification granularity for the detected foreground subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeLevel {
    /// No classification
    #[serde(rename = "none")]
    None,
    /// Latest classification model
    #[serde(rename = "latest")]
    Latest,
    /// Coarse classification (person/product/car)
    #[serde(rename = "1")]
    Coarse,
    /// Specific classification (e.g. car interior)
    #[serde(rename = "2")]
    Specific,
}

impl TypeLevel {
    const ALLOWED: &'static [&'static str] = &["none", "latest", "1", "2"];

    /// The exact value sent in the `type_level` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Latest => "latest",
            Self::Coarse => "1",
            Self::Specific => "2",
        }
    }
}

impl Default for TypeLevel {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for TypeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeLevel {
    type Err = RemoveBgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "latest" => Ok(Self::Latest),
            "1" => Ok(Self::Coarse),
            "2" => Ok(Self::Specific),
            other => Err(RemoveBgError::unknown_value(
                "type_level",
                other,
                Self::ALLOWED,
            )),
        }
    }
}

/// Output image format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JPEG (no transparency)
    Jpg,
    /// ZIP archive containing color image and alpha matte
    Zip,
    /// PNG with alpha channel transparency
    Png,
    /// Let the API pick the best format
    Auto,
}

impl OutputFormat {
    const ALLOWED: &'static [&'static str] = &["jpg", "zip", "png", "auto"];

    /// The exact value sent in the `format` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Zip => "zip",
            Self::Png => "png",
            Self::Auto => "auto",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Auto
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = RemoveBgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jpg" => Ok(Self::Jpg),
            "zip" => Ok(Self::Zip),
            "png" => Ok(Self::Png),
            "auto" => Ok(Self::Auto),
            other => Err(RemoveBgError::unknown_value("format", other, Self::ALLOWED)),
        }
    }
}

/// Channels returned in the result image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channels {
    /// Full result image
    Rgba,
    /// Alpha matte only
    Alpha,
}

impl Channels {
    const ALLOWED: &'static [&'static str] = &["rgba", "alpha"];

    /// The exact value sent in the `channels` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rgba => "rgba",
            Self::Alpha => "alpha",
        }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::Rgba
    }
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channels {
    type Err = RemoveBgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rgba" => Ok(Self::Rgba),
            "alpha" => Ok(Self::Alpha),
            other => Err(RemoveBgError::unknown_value(
                "channels",
                other,
                Self::ALLOWED,
            )),
        }
    }
}

/// Replacement background for the cut-out subject
///
/// Tagged by kind with exactly one value. `File` uploads a second image part
/// (`bg_image_file`); the other two kinds are plain form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Local image file, uploaded as the `bg_image_file` multipart part
    File(PathBuf),
    /// Remote image URL, sent as the `bg_image_url` field
    Url(String),
    /// Color name or hex code, sent as the `bg_color` field
    Color(String),
}

impl Background {
    /// Background from a local image file
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self::File(path.into())
    }

    /// Background from a remote image URL
    pub fn url<S: Into<String>>(url: S) -> Self {
        Self::Url(url.into())
    }

    /// Solid background color (name or hex code, e.g. `"81d4fa"`)
    pub fn color<S: Into<String>>(color: S) -> Self {
        Self::Color(color.into())
    }
}

/// Default output file name when the caller does not pick one
pub const DEFAULT_OUTPUT_FILE: &str = "no-bg.png";

/// Processing options shared by all three request variants
///
/// Defaults match the vendor API defaults: regular size, auto type detection,
/// no classification, auto format, full-image ROI, rgba output, no shadow,
/// semitransparency enabled, result written to `no-bg.png`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalOptions {
    /// Output resolution
    pub size: OutputSize,

    /// Foreground subject hint
    pub foreground_type: ForegroundType,

    /// Classification granularity
    pub type_level: TypeLevel,

    /// Output format
    pub format: OutputFormat,

    /// Region of interest `x1 y1 x2 y2` in pixels or percent, passed through
    /// verbatim
    pub roi: String,

    /// Crop margin in pixels or percent. Cropping is enabled iff this is a
    /// non-empty value.
    pub crop_margin: Option<String>,

    /// Result scale relative to the total image size, passed through verbatim
    pub scale: String,

    /// Subject position (`center`, `original` or coordinates), passed through
    /// verbatim
    pub position: String,

    /// Result channels
    pub channels: Channels,

    /// Add an artificial shadow (cars only)
    pub shadow: bool,

    /// Preserve partial transparency (windows, glass)
    pub semitransparency: bool,

    /// Optional replacement background
    pub background: Option<Background>,

    /// Where to write the result image. `None` disables the file write, in
    /// which case `return_bytes` must be set.
    pub output_path: Option<PathBuf>,

    /// Return the raw result bytes in the
    /// [`RemovalOutcome`](crate::RemovalOutcome)
    pub return_bytes: bool,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            size: OutputSize::default(),
            foreground_type: ForegroundType::default(),
            type_level: TypeLevel::default(),
            format: OutputFormat::default(),
            roi: "0 0 100% 100%".to_string(),
            crop_margin: None,
            scale: "original".to_string(),
            position: "original".to_string(),
            channels: Channels::default(),
            shadow: false,
            semitransparency: true,
            background: None,
            output_path: Some(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            return_bytes: false,
        }
    }
}

impl RemovalOptions {
    /// Create a new options builder for fluent construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use removebg::{Background, OutputSize, RemovalOptions};
    ///
    /// let options = RemovalOptions::builder()
    ///     .size(OutputSize::Hd)
    ///     .background(Background::color("81d4fa"))
    ///     .output_path("cut-out.png")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> RemovalOptionsBuilder {
        RemovalOptionsBuilder::default()
    }

    /// Whether cropping is requested
    ///
    /// Mirrors the wire contract: a present, non-empty crop margin enables
    /// cropping.
    #[must_use]
    pub fn crop_enabled(&self) -> bool {
        self.crop_margin.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Build the form fields shared by all request variants
    ///
    /// Boolean flags are normalized to the literal strings `"true"` /
    /// `"false"` as required by the wire format. The crop margin passes
    /// through verbatim in its own field, and is omitted entirely when unset.
    /// URL and color backgrounds are included here; a file background becomes
    /// a multipart part instead and is handled by the client.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("size", self.size.to_string()),
            ("type", self.foreground_type.to_string()),
            ("type_level", self.type_level.to_string()),
            ("format", self.format.to_string()),
            ("roi", self.roi.clone()),
            ("crop", bool_field(self.crop_enabled())),
        ];
        if let Some(margin) = &self.crop_margin {
            fields.push(("crop_margin", margin.clone()));
        }
        fields.push(("scale", self.scale.clone()));
        fields.push(("position", self.position.clone()));
        fields.push(("channels", self.channels.to_string()));
        fields.push(("add_shadow", bool_field(self.shadow)));
        fields.push(("semitransparency", bool_field(self.semitransparency)));

        match &self.background {
            Some(Background::Url(url)) => fields.push(("bg_image_url", url.clone())),
            Some(Background::Color(color)) => fields.push(("bg_color", color.clone())),
            Some(Background::File(_)) | None => {},
        }

        fields
    }

    /// Fail fast when the caller left no way to consume the result
    pub(crate) fn require_consumer(&self) -> Result<()> {
        if self.output_path.is_none() && !self.return_bytes {
            return Err(RemoveBgError::invalid_argument(
                "either provide an output path or enable return_bytes",
            ));
        }
        Ok(())
    }
}

fn bool_field(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Builder for [`RemovalOptions`]
#[derive(Debug, Default)]
pub struct RemovalOptionsBuilder {
    options: RemovalOptions,
}

impl RemovalOptionsBuilder {
    /// Set output resolution
    #[must_use]
    pub fn size(mut self, size: OutputSize) -> Self {
        self.options.size = size;
        self
    }

    /// Set foreground subject hint
    #[must_use]
    pub fn foreground_type(mut self, foreground_type: ForegroundType) -> Self {
        self.options.foreground_type = foreground_type;
        self
    }

    /// Set classification granularity
    #[must_use]
    pub fn type_level(mut self, type_level: TypeLevel) -> Self {
        self.options.type_level = type_level;
        self
    }

    /// Set output format
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }

    /// Set region of interest (`x1 y1 x2 y2`, pixels or percent)
    #[must_use]
    pub fn roi<S: Into<String>>(mut self, roi: S) -> Self {
        self.options.roi = roi.into();
        self
    }

    /// Set crop margin and enable cropping
    #[must_use]
    pub fn crop_margin<S: Into<String>>(mut self, margin: S) -> Self {
        self.options.crop_margin = Some(margin.into());
        self
    }

    /// Set result scale
    #[must_use]
    pub fn scale<S: Into<String>>(mut self, scale: S) -> Self {
        self.options.scale = scale.into();
        self
    }

    /// Set subject position
    #[must_use]
    pub fn position<S: Into<String>>(mut self, position: S) -> Self {
        self.options.position = position.into();
        self
    }

    /// Set result channels
    #[must_use]
    pub fn channels(mut self, channels: Channels) -> Self {
        self.options.channels = channels;
        self
    }

    /// Add an artificial shadow
    #[must_use]
    pub fn shadow(mut self, shadow: bool) -> Self {
        self.options.shadow = shadow;
        self
    }

    /// Preserve partial transparency
    #[must_use]
    pub fn semitransparency(mut self, semitransparency: bool) -> Self {
        self.options.semitransparency = semitransparency;
        self
    }

    /// Set the replacement background
    #[must_use]
    pub fn background(mut self, background: Background) -> Self {
        self.options.background = Some(background);
        self
    }

    /// Write the result image to `path`
    #[must_use]
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.output_path = Some(path.into());
        self
    }

    /// Skip the file write; callers must enable `return_bytes` instead
    #[must_use]
    pub fn no_output_file(mut self) -> Self {
        self.options.output_path = None;
        self
    }

    /// Return the raw result bytes in the outcome
    #[must_use]
    pub fn return_bytes(mut self, return_bytes: bool) -> Self {
        self.options.return_bytes = return_bytes;
        self
    }

    /// Finalize the options
    #[must_use]
    pub fn build(self) -> RemovalOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(OutputSize::FourK.to_string(), "4k");
        assert_eq!(ForegroundType::CarInterior.to_string(), "car_interior");
        assert_eq!(TypeLevel::Coarse.to_string(), "1");
        assert_eq!(TypeLevel::Specific.to_string(), "2");
        assert_eq!(OutputFormat::Jpg.to_string(), "jpg");
        assert_eq!(Channels::Alpha.to_string(), "alpha");
    }

    #[test]
    fn test_enum_round_trip() {
        for value in OutputSize::ALLOWED {
            assert_eq!(value.parse::<OutputSize>().unwrap().as_str(), *value);
        }
        for value in ForegroundType::ALLOWED {
            assert_eq!(value.parse::<ForegroundType>().unwrap().as_str(), *value);
        }
        for value in TypeLevel::ALLOWED {
            assert_eq!(value.parse::<TypeLevel>().unwrap().as_str(), *value);
        }
        for value in OutputFormat::ALLOWED {
            assert_eq!(value.parse::<OutputFormat>().unwrap().as_str(), *value);
        }
        for value in Channels::ALLOWED {
            assert_eq!(value.parse::<Channels>().unwrap().as_str(), *value);
        }
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(matches!(
            "gigantic".parse::<OutputSize>(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
        assert!(matches!(
            "house".parse::<ForegroundType>(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
        assert!(matches!(
            "3".parse::<TypeLevel>(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
        assert!(matches!(
            "bmp".parse::<OutputFormat>(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
        assert!(matches!(
            "cmyk".parse::<Channels>(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_defaults_match_vendor_defaults() {
        let options = RemovalOptions::default();
        assert_eq!(options.size, OutputSize::Regular);
        assert_eq!(options.foreground_type, ForegroundType::Auto);
        assert_eq!(options.type_level, TypeLevel::None);
        assert_eq!(options.format, OutputFormat::Auto);
        assert_eq!(options.roi, "0 0 100% 100%");
        assert_eq!(options.channels, Channels::Rgba);
        assert!(!options.shadow);
        assert!(options.semitransparency);
        assert_eq!(options.output_path, Some(PathBuf::from("no-bg.png")));
        assert!(!options.return_bytes);
    }

    fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn test_boolean_flags_are_string_literals() {
        let options = RemovalOptions::builder()
            .shadow(true)
            .semitransparency(false)
            .build();
        let fields = options.form_fields();
        assert_eq!(field(&fields, "add_shadow"), Some("true"));
        assert_eq!(field(&fields, "semitransparency"), Some("false"));
        assert_eq!(field(&fields, "crop"), Some("false"));
    }

    #[test]
    fn test_crop_enabled_by_nonempty_margin() {
        let options = RemovalOptions::builder().crop_margin("10px").build();
        let fields = options.form_fields();
        assert_eq!(field(&fields, "crop"), Some("true"));
        assert_eq!(field(&fields, "crop_margin"), Some("10px"));

        let no_crop = RemovalOptions::default().form_fields();
        assert_eq!(field(&no_crop, "crop"), Some("false"));
        assert_eq!(field(&no_crop, "crop_margin"), None);

        // Empty margin keeps cropping disabled but still passes through.
        let mut options = RemovalOptions::default();
        options.crop_margin = Some(String::new());
        let fields = options.form_fields();
        assert_eq!(field(&fields, "crop"), Some("false"));
        assert_eq!(field(&fields, "crop_margin"), Some(""));
    }

    #[test]
    fn test_background_fields_are_exclusive() {
        let color = RemovalOptions::builder()
            .background(Background::color("81d4fa"))
            .build()
            .form_fields();
        assert_eq!(field(&color, "bg_color"), Some("81d4fa"));
        assert_eq!(field(&color, "bg_image_url"), None);

        let url = RemovalOptions::builder()
            .background(Background::url("https://example.com/bg.jpg"))
            .build()
            .form_fields();
        assert_eq!(
            field(&url, "bg_image_url"),
            Some("https://example.com/bg.jpg")
        );
        assert_eq!(field(&url, "bg_color"), None);

        // A file background is a multipart part, never a plain field.
        let file = RemovalOptions::builder()
            .background(Background::file("bg.png"))
            .build()
            .form_fields();
        assert_eq!(field(&file, "bg_color"), None);
        assert_eq!(field(&file, "bg_image_url"), None);
    }

    #[test]
    fn test_require_consumer() {
        assert!(RemovalOptions::default().require_consumer().is_ok());

        let bytes_only = RemovalOptions::builder()
            .no_output_file()
            .return_bytes(true)
            .build();
        assert!(bytes_only.require_consumer().is_ok());

        let neither = RemovalOptions::builder().no_output_file().build();
        assert!(matches!(
            neither.require_consumer(),
            Err(RemoveBgError::InvalidArgument(_))
        ));
    }
}
