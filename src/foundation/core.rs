use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, BezPath, Point};

/// Logical poster width in inches.
pub const CANVAS_WIDTH_IN: f64 = 6.0;
/// Logical poster height in inches.
pub const CANVAS_HEIGHT_IN: f64 = 8.0;

const MAX_DIM: u32 = 16_384;

/// Straight (non-premultiplied) color with every channel in `[0, 1]`.
///
/// Construct it once at the boundary, either from floats ([`Rgb::new`]) or from a `#RRGGBB`
/// string ([`Rgb::from_hex`]). Everything downstream of the config trusts the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> PosterResult<Self> {
        for (name, v) in [("r", r), ("g", g), ("b", b)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(PosterError::invalid_config(format!(
                    "color channel {name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(Self { r, g, b })
    }

    /// Crate-internal constructor for values already known to be in range.
    pub(crate) const fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> PosterResult<Self> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| {
                PosterError::invalid_config(format!(
                    "hex color must be #RRGGBB (case-insensitive), got \"{s}\""
                ))
            })?;

        let byte = |i: usize| -> PosterResult<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| PosterError::invalid_config(format!("invalid hex byte in \"{s}\"")))
        };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b)
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), 255]
    }

}

/// Written as `#RRGGBB` when that string reads back to the same value, otherwise as `{r, g, b}`.
impl serde::Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct as _;

        let hex = self.to_hex();
        if Rgb::from_hex(&hex).is_ok_and(|c| c == *self) {
            return serializer.serialize_str(&hex);
        }
        let mut st = serializer.serialize_struct("Rgb", 3)?;
        st.serialize_field("r", &self.r)?;
        st.serialize_field("g", &self.g)?;
        st.serialize_field("b", &self.b)?;
        st.end()
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj { r: f64, g: f64, b: f64 },
            Arr([f64; 3]),
        }

        let parsed = match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Rgb::from_hex(&s),
            Repr::Obj { r, g, b } => Rgb::new(r, g, b),
            Repr::Arr([r, g, b]) => Rgb::new(r, g, b),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Pixel size of the 6x8 inch poster at a given density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn at_dpi(dpi: f64) -> PosterResult<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(PosterError::invalid_config(format!(
                "dpi must be finite and > 0, got {dpi}"
            )));
        }
        let width = (CANVAS_WIDTH_IN * dpi).round().max(1.0);
        let height = (CANVAS_HEIGHT_IN * dpi).round().max(1.0);
        if width > f64::from(MAX_DIM) || height > f64::from(MAX_DIM) {
            return Err(PosterError::invalid_config(format!(
                "poster size too large at {dpi} dpi: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn dpi(self) -> f64 {
        f64::from(self.width) / CANVAS_WIDTH_IN
    }

    /// Maps normalized poster space (origin bottom-left, y up) onto pixels (origin top-left).
    pub fn data_to_pixels(self) -> Affine {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        Affine::new([w, 0.0, 0.0, -h, 0.0, h])
    }
}
