//! RGB, CMYK and HSV color triples and the conversions between them.
//!
//! CMYK components and HSV saturation/value are percentages (0–100); hue is
//! in degrees and cyclic. Going to bytes truncates, so a round trip through
//! CMYK or HSV lands within one step of the original on every channel.

/// An 8-bit RGB triple.
pub type Rgb = rgb::RGB8;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    /// Degrees, `[0, 360)` after normalization.
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Cmyk {
    pub const fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        rgb_to_cmyk(rgb)
    }

    pub fn to_rgb(self) -> Rgb {
        cmyk_to_rgb(self)
    }
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        rgb_to_hsv(rgb)
    }

    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
}

impl From<Rgb> for Cmyk {
    fn from(rgb: Rgb) -> Self {
        rgb_to_cmyk(rgb)
    }
}

impl From<Cmyk> for Rgb {
    fn from(cmyk: Cmyk) -> Self {
        cmyk_to_rgb(cmyk)
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        rgb_to_hsv(rgb)
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv_to_rgb(hsv)
    }
}

impl From<Cmyk> for Hsv {
    fn from(cmyk: Cmyk) -> Self {
        cmyk_to_hsv(cmyk)
    }
}

impl From<Hsv> for Cmyk {
    fn from(hsv: Hsv) -> Self {
        hsv_to_cmyk(hsv)
    }
}

#[inline]
fn unit(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

/// `as` saturates, so out-of-range inputs pin to 0 or 255.
#[inline]
fn to_channel(v: f64) -> u8 {
    v as u8
}

pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let (r, g, b) = (unit(rgb.r), unit(rgb.g), unit(rgb.b));
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }
    let ink = |x: f64| (1.0 - x - k) / (1.0 - k) * 100.0;
    Cmyk::new(ink(r), ink(g), ink(b), k * 100.0)
}

pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let key = 1.0 - cmyk.k / 100.0;
    let channel = |ink: f64| to_channel(255.0 * (1.0 - ink / 100.0) * key);
    Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let (r, g, b) = (unit(rgb.r), unit(rgb.g), unit(rgb.b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }

    let s = if max == 0.0 { 0.0 } else { delta / max };
    Hsv::new(h, s * 100.0, max * 100.0)
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = hsv.h.rem_euclid(360.0);
    let s = hsv.s.clamp(0.0, 100.0) / 100.0;
    let v = hsv.v.clamp(0.0, 100.0) / 100.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb::new(
        to_channel((r + m) * 255.0),
        to_channel((g + m) * 255.0),
        to_channel((b + m) * 255.0),
    )
}

pub fn cmyk_to_hsv(cmyk: Cmyk) -> Hsv {
    rgb_to_hsv(cmyk_to_rgb(cmyk))
}

pub fn hsv_to_cmyk(hsv: Hsv) -> Cmyk {
    rgb_to_cmyk(hsv_to_rgb(hsv))
}
