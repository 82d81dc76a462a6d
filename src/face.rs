use crate::clock::AngleState;
use crate::constants::{HOUR_MARKS, REFERENCE_FACE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn polar(self, distance: f32, angle: f64) -> Self {
        Self {
            x: self.x + distance * angle.cos() as f32,
            y: self.y + distance * angle.sin() as f32,
        }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xFFE5_3935);
    pub const GREEN: Color = Color(0xFF43_A047);
    pub const BACKGROUND: Color = Color(0xFF26_3238);

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacePart {
    OuterRing,
    HourMark { major: bool },
    InnerRing,
    Center,
    HourHand,
    MinuteHand,
    SecondHand,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// A ring when `stroke` is set, a filled disc otherwise.
    Circle {
        part: FacePart,
        center: Point,
        radius: f32,
        stroke: Option<f32>,
        color: Color,
    },
    Line {
        part: FacePart,
        start: Point,
        end: Point,
        width: f32,
        color: Color,
    },
}

impl Primitive {
    pub fn part(&self) -> FacePart {
        match self {
            Primitive::Circle { part, .. } | Primitive::Line { part, .. } => *part,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Primitive::Circle { color, .. } | Primitive::Line { color, .. } => *color,
        }
    }

    /// A filled disc counts as a stroke as wide as the disc.
    pub fn stroke_width(&self) -> f32 {
        match *self {
            Primitive::Circle {
                stroke: Some(width),
                ..
            } => width,
            Primitive::Circle {
                radius,
                stroke: None,
                ..
            } => radius * 2.0,
            Primitive::Line { width, .. } => width,
        }
    }
}

/// Measurements for a face of [`REFERENCE_FACE_SIZE`]; [`ClockFace`] scales them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceStyle {
    pub outer_ring_width: f32,
    pub mark_outer_inset: f32,
    pub mark_inner_inset: f32,
    pub major_mark_width: f32,
    pub minor_mark_width: f32,
    pub inner_ring_inset: f32,
    pub inner_ring_width: f32,
    pub center_radius: f32,
    pub hour_hand_width: f32,
    pub minute_hand_width: f32,
    pub second_hand_width: f32,
    /// How much shorter the minute and second hands are than the ring they reach.
    pub hand_inset: f32,
    pub dial_color: Color,
    pub hour_hand_color: Color,
    pub minute_hand_color: Color,
    pub second_hand_color: Color,
    pub background: Color,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            outer_ring_width: 2.0,
            mark_outer_inset: 6.0,
            mark_inner_inset: 18.0,
            major_mark_width: 4.0,
            minor_mark_width: 2.0,
            inner_ring_inset: 22.0,
            inner_ring_width: 1.0,
            center_radius: 4.0,
            hour_hand_width: 3.0,
            minute_hand_width: 2.0,
            second_hand_width: 1.0,
            hand_inset: 2.0,
            dial_color: Color::RED,
            hour_hand_color: Color::GREEN,
            minute_hand_color: Color::GREEN,
            second_hand_color: Color::RED,
            background: Color::BACKGROUND,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockFace {
    size: f32,
    style: FaceStyle,
}

impl ClockFace {
    pub fn new(size: f32, style: FaceStyle) -> Self {
        Self { size, style }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    fn scale(&self, value: f32) -> f32 {
        value * self.size / REFERENCE_FACE_SIZE
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn inner_ring_radius(&self) -> f32 {
        self.radius() - self.scale(self.style.inner_ring_inset)
    }

    pub fn hour_hand_length(&self) -> f32 {
        self.inner_ring_radius() * 3.0 / 4.0
    }

    pub fn minute_hand_length(&self) -> f32 {
        self.inner_ring_radius() - self.scale(self.style.hand_inset)
    }

    pub fn second_hand_length(&self) -> f32 {
        self.radius() - self.scale(self.style.mark_outer_inset) - self.scale(self.style.hand_inset)
    }

    pub fn primitives(&self, angles: &AngleState) -> Vec<Primitive> {
        let style = &self.style;
        let center = self.center();
        let radius = self.radius();
        let mut out = Vec::with_capacity(HOUR_MARKS + 6);

        out.push(Primitive::Circle {
            part: FacePart::OuterRing,
            center,
            radius,
            stroke: Some(self.scale(style.outer_ring_width)),
            color: style.dial_color,
        });

        let mark_outer = radius - self.scale(style.mark_outer_inset);
        let mark_inner = radius - self.scale(style.mark_inner_inset);
        for i in 0..HOUR_MARKS {
            let angle = (30.0 * i as f64).to_radians();
            let major = i % 3 == 0;
            out.push(Primitive::Line {
                part: FacePart::HourMark { major },
                start: center.polar(mark_inner, angle),
                end: center.polar(mark_outer, angle),
                width: self.scale(if major {
                    style.major_mark_width
                } else {
                    style.minor_mark_width
                }),
                color: style.dial_color,
            });
        }

        out.push(Primitive::Circle {
            part: FacePart::InnerRing,
            center,
            radius: self.inner_ring_radius(),
            stroke: Some(self.scale(style.inner_ring_width)),
            color: style.dial_color,
        });
        out.push(Primitive::Circle {
            part: FacePart::Center,
            center,
            radius: self.scale(style.center_radius),
            stroke: None,
            color: style.hour_hand_color,
        });

        let radians = angles.to_radians();
        let hands = [
            (
                FacePart::HourHand,
                radians.hour,
                self.hour_hand_length(),
                style.hour_hand_width,
                style.hour_hand_color,
            ),
            (
                FacePart::MinuteHand,
                radians.minute,
                self.minute_hand_length(),
                style.minute_hand_width,
                style.minute_hand_color,
            ),
            (
                FacePart::SecondHand,
                radians.second,
                self.second_hand_length(),
                style.second_hand_width,
                style.second_hand_color,
            ),
        ];
        for (part, angle, length, width, color) in hands {
            out.push(Primitive::Line {
                part,
                start: center,
                end: center.polar(length, angle),
                width: self.scale(width),
                color,
            });
        }

        out
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(REFERENCE_FACE_SIZE, FaceStyle::default())
    }
}
