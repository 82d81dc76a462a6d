use std::io::Write;

use tokio::sync::watch;

use crate::clock::AngleState;
use crate::constants::REFERENCE_FACE_SIZE;
use crate::face::{ClockFace, Color, FacePart, FaceStyle, Point, Primitive};
use crate::prelude::*;

pub trait ClockRenderer {
    type Error;

    fn render(&mut self, angles: &AngleState) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
pub struct LogRenderer;

impl ClockRenderer for LogRenderer {
    type Error = ClockError;

    fn render(&mut self, angles: &AngleState) -> Result<(), Self::Error> {
        info!(
            "Hand angles (deg): hour={:.1}, minute={:.1}, second={:.1}",
            angles.hour, angles.minute, angles.second
        );
        Ok(())
    }
}

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";
const RESET: &str = "\x1b[0m";
const HEADING: &str = "Current Time";

type Cell = Option<(char, Color)>;

/// Draws the face as characters.
///
/// The grid is `rows` tall and twice as wide, since terminal cells are
/// roughly twice as tall as they are wide.
pub struct TextRenderer<W> {
    out: W,
    face: ClockFace,
    rows: usize,
    clear: bool,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, rows: u16) -> Self {
        let rows = usize::from(rows);
        Self {
            out,
            face: ClockFace::new(rows as f32, FaceStyle::default()),
            rows,
            clear: false,
            color: false,
        }
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// ANSI truecolour from the face style.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn columns(&self) -> usize {
        self.rows * 2
    }

    pub fn frame(&self, angles: &AngleState) -> Vec<String> {
        let mut grid: Vec<Vec<Cell>> = vec![vec![None; self.columns()]; self.rows];
        let primitives = self.face.primitives(angles);
        // at this resolution the hands would cover the centre dot, so it goes on top
        let (center, rest): (Vec<_>, Vec<_>) = primitives
            .into_iter()
            .partition(|p| p.part() == FacePart::Center);
        for primitive in rest.iter().chain(center.iter()) {
            let reference_width =
                primitive.stroke_width() * REFERENCE_FACE_SIZE / self.face.size();
            let glyph = glyph(primitive.part(), Weight::of(reference_width));
            for point in samples(primitive) {
                plot(&mut grid, point, (glyph, primitive.color()));
            }
        }
        grid.into_iter().map(|row| self.line(&row)).collect()
    }

    fn line(&self, row: &[Cell]) -> String {
        if !self.color {
            let text: String = row
                .iter()
                .map(|cell| cell.map_or(' ', |(glyph, _)| glyph))
                .collect();
            return text.trim_end().to_string();
        }
        let mut out = background(self.face.style().background);
        let mut current = None;
        for cell in row {
            match *cell {
                Some((glyph, color)) => {
                    if current != Some(color) {
                        out.push_str(&foreground(color));
                        current = Some(color);
                    }
                    out.push(glyph);
                }
                None => out.push(' '),
            }
        }
        out.push_str(RESET);
        out
    }

    fn heading(&self) -> String {
        format!("{HEADING:^width$}", width = self.columns())
            .trim_end()
            .to_string()
    }
}

impl<W: Write> ClockRenderer for TextRenderer<W> {
    type Error = ClockError;

    fn render(&mut self, angles: &AngleState) -> Result<(), Self::Error> {
        let frame = self.frame(angles);
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        writeln!(self.out, "{}", self.heading())?;
        for line in frame {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{angles}")?;
        self.out.flush()?;
        Ok(())
    }
}

fn plot(grid: &mut [Vec<Cell>], point: Point, cell: (char, Color)) {
    let col = (point.x * 2.0).floor();
    let row = point.y.floor();
    if col < 0.0 || row < 0.0 {
        return;
    }
    let (col, row) = (col as usize, row as usize);
    if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
        *slot = Some(cell);
    }
}

fn foreground(color: Color) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[38;2;{r};{g};{b}m")
}

fn background(color: Color) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[48;2;{r};{g};{b}m")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Weight {
    Light,
    Regular,
    Heavy,
}

impl Weight {
    /// `width` is measured on the reference face.
    fn of(width: f32) -> Weight {
        if width >= 2.5 {
            Weight::Heavy
        } else if width >= 1.5 {
            Weight::Regular
        } else {
            Weight::Light
        }
    }
}

fn glyph(part: FacePart, weight: Weight) -> char {
    match (part, weight) {
        (FacePart::Center, _) => '@',
        (FacePart::OuterRing | FacePart::InnerRing, Weight::Heavy) => 'O',
        (FacePart::OuterRing | FacePart::InnerRing, Weight::Regular) => 'o',
        (FacePart::OuterRing | FacePart::InnerRing, Weight::Light) => '.',
        (FacePart::HourMark { .. }, Weight::Heavy) => '#',
        (FacePart::HourMark { .. }, Weight::Regular) => '+',
        (FacePart::HourMark { .. }, Weight::Light) => '\'',
        (FacePart::HourHand, Weight::Heavy) => 'H',
        (FacePart::HourHand, _) => 'h',
        (FacePart::MinuteHand, Weight::Heavy) => 'M',
        (FacePart::MinuteHand, _) => 'm',
        (FacePart::SecondHand, Weight::Heavy) => 'S',
        (FacePart::SecondHand, _) => 's',
    }
}

fn samples(primitive: &Primitive) -> Vec<Point> {
    match *primitive {
        Primitive::Circle {
            center,
            radius,
            stroke: Some(_),
            ..
        } => {
            let steps = ((std::f32::consts::TAU * radius * 2.0).ceil() as usize).max(8);
            (0..steps)
                .map(|i| center.polar(radius, std::f64::consts::TAU * i as f64 / steps as f64))
                .collect()
        }
        Primitive::Circle {
            center,
            stroke: None,
            ..
        } => vec![center],
        Primitive::Line { start, end, .. } => {
            let steps = ((start.distance_to(end) * 2.0).ceil() as usize).max(1);
            (0..=steps)
                .map(|i| {
                    let t = i as f32 / steps as f32;
                    Point::new(
                        start.x + (end.x - start.x) * t,
                        start.y + (end.y - start.y) * t,
                    )
                })
                .collect()
        }
    }
}

/// Renders the current state, then every update, until the sender goes away
/// or `limit` frames have been drawn. Returns the number of frames.
pub async fn render_updates<R: ClockRenderer>(
    mut updates: watch::Receiver<AngleState>,
    renderer: &mut R,
    limit: Option<u64>,
) -> Result<u64, R::Error> {
    let mut rendered = 0u64;
    while limit.is_none_or(|limit| rendered < limit) {
        let angles = *updates.borrow_and_update();
        renderer.render(&angles)?;
        rendered += 1;
        if limit.is_some_and(|limit| rendered >= limit) {
            break;
        }
        if updates.changed().await.is_err() {
            debug!("Angle updates closed after {rendered} frames");
            break;
        }
    }
    Ok(rendered)
}
