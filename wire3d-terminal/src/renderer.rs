/// Character-grid line rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Segment2D, Viewport};

/// Renders projected wireframe segments into a grid of terminal cells
pub struct CellRenderer {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl CellRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// One grid row as text
    pub fn row(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width].iter().collect()
    }

    pub fn render_segments(&mut self, segments: &[Segment2D], viewport: &Viewport) {
        for segment in segments {
            self.draw_segment(segment, viewport);
        }
    }

    /// Rasterize one segment given in viewport coordinates.
    ///
    /// The segment is clipped to the grid first, so endpoints thrown far
    /// off screen by the near-plane clamp cost nothing extra.
    pub fn draw_segment(&mut self, segment: &Segment2D, viewport: &Viewport) {
        if self.width == 0 || self.height == 0 || !segment.is_finite() {
            return;
        }

        let start = viewport.to_screen(segment.start.0, segment.start.1, self.width, self.height);
        let end = viewport.to_screen(segment.end.0, segment.end.1, self.width, self.height);
        let glyph = line_glyph(end.0 - start.0, end.1 - start.1);

        let bounds = ((self.width - 1) as f64, (self.height - 1) as f64);
        if let Some((p0, p1)) = clip_to_grid(start, end, bounds) {
            self.bresenham(
                (p0.0.round() as i64, p0.1.round() as i64),
                (p1.0.round() as i64, p1.1.round() as i64),
                glyph,
            );
        }
    }

    fn bresenham(&mut self, from: (i64, i64), to: (i64, i64), glyph: char) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, glyph);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.cells[idx] = glyph;
        }
    }

    /// Write the grid with its top-left corner at `(left, top)`
    pub fn draw<W: Write>(&self, writer: &mut W, left: u16, top: u16) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(Color::Green))?;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(left, top + y as u16))?;
            writer.queue(Print(self.row(y)))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a character that follows the on-screen slope (y grows downward)
fn line_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `[0, max_x] x [0, max_y]`
fn clip_to_grid(
    start: (f64, f64),
    end: (f64, f64),
    (max_x, max_y): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, start.0),
        (dx, max_x - start.0),
        (-dy, start.1),
        (dy, max_y - start.1),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (start.0 + t0 * dx, start.1 + t0 * dy),
        (start.0 + t1 * dx, start.1 + t1 * dy),
    ))
}
