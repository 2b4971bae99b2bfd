//! Discrete slider: `Columns: 4  ──┼──●──┼──`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Width reserved for the `"Columns: 4"` label.
const LABEL_WIDTH: u16 = 12;

/// Integer slider over `min..=max`, one stop per value.
#[derive(Debug, Clone, Copy)]
pub struct Slider<'a> {
    pub label: &'a str,
    pub value: usize,
    pub min: usize,
    pub max: usize,
}

impl<'a> Slider<'a> {
    pub fn new(label: &'a str, value: usize, min: usize, max: usize) -> Self {
        Self {
            label,
            value,
            min,
            max,
        }
    }

    /// Area of the track within the slider's full area.
    pub fn track_area(area: Rect) -> Rect {
        let label = LABEL_WIDTH.min(area.width);
        Rect::new(area.x + label, area.y, area.width - label, area.height.min(1))
    }

    /// Column within the track for `value`.
    fn stop_column(&self, track_width: u16, value: usize) -> u16 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 || track_width <= 1 {
            return 0;
        }
        let fraction = (value.clamp(self.min, self.max) - self.min) as f32 / span as f32;
        (fraction * f32::from(track_width - 1)).round() as u16
    }

    /// Value under terminal column `col`, or `None` if it is off the track.
    pub fn value_at(&self, area: Rect, col: u16) -> Option<usize> {
        let track = Self::track_area(area);
        if track.width == 0 || col < track.x || col >= track.right() {
            return None;
        }
        let span = self.max.saturating_sub(self.min);
        if span == 0 || track.width == 1 {
            return Some(self.min);
        }
        let fraction = f32::from(col - track.x) / f32::from(track.width - 1);
        Some(self.min + (fraction * span as f32).round() as usize)
    }
}

impl Widget for Slider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let label = format!("{}: {}", self.label, self.value);
        buf.set_stringn(
            area.x,
            area.y,
            &label,
            LABEL_WIDTH.min(area.width) as usize,
            Theme::slider_label_style(),
        );

        let track = Self::track_area(area);
        if track.width == 0 {
            return;
        }
        let mut cells = vec!["─"; track.width as usize];
        for value in self.min..=self.max {
            cells[self.stop_column(track.width, value) as usize] = "┼";
        }
        let thumb = self.stop_column(track.width, self.value) as usize;

        let spans: Vec<Span> = cells
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i == thumb {
                    Span::styled("●", Theme::slider_thumb_style())
                } else {
                    Span::styled(c, Theme::slider_track_style())
                }
            })
            .collect();
        buf.set_line(track.x, track.y, &Line::from(spans), track.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Slider<'static> {
        Slider::new("Columns", 4, 2, 6)
    }

    #[test]
    fn clicks_map_to_nearest_stop() {
        // Track spans columns 12..=20 (9 cells, 2 cells per step).
        let area = Rect::new(0, 0, 21, 1);
        let s = slider();
        assert_eq!(s.value_at(area, 12), Some(2));
        assert_eq!(s.value_at(area, 18), Some(5));
        assert_eq!(s.value_at(area, 14), Some(3));
        assert_eq!(s.value_at(area, 16), Some(4));
        assert_eq!(s.value_at(area, 20), Some(6));
        assert_eq!(s.value_at(area, 5), None);
        assert_eq!(s.value_at(area, 21), None);
    }

    #[test]
    fn renders_label_and_thumb() {
        let area = Rect::new(0, 0, 21, 1);
        let mut buf = Buffer::empty(area);
        slider().render(area, &mut buf);
        let row: String = (0..21u16).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "Columns: 4  ┼─┼─●─┼─┼");
    }

    #[test]
    fn degenerate_range_pins_to_min() {
        let s = Slider::new("Rows", 3, 3, 3);
        assert_eq!(s.value_at(Rect::new(0, 0, 20, 1), 15), Some(3));
    }
}
