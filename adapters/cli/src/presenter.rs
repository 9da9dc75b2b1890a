//! Terminal presenters for Tilemerge scenes.

use std::io::Write;

use anyhow::{Context, Result};
use tilemerge_rendering::{Color, LedFrame, Presenter, Scene, TilePalette};

const LOW_LIGHT_DARKENING: f32 = 0.6;

/// Draws scenes as blocks of 24-bit ANSI background colors, two terminal
/// columns per LED so pixels look square.
#[derive(Debug)]
pub(crate) struct LedPresenter<W> {
    out: W,
    palette: TilePalette,
    low_light_palette: TilePalette,
    low_light: bool,
    display_width: u32,
    display_height: u32,
}

impl<W: Write> LedPresenter<W> {
    /// Creates a presenter for a display of the provided size.
    pub(crate) fn new(out: W, palette: TilePalette, display_width: u32, display_height: u32) -> Self {
        Self {
            out,
            low_light_palette: palette.darken(LOW_LIGHT_DARKENING),
            palette,
            low_light: false,
            display_width,
            display_height,
        }
    }
}

impl<W: Write> Presenter for LedPresenter<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let palette = if self.low_light {
            &self.low_light_palette
        } else {
            &self.palette
        };
        let frame = LedFrame::rasterize(scene, palette, self.display_width, self.display_height)?;

        for row in frame.rows() {
            for pixel in row {
                write_pixel(&mut self.out, *pixel)?;
            }
            writeln!(self.out, "\x1b[0m")?;
        }
        write_status(&mut self.out, scene)?;
        self.out.flush().context("failed to flush terminal output")
    }

    fn toggle_low_light(&mut self) {
        self.low_light = !self.low_light;
    }
}

fn write_pixel<W: Write>(out: &mut W, color: Color) -> Result<()> {
    write!(
        out,
        "\x1b[48;2;{};{};{}m  ",
        color.red, color.green, color.blue
    )
    .context("failed to write LED pixel")
}

/// Prints tile values in a right-aligned table.
#[derive(Debug)]
pub(crate) struct PlainPresenter<W> {
    out: W,
}

impl<W: Write> PlainPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for PlainPresenter<W> {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        for row in scene.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|tile| match tile {
                    Some(tile) => format!("{:>6}", tile.value()),
                    None => format!("{:>6}", "."),
                })
                .collect();
            writeln!(self.out, "{}", line.concat())?;
        }
        write_status(&mut self.out, scene)?;
        self.out.flush().context("failed to flush terminal output")
    }
}

fn write_status<W: Write>(out: &mut W, scene: &Scene) -> Result<()> {
    let best = scene.best_tile.map_or(0, |tile| tile.value());
    writeln!(
        out,
        "Score: {}  Moves: {}  Best tile: {}",
        scene.score, scene.move_count, best
    )
    .context("failed to write status line")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge_core::Grid;
    use tilemerge_world::GameState;

    fn scene(rows: &[&[u64]]) -> Scene {
        let grid = Grid::from_rows(rows).expect("valid rows");
        Scene::from_state(&GameState::from_parts(grid, 20, 4).expect("valid state"))
    }

    #[test]
    fn plain_presenter_prints_values_and_status() {
        let mut out = Vec::new();
        PlainPresenter::new(&mut out)
            .present(&scene(&[&[2, 0], &[16, 4]]))
            .expect("present succeeds");

        let text = String::from_utf8(out).expect("utf-8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "     2     .");
        assert_eq!(lines[1], "    16     4");
        assert_eq!(lines[2], "Score: 20  Moves: 4  Best tile: 16");
    }

    #[test]
    fn led_presenter_draws_one_line_per_pixel_row() {
        let mut out = Vec::new();
        LedPresenter::new(&mut out, TilePalette::classic(), 4, 4)
            .present(&scene(&[&[2, 0], &[0, 0]]))
            .expect("present succeeds");

        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("\x1b[48;2;255;255;255m  \x1b[48;2;255;255;255m  \x1b[48;2;0;0;0m  "));
    }

    #[test]
    fn low_light_darkens_output() {
        let mut out = Vec::new();
        let mut presenter = LedPresenter::new(&mut out, TilePalette::classic(), 2, 2);
        presenter.toggle_low_light();
        presenter
            .present(&scene(&[&[2, 0], &[0, 0]]))
            .expect("present succeeds");
        drop(presenter);

        let text = String::from_utf8(out).expect("utf-8 output");
        assert!(text.starts_with("\x1b[48;2;102;102;102m  "));
    }

    #[test]
    fn led_presenter_rejects_indivisible_display() {
        let mut out = Vec::new();
        let result = LedPresenter::new(&mut out, TilePalette::classic(), 8, 8)
            .present(&scene(&[&[2, 0, 0], &[0, 0, 0], &[0, 0, 0]]));
        assert!(result.is_err());
    }
}
