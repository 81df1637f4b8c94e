//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - assigned fraction vs density: `*`
//! - fiber usage vs density: `+`
//!
//! Both series live in `[0, 1]`, so the y-axis is fixed.

use crate::domain::SweepPoint;

/// Render a density sweep.
pub fn render_sweep_plot(points: &[SweepPoint], width: usize, height: usize) -> String {
    let width = width.max(5);
    let height = height.max(3);

    let (d_min, d_max) = density_range(points).unwrap_or((0.0, 1.0));
    let mut grid = vec![vec![' '; width]; height];

    // Fraction first so it wins where the two series overlap.
    let fraction: Vec<(f64, f64)> = points.iter().map(|p| (p.density, p.assigned_fraction)).collect();
    let usage: Vec<(f64, f64)> = points.iter().map(|p| (p.density, p.fiber_usage)).collect();
    draw_series(&mut grid, &fraction, d_min, d_max, '*');
    draw_series(&mut grid, &usage, d_min, d_max, '+');

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: density=[{d_min:.2}, {d_max:.2}] | y=[0, 1] | * assigned fraction, + fiber usage\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn density_range(points: &[SweepPoint]) -> Option<(f64, f64)> {
    let mut min_d = f64::INFINITY;
    let mut max_d = f64::NEG_INFINITY;
    for p in points {
        min_d = min_d.min(p.density);
        max_d = max_d.max(p.density);
    }
    if min_d.is_finite() && max_d.is_finite() && max_d > min_d {
        Some((min_d, max_d))
    } else {
        None
    }
}

fn map_x(d: f64, d_min: f64, d_max: f64, width: usize) -> usize {
    let u = ((d - d_min) / (d_max - d_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, height: usize) -> usize {
    let u = y.clamp(0.0, 1.0);
    // y=1 -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(grid: &mut [Vec<char>], series: &[(f64, f64)], d_min: f64, d_max: f64, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(d, y) in series {
        if !y.is_finite() {
            continue;
        }
        let x = map_x(d, d_min, d_max, width);
        let yy = map_y(y, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, ch),
            None => {
                if grid[yy][x] == ' ' {
                    grid[yy][x] = ch;
                }
            }
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Never overwrites non-blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(density: f64, assigned_fraction: f64, fiber_usage: f64) -> SweepPoint {
        SweepPoint {
            density,
            total_targets: 0,
            assigned_fibers: 0,
            assigned_fraction,
            fiber_usage,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![point(0.0, 0.0, 0.5), point(100.0, 1.0, 0.5)];
        let txt = render_sweep_plot(&points, 5, 3);
        let expected = concat!(
            "Plot: density=[0.00, 100.00] | y=[0, 1] | * assigned fraction, + fiber usage\n",
            "   **\n",
            "+**++\n",
            "*    \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn plot_without_points_is_blank_grid() {
        let txt = render_sweep_plot(&[], 6, 3);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1..].iter().all(|l| l.trim().is_empty()));
    }
}
