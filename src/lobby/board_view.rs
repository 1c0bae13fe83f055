//! Text rendering of pegs and disks.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::games::hanoi::{Disk, Peg};

/// Disk colors, smallest first; larger puzzles cycle through them.
const DISK_COLORS: [Color; 7] = [
    Color::Red,
    Color::LightRed,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

const POLE: &str = "│";
const DISK: &str = "█";

/// Width in cells of a disk of the given size.
pub fn disk_width(disk: Disk) -> usize {
    2 * usize::from(disk) + 1
}

/// Color of a disk of the given size.
pub fn disk_color(disk: Disk) -> Color {
    DISK_COLORS[(usize::from(disk).saturating_sub(1)) % DISK_COLORS.len()]
}

/// Renders a peg as `height` rows, top row first, each `disk_width(max_disk)` cells wide.
///
/// Rows above the stack show the bare pole.
pub fn peg_lines(peg: &Peg, height: usize, max_disk: Disk) -> Vec<Line<'static>> {
    let full = disk_width(max_disk);
    (0..height)
        .rev()
        .map(|level| match peg.disks().get(level) {
            Some(&disk) => centered(DISK.repeat(disk_width(disk)), disk_width(disk), full)
                .style(Style::default().fg(disk_color(disk))),
            None => centered(POLE.to_string(), 1, full).style(Style::default().fg(Color::DarkGray)),
        })
        .collect()
}

fn centered(body: String, body_width: usize, full: usize) -> Line<'static> {
    let pad = full.saturating_sub(body_width) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::raw(body),
        Span::raw(" ".repeat(pad)),
    ])
}
